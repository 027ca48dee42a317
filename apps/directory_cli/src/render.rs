use directory_client::{
    validation::FieldErrors,
    view::{CardView, DirectoryView, ListView, LOADING_MESSAGE},
};

pub fn card_lines(card: &CardView) -> Vec<String> {
    let mut lines = vec![format!("#{} {}", card.id, card.title)];
    lines.extend(
        card.details
            .iter()
            .map(|row| format!("  {}: {}", row.label, row.value)),
    );
    if let Some(error) = &card.error {
        lines.push(format!("  ! {error}"));
    }
    lines
}

pub fn directory_lines(view: &DirectoryView) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(banner) = &view.banner {
        lines.push(format!("error: {banner}"));
    }
    match &view.list {
        ListView::Loading => lines.push(LOADING_MESSAGE.to_string()),
        ListView::Empty { message } => lines.push((*message).to_string()),
        ListView::Cards { heading, cards } => {
            lines.push(heading.clone());
            for card in cards {
                lines.push(String::new());
                lines.extend(card_lines(card));
            }
        }
    }
    lines
}

pub fn field_error_lines(errors: &FieldErrors) -> Vec<String> {
    errors
        .iter()
        .map(|(field, message)| format!("  --{}: {message}", field.key().replace('_', "-")))
        .collect()
}
