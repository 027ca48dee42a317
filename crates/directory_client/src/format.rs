//! en-US display formatting for card fields.

use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};

pub const PLACEHOLDER: &str = "N/A";

/// Largest magnitude whose cents still fit in a `u128`.
pub const MAX_CURRENCY_AMOUNT: f64 = 1e36;

/// `$75,000.00`, or the placeholder when absent.
pub fn format_currency(amount: Option<f64>) -> String {
    let Some(amount) = amount.filter(|amount| amount.abs() <= MAX_CURRENCY_AMOUNT) else {
        return PLACEHOLDER.to_string();
    };

    let cents = (amount.abs() * 100.0).round() as u128;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{sign}${}.{:02}",
        (cents / 100).to_formatted_string(&Locale::en),
        cents % 100
    )
}

/// `January 15, 2023`, or the placeholder when absent.
pub fn format_long_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => PLACEHOLDER.to_string(),
    }
}
