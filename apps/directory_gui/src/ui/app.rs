use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use directory_client::{
    view::{CardView, ListView, LOADING_MESSAGE},
    Directory, EmployeeForm, FormField,
};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent,
    orchestration::dispatch_backend_command,
    reducer::{self, UiIntent},
};

const CARD_WIDTH: f32 = 280.0;
const FIELD_WIDTH: f32 = 260.0;

pub struct DirectoryApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    directory: Directory,
    status: String,
    api_base_url: String,
}

impl DirectoryApp {
    /// Builds the app and queues the initial load.
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        api_base_url: String,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            directory: Directory::new(),
            status: "Connecting...".to_string(),
            api_base_url,
        };
        app.apply_intents(vec![UiIntent::Reload]);
        app
    }

    fn dispatch_all(&mut self, commands: Vec<BackendCommand>) {
        for cmd in commands {
            if let Err(cmd) = dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
                reducer::reject_command(&mut self.directory, cmd, &self.status);
            }
        }
    }

    fn apply_intents(&mut self, intents: Vec<UiIntent>) {
        for intent in intents {
            let commands = reducer::apply_intent(&mut self.directory, intent);
            self.dispatch_all(commands);
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            let commands = reducer::apply_event(&mut self.directory, &mut self.status, event);
            self.dispatch_all(commands);
        }
    }

    fn show_top_bar(&self, ctx: &egui::Context, intents: &mut Vec<UiIntent>) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading("Employee Directory");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Add New Employee").clicked() {
                        intents.push(UiIntent::OpenCreate);
                    }
                    if ui
                        .add_enabled(!self.directory.is_loading(), egui::Button::new("Refresh"))
                        .clicked()
                    {
                        intents.push(UiIntent::Reload);
                    }
                });
            });
            ui.add_space(4.0);
        });
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(self.status.as_str());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(format!("API: {}", self.api_base_url));
                });
            });
        });
    }

    fn show_directory(&self, ctx: &egui::Context, intents: &mut Vec<UiIntent>) {
        let view = self.directory.view();
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(banner) = &view.banner {
                show_banner(ui, banner, intents);
                ui.add_space(8.0);
            }

            match &view.list {
                ListView::Loading => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(LOADING_MESSAGE);
                    });
                }
                ListView::Empty { message } => {
                    ui.add_space(24.0);
                    ui.vertical_centered(|ui| {
                        ui.label(*message);
                    });
                }
                ListView::Cards { heading, cards } => {
                    ui.heading(heading.as_str());
                    ui.add_space(6.0);
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            ui.horizontal_wrapped(|ui| {
                                for card in cards {
                                    show_card(ui, card, intents);
                                }
                            });
                        });
                }
            }
        });
    }

    fn show_form_window(&self, ctx: &egui::Context, intents: &mut Vec<UiIntent>) {
        let Some(form) = self.directory.form() else {
            return;
        };

        let mut open = true;
        egui::Window::new(form.title())
            .id(egui::Id::new("employee_form"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                show_form_fields(ui, form, intents);
                if let Some(error) = form.submit_error() {
                    let error_color = ui.visuals().error_fg_color;
                    ui.add_space(4.0);
                    ui.colored_label(error_color, error);
                }
                ui.separator();
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(
                            !form.is_submitting(),
                            egui::Button::new(form.submit_label()),
                        )
                        .clicked()
                    {
                        intents.push(UiIntent::SubmitForm);
                    }
                    if ui.button("Cancel").clicked() {
                        intents.push(UiIntent::DismissForm);
                    }
                });
            });

        if !open {
            intents.push(UiIntent::DismissForm);
        }
    }

    fn show_delete_confirmation(&self, ctx: &egui::Context, intents: &mut Vec<UiIntent>) {
        let Some(prompt) = self.directory.pending_delete_prompt() else {
            return;
        };

        egui::Window::new("Confirm Delete")
            .id(egui::Id::new("delete_confirmation"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(prompt);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        intents.push(UiIntent::ConfirmDelete);
                    }
                    if ui.button("Cancel").clicked() {
                        intents.push(UiIntent::CancelDelete);
                    }
                });
            });
    }
}

fn show_banner(ui: &mut egui::Ui, message: &str, intents: &mut Vec<UiIntent>) {
    egui::Frame::NONE
        .fill(egui::Color32::from_rgb(111, 53, 53))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Retry").clicked() {
                        intents.push(UiIntent::Reload);
                    }
                });
            });
        });
}

fn show_card(ui: &mut egui::Ui, card: &CardView, intents: &mut Vec<UiIntent>) {
    egui::Frame::group(ui.style())
        .corner_radius(8.0)
        .inner_margin(egui::Margin::same(10))
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(card.title.as_str()).strong().size(16.0));
                ui.add_space(4.0);
                for row in &card.details {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(format!("{}:", row.label)).weak());
                        ui.label(row.value.as_str());
                    });
                }
                if let Some(error) = &card.error {
                    let error_color = ui.visuals().error_fg_color;
                    ui.colored_label(error_color, error.as_str());
                }
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(card.edit_enabled, egui::Button::new("Edit"))
                        .clicked()
                    {
                        intents.push(UiIntent::OpenEdit(card.id));
                    }
                    if ui
                        .add_enabled(card.delete_enabled, egui::Button::new(card.delete_label))
                        .clicked()
                    {
                        intents.push(UiIntent::RequestDelete(card.id));
                    }
                });
            });
        });
}

fn show_form_fields(ui: &mut egui::Ui, form: &EmployeeForm, intents: &mut Vec<UiIntent>) {
    let error_color = ui.visuals().error_fg_color;
    egui::Grid::new("employee_form_fields")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            for field in FormField::ALL {
                if field.is_required() {
                    ui.label(format!("{} *", field.label()));
                } else {
                    ui.label(field.label());
                }

                ui.vertical(|ui| {
                    let mut value = form.values().get(field).to_string();
                    let mut edit = egui::TextEdit::singleline(&mut value).desired_width(FIELD_WIDTH);
                    if let Some(hint) = field_hint(field) {
                        edit = edit.hint_text(hint);
                    }
                    if ui.add_enabled(!form.is_submitting(), edit).changed() {
                        intents.push(UiIntent::EditField(field, value));
                    }
                    if let Some(error) = form.errors().get(field) {
                        ui.colored_label(error_color, error);
                    }
                });
                ui.end_row();
            }
        });
}

fn field_hint(field: FormField) -> Option<&'static str> {
    match field {
        FormField::Email => Some("name@example.com"),
        FormField::Phone => Some("+1 555 123 4567"),
        FormField::Salary => Some("75000"),
        FormField::HireDate => Some("YYYY-MM-DD"),
        FormField::Name | FormField::Department | FormField::Position => None,
    }
}

impl eframe::App for DirectoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let mut intents = Vec::new();
        self.show_top_bar(ctx, &mut intents);
        self.show_status_bar(ctx);
        self.show_directory(ctx, &mut intents);
        self.show_form_window(ctx, &mut intents);
        self.show_delete_confirmation(ctx, &mut intents);
        self.apply_intents(intents);

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
