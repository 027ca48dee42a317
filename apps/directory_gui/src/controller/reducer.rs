//! State transitions for the directory window.
//!
//! Both user intents and backend events are applied to the `Directory` here;
//! each returns the backend commands to queue next.

use directory_client::{ClientError, Directory, FormField};
use shared::domain::EmployeeId;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiIntent {
    Reload,
    OpenCreate,
    OpenEdit(EmployeeId),
    EditField(FormField, String),
    SubmitForm,
    DismissForm,
    RequestDelete(EmployeeId),
    ConfirmDelete,
    CancelDelete,
}

fn reload(directory: &mut Directory) -> Vec<BackendCommand> {
    directory.begin_load();
    vec![BackendCommand::LoadEmployees]
}

pub fn apply_intent(directory: &mut Directory, intent: UiIntent) -> Vec<BackendCommand> {
    match intent {
        UiIntent::Reload => {
            if directory.is_loading() {
                return Vec::new();
            }
            reload(directory)
        }
        UiIntent::OpenCreate => {
            directory.open_create();
            Vec::new()
        }
        UiIntent::OpenEdit(id) => {
            directory.open_edit(id);
            Vec::new()
        }
        UiIntent::EditField(field, value) => {
            if let Some(form) = directory.form_mut() {
                form.set_field(field, value);
            }
            Vec::new()
        }
        UiIntent::SubmitForm => match directory.begin_form_submit() {
            Some((generation, request)) => vec![BackendCommand::SubmitForm {
                generation,
                request,
            }],
            None => Vec::new(),
        },
        UiIntent::DismissForm => {
            directory.dismiss_form();
            Vec::new()
        }
        UiIntent::RequestDelete(id) => {
            directory.request_delete(id);
            Vec::new()
        }
        UiIntent::ConfirmDelete => match directory.confirm_delete() {
            Some(id) => vec![BackendCommand::DeleteEmployee { id }],
            None => Vec::new(),
        },
        UiIntent::CancelDelete => {
            directory.cancel_delete();
            Vec::new()
        }
    }
}

pub fn apply_event(
    directory: &mut Directory,
    status: &mut String,
    event: UiEvent,
) -> Vec<BackendCommand> {
    match event {
        UiEvent::Info(message) => {
            *status = message;
            Vec::new()
        }
        UiEvent::Error(err) => {
            *status = err.status_line();
            Vec::new()
        }
        UiEvent::EmployeesLoaded(result) => {
            directory.finish_load(result);
            *status = match directory.error() {
                Some(_) => "Load failed".to_string(),
                None => format!("Loaded {} employee(s)", directory.employees().len()),
            };
            Vec::new()
        }
        UiEvent::FormSubmitted { generation, result } => {
            if directory.finish_form_submit(generation, result) {
                *status = "Employee saved".to_string();
                reload(directory)
            } else {
                Vec::new()
            }
        }
        UiEvent::EmployeeDeleted { id, result } => {
            if directory.finish_delete(id, result) {
                *status = format!("Employee #{id} deleted");
                reload(directory)
            } else {
                Vec::new()
            }
        }
    }
}

/// Settles the state a command left pending when it could not be queued.
pub fn reject_command(directory: &mut Directory, cmd: BackendCommand, message: &str) {
    let err = ClientError::Network {
        message: message.to_string(),
    };
    match cmd {
        BackendCommand::LoadEmployees => directory.finish_load(Err(err)),
        BackendCommand::SubmitForm { generation, .. } => {
            directory.finish_form_submit(generation, Err(err));
        }
        BackendCommand::DeleteEmployee { id } => {
            directory.finish_delete(id, Err(err));
        }
    }
}
