//! UI/backend events and error modeling for desktop GUI controller.

use directory_client::ClientResult;
use shared::domain::{Employee, EmployeeId};

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    Error(UiError),
    EmployeesLoaded(ClientResult<Vec<Employee>>),
    FormSubmitted {
        generation: u64,
        result: ClientResult<Employee>,
    },
    EmployeeDeleted {
        id: EmployeeId,
        result: ClientResult<()>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    CommandQueue,
}

/// A failure outside the employees API itself; shown in the status bar.
#[derive(Debug, Clone)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    pub fn status_line(&self) -> String {
        let headline = match self.context {
            UiErrorContext::BackendStartup => "Backend worker startup failure",
            UiErrorContext::CommandQueue => "Backend unavailable",
        };
        format!("{headline}: {}", self.message)
    }
}
