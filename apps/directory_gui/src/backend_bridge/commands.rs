//! Backend commands queued from UI to backend worker.

use directory_client::SubmitRequest;
use shared::domain::EmployeeId;

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    LoadEmployees,
    SubmitForm {
        generation: u64,
        request: SubmitRequest,
    },
    DeleteEmployee {
        id: EmployeeId,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadEmployees => "load_employees",
            BackendCommand::SubmitForm { .. } => "submit_form",
            BackendCommand::DeleteEmployee { .. } => "delete_employee",
        }
    }
}
