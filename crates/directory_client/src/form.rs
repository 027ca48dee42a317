//! Create/edit form: `Idle -> Validating -> Submitting -> Succeeded | Failed`.

use shared::{
    domain::{Employee, EmployeeId},
    protocol::EmployeeDraft,
};
use tracing::{debug, info};

use crate::{
    error::{ClientError, ClientResult},
    validation::{self, FieldErrors, FormField, FormValues},
    EmployeeApi,
};

pub const SAVE_FAILED_MESSAGE: &str = "Failed to save employee";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(EmployeeId),
}

/// The single API call a valid submission turns into.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitRequest {
    Create(EmployeeDraft),
    Update { id: EmployeeId, draft: EmployeeDraft },
}

impl SubmitRequest {
    pub async fn execute(&self, api: &dyn EmployeeApi) -> ClientResult<Employee> {
        match self {
            SubmitRequest::Create(draft) => api.create(draft).await,
            SubmitRequest::Update { id, draft } => api.update(*id, draft).await,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Invalid(FieldErrors),
    /// A submission is already in flight.
    Busy,
    Saved(Employee),
    Failed(String),
}

impl SubmitOutcome {
    pub fn data_changed(&self) -> bool {
        matches!(self, SubmitOutcome::Saved(_))
    }

    pub fn should_close(&self) -> bool {
        matches!(self, SubmitOutcome::Saved(_))
    }
}

#[derive(Debug, Clone)]
pub struct EmployeeForm {
    mode: FormMode,
    values: FormValues,
    errors: FieldErrors,
    phase: FormPhase,
    submit_error: Option<String>,
}

impl EmployeeForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            values: FormValues::default(),
            errors: FieldErrors::default(),
            phase: FormPhase::Idle,
            submit_error: None,
        }
    }

    pub fn edit(employee: &Employee) -> Self {
        Self {
            mode: FormMode::Edit(employee.id),
            values: FormValues::from_employee(employee),
            ..Self::create()
        }
    }

    /// Points the form at another record (or at a new one), discarding all
    /// input, errors and submission state.
    pub fn retarget(&mut self, target: Option<&Employee>) {
        *self = match target {
            Some(employee) => Self::edit(employee),
            None => Self::create(),
        };
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add New Employee",
            FormMode::Edit(_) => "Edit Employee",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match (self.is_submitting(), self.mode) {
            (true, _) => "Saving...",
            (false, FormMode::Create) => "Create Employee",
            (false, FormMode::Edit(_)) => "Update Employee",
        }
    }

    /// Updates one field and clears its pending error.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        *self.values.get_mut(field) = value.into();
        self.errors.remove(field);
    }

    pub fn validate(&mut self) -> bool {
        self.phase = FormPhase::Validating;
        self.errors = validation::validate(&self.values);
        self.phase = FormPhase::Idle;
        self.errors.is_empty()
    }

    /// Validates and, when the input is clean, moves to `Submitting` and
    /// returns the request to run. Returns `None` while a submission is in
    /// flight or when any field error exists.
    pub fn begin_submit(&mut self) -> Option<SubmitRequest> {
        if self.is_submitting() {
            return None;
        }
        self.submit_error = None;
        self.phase = FormPhase::Validating;

        match validation::normalize(&self.values) {
            Ok(draft) => {
                self.errors.clear();
                self.phase = FormPhase::Submitting;
                Some(match self.mode {
                    FormMode::Create => SubmitRequest::Create(draft),
                    FormMode::Edit(id) => SubmitRequest::Update { id, draft },
                })
            }
            Err(errors) => {
                debug!(fields = %errors, "employee form blocked by validation");
                self.errors = errors;
                self.phase = FormPhase::Idle;
                None
            }
        }
    }

    pub fn finish_submit(&mut self, result: ClientResult<Employee>) -> SubmitOutcome {
        match result {
            Ok(employee) => {
                info!(employee_id = %employee.id, "employee saved");
                self.phase = FormPhase::Succeeded;
                SubmitOutcome::Saved(employee)
            }
            Err(err) => {
                let message = failure_message(&err);
                self.submit_error = Some(message.clone());
                self.phase = FormPhase::Failed;
                SubmitOutcome::Failed(message)
            }
        }
    }

    pub async fn submit(&mut self, api: &dyn EmployeeApi) -> SubmitOutcome {
        if self.is_submitting() {
            return SubmitOutcome::Busy;
        }
        let Some(request) = self.begin_submit() else {
            return SubmitOutcome::Invalid(self.errors.clone());
        };
        let result = request.execute(api).await;
        self.finish_submit(result)
    }
}

fn failure_message(err: &ClientError) -> String {
    let message = err.message().trim();
    if message.is_empty() {
        SAVE_FAILED_MESSAGE.to_string()
    } else {
        message.to_string()
    }
}
