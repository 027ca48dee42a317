//! Root controller state: the collection, the load banner, the open form
//! session and per-card delete state.

use std::collections::HashMap;

use shared::domain::{Employee, EmployeeId};
use tracing::{debug, info, warn};

use crate::{
    error::ClientResult,
    form::{EmployeeForm, SubmitOutcome, SubmitRequest},
    view::{self, CardState, DirectoryView, ListView},
    EmployeeApi,
};

pub const LOAD_FAILED_MESSAGE: &str =
    "Failed to load employees. Please check if the backend is running.";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete employee";

/// One opening of the form. Results carrying an older generation belong to a
/// dismissed or replaced form.
#[derive(Debug, Clone)]
pub struct FormSession {
    pub generation: u64,
    pub form: EmployeeForm,
}

#[derive(Debug, Default)]
pub struct Directory {
    employees: Vec<Employee>,
    loading: bool,
    error: Option<String>,
    form: Option<FormSession>,
    next_form_generation: u64,
    cards: HashMap<EmployeeId, CardState>,
    pending_delete: Option<EmployeeId>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn card_state(&self, id: EmployeeId) -> Option<&CardState> {
        self.cards.get(&id)
    }

    pub fn is_deleting(&self, id: EmployeeId) -> bool {
        self.cards.get(&id).is_some_and(|state| state.deleting)
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish_load(&mut self, result: ClientResult<Vec<Employee>>) {
        match result {
            Ok(employees) => {
                info!(count = employees.len(), "employee directory loaded");
                self.employees = employees;
            }
            Err(err) => {
                warn!(error = %err, "failed to load employee directory");
                self.employees.clear();
                self.error = Some(LOAD_FAILED_MESSAGE.to_string());
            }
        }
        self.loading = false;

        let employees = &self.employees;
        let known = |id: &EmployeeId| employees.iter().any(|employee| employee.id == *id);
        self.cards.retain(|id, _| known(id));
        if self.pending_delete.is_some_and(|id| !known(&id)) {
            self.pending_delete = None;
        }
    }

    pub async fn reload(&mut self, api: &dyn EmployeeApi) {
        self.begin_load();
        let result = api.list().await;
        self.finish_load(result);
    }

    pub fn form(&self) -> Option<&EmployeeForm> {
        self.form.as_ref().map(|session| &session.form)
    }

    pub fn form_mut(&mut self) -> Option<&mut EmployeeForm> {
        self.form.as_mut().map(|session| &mut session.form)
    }

    pub fn form_generation(&self) -> Option<u64> {
        self.form.as_ref().map(|session| session.generation)
    }

    pub fn open_create(&mut self) -> u64 {
        self.open_form(EmployeeForm::create())
    }

    /// Opens the form on an existing record. Refused while that record's
    /// delete is in flight or when the id is unknown.
    pub fn open_edit(&mut self, id: EmployeeId) -> Option<u64> {
        if self.is_deleting(id) {
            return None;
        }
        let form = EmployeeForm::edit(self.employee(id)?);
        Some(self.open_form(form))
    }

    fn open_form(&mut self, form: EmployeeForm) -> u64 {
        self.next_form_generation += 1;
        let generation = self.next_form_generation;
        match &mut self.form {
            Some(session) => {
                session.generation = generation;
                session.form = form;
            }
            None => self.form = Some(FormSession { generation, form }),
        }
        debug!(generation, "employee form opened");
        generation
    }

    pub fn dismiss_form(&mut self) {
        if let Some(session) = self.form.take() {
            debug!(generation = session.generation, "employee form dismissed");
        }
    }

    pub fn begin_form_submit(&mut self) -> Option<(u64, SubmitRequest)> {
        let session = self.form.as_mut()?;
        let request = session.form.begin_submit()?;
        Some((session.generation, request))
    }

    /// Applies a submission result. Returns whether the collection must be
    /// reloaded.
    pub fn finish_form_submit(&mut self, generation: u64, result: ClientResult<Employee>) -> bool {
        let saved = result.is_ok();
        match self.apply_form_result(generation, result) {
            Some(outcome) => outcome.data_changed(),
            None => {
                debug!(generation, "ignoring result for a dismissed form");
                saved
            }
        }
    }

    fn apply_form_result(
        &mut self,
        generation: u64,
        result: ClientResult<Employee>,
    ) -> Option<SubmitOutcome> {
        let session = self
            .form
            .as_mut()
            .filter(|session| session.generation == generation)?;
        let outcome = session.form.finish_submit(result);
        if outcome.should_close() {
            self.form = None;
        }
        Some(outcome)
    }

    pub async fn submit_form(&mut self, api: &dyn EmployeeApi) -> Option<SubmitOutcome> {
        let session = self.form.as_mut()?;
        if session.form.is_submitting() {
            return Some(SubmitOutcome::Busy);
        }
        let generation = session.generation;
        let Some(request) = session.form.begin_submit() else {
            return Some(SubmitOutcome::Invalid(session.form.errors().clone()));
        };

        let result = request.execute(api).await;
        let outcome = self.apply_form_result(generation, result)?;
        if outcome.data_changed() {
            self.reload(api).await;
        }
        Some(outcome)
    }

    pub fn pending_delete(&self) -> Option<&Employee> {
        self.pending_delete.and_then(|id| self.employee(id))
    }

    pub fn pending_delete_prompt(&self) -> Option<String> {
        self.pending_delete().map(view::confirmation_prompt)
    }

    /// Asks for confirmation before deleting. Refused while that record's
    /// delete is already in flight.
    pub fn request_delete(&mut self, id: EmployeeId) -> bool {
        if self.is_deleting(id) || self.employee(id).is_none() {
            return false;
        }
        self.pending_delete = Some(id);
        true
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Marks the pending record as deleting and returns the id to delete.
    pub fn confirm_delete(&mut self) -> Option<EmployeeId> {
        let id = self.pending_delete.take()?;
        let state = self.cards.entry(id).or_default();
        if state.deleting {
            return None;
        }
        state.deleting = true;
        state.error = None;
        info!(employee_id = %id, "deleting employee");
        Some(id)
    }

    /// Applies a delete result. Returns whether the collection must be
    /// reloaded.
    pub fn finish_delete(&mut self, id: EmployeeId, result: ClientResult<()>) -> bool {
        let state = self.cards.entry(id).or_default();
        state.deleting = false;
        match result {
            Ok(()) => {
                info!(employee_id = %id, "employee deleted");
                true
            }
            Err(err) => {
                let message = err.message().trim();
                state.error = Some(if message.is_empty() {
                    DELETE_FAILED_MESSAGE.to_string()
                } else {
                    message.to_string()
                });
                false
            }
        }
    }

    pub async fn delete_confirmed(&mut self, api: &dyn EmployeeApi) -> Option<ClientResult<()>> {
        let id = self.confirm_delete()?;
        let result = api.delete(id).await;
        if self.finish_delete(id, result.clone()) {
            self.reload(api).await;
        }
        Some(result)
    }

    pub fn view(&self) -> DirectoryView {
        let list = if self.loading {
            ListView::Loading
        } else {
            view::render_list(&self.employees, &self.cards)
        };
        DirectoryView {
            banner: self.error.clone(),
            list,
        }
    }
}
