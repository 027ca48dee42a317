use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;
use shared::{
    domain::{Employee, EmployeeId},
    protocol::EmployeeDraft,
};

use crate::{ClientError, ClientResult, EmployeeApi};

pub(crate) fn sample_employee(id: i64, name: &str, email: &str) -> Employee {
    Employee {
        id: EmployeeId(id),
        name: name.to_string(),
        email: email.to_string(),
        phone: None,
        department: None,
        position: None,
        salary: None,
        hire_date: None,
    }
}

/// In-memory `EmployeeApi` with call counters and per-operation failures.
#[derive(Default)]
pub(crate) struct StubApi {
    employees: Mutex<Vec<Employee>>,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
    update_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    fail_list: Option<ClientError>,
    fail_create: Option<ClientError>,
    fail_update: Option<ClientError>,
    fail_delete: Option<ClientError>,
}

impl StubApi {
    pub(crate) fn with_employees(employees: Vec<Employee>) -> Self {
        Self {
            employees: Mutex::new(employees),
            ..Self::default()
        }
    }

    pub(crate) fn failing_list(mut self, err: ClientError) -> Self {
        self.fail_list = Some(err);
        self
    }

    pub(crate) fn failing_create(mut self, err: ClientError) -> Self {
        self.fail_create = Some(err);
        self
    }

    pub(crate) fn failing_update(mut self, err: ClientError) -> Self {
        self.fail_update = Some(err);
        self
    }

    pub(crate) fn failing_delete(mut self, err: ClientError) -> Self {
        self.fail_delete = Some(err);
        self
    }

    pub(crate) fn snapshot(&self) -> Vec<Employee> {
        self.employees.lock().expect("stub lock").clone()
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    fn not_found(id: EmployeeId) -> ClientError {
        ClientError::Server {
            status: 404,
            message: format!("Employee with ID {id} not found"),
        }
    }
}

#[async_trait]
impl EmployeeApi for StubApi {
    async fn list(&self) -> ClientResult<Vec<Employee>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.fail_list {
            return Err(err.clone());
        }
        Ok(self.snapshot())
    }

    async fn get(&self, id: EmployeeId) -> ClientResult<Employee> {
        self.snapshot()
            .into_iter()
            .find(|employee| employee.id == id)
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, draft: &EmployeeDraft) -> ClientResult<Employee> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.fail_create {
            return Err(err.clone());
        }
        let mut employees = self.employees.lock().expect("stub lock");
        let next_id = employees.iter().map(|e| e.id.0).max().unwrap_or(0) + 1;
        let employee = Employee::from_draft(EmployeeId(next_id), draft.clone());
        employees.push(employee.clone());
        Ok(employee)
    }

    async fn update(&self, id: EmployeeId, draft: &EmployeeDraft) -> ClientResult<Employee> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.fail_update {
            return Err(err.clone());
        }
        let mut employees = self.employees.lock().expect("stub lock");
        let slot = employees
            .iter_mut()
            .find(|employee| employee.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        *slot = Employee::from_draft(id, draft.clone());
        Ok(slot.clone())
    }

    async fn delete(&self, id: EmployeeId) -> ClientResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.fail_delete {
            return Err(err.clone());
        }
        let mut employees = self.employees.lock().expect("stub lock");
        let before = employees.len();
        employees.retain(|employee| employee.id != id);
        if employees.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}
