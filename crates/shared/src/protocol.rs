use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::EmployeeId;

/// Request body for `POST /employees` and `PUT /employees/{id}`.
///
/// Absent optional fields serialize as `null` so an update clears them
/// server-side instead of leaving the previous value in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub salary: Option<f64>,
    pub hire_date: Option<NaiveDate>,
}

pub fn employees_route() -> &'static str {
    "/employees"
}

pub fn employee_route(id: EmployeeId) -> String {
    format!("{}/{id}", employees_route())
}
