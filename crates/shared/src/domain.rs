use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::protocol::EmployeeDraft;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(EmployeeId);

/// One employee as stored and served by the employees service.
///
/// The `id` is assigned by the server on creation and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
}

impl Employee {
    pub fn from_draft(id: EmployeeId, draft: EmployeeDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            department: draft.department,
            position: draft.position,
            salary: draft.salary,
            hire_date: draft.hire_date,
        }
    }

    pub fn to_draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            department: self.department.clone(),
            position: self.position.clone(),
            salary: self.salary,
            hire_date: self.hire_date,
        }
    }
}
