//! Render models for the directory list and its cards.
//!
//! Pure functions of the collection and per-card state; front ends draw
//! these however they like.

use std::collections::HashMap;

use shared::domain::{Employee, EmployeeId};

use crate::format::{format_currency, format_long_date};

pub const EMPTY_STATE_MESSAGE: &str = "No employees found. Add your first employee to get started!";
pub const LOADING_MESSAGE: &str = "Loading employees...";

/// Transient per-card delete state owned by the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardState {
    pub deleting: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: EmployeeId,
    pub title: String,
    pub details: Vec<DetailRow>,
    pub edit_enabled: bool,
    pub delete_enabled: bool,
    pub delete_label: &'static str,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Loading,
    Empty { message: &'static str },
    Cards { heading: String, cards: Vec<CardView> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryView {
    pub banner: Option<String>,
    pub list: ListView,
}

pub fn render_list(employees: &[Employee], states: &HashMap<EmployeeId, CardState>) -> ListView {
    if employees.is_empty() {
        return ListView::Empty {
            message: EMPTY_STATE_MESSAGE,
        };
    }

    ListView::Cards {
        heading: format!("Employees ({})", employees.len()),
        cards: employees
            .iter()
            .map(|employee| render_card(employee, states.get(&employee.id)))
            .collect(),
    }
}

pub fn render_card(employee: &Employee, state: Option<&CardState>) -> CardView {
    let deleting = state.is_some_and(|state| state.deleting);

    let mut details = vec![DetailRow {
        label: "Email",
        value: employee.email.clone(),
    }];
    let optional = [
        ("Phone", present(&employee.phone)),
        ("Department", present(&employee.department)),
        ("Position", present(&employee.position)),
        (
            "Salary",
            employee.salary.map(|salary| format_currency(Some(salary))),
        ),
        (
            "Hire Date",
            employee.hire_date.map(|date| format_long_date(Some(date))),
        ),
    ];
    details.extend(
        optional
            .into_iter()
            .filter_map(|(label, value)| value.map(|value| DetailRow { label, value })),
    );

    CardView {
        id: employee.id,
        title: employee.name.clone(),
        details,
        edit_enabled: !deleting,
        delete_enabled: !deleting,
        delete_label: if deleting { "Deleting..." } else { "Delete" },
        error: state.and_then(|state| state.error.clone()),
    }
}

pub fn confirmation_prompt(employee: &Employee) -> String {
    format!("Are you sure you want to delete {}?", employee.name)
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
