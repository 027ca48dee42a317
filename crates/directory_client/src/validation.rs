//! Field-level validation and the form-string to wire-draft mapping.

use std::{collections::BTreeMap, fmt, sync::LazyLock};

use chrono::NaiveDate;
use regex::Regex;
use shared::{domain::Employee, protocol::EmployeeDraft};

use crate::format::MAX_CURRENCY_AMOUNT;

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email format";
pub const PHONE_INVALID: &str = "Phone number format is invalid";
pub const SALARY_INVALID: &str = "Salary must be a positive number";
pub const HIRE_DATE_INVALID: &str = "Hire date must be a valid date (YYYY-MM-DD)";

const HIRE_DATE_FORMAT: &str = "%Y-%m-%d";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d{7,15}$").expect("phone pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Department,
    Position,
    Salary,
    HireDate,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::Department,
        FormField::Position,
        FormField::Salary,
        FormField::HireDate,
    ];

    /// Wire name of the field.
    pub fn key(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Department => "department",
            FormField::Position => "position",
            FormField::Salary => "salary",
            FormField::HireDate => "hire_date",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Phone => "Phone",
            FormField::Department => "Department",
            FormField::Position => "Position",
            FormField::Salary => "Salary",
            FormField::HireDate => "Hire Date",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(self, FormField::Name | FormField::Email)
    }

    /// Length limits enforced by the employees service.
    fn max_len(self) -> Option<usize> {
        match self {
            FormField::Name => Some(100),
            FormField::Phone => Some(20),
            FormField::Department | FormField::Position => Some(50),
            FormField::Email | FormField::Salary | FormField::HireDate => None,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Errors keyed by field; at most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: FormField) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (field, message)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Raw, unvalidated form input; one string per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub position: String,
    pub salary: String,
    pub hire_date: String,
}

impl FormValues {
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            email: employee.email.clone(),
            phone: employee.phone.clone().unwrap_or_default(),
            department: employee.department.clone().unwrap_or_default(),
            position: employee.position.clone().unwrap_or_default(),
            salary: employee
                .salary
                .map(|salary| salary.to_string())
                .unwrap_or_default(),
            hire_date: employee
                .hire_date
                .map(|date| date.format(HIRE_DATE_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Department => &self.department,
            FormField::Position => &self.position,
            FormField::Salary => &self.salary,
            FormField::HireDate => &self.hire_date,
        }
    }

    pub fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Department => &mut self.department,
            FormField::Position => &mut self.position,
            FormField::Salary => &mut self.salary,
            FormField::HireDate => &mut self.hire_date,
        }
    }
}

pub fn validate(values: &FormValues) -> FieldErrors {
    let mut errors = FieldErrors::default();

    for field in FormField::ALL {
        let raw = values.get(field);
        let value = raw.trim();
        if field.is_required() && value.is_empty() {
            let message = match field {
                FormField::Email => EMAIL_REQUIRED,
                _ => NAME_REQUIRED,
            };
            errors.insert(field, message);
            continue;
        }
        if let Some(max_len) = field.max_len() {
            if value.chars().count() > max_len {
                errors.insert(
                    field,
                    format!("{} must be at most {max_len} characters", field.label()),
                );
                continue;
            }
        }
        if value.is_empty() {
            continue;
        }

        let invalid = match field {
            // Surrounding whitespace is a format error, not something to trim away.
            FormField::Email => (!EMAIL_PATTERN.is_match(raw)).then_some(EMAIL_INVALID),
            FormField::Phone => (!is_valid_phone(value)).then_some(PHONE_INVALID),
            FormField::Salary => parse_salary(value).is_none().then_some(SALARY_INVALID),
            FormField::HireDate => parse_hire_date(value).is_none().then_some(HIRE_DATE_INVALID),
            FormField::Name | FormField::Department | FormField::Position => None,
        };
        if let Some(message) = invalid {
            errors.insert(field, message);
        }
    }

    errors
}

/// Validates and maps form strings to the wire draft: strings trimmed, blank
/// optionals become `None`, salary and hire date parsed.
pub fn normalize(values: &FormValues) -> Result<EmployeeDraft, FieldErrors> {
    let errors = validate(values);
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(EmployeeDraft {
        name: values.name.trim().to_string(),
        email: values.email.trim().to_string(),
        phone: optional_text(&values.phone),
        department: optional_text(&values.department),
        position: optional_text(&values.position),
        salary: optional_text(&values.salary).and_then(|raw| parse_salary(&raw)),
        hire_date: optional_text(&values.hire_date).and_then(|raw| parse_hire_date(&raw)),
    })
}

fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_salary(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|salary| (0.0..=MAX_CURRENCY_AMOUNT).contains(salary))
}

fn parse_hire_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), HIRE_DATE_FORMAT).ok()
}

fn is_valid_phone(raw: &str) -> bool {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect();
    PHONE_PATTERN.is_match(&cleaned)
}
