//! Raw form input and its coercion into record fields.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{Employee, NewEmployee};

/// Employee form exactly as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeForm {
    /// Full name; required.
    pub name: String,
    /// National identity number (CPF).
    pub national_id: String,
    /// Job title.
    pub role: String,
    /// Department name.
    pub department: String,
    /// Salary text; anything unparseable counts as zero.
    pub salary: String,
    /// Admission date text, `DD/MM/YYYY`.
    pub admission_date: String,
}

impl EmployeeForm {
    /// A form prefilled with a stored record, as shown by the edit dialog.
    #[must_use]
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            national_id: employee.national_id.clone(),
            role: employee.role.clone(),
            department: employee.department.clone(),
            salary: employee.salary.to_string(),
            admission_date: employee.admission_date.clone(),
        }
    }

    /// Validate and coerce into storable fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the name is blank.
    pub fn to_fields(&self) -> Result<NewEmployee> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::blank("name"));
        }

        Ok(NewEmployee {
            name: name.to_string(),
            national_id: self.national_id.trim().to_string(),
            role: self.role.trim().to_string(),
            department: self.department.trim().to_string(),
            salary: coerce_salary(&self.salary),
            admission_date: self.admission_date.trim().to_string(),
        })
    }
}

/// Activity form exactly as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityForm {
    /// Selected employee; `None` until one is picked.
    pub employee_id: Option<i64>,
    /// Day text, `DD/MM/YYYY`; blank means today.
    pub date: String,
    /// Time text, `HH:MM`; blank means now.
    pub time: String,
    /// What happened; required.
    pub description: String,
}

impl ActivityForm {
    /// A form for the given employee, dated today at the current time.
    #[must_use]
    pub fn now(employee_id: i64, description: impl Into<String>) -> Self {
        Self {
            employee_id: Some(employee_id),
            date: String::new(),
            time: String::new(),
            description: description.into(),
        }
    }

    /// Set an explicit day.
    #[must_use]
    pub fn on(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Set an explicit time of day.
    #[must_use]
    pub fn at(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }
}

/// Coerce salary text into a non-negative amount.
///
/// Accepts an optional `R$` prefix and a comma as decimal separator when the
/// text has no dot. Blank, unparseable, negative or non-finite input yields `0.0`.
#[must_use]
pub fn coerce_salary(text: &str) -> f64 {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix("R$").unwrap_or(trimmed).trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let normalized = if trimmed.contains('.') {
        trimmed.to_string()
    } else {
        trimmed.replace(',', ".")
    };

    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => {
            debug!("Salary '{}' coerced to 0", text);
            0.0
        }
    }
}
