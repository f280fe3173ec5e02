//! Core record types for staffbook.
//!
//! Dates and times are kept as display text (`DD/MM/YYYY`, `HH:MM`) exactly as
//! they were entered; the store never interprets them.

use serde::{Deserialize, Serialize};

/// A stored employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Identifier assigned by the store.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// National identity number (CPF), free-form.
    pub national_id: String,
    /// Job title.
    pub role: String,
    /// Department name.
    pub department: String,
    /// Monthly salary, never negative.
    pub salary: f64,
    /// Admission date as entered, usually `DD/MM/YYYY`.
    pub admission_date: String,
}

/// The mutable fields of an employee, already coerced.
///
/// Used for both inserts and updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// Full name.
    pub name: String,
    /// National identity number (CPF).
    pub national_id: String,
    /// Job title.
    pub role: String,
    /// Department name.
    pub department: String,
    /// Monthly salary.
    pub salary: f64,
    /// Admission date as entered.
    pub admission_date: String,
}

impl Employee {
    /// The mutable fields of this record.
    #[must_use]
    pub fn fields(&self) -> NewEmployee {
        NewEmployee {
            name: self.name.clone(),
            national_id: self.national_id.clone(),
            role: self.role.clone(),
            department: self.department.clone(),
            salary: self.salary,
            admission_date: self.admission_date.clone(),
        }
    }
}

/// A stored activity log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Identifier assigned by the store.
    pub id: i64,
    /// Owning employee.
    pub employee_id: i64,
    /// Day of the activity, `DD/MM/YYYY`.
    pub date: String,
    /// Time of the activity, `HH:MM`.
    pub time: String,
    /// What happened.
    pub description: String,
}

/// An activity joined with the owning employee's name, as listed in the day views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// The activity itself.
    #[serde(flatten)]
    pub activity: Activity,
    /// Name of the owning employee.
    pub employee_name: String,
}

/// An activity joined with its full employee record, as consumed by the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// The activity itself.
    pub activity: Activity,
    /// The owning employee.
    pub employee: Employee,
}

impl ReportRow {
    /// Name of the owning employee.
    #[must_use]
    pub fn employee_name(&self) -> &str {
        &self.employee.name
    }
}

/// Sort direction for activity time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Earliest first.
    Ascending,
    /// Latest first.
    #[default]
    Descending,
}

impl SortOrder {
    /// The SQL keyword for this direction.
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}
