//! View models for front ends.
//!
//! Each view holds the state a screen shows and is refreshed explicitly from the
//! store when the screen is entered or after a change. Front ends pass them by
//! reference into their event handlers.

use serde::Serialize;

use crate::dates;
use crate::error::Result;
use crate::model::{ActivityEntry, Employee, SortOrder};
use crate::storage::Storage;

/// One choice in the employee picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickerOption {
    /// Employee id.
    pub id: i64,
    /// Label shown to the user.
    pub name: String,
}

/// The employee picker of the activity screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmployeePicker {
    /// Current choices, by name.
    pub options: Vec<PickerOption>,
    /// Selected employee, always one of `options`.
    pub selected: Option<i64>,
}

impl EmployeePicker {
    /// Reload the choices. A selection whose employee is gone is cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn refresh(&mut self, storage: &Storage) -> Result<()> {
        self.options = storage
            .list_employees()?
            .into_iter()
            .map(|employee| PickerOption {
                id: employee.id,
                name: employee.name,
            })
            .collect();

        if let Some(id) = self.selected {
            if !self.contains(id) {
                self.selected = None;
            }
        }
        Ok(())
    }

    /// Select an employee; returns `false` and keeps the old selection if it is not a choice.
    pub fn select(&mut self, id: i64) -> bool {
        if self.contains(id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    fn contains(&self, id: i64) -> bool {
        self.options.iter().any(|option| option.id == id)
    }
}

/// The list of one day's activities, used for both "today" and history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayView {
    /// The day shown, as entered.
    pub date: String,
    /// Long label of the day.
    pub heading: String,
    /// Sort direction of `entries`.
    pub order: SortOrder,
    /// The day's activities.
    pub entries: Vec<ActivityEntry>,
}

impl DayView {
    /// An empty view of a day, latest activity first.
    #[must_use]
    pub fn new(date: impl Into<String>) -> Self {
        let date = date.into();
        Self {
            heading: dates::describe_date(&date),
            date,
            order: SortOrder::Descending,
            entries: Vec::new(),
        }
    }

    /// Switch to another day; entries are cleared until the next refresh.
    pub fn show(&mut self, date: impl Into<String>) {
        *self = Self {
            order: self.order,
            ..Self::new(date)
        };
    }

    /// Reload the day's entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn refresh(&mut self, storage: &Storage) -> Result<()> {
        self.entries = storage.list_activities_for_date(&self.date, self.order)?;
        Ok(())
    }
}

/// The employee management list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Roster {
    /// All employees, by name.
    pub employees: Vec<Employee>,
}

impl Roster {
    /// Reload the employees.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn refresh(&mut self, storage: &Storage) -> Result<()> {
        self.employees = storage.list_employees()?;
        Ok(())
    }

    /// Secondary line shown under an employee's name.
    #[must_use]
    pub fn subtitle(employee: &Employee) -> String {
        format!("{} | {}", employee.role, employee.department)
    }
}
