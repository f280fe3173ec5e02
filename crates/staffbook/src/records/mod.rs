//! Record service for staffbook.
//!
//! Turns form input into storage operations, applying the few rules the forms
//! rely on: a name is required, a description and an employee are required for
//! an activity, and salary text is coerced leniently.

mod forms;

use tracing::{info, warn};

use crate::dates::{self, DISPLAY_DATE_FORMAT, DISPLAY_TIME_FORMAT};
use crate::error::{Error, Result};
use crate::storage::Storage;

pub use forms::{coerce_salary, ActivityForm, EmployeeForm};

/// Record service owning the store.
#[derive(Debug)]
pub struct Records {
    storage: Storage,
    date_format: String,
    time_format: String,
}

impl Records {
    /// Create a service over an opened store, using `DD/MM/YYYY` and `HH:MM` defaults.
    #[must_use]
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            date_format: DISPLAY_DATE_FORMAT.to_string(),
            time_format: DISPLAY_TIME_FORMAT.to_string(),
        }
    }

    /// Override the formats used when an activity form leaves date or time blank.
    #[must_use]
    pub fn with_formats(
        mut self,
        date_format: impl Into<String>,
        time_format: impl Into<String>,
    ) -> Self {
        self.date_format = date_format.into();
        self.time_format = time_format.into();
        self
    }

    /// Read access to the store, for listings and reports.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Register a new employee and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the name is blank (nothing is written),
    /// or a storage error.
    pub fn register_employee(&self, form: &EmployeeForm) -> Result<i64> {
        let fields = form.to_fields().map_err(|err| {
            warn!("Employee not registered: {}", err);
            err
        })?;
        let id = self.storage.insert_employee(&fields)?;
        info!("Registered employee {} ({})", id, fields.name);
        Ok(id)
    }

    /// Overwrite an employee with the form's fields.
    ///
    /// Returns `false` when no employee has the given id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the name is blank, or a storage error.
    pub fn edit_employee(&self, id: i64, form: &EmployeeForm) -> Result<bool> {
        let fields = form.to_fields().map_err(|err| {
            warn!("Employee {} not updated: {}", id, err);
            err
        })?;
        let updated = self.storage.update_employee(id, &fields)?;
        if updated {
            info!("Updated employee {}", id);
        }
        Ok(updated)
    }

    /// Remove an employee and every activity it owns.
    ///
    /// Returns `false` when no employee has the given id.
    ///
    /// # Errors
    ///
    /// Returns a storage error; nothing is removed in that case.
    pub fn remove_employee(&mut self, id: i64) -> Result<bool> {
        self.storage.delete_employee(id)
    }

    /// Log an activity and return its id.
    ///
    /// Blank date or time fall back to today and the current time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when no employee is selected or the description
    /// is blank, [`Error::UnknownEmployee`] when the employee does not exist, or a
    /// storage error.
    pub fn log_activity(&self, form: &ActivityForm) -> Result<i64> {
        let Some(employee_id) = form.employee_id else {
            warn!("Activity not logged: no employee selected");
            return Err(Error::blank("employee"));
        };
        let description = form.description.trim();
        if description.is_empty() {
            warn!("Activity not logged: blank description");
            return Err(Error::blank("description"));
        }
        if self.storage.get_employee(employee_id)?.is_none() {
            warn!("Activity not logged: unknown employee {}", employee_id);
            return Err(Error::UnknownEmployee { id: employee_id });
        }

        let date = match form.date.trim() {
            "" => dates::today(&self.date_format),
            date => date.to_string(),
        };
        let time = match form.time.trim() {
            "" => dates::now_time(&self.time_format),
            time => time.to_string(),
        };

        let id = self
            .storage
            .insert_activity(employee_id, &date, &time, description)?;
        info!(
            "Logged activity {} for employee {} at {} {}",
            id, employee_id, date, time
        );
        Ok(id)
    }

    /// Remove a single activity.
    ///
    /// Returns `false` when no activity has the given id.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn remove_activity(&self, id: i64) -> Result<bool> {
        let removed = self.storage.delete_activity(id)?;
        if removed {
            info!("Removed activity {}", id);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SortOrder;

    fn create_test_records() -> Records {
        crate::logging::init_test_logging();
        Records::new(Storage::open_in_memory().expect("failed to create test storage"))
    }

    fn ana_form() -> EmployeeForm {
        EmployeeForm {
            name: "Ana Silva".to_string(),
            national_id: "111".to_string(),
            role: "Analyst".to_string(),
            department: "RH".to_string(),
            salary: String::new(),
            admission_date: "01/01/2024".to_string(),
        }
    }

    #[test]
    fn test_register_employee_lists_matching_record() {
        let records = create_test_records();
        let id = records.register_employee(&ana_form()).unwrap();

        let employees = records.storage().list_employees().unwrap();
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].id, id);
        assert_eq!(employees[0].fields(), ana_form().to_fields().unwrap());
    }

    #[test]
    fn test_register_employee_blank_name_writes_nothing() {
        let records = create_test_records();
        let form = EmployeeForm {
            name: String::new(),
            ..ana_form()
        };

        let err = records.register_employee(&form).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(records.storage().count_employees().unwrap(), 0);
    }

    #[test]
    fn test_register_employee_salary_coercion() {
        let records = create_test_records();
        for (text, expected) in [("", 0.0), ("abc", 0.0), ("1500.50", 1500.50)] {
            let form = EmployeeForm {
                salary: text.to_string(),
                ..ana_form()
            };
            let id = records.register_employee(&form).unwrap();
            let stored = records.storage().get_employee(id).unwrap().unwrap();
            assert!((stored.salary - expected).abs() < f64::EPSILON, "salary {text:?}");
        }
    }

    #[test]
    fn test_edit_employee_updates_only_target() {
        let records = create_test_records();
        let ana = records.register_employee(&ana_form()).unwrap();
        let bruno = records
            .register_employee(&EmployeeForm {
                name: "Bruno".to_string(),
                ..ana_form()
            })
            .unwrap();
        let bruno_before = records.storage().get_employee(bruno).unwrap().unwrap();

        let form = EmployeeForm {
            role: "Manager".to_string(),
            salary: "4200".to_string(),
            ..ana_form()
        };
        assert!(records.edit_employee(ana, &form).unwrap());

        let ana_after = records.storage().get_employee(ana).unwrap().unwrap();
        assert_eq!(ana_after.role, "Manager");
        assert!((ana_after.salary - 4200.0).abs() < f64::EPSILON);
        assert_eq!(records.storage().get_employee(bruno).unwrap().unwrap(), bruno_before);
    }

    #[test]
    fn test_edit_employee_missing_id() {
        let records = create_test_records();
        assert!(!records.edit_employee(404, &ana_form()).unwrap());
    }

    #[test]
    fn test_edit_employee_reports_error_as_string() {
        let records = create_test_records();
        let ana = records.register_employee(&ana_form()).unwrap();
        let form = EmployeeForm {
            name: " ".to_string(),
            ..ana_form()
        };

        let message = records.edit_employee(ana, &form).unwrap_err().to_string();
        assert!(message.contains("name"));
        assert_eq!(records.storage().get_employee(ana).unwrap().unwrap().name, "Ana Silva");
    }

    #[test]
    fn test_remove_employee_cascades() {
        let mut records = create_test_records();
        let ana = records.register_employee(&ana_form()).unwrap();
        records
            .log_activity(&ActivityForm::now(ana, "Standup").on("01/01/2024").at("09:00"))
            .unwrap();

        assert!(records.remove_employee(ana).unwrap());
        assert!(records.storage().list_employees().unwrap().is_empty());
        assert_eq!(records.storage().count_activities_for_employee(ana).unwrap(), 0);
        assert!(!records.remove_employee(ana).unwrap());
    }

    #[test]
    fn test_log_activity_visible_only_on_its_date() {
        let records = create_test_records();
        let ana = records.register_employee(&ana_form()).unwrap();
        let id = records
            .log_activity(&ActivityForm::now(ana, "Standup").on("01/01/2024").at("09:00"))
            .unwrap();

        let same_day = records
            .storage()
            .list_activities_for_date("01/01/2024", SortOrder::Descending)
            .unwrap();
        assert_eq!(same_day.len(), 1);
        assert_eq!(same_day[0].activity.id, id);

        assert!(records
            .storage()
            .list_activities_for_date("02/01/2024", SortOrder::Descending)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_log_activity_requires_employee_and_description() {
        let records = create_test_records();
        let ana = records.register_employee(&ana_form()).unwrap();

        let no_employee = ActivityForm {
            employee_id: None,
            description: "Standup".to_string(),
            ..ActivityForm::default()
        };
        assert!(matches!(
            records.log_activity(&no_employee),
            Err(Error::Validation { field: "employee" })
        ));

        let blank = ActivityForm::now(ana, "   ");
        assert!(matches!(
            records.log_activity(&blank),
            Err(Error::Validation { field: "description" })
        ));
        assert_eq!(records.storage().count_activities().unwrap(), 0);
    }

    #[test]
    fn test_log_activity_unknown_employee() {
        let records = create_test_records();
        let err = records
            .log_activity(&ActivityForm::now(99, "Standup"))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownEmployee { id: 99 }));
    }

    #[test]
    fn test_log_activity_defaults_to_today() {
        let records = create_test_records();
        let ana = records.register_employee(&ana_form()).unwrap();
        records.log_activity(&ActivityForm::now(ana, "Standup")).unwrap();

        let today = dates::today(DISPLAY_DATE_FORMAT);
        let entries = records
            .storage()
            .list_activities_for_date(&today, SortOrder::Descending)
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].activity.time.len(), 5);
    }

    #[test]
    fn test_remove_activity() {
        let records = create_test_records();
        let ana = records.register_employee(&ana_form()).unwrap();
        let id = records
            .log_activity(&ActivityForm::now(ana, "Standup").on("01/01/2024").at("09:00"))
            .unwrap();

        assert!(records.remove_activity(id).unwrap());
        assert!(!records.remove_activity(id).unwrap());
    }

    #[test]
    fn test_log_activity_with_unrenderable_formats_uses_display_defaults() {
        crate::logging::init_test_logging();
        let records = Records::new(Storage::open_in_memory().unwrap()).with_formats("%Q", "%Q");
        let ana = records.register_employee(&ana_form()).unwrap();

        records.log_activity(&ActivityForm::now(ana, "Standup")).unwrap();

        let today = dates::today(DISPLAY_DATE_FORMAT);
        let entries = records
            .storage()
            .list_activities_for_date(&today, SortOrder::Descending)
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].activity.time.len(), 5);
    }
}
