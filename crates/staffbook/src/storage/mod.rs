//! Storage layer for staffbook.
//!
//! This module provides `SQLite`-based persistent storage for employees and their
//! activity log, including the cascading employee delete and the day queries that
//! feed the activity views and the daily report.

pub mod schema;

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::{Activity, ActivityEntry, Employee, NewEmployee, ReportRow, SortOrder};

use self::schema::SCHEMA_STATEMENTS;

const EMPLOYEE_COLUMNS: &str = "id, name, national_id, role, department, salary, admission_date";

/// Storage engine for employees and activities.
///
/// Owns a single connection; every operation is one statement or a short
/// fixed sequence run on the calling thread.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist,
    /// then applies the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        let storage = Self { path, conn };
        storage.init()?;

        info!("Database opened at {}", storage.path.display());
        Ok(storage)
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        let storage = Self {
            path: PathBuf::from(":memory:"),
            conn,
        };
        storage.init()?;
        Ok(storage)
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure both tables and their indexes exist.
    ///
    /// Safe to call any number of times; existing data is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if a schema statement fails.
    pub fn init(&self) -> Result<()> {
        for statement in SCHEMA_STATEMENTS {
            self.conn.execute(statement, [])?;
        }
        Ok(())
    }

    // === Employees ===

    /// Insert an employee and return the assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn insert_employee(&self, employee: &NewEmployee) -> Result<i64> {
        self.conn.execute(
            r"
            INSERT INTO employees (name, national_id, role, department, salary, admission_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
            params![
                employee.name,
                employee.national_id,
                employee.role,
                employee.department,
                employee.salary,
                employee.admission_date,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("Inserted employee with id {}", id);
        Ok(id)
    }

    /// Overwrite every mutable field of an employee.
    ///
    /// Returns `false` if no employee has the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn update_employee(&self, id: i64, employee: &NewEmployee) -> Result<bool> {
        let affected = self.conn.execute(
            r"
            UPDATE employees
            SET name = ?1, national_id = ?2, role = ?3, department = ?4,
                salary = ?5, admission_date = ?6
            WHERE id = ?7
            ",
            params![
                employee.name,
                employee.national_id,
                employee.role,
                employee.department,
                employee.salary,
                employee.admission_date,
                id,
            ],
        )?;
        debug!("Updated employee {} ({} rows)", id, affected);
        Ok(affected > 0)
    }

    /// Delete an employee together with all of its activities.
    ///
    /// Activities go first, then the employee row, inside one transaction.
    /// Returns `false` if no employee has the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails; nothing is deleted in that case.
    pub fn delete_employee(&mut self, id: i64) -> Result<bool> {
        let tx = self.conn.transaction()?;
        let activities = tx.execute("DELETE FROM activities WHERE employee_id = ?1", [id])?;
        let employees = tx.execute("DELETE FROM employees WHERE id = ?1", [id])?;
        tx.commit()?;

        if employees > 0 {
            info!(
                "Deleted employee {} and {} of its activities",
                id, activities
            );
        }
        Ok(employees > 0)
    }

    /// Get an employee by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_employee(&self, id: i64) -> Result<Option<Employee>> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?1");
        let employee = self
            .conn
            .query_row(&sql, [id], |row| Self::row_to_employee(row, 0))
            .optional()?;
        Ok(employee)
    }

    /// List all employees ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_employees(&self) -> Result<Vec<Employee>> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY name ASC, id ASC");
        let mut stmt = self.conn.prepare(&sql)?;
        let employees = stmt
            .query_map([], |row| Self::row_to_employee(row, 0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(employees)
    }

    /// Count stored employees.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count_employees(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?;
        Ok(count)
    }

    // === Activities ===

    /// Insert an activity and return the assigned id.
    ///
    /// The employee id is stored as given; callers check that it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn insert_activity(
        &self,
        employee_id: i64,
        date: &str,
        time: &str,
        description: &str,
    ) -> Result<i64> {
        self.conn.execute(
            r"
            INSERT INTO activities (employee_id, date, time, description)
            VALUES (?1, ?2, ?3, ?4)
            ",
            params![employee_id, date, time, description],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("Inserted activity {} for employee {}", id, employee_id);
        Ok(id)
    }

    /// Delete an activity by id.
    ///
    /// Returns `true` if an activity was deleted, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete_activity(&self, id: i64) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM activities WHERE id = ?1", [id])?;
        Ok(affected > 0)
    }

    /// List the activities of one day with their employee names.
    ///
    /// Entries are sorted by time in the given direction, ties by id in the same direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_activities_for_date(
        &self,
        date: &str,
        order: SortOrder,
    ) -> Result<Vec<ActivityEntry>> {
        let direction = order.as_sql();
        let sql = format!(
            r"
            SELECT a.id, a.employee_id, a.date, a.time, a.description, e.name
            FROM activities a
            JOIN employees e ON a.employee_id = e.id
            WHERE a.date = ?1
            ORDER BY a.time {direction}, a.id {direction}
            "
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let entries = stmt
            .query_map([date], |row| {
                Ok(ActivityEntry {
                    activity: Self::row_to_activity(row)?,
                    employee_name: row.get(5)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// List the activities of one day, oldest first, with their full employee records.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_activities_for_date_ascending(&self, date: &str) -> Result<Vec<ReportRow>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT a.id, a.employee_id, a.date, a.time, a.description,
                   e.id, e.name, e.national_id, e.role, e.department, e.salary, e.admission_date
            FROM activities a
            JOIN employees e ON a.employee_id = e.id
            WHERE a.date = ?1
            ORDER BY a.time ASC, a.id ASC
            ",
        )?;

        let rows = stmt
            .query_map([date], |row| {
                Ok(ReportRow {
                    activity: Self::row_to_activity(row)?,
                    employee: Self::row_to_employee(row, 5)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Count stored activities.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count_activities(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM activities", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Count activities that belong to one employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count_activities_for_employee(&self, employee_id: i64) -> Result<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM activities WHERE employee_id = ?1",
            [employee_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let employees = self.count_employees()?;
        let activities = self.count_activities()?;

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            employees,
            activities,
            db_size_bytes,
        })
    }

    /// Convert the employee columns starting at `offset` into an Employee.
    fn row_to_employee(row: &rusqlite::Row, offset: usize) -> rusqlite::Result<Employee> {
        Ok(Employee {
            id: row.get(offset)?,
            name: row.get(offset + 1)?,
            national_id: row.get(offset + 2)?,
            role: row.get(offset + 3)?,
            department: row.get(offset + 4)?,
            salary: row.get(offset + 5)?,
            admission_date: row.get(offset + 6)?,
        })
    }

    /// Convert the leading activity columns into an Activity.
    fn row_to_activity(row: &rusqlite::Row) -> rusqlite::Result<Activity> {
        Ok(Activity {
            id: row.get(0)?,
            employee_id: row.get(1)?,
            date: row.get(2)?,
            time: row.get(3)?,
            description: row.get(4)?,
        })
    }
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of employees stored.
    pub employees: i64,
    /// Number of activities stored.
    pub activities: i64,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_storage() -> Storage {
        Storage::open_in_memory().expect("failed to create test storage")
    }

    fn employee(name: &str) -> NewEmployee {
        NewEmployee {
            name: name.to_string(),
            national_id: "111".to_string(),
            role: "Analyst".to_string(),
            department: "RH".to_string(),
            salary: 1500.5,
            admission_date: "01/01/2024".to_string(),
        }
    }

    fn table_count(storage: &Storage, name: &str) -> i64 {
        storage
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [name],
                |row| row.get(0),
            )
            .unwrap()
    }

    #[test]
    fn test_open_in_memory_creates_tables() {
        let storage = create_test_storage();
        assert_eq!(table_count(&storage, "employees"), 1);
        assert_eq!(table_count(&storage, "activities"), 1);
    }

    #[test]
    fn test_init_is_idempotent() {
        let storage = create_test_storage();
        let id = storage.insert_employee(&employee("Ana")).unwrap();
        storage.insert_activity(id, "01/01/2024", "09:00", "Standup").unwrap();

        storage.init().unwrap();
        storage.init().unwrap();

        assert_eq!(table_count(&storage, "employees"), 1);
        assert_eq!(storage.count_employees().unwrap(), 1);
        assert_eq!(storage.count_activities().unwrap(), 1);
    }

    #[test]
    fn test_insert_and_get_employee() {
        let storage = create_test_storage();
        let id = storage.insert_employee(&employee("Ana Silva")).unwrap();

        let stored = storage.get_employee(id).unwrap().unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.fields(), employee("Ana Silva"));
    }

    #[test]
    fn test_insert_assigns_unique_ids() {
        let storage = create_test_storage();
        let a = storage.insert_employee(&employee("Ana")).unwrap();
        let b = storage.insert_employee(&employee("Ana")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_get_nonexistent_employee() {
        let storage = create_test_storage();
        assert!(storage.get_employee(99999).unwrap().is_none());
    }

    #[test]
    fn test_list_employees_ordered_by_name() {
        let storage = create_test_storage();
        storage.insert_employee(&employee("Carla")).unwrap();
        storage.insert_employee(&employee("Ana")).unwrap();
        storage.insert_employee(&employee("Bruno")).unwrap();

        let names: Vec<String> = storage
            .list_employees()
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Ana", "Bruno", "Carla"]);
    }

    #[test]
    fn test_update_employee_only_touches_target() {
        let storage = create_test_storage();
        let ana = storage.insert_employee(&employee("Ana")).unwrap();
        let bruno = storage.insert_employee(&employee("Bruno")).unwrap();
        let before = storage.get_employee(bruno).unwrap().unwrap();

        let mut changed = employee("Ana Souza");
        changed.salary = 3000.0;
        changed.department = "TI".to_string();
        assert!(storage.update_employee(ana, &changed).unwrap());

        assert_eq!(storage.get_employee(ana).unwrap().unwrap().fields(), changed);
        assert_eq!(storage.get_employee(bruno).unwrap().unwrap(), before);
    }

    #[test]
    fn test_update_missing_employee_is_noop() {
        let storage = create_test_storage();
        assert!(!storage.update_employee(42, &employee("Nobody")).unwrap());
        assert_eq!(storage.count_employees().unwrap(), 0);
    }

    #[test]
    fn test_delete_employee_cascades_activities() {
        let mut storage = create_test_storage();
        let ana = storage.insert_employee(&employee("Ana")).unwrap();
        let bruno = storage.insert_employee(&employee("Bruno")).unwrap();
        storage.insert_activity(ana, "01/01/2024", "09:00", "Standup").unwrap();
        storage.insert_activity(ana, "02/01/2024", "10:00", "Review").unwrap();
        storage.insert_activity(bruno, "01/01/2024", "11:00", "Deploy").unwrap();

        assert!(storage.delete_employee(ana).unwrap());

        assert!(storage.get_employee(ana).unwrap().is_none());
        assert_eq!(storage.count_activities_for_employee(ana).unwrap(), 0);
        assert_eq!(storage.count_activities_for_employee(bruno).unwrap(), 1);
    }

    #[test]
    fn test_delete_missing_employee() {
        let mut storage = create_test_storage();
        assert!(!storage.delete_employee(99999).unwrap());
    }

    #[test]
    fn test_delete_activity() {
        let storage = create_test_storage();
        let ana = storage.insert_employee(&employee("Ana")).unwrap();
        let id = storage.insert_activity(ana, "01/01/2024", "09:00", "Standup").unwrap();

        assert!(storage.delete_activity(id).unwrap());
        assert!(!storage.delete_activity(id).unwrap());
        assert_eq!(storage.count_activities().unwrap(), 0);
    }

    #[test]
    fn test_list_activities_for_date_filters_and_sorts() {
        let storage = create_test_storage();
        let ana = storage.insert_employee(&employee("Ana")).unwrap();
        storage.insert_activity(ana, "01/01/2024", "09:00", "Standup").unwrap();
        storage.insert_activity(ana, "01/01/2024", "08:00", "Planning").unwrap();
        storage.insert_activity(ana, "02/01/2024", "10:00", "Other day").unwrap();

        let desc = storage
            .list_activities_for_date("01/01/2024", SortOrder::Descending)
            .unwrap();
        let times: Vec<&str> = desc.iter().map(|e| e.activity.time.as_str()).collect();
        assert_eq!(times, vec!["09:00", "08:00"]);
        assert!(desc.iter().all(|e| e.employee_name == "Ana"));

        let asc = storage
            .list_activities_for_date("01/01/2024", SortOrder::Ascending)
            .unwrap();
        let times: Vec<&str> = asc.iter().map(|e| e.activity.time.as_str()).collect();
        assert_eq!(times, vec!["08:00", "09:00"]);

        assert!(storage
            .list_activities_for_date("03/01/2024", SortOrder::Descending)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_list_activities_same_time_ordered_by_id() {
        let storage = create_test_storage();
        let ana = storage.insert_employee(&employee("Ana")).unwrap();
        let first = storage.insert_activity(ana, "01/01/2024", "09:00", "A").unwrap();
        let second = storage.insert_activity(ana, "01/01/2024", "09:00", "B").unwrap();

        let rows = storage.list_activities_for_date_ascending("01/01/2024").unwrap();
        let ids: Vec<i64> = rows.iter().map(|r| r.activity.id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn test_list_activities_for_date_ascending_joins_employee() {
        let storage = create_test_storage();
        let ana = storage.insert_employee(&employee("Ana Silva")).unwrap();
        let bruno = storage.insert_employee(&employee("Bruno")).unwrap();
        storage.insert_activity(bruno, "01/01/2024", "10:30", "Deploy").unwrap();
        storage.insert_activity(ana, "01/01/2024", "08:15", "Planning").unwrap();

        let rows = storage.list_activities_for_date_ascending("01/01/2024").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].employee_name(), "Ana Silva");
        assert_eq!(rows[0].employee.id, ana);
        assert_eq!(rows[0].activity.description, "Planning");
        assert_eq!(rows[1].employee_name(), "Bruno");
    }

    #[test]
    fn test_orphan_activity_not_listed() {
        let storage = create_test_storage();
        storage.insert_activity(777, "01/01/2024", "09:00", "Ghost").unwrap();

        assert!(storage
            .list_activities_for_date("01/01/2024", SortOrder::Descending)
            .unwrap()
            .is_empty());
        assert_eq!(storage.count_activities().unwrap(), 1);
    }

    #[test]
    fn test_stats_in_memory() {
        let storage = create_test_storage();
        let ana = storage.insert_employee(&employee("Ana")).unwrap();
        storage.insert_activity(ana, "01/01/2024", "09:00", "Standup").unwrap();

        let stats = storage.stats().unwrap();
        assert_eq!(stats.employees, 1);
        assert_eq!(stats.activities, 1);
        assert_eq!(stats.db_size_bytes, 0);
    }

    #[test]
    fn test_path() {
        let storage = create_test_storage();
        assert_eq!(storage.path().to_string_lossy(), ":memory:");
    }

    #[test]
    fn test_unicode_content() {
        let storage = create_test_storage();
        let id = storage.insert_employee(&employee("João Conceição")).unwrap();
        let activity = storage
            .insert_activity(id, "01/01/2024", "09:00", "Reunião de alinhamento")
            .unwrap();

        let rows = storage.list_activities_for_date_ascending("01/01/2024").unwrap();
        assert_eq!(rows[0].activity.id, activity);
        assert_eq!(rows[0].employee_name(), "João Conceição");
        assert_eq!(rows[0].activity.description, "Reunião de alinhamento");
    }

    #[test]
    fn test_open_file_based_reopen_keeps_data() {
        let db_path = std::env::temp_dir().join(format!(
            "staffbook_storage_test_{}.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&db_path);

        let storage = Storage::open(&db_path).unwrap();
        storage.insert_employee(&employee("Ana")).unwrap();
        assert_eq!(storage.path(), db_path);
        drop(storage);

        let reopened = Storage::open(&db_path).unwrap();
        assert_eq!(reopened.count_employees().unwrap(), 1);
        assert!(reopened.stats().unwrap().db_size_bytes > 0);

        drop(reopened);
        let _ = std::fs::remove_file(&db_path);
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let root = std::env::temp_dir().join(format!("staffbook_nested_{}", std::process::id()));
        let nested_path = root.join("nested/db.sqlite");
        let _ = std::fs::remove_dir_all(&root);

        let storage = Storage::open(&nested_path).unwrap();
        assert!(nested_path.exists());

        drop(storage);
        let _ = std::fs::remove_dir_all(&root);
    }
}
