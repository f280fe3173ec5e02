//! `SQLite` schema definitions for staffbook.
//!
//! Every statement is idempotent so the schema can be applied on each start.

/// SQL statement to create the employees table.
pub const CREATE_EMPLOYEES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    national_id TEXT NOT NULL DEFAULT '',
    role TEXT NOT NULL DEFAULT '',
    department TEXT NOT NULL DEFAULT '',
    salary REAL NOT NULL DEFAULT 0,
    admission_date TEXT NOT NULL DEFAULT ''
)
";

/// SQL statement to create the activities table.
///
/// The foreign key is declarative only; dependent rows are removed explicitly.
pub const CREATE_ACTIVITIES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS activities (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    employee_id INTEGER NOT NULL,
    date TEXT NOT NULL,
    time TEXT NOT NULL,
    description TEXT NOT NULL,
    FOREIGN KEY(employee_id) REFERENCES employees(id)
)
";

/// SQL statement to create an index on activity date for the day queries.
pub const CREATE_ACTIVITY_DATE_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_activities_date ON activities(date, time)
";

/// SQL statement to create an index on the owning employee for cascading deletes.
pub const CREATE_ACTIVITY_EMPLOYEE_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_activities_employee ON activities(employee_id)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_EMPLOYEES_TABLE,
    CREATE_ACTIVITIES_TABLE,
    CREATE_ACTIVITY_DATE_INDEX,
    CREATE_ACTIVITY_EMPLOYEE_INDEX,
];
