//! `staffbook` - Employee records and daily activity log
//!
//! This library keeps employee records and their timestamped activity entries in a
//! single `SQLite` file, and exports a day's activities as a paginated PDF report.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod dates;
pub mod error;
pub mod logging;
pub mod model;
pub mod records;
pub mod report;
pub mod storage;
pub mod views;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use model::{Activity, ActivityEntry, Employee, NewEmployee, ReportRow, SortOrder};
pub use records::{ActivityForm, EmployeeForm, Records};
pub use report::{ReportGenerator, ReportOutcome};
pub use storage::{Storage, StorageStats};
