//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::records::{ActivityForm, EmployeeForm};

/// Employee management commands.
#[derive(Debug, Subcommand)]
pub enum EmployeeCommand {
    /// Register a new employee
    Add(EmployeeArgs),

    /// Edit an employee; omitted fields keep their stored value
    Edit {
        /// Employee id
        id: i64,

        /// Fields to change
        #[command(flatten)]
        changes: EmployeeChanges,
    },

    /// Remove an employee and all of its activities
    Remove {
        /// Employee id
        id: i64,
    },

    /// List employees by name
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Fields of a new employee.
#[derive(Debug, Args)]
pub struct EmployeeArgs {
    /// Full name
    #[arg(short, long)]
    pub name: String,

    /// National identity number (CPF)
    #[arg(long, default_value = "")]
    pub cpf: String,

    /// Job title
    #[arg(short, long, default_value = "")]
    pub role: String,

    /// Department
    #[arg(short, long, default_value = "")]
    pub department: String,

    /// Monthly salary; unparseable values count as zero
    #[arg(short, long, default_value = "")]
    pub salary: String,

    /// Admission date (DD/MM/YYYY)
    #[arg(short, long, default_value = "")]
    pub admission_date: String,
}

impl From<EmployeeArgs> for EmployeeForm {
    fn from(args: EmployeeArgs) -> Self {
        Self {
            name: args.name,
            national_id: args.cpf,
            role: args.role,
            department: args.department,
            salary: args.salary,
            admission_date: args.admission_date,
        }
    }
}

/// Changed fields of an existing employee.
#[derive(Debug, Default, Args)]
pub struct EmployeeChanges {
    /// Full name
    #[arg(short, long)]
    pub name: Option<String>,

    /// National identity number (CPF)
    #[arg(long)]
    pub cpf: Option<String>,

    /// Job title
    #[arg(short, long)]
    pub role: Option<String>,

    /// Department
    #[arg(short, long)]
    pub department: Option<String>,

    /// Monthly salary; unparseable values count as zero
    #[arg(short, long)]
    pub salary: Option<String>,

    /// Admission date (DD/MM/YYYY)
    #[arg(short, long)]
    pub admission_date: Option<String>,
}

impl EmployeeChanges {
    /// Overlay the changed fields on a prefilled form.
    #[must_use]
    pub fn apply(self, mut form: EmployeeForm) -> EmployeeForm {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(cpf) = self.cpf {
            form.national_id = cpf;
        }
        if let Some(role) = self.role {
            form.role = role;
        }
        if let Some(department) = self.department {
            form.department = department;
        }
        if let Some(salary) = self.salary {
            form.salary = salary;
        }
        if let Some(admission_date) = self.admission_date {
            form.admission_date = admission_date;
        }
        form
    }
}

/// Activity log commands.
#[derive(Debug, Subcommand)]
pub enum ActivityCommand {
    /// Log an activity for an employee
    Log(ActivityArgs),

    /// Remove an activity
    Remove {
        /// Activity id
        id: i64,
    },

    /// List one day's activities, latest first
    List {
        /// Day to list (DD/MM/YYYY); defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Fields of a new activity.
#[derive(Debug, Args)]
pub struct ActivityArgs {
    /// Employee id
    #[arg(short, long)]
    pub employee: Option<i64>,

    /// What happened
    #[arg(short = 'm', long)]
    pub description: String,

    /// Day (DD/MM/YYYY); defaults to today
    #[arg(short, long, default_value = "")]
    pub date: String,

    /// Time (HH:MM); defaults to now
    #[arg(short, long, default_value = "")]
    pub time: String,
}

impl From<ActivityArgs> for ActivityForm {
    fn from(args: ActivityArgs) -> Self {
        Self {
            employee_id: args.employee,
            date: args.date,
            time: args.time,
            description: args.description,
        }
    }
}

/// Report command arguments.
#[derive(Debug, Args)]
pub struct ReportCommand {
    /// Day to report (DD/MM/YYYY); defaults to today
    #[arg(short, long)]
    pub date: Option<String>,

    /// Directory to write the PDF to
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
