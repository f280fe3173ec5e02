//! `staffbook` - CLI for the staffbook record keeper
//!
//! This binary is a command-line front end over the record service, the day
//! views and the report generator.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use clap::Parser;

use staffbook::cli::{
    ActivityCommand, Cli, Command, ConfigCommand, EmployeeCommand, ReportCommand,
};
use staffbook::dates;
use staffbook::records::{ActivityForm, EmployeeForm};
use staffbook::views::{DayView, Roster};
use staffbook::{init_logging, Config, Records, ReportGenerator, ReportOutcome, Storage};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Employee(cmd) => handle_employee(&config, cmd),
        Command::Activity(cmd) => handle_activity(&config, cmd),
        Command::Report(cmd) => handle_report(&config, cmd),
        Command::Status(cmd) => handle_status(&config, cmd.json),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_records(config: &Config) -> staffbook::Result<Records> {
    let storage = Storage::open(config.database_path())?;
    Ok(Records::new(storage)
        .with_formats(&config.display.date_format, &config.display.time_format))
}

fn handle_employee(
    config: &Config,
    cmd: EmployeeCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut records = open_records(config)?;

    match cmd {
        EmployeeCommand::Add(args) => {
            let id = records.register_employee(&EmployeeForm::from(args))?;
            println!("Employee registered (id {id}).");
        }
        EmployeeCommand::Edit { id, changes } => {
            let Some(current) = records.storage().get_employee(id)? else {
                println!("No employee with id {id}.");
                return Ok(());
            };
            let form = changes.apply(EmployeeForm::from_employee(&current));
            match records.edit_employee(id, &form) {
                Ok(true) => println!("Employee {id} updated."),
                Ok(false) => println!("No employee with id {id}."),
                Err(err) => println!("Could not save: {err}"),
            }
        }
        EmployeeCommand::Remove { id } => {
            if records.remove_employee(id)? {
                println!("Employee {id} and its activities removed.");
            } else {
                println!("No employee with id {id}.");
            }
        }
        EmployeeCommand::List { json } => {
            let mut roster = Roster::default();
            roster.refresh(records.storage())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&roster.employees)?);
            } else if roster.employees.is_empty() {
                println!("No employees registered.");
            } else {
                for employee in &roster.employees {
                    println!("{:>5}  {}", employee.id, employee.name);
                    println!("       {}", Roster::subtitle(employee));
                }
            }
        }
    }
    Ok(())
}

fn handle_activity(
    config: &Config,
    cmd: ActivityCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let records = open_records(config)?;

    match cmd {
        ActivityCommand::Log(args) => {
            let id = records.log_activity(&ActivityForm::from(args))?;
            println!("Activity logged (id {id}).");
        }
        ActivityCommand::Remove { id } => {
            if records.remove_activity(id)? {
                println!("Activity {id} removed.");
            } else {
                println!("No activity with id {id}.");
            }
        }
        ActivityCommand::List { date, json } => {
            let date = date.unwrap_or_else(|| dates::today(&config.display.date_format));
            let mut view = DayView::new(date);
            view.refresh(records.storage())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("{}", view.heading);
                if view.entries.is_empty() {
                    println!("  No activities.");
                }
                for entry in &view.entries {
                    println!(
                        "  {:>5}  {}  {:<20}  {}",
                        entry.activity.id,
                        entry.activity.time,
                        entry.employee_name,
                        entry.activity.description
                    );
                }
            }
        }
    }
    Ok(())
}

fn handle_report(config: &Config, cmd: ReportCommand) -> Result<(), Box<dyn std::error::Error>> {
    let records = open_records(config)?;
    let date = cmd
        .date
        .unwrap_or_else(|| dates::today(&config.display.date_format));

    let mut generator = ReportGenerator::from_config(&config.report);
    if let Some(dir) = cmd.output_dir {
        generator = generator.with_output_dir(dir);
    }

    match generator.generate(records.storage(), &date)? {
        ReportOutcome::Empty { date } => println!("No activities on {date}, nothing to report."),
        ReportOutcome::Written { path, entries } => {
            println!("Report with {entries} activities written to {}", path.display());
        }
    }
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let storage = Storage::open(config.database_path())?;
    let stats = storage.stats()?;

    if json {
        let status = serde_json::json!({
            "database_path": storage.path(),
            "employees": stats.employees,
            "activities": stats.activities,
            "db_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("staffbook status");
        println!("----------------");
        println!("Database:      {}", storage.path().display());
        println!("Employees:     {}", stats.employees);
        println!("Activities:    {}", stats.activities);
        println!("Size (bytes):  {}", stats.db_size_bytes);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:  {}", config.database_path().display());
                println!();
                println!("[Report]");
                println!("  Output dir:     {}", config.report.output_dir.display());
                println!("  File prefix:    {}", config.report.file_prefix);
                println!("  Title:          {}", config.report.title);
                println!();
                println!("[Display]");
                println!("  Date format:    {}", config.display.date_format);
                println!("  Time format:    {}", config.display.time_format);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
