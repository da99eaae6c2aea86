//! Command-line host for the bank store.
//!
//! Loads configuration from `BANK_*` environment variables, lets flags
//! override them, opens the database and runs one service operation.

use anyhow::{Context, Result};
use bank_core::{
    init_logging, BankConfig, BankManager, BankService, Customer, Employee, PersonId,
    SqliteStorageContext,
};
use clap::{Args, Parser, Subcommand};
use log::{error, info};
use serde::Serialize;
use std::path::PathBuf;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "bank", version, about = "Manage bank customers and employees")]
struct CliArguments {
    /// SQLite database file; overrides BANK_DB_PATH. In-memory when unset.
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// trace|debug|info|warn|error; overrides BANK_LOG_LEVEL.
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute directory for rolling logs; overrides BANK_LOG_DIR.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Customer records.
    #[command(subcommand)]
    Customers(CustomerCommand),
    /// Employee records.
    #[command(subcommand)]
    Employees(EmployeeCommand),
}

#[derive(Debug, Subcommand)]
enum CustomerCommand {
    List,
    Get { id: PersonId },
    Insert(CustomerArgs),
    Update(CustomerArgs),
    Delete { id: PersonId },
}

#[derive(Debug, Subcommand)]
enum EmployeeCommand {
    List,
    Get { id: PersonId },
    Insert(EmployeeArgs),
    Update(EmployeeArgs),
    Delete { id: PersonId },
}

#[derive(Debug, Args)]
struct PersonArgs {
    #[arg(long)]
    id: PersonId,
    #[arg(long)]
    name: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    gender: String,
}

#[derive(Debug, Args)]
struct CustomerArgs {
    #[command(flatten)]
    person: PersonArgs,
    #[arg(long)]
    account_number: String,
}

impl From<CustomerArgs> for Customer {
    fn from(args: CustomerArgs) -> Self {
        let PersonArgs {
            id,
            name,
            address,
            gender,
        } = args.person;
        Customer::new(id, name, address, gender, args.account_number)
    }
}

#[derive(Debug, Args)]
struct EmployeeArgs {
    #[command(flatten)]
    person: PersonArgs,
    #[arg(long)]
    position: String,
}

impl From<EmployeeArgs> for Employee {
    fn from(args: EmployeeArgs) -> Self {
        let PersonArgs {
            id,
            name,
            address,
            gender,
        } = args.person;
        Employee::new(id, name, address, gender, args.position)
    }
}

struct Application {
    config: BankConfig,
}

impl Application {
    fn new(arguments: &CliArguments) -> Result<Self> {
        let mut config = BankConfig::from_env().context("invalid BANK_* environment")?;
        if let Some(db) = &arguments.db {
            config.db_path = Some(db.clone());
        }
        if let Some(level) = &arguments.log_level {
            config = config.with_log_level(level)?;
        }
        if let Some(dir) = &arguments.log_dir {
            config = config.with_log_dir(dir.clone())?;
        }
        Ok(Self { config })
    }

    fn run(&self, command: Command) -> Result<()> {
        if let Some(log_dir) = &self.config.log_dir {
            init_logging(self.config.log_level, log_dir)?;
        }
        info!(
            "event=cli_start module=cli status=ok version={}",
            bank_core::core_version()
        );

        let conn = self
            .config
            .open_connection()
            .context("failed to open bank database")?;
        let service = BankManager::new(SqliteStorageContext::try_new(&conn)?);
        execute(&service, command)
    }
}

fn execute(service: &dyn BankService, command: Command) -> Result<()> {
    match command {
        Command::Customers(command) => match command {
            CustomerCommand::List => print_json(&service.get_all_customers()?),
            CustomerCommand::Get { id } => print_json(&service.get_customer_by_id(id)?),
            CustomerCommand::Insert(args) => Ok(service.insert_customer(&args.into())?),
            CustomerCommand::Update(args) => Ok(service.update_customer(&args.into())?),
            CustomerCommand::Delete { id } => Ok(service.delete_customer(id)?),
        },
        Command::Employees(command) => match command {
            EmployeeCommand::List => print_json(&service.get_all_employees()?),
            EmployeeCommand::Get { id } => print_json(&service.get_employee_by_id(id)?),
            EmployeeCommand::Insert(args) => Ok(service.insert_employee(&args.into())?),
            EmployeeCommand::Update(args) => Ok(service.update_employee(&args.into())?),
            EmployeeCommand::Delete { id } => Ok(service.delete_employee(id)?),
        },
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let arguments = CliArguments::parse();
    let application = Application::new(&arguments)?;

    let result = application.run(arguments.command);
    if let Err(err) = &result {
        error!("event=cli_exit module=cli status=error error={err:#}");
    }
    result
}
