//! Data access for bank customers and employees.
//!
//! Callers work against [`BankService`]; [`BankManager`] implements it over
//! any [`StorageContext`], with [`SqliteStorageContext`] as the SQLite
//! backend.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{BankConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::customer::Customer;
pub use model::employee::Employee;
pub use model::person::{Person, PersonId};
pub use model::EntityKind;
pub use repo::context::{EntitySet, SqliteStorageContext, StorageContext};
pub use repo::customer_repo::SqliteCustomerSet;
pub use repo::employee_repo::SqliteEmployeeSet;
pub use repo::error::{RepoError, RepoResult};
pub use service::bank_service::{BankManager, BankService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
