//! Storage context: per-kind collections and the commit point.
//!
//! # Responsibility
//! - Define the collection and context contracts the service layer uses.
//! - Keep SQL for `customers`/`employees` inside this module.
//!
//! # Invariants
//! - Lookups report absence as `Ok(None)`, never as an error.
//! - Engine errors are passed through as `RepoError::Db` with the original
//!   `rusqlite::Error` as source.

pub mod context;
pub mod customer_repo;
pub mod employee_repo;
pub mod error;
