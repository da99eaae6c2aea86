//! Use-case services.
//!
//! # Responsibility
//! - Keep callers decoupled from the storage mechanism.

pub mod bank_service;
