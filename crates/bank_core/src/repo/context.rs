//! Storage context contracts and the SQLite-backed context.
//!
//! # Invariants
//! - Mutations made through a set stay pending until `save_changes`.
//! - `save_changes` with nothing pending does not touch the database.
//! - A context is only built over a connection migrated to the latest
//!   schema version with every required column present.

use super::customer_repo::SqliteCustomerSet;
use super::employee_repo::SqliteEmployeeSet;
use super::error::{RepoError, RepoResult};
use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use crate::model::customer::Customer;
use crate::model::employee::Employee;
use crate::model::person::{Person, PersonId};
use log::debug;
use rusqlite::{Connection, Row};
use std::collections::HashSet;

const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    (
        "customers",
        &["id", "name", "address", "gender", "account_number"],
    ),
    ("employees", &["id", "name", "address", "gender", "position"]),
];

/// Collection handle for one entity kind.
pub trait EntitySet<E> {
    /// Every stored record. Callers must not rely on the order.
    fn all(&self) -> RepoResult<Vec<E>>;
    /// The record with `id`, or `None` when absent.
    fn find(&self, id: PersonId) -> RepoResult<Option<E>>;
    fn add(&self, entity: &E) -> RepoResult<()>;
    /// Replaces the stored record with the same id.
    ///
    /// Fails with [`RepoError::NotFound`] when no record has that id.
    fn update(&self, entity: &E) -> RepoResult<()>;
    fn remove(&self, entity: &E) -> RepoResult<()>;
}

/// Per-kind collections plus a single commit point.
pub trait StorageContext {
    type Customers: EntitySet<Customer>;
    type Employees: EntitySet<Employee>;

    fn customers(&self) -> &Self::Customers;
    fn employees(&self) -> &Self::Employees;
    /// Durably persists everything changed through the sets since the last
    /// commit.
    fn save_changes(&self) -> RepoResult<()>;
    /// Drops pending changes without persisting them.
    fn discard_changes(&self) -> RepoResult<()>;
}

/// SQLite storage context over a borrowed, migrated connection.
pub struct SqliteStorageContext<'conn> {
    conn: &'conn Connection,
    customers: SqliteCustomerSet<'conn>,
    employees: SqliteEmployeeSet<'conn>,
}

impl<'conn> SqliteStorageContext<'conn> {
    /// Builds a context after checking the connection schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self {
            conn,
            customers: SqliteCustomerSet::new(conn),
            employees: SqliteEmployeeSet::new(conn),
        })
    }

    /// Returns whether mutations are waiting for `save_changes`.
    pub fn has_pending_changes(&self) -> bool {
        !self.conn.is_autocommit()
    }
}

impl<'conn> StorageContext for SqliteStorageContext<'conn> {
    type Customers = SqliteCustomerSet<'conn>;
    type Employees = SqliteEmployeeSet<'conn>;

    fn customers(&self) -> &Self::Customers {
        &self.customers
    }

    fn employees(&self) -> &Self::Employees {
        &self.employees
    }

    fn save_changes(&self) -> RepoResult<()> {
        if !self.has_pending_changes() {
            debug!("event=save_changes module=repo status=skip reason=nothing_pending");
            return Ok(());
        }
        self.conn.execute_batch("COMMIT;")?;
        debug!("event=save_changes module=repo status=ok");
        Ok(())
    }

    fn discard_changes(&self) -> RepoResult<()> {
        if self.has_pending_changes() {
            self.conn.execute_batch("ROLLBACK;")?;
            debug!("event=discard_changes module=repo status=ok");
        }
        Ok(())
    }
}

/// Opens the pending transaction unless one is already open.
pub(crate) fn begin_pending(conn: &Connection) -> RepoResult<()> {
    if conn.is_autocommit() {
        conn.execute_batch("BEGIN IMMEDIATE;")?;
    }
    Ok(())
}

/// Reads the shared person columns from a record row.
pub(crate) fn read_person(row: &Row<'_>) -> rusqlite::Result<Person> {
    Ok(Person::new(
        row.get::<_, PersonId>("id")?,
        row.get::<_, String>("name")?,
        row.get::<_, String>("address")?,
        row.get::<_, String>("gender")?,
    ))
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = schema_version(conn)?;
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    if actual_version > expected_version {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: actual_version,
            latest_supported: expected_version,
        }
        .into());
    }

    for &(table, columns) in REQUIRED_SCHEMA {
        let present = table_columns(conn, table)?;
        if present.is_empty() {
            return Err(RepoError::MissingRequiredTable(table));
        }
        if let Some(column) = columns
            .iter()
            .copied()
            .find(|column| !present.contains(*column))
        {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> RepoResult<HashSet<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = HashSet::new();
    while let Some(row) = rows.next()? {
        columns.insert(row.get::<_, String>("name")?);
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::{table_columns, SqliteStorageContext, StorageContext};
    use crate::db::open_db_in_memory;

    #[test]
    fn table_columns_is_empty_for_unknown_table() {
        let conn = open_db_in_memory().unwrap();
        assert!(table_columns(&conn, "nope").unwrap().is_empty());
    }

    #[test]
    fn save_and_discard_without_pending_changes_are_noops() {
        let conn = open_db_in_memory().unwrap();
        let context = SqliteStorageContext::try_new(&conn).unwrap();

        assert!(!context.has_pending_changes());
        context.save_changes().unwrap();
        context.discard_changes().unwrap();
        assert!(conn.is_autocommit());
    }
}
