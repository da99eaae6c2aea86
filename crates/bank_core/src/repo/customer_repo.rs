//! SQLite collection handle for `customers`.

use super::context::{begin_pending, read_person, EntitySet};
use super::error::{RepoError, RepoResult};
use crate::model::customer::Customer;
use crate::model::person::PersonId;
use crate::model::EntityKind;
use rusqlite::{params, Connection, Row};

const CUSTOMER_SELECT_SQL: &str = "SELECT
    id,
    name,
    address,
    gender,
    account_number
FROM customers";

pub struct SqliteCustomerSet<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCustomerSet<'conn> {
    pub(crate) fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EntitySet<Customer> for SqliteCustomerSet<'_> {
    fn all(&self) -> RepoResult<Vec<Customer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CUSTOMER_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut customers = Vec::new();
        while let Some(row) = rows.next()? {
            customers.push(parse_customer_row(row)?);
        }
        Ok(customers)
    }

    fn find(&self, id: PersonId) -> RepoResult<Option<Customer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CUSTOMER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_customer_row(row)?)),
            None => Ok(None),
        }
    }

    fn add(&self, customer: &Customer) -> RepoResult<()> {
        begin_pending(self.conn)?;
        let person = customer.person();
        self.conn.execute(
            "INSERT INTO customers (id, name, address, gender, account_number)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                person.id(),
                person.name(),
                person.address(),
                person.gender(),
                customer.account_number.as_str(),
            ],
        )?;
        Ok(())
    }

    fn update(&self, customer: &Customer) -> RepoResult<()> {
        begin_pending(self.conn)?;
        let person = customer.person();
        let changed = self.conn.execute(
            "UPDATE customers
             SET
                name = ?2,
                address = ?3,
                gender = ?4,
                account_number = ?5
             WHERE id = ?1;",
            params![
                person.id(),
                person.name(),
                person.address(),
                person.gender(),
                customer.account_number.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Customer,
                id: customer.id(),
            });
        }
        Ok(())
    }

    fn remove(&self, customer: &Customer) -> RepoResult<()> {
        begin_pending(self.conn)?;
        self.conn
            .execute("DELETE FROM customers WHERE id = ?1;", params![customer.id()])?;
        Ok(())
    }
}

fn parse_customer_row(row: &Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer::from_person(
        read_person(row)?,
        row.get::<_, String>("account_number")?,
    ))
}
