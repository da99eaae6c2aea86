//! SQLite collection handle for `employees`.

use super::context::{begin_pending, read_person, EntitySet};
use super::error::{RepoError, RepoResult};
use crate::model::employee::Employee;
use crate::model::person::PersonId;
use crate::model::EntityKind;
use rusqlite::{params, Connection, Row};

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    id,
    name,
    address,
    gender,
    position
FROM employees";

pub struct SqliteEmployeeSet<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeSet<'conn> {
    pub(crate) fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EntitySet<Employee> for SqliteEmployeeSet<'_> {
    fn all(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }
        Ok(employees)
    }

    fn find(&self, id: PersonId) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }
        Ok(None)
    }

    fn add(&self, employee: &Employee) -> RepoResult<()> {
        begin_pending(self.conn)?;
        let person = employee.person();
        self.conn.execute(
            "INSERT INTO employees (id, name, address, gender, position)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                person.id(),
                person.name(),
                person.address(),
                person.gender(),
                employee.position.as_str(),
            ],
        )?;
        Ok(())
    }

    fn update(&self, employee: &Employee) -> RepoResult<()> {
        begin_pending(self.conn)?;
        let person = employee.person();
        let changed = self.conn.execute(
            "UPDATE employees
             SET
                name = ?2,
                address = ?3,
                gender = ?4,
                position = ?5
             WHERE id = ?1;",
            params![
                person.id(),
                person.name(),
                person.address(),
                person.gender(),
                employee.position.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Employee,
                id: employee.id(),
            });
        }
        Ok(())
    }

    fn remove(&self, employee: &Employee) -> RepoResult<()> {
        begin_pending(self.conn)?;
        self.conn
            .execute("DELETE FROM employees WHERE id = ?1;", params![employee.id()])?;
        Ok(())
    }
}

fn parse_employee_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee::from_person(
        read_person(row)?,
        row.get::<_, String>("position")?,
    ))
}
