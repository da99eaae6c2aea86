//! Bank record service.
//!
//! # Responsibility
//! - Expose customer/employee CRUD as a storage-agnostic contract.
//! - Delegate every operation to the matching storage-context collection.
//!
//! # Invariants
//! - A successful mutation commits exactly once; nothing is batched across
//!   calls.
//! - A failed mutation discards pending changes and returns the storage
//!   error unchanged.
//! - Deleting an absent id is a no-op: no error and no commit.

use crate::model::customer::Customer;
use crate::model::employee::Employee;
use crate::model::person::PersonId;
use crate::repo::context::{EntitySet, StorageContext};
use crate::repo::error::RepoResult;
use log::{debug, error, info, warn};

/// CRUD contract over customers and employees.
pub trait BankService {
    fn get_all_customers(&self) -> RepoResult<Vec<Customer>>;
    fn get_customer_by_id(&self, id: PersonId) -> RepoResult<Option<Customer>>;
    fn insert_customer(&self, customer: &Customer) -> RepoResult<()>;
    /// Fails with `RepoError::NotFound` when no customer has `customer.id()`.
    fn update_customer(&self, customer: &Customer) -> RepoResult<()>;
    fn delete_customer(&self, id: PersonId) -> RepoResult<()>;

    fn get_all_employees(&self) -> RepoResult<Vec<Employee>>;
    fn get_employee_by_id(&self, id: PersonId) -> RepoResult<Option<Employee>>;
    fn insert_employee(&self, employee: &Employee) -> RepoResult<()>;
    /// Fails with `RepoError::NotFound` when no employee has `employee.id()`.
    fn update_employee(&self, employee: &Employee) -> RepoResult<()>;
    fn delete_employee(&self, id: PersonId) -> RepoResult<()>;
}

/// [`BankService`] backed by a [`StorageContext`].
pub struct BankManager<C: StorageContext> {
    context: C,
}

impl<C: StorageContext> BankManager<C> {
    pub fn new(context: C) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    /// Commits a successful mutation, or discards it and hands back the error.
    fn persist(
        &self,
        event: &'static str,
        id: PersonId,
        mutation: RepoResult<()>,
    ) -> RepoResult<()> {
        match mutation.and_then(|()| self.context.save_changes()) {
            Ok(()) => {
                info!("event={event} module=service status=ok id={id}");
                Ok(())
            }
            Err(err) => {
                if let Err(discard_err) = self.context.discard_changes() {
                    warn!(
                        "event={event} module=service status=error error_code=discard_failed id={id} error={discard_err}"
                    );
                }
                error!("event={event} module=service status=error id={id} error={err}");
                Err(err)
            }
        }
    }
}

impl<C: StorageContext> BankService for BankManager<C> {
    fn get_all_customers(&self) -> RepoResult<Vec<Customer>> {
        self.context.customers().all()
    }

    fn get_customer_by_id(&self, id: PersonId) -> RepoResult<Option<Customer>> {
        self.context.customers().find(id)
    }

    fn insert_customer(&self, customer: &Customer) -> RepoResult<()> {
        let added = self.context.customers().add(customer);
        self.persist("customer_insert", customer.id(), added)
    }

    fn update_customer(&self, customer: &Customer) -> RepoResult<()> {
        let updated = self.context.customers().update(customer);
        self.persist("customer_update", customer.id(), updated)
    }

    fn delete_customer(&self, id: PersonId) -> RepoResult<()> {
        let customers = self.context.customers();
        let Some(customer) = customers.find(id)? else {
            debug!("event=customer_delete module=service status=skip reason=not_found id={id}");
            return Ok(());
        };
        let removed = customers.remove(&customer);
        self.persist("customer_delete", id, removed)
    }

    fn get_all_employees(&self) -> RepoResult<Vec<Employee>> {
        self.context.employees().all()
    }

    fn get_employee_by_id(&self, id: PersonId) -> RepoResult<Option<Employee>> {
        self.context.employees().find(id)
    }

    fn insert_employee(&self, employee: &Employee) -> RepoResult<()> {
        let added = self.context.employees().add(employee);
        self.persist("employee_insert", employee.id(), added)
    }

    fn update_employee(&self, employee: &Employee) -> RepoResult<()> {
        let updated = self.context.employees().update(employee);
        self.persist("employee_update", employee.id(), updated)
    }

    fn delete_employee(&self, id: PersonId) -> RepoResult<()> {
        let employees = self.context.employees();
        let Some(employee) = employees.find(id)? else {
            debug!("event=employee_delete module=service status=skip reason=not_found id={id}");
            return Ok(());
        };
        let removed = employees.remove(&employee);
        self.persist("employee_delete", id, removed)
    }
}
