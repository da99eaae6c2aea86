//! Service behavior observed through an in-memory storage context that
//! records every collection call and commit.

use bank_core::{
    BankManager, BankService, Customer, Employee, EntityKind, EntitySet, PersonId, RepoError,
    RepoResult, StorageContext,
};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

struct RecordingSet<E> {
    kind: EntityKind,
    id_of: fn(&E) -> PersonId,
    rows: RefCell<BTreeMap<PersonId, E>>,
    calls: RefCell<Vec<String>>,
}

impl<E: Clone> RecordingSet<E> {
    fn new(kind: EntityKind, id_of: fn(&E) -> PersonId, seed: Vec<E>) -> Self {
        let rows = seed.into_iter().map(|row| (id_of(&row), row)).collect();
        Self {
            kind,
            id_of,
            rows: RefCell::new(rows),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn record(&self, call: &str, id: PersonId) {
        self.calls.borrow_mut().push(format!("{call}:{id}"));
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl<E: Clone> EntitySet<E> for RecordingSet<E> {
    fn all(&self) -> RepoResult<Vec<E>> {
        Ok(self.rows.borrow().values().cloned().collect())
    }

    fn find(&self, id: PersonId) -> RepoResult<Option<E>> {
        self.record("find", id);
        Ok(self.rows.borrow().get(&id).cloned())
    }

    fn add(&self, entity: &E) -> RepoResult<()> {
        let id = (self.id_of)(entity);
        self.record("add", id);
        self.rows.borrow_mut().insert(id, entity.clone());
        Ok(())
    }

    fn update(&self, entity: &E) -> RepoResult<()> {
        let id = (self.id_of)(entity);
        self.record("update", id);
        match self.rows.borrow_mut().get_mut(&id) {
            Some(row) => {
                *row = entity.clone();
                Ok(())
            }
            None => Err(RepoError::NotFound {
                kind: self.kind,
                id,
            }),
        }
    }

    fn remove(&self, entity: &E) -> RepoResult<()> {
        let id = (self.id_of)(entity);
        self.record("remove", id);
        self.rows.borrow_mut().remove(&id);
        Ok(())
    }
}

struct RecordingContext {
    customers: RecordingSet<Customer>,
    employees: RecordingSet<Employee>,
    commits: Cell<usize>,
    discards: Cell<usize>,
}

impl StorageContext for RecordingContext {
    type Customers = RecordingSet<Customer>;
    type Employees = RecordingSet<Employee>;

    fn customers(&self) -> &Self::Customers {
        &self.customers
    }

    fn employees(&self) -> &Self::Employees {
        &self.employees
    }

    fn save_changes(&self) -> RepoResult<()> {
        self.commits.set(self.commits.get() + 1);
        Ok(())
    }

    fn discard_changes(&self) -> RepoResult<()> {
        self.discards.set(self.discards.get() + 1);
        Ok(())
    }
}

fn recording_service() -> BankManager<RecordingContext> {
    BankManager::new(RecordingContext {
        customers: RecordingSet::new(
            EntityKind::Customer,
            Customer::id,
            vec![
                Customer::new(1, "Customer 1", "Address1", "woman", "1000"),
                Customer::new(2, "Customer 2", "Address2", "man", "1001"),
                Customer::new(3, "Customer 3", "Address3", "woman", "1002"),
            ],
        ),
        employees: RecordingSet::new(
            EntityKind::Employee,
            Employee::id,
            vec![
                Employee::new(1, "Employee 1", "Address1", "woman", "Manager"),
                Employee::new(2, "Employee 2", "Address2", "man", "Clerk"),
            ],
        ),
        commits: Cell::new(0),
        discards: Cell::new(0),
    })
}

#[test]
fn reads_never_commit() {
    let service = recording_service();

    assert_eq!(service.get_all_customers().unwrap().len(), 3);
    assert_eq!(service.get_all_employees().unwrap().len(), 2);
    assert!(service.get_customer_by_id(2).unwrap().is_some());
    assert!(service.get_employee_by_id(9).unwrap().is_none());

    assert_eq!(service.context().commits.get(), 0);
}

#[test]
fn insert_customer_adds_once_and_commits_once() {
    let service = recording_service();

    service
        .insert_customer(&Customer::new(4, "Customer 4", "Address 4", "man", "1003"))
        .unwrap();

    assert_eq!(service.context().customers.calls(), vec!["add:4"]);
    assert_eq!(service.context().commits.get(), 1);
}

#[test]
fn update_customer_updates_once_and_commits_once() {
    let service = recording_service();

    service
        .update_customer(&Customer::new(2, "Updated Customer 2", "Address 2", "man", "1001"))
        .unwrap();

    assert_eq!(service.context().customers.calls(), vec!["update:2"]);
    assert_eq!(service.context().commits.get(), 1);
}

#[test]
fn delete_customer_finds_then_removes_and_commits_once() {
    let service = recording_service();

    service.delete_customer(2).unwrap();

    assert_eq!(service.context().customers.calls(), vec!["find:2", "remove:2"]);
    assert_eq!(service.context().commits.get(), 1);
}

#[test]
fn delete_absent_customer_neither_removes_nor_commits() {
    let service = recording_service();

    service.delete_customer(42).unwrap();

    assert_eq!(service.context().customers.calls(), vec!["find:42"]);
    assert_eq!(service.context().commits.get(), 0);
    assert_eq!(service.get_all_customers().unwrap().len(), 3);
}

#[test]
fn each_mutation_commits_separately() {
    let service = recording_service();

    service
        .insert_employee(&Employee::new(3, "Employee 3", "Address 3", "woman", "Developer"))
        .unwrap();
    service
        .update_employee(&Employee::new(2, "Updated Employee 2", "Address 3", "woman", "Clerk"))
        .unwrap();
    service.delete_employee(1).unwrap();

    assert_eq!(
        service.context().employees.calls(),
        vec!["add:3", "update:2", "find:1", "remove:1"]
    );
    assert_eq!(service.context().commits.get(), 3);
    assert_eq!(service.context().discards.get(), 0);
}

#[test]
fn failed_update_discards_instead_of_committing() {
    let service = recording_service();

    let err = service
        .update_employee(&Employee::new(9, "Ghost", "Nowhere", "man", "Clerk"))
        .unwrap_err();

    assert!(matches!(
        err,
        RepoError::NotFound {
            kind: EntityKind::Employee,
            id: 9
        }
    ));
    assert_eq!(service.context().commits.get(), 0);
    assert_eq!(service.context().discards.get(), 1);
}

#[test]
fn service_is_usable_as_trait_object() {
    let manager = recording_service();
    let service: &dyn BankService = &manager;

    service.delete_employee(2).unwrap();

    assert_eq!(service.get_all_employees().unwrap().len(), 1);
    assert_eq!(manager.context().commits.get(), 1);
}
