//! Record kinds managed by the bank store.
//!
//! # Invariants
//! - Customers and employees share the `Person` shape by composition only;
//!   the two kinds live in independent collections with no cross reference.

pub mod customer;
pub mod employee;
pub mod person;

/// Names the collection a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Customer,
    Employee,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Employee => "employee",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
