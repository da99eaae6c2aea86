//! Identity shared by customers and employees.
//!
//! # Invariants
//! - Fields are fixed at construction; there are no setters.
//! - `id` is unique within the collection of the embedding record kind,
//!   not across kinds.

use serde::{Deserialize, Serialize};

/// Integer identity assigned by the caller before insert.
pub type PersonId = i64;

/// Common person fields embedded in every record kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    id: PersonId,
    name: String,
    address: String,
    /// Free-form label, stored verbatim.
    gender: String,
}

impl Person {
    pub fn new(
        id: PersonId,
        name: impl Into<String>,
        address: impl Into<String>,
        gender: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            address: address.into(),
            gender: gender.into(),
        }
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }
}
