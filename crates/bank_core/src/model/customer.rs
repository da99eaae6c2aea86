//! Bank customer record.

use super::person::{Person, PersonId};
use serde::{Deserialize, Serialize};

/// A customer: shared person identity plus the customer's account number.
///
/// Serialized flat, so `id`/`name`/`address`/`gender` sit next to
/// `account_number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(flatten)]
    person: Person,
    pub account_number: String,
}

impl Customer {
    pub fn new(
        id: PersonId,
        name: impl Into<String>,
        address: impl Into<String>,
        gender: impl Into<String>,
        account_number: impl Into<String>,
    ) -> Self {
        Self::from_person(Person::new(id, name, address, gender), account_number)
    }

    pub fn from_person(person: Person, account_number: impl Into<String>) -> Self {
        Self {
            person,
            account_number: account_number.into(),
        }
    }

    pub fn id(&self) -> PersonId {
        self.person.id()
    }

    pub fn person(&self) -> &Person {
        &self.person
    }
}
