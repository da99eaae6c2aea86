//! Bank staff record.

use super::person::{Person, PersonId};
use serde::{Deserialize, Serialize};

/// An employee: shared person identity plus a free-form position label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(flatten)]
    person: Person,
    pub position: String,
}

impl Employee {
    pub fn new(
        id: PersonId,
        name: impl Into<String>,
        address: impl Into<String>,
        gender: impl Into<String>,
        position: impl Into<String>,
    ) -> Self {
        Self::from_person(Person::new(id, name, address, gender), position)
    }

    pub fn from_person(person: Person, position: impl Into<String>) -> Self {
        Self {
            person,
            position: position.into(),
        }
    }

    pub fn id(&self) -> PersonId {
        self.person.id()
    }

    pub fn person(&self) -> &Person {
        &self.person
    }
}

#[cfg(test)]
mod tests {
    use super::Employee;

    #[test]
    fn accessors_expose_embedded_person() {
        let employee = Employee::new(3, "Employee 3", "Address 3", "woman", "Developer");

        assert_eq!(employee.id(), 3);
        assert_eq!(employee.person().name(), "Employee 3");
        assert_eq!(employee.person().address(), "Address 3");
        assert_eq!(employee.person().gender(), "woman");
        assert_eq!(employee.position, "Developer");
    }
}
