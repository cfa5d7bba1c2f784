use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque contact identifier. Generated once at creation and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A phonebook entry. Field names match the persisted JSON layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub number: String,
}

/// Payload for adding a new contact. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactCreate {
    pub name: String,
    pub number: String,
}

impl ContactCreate {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
        }
    }
}

impl Contact {
    /// Builds the stored record from a freshly generated id and the form payload.
    pub fn from_create(id: ContactId, payload: ContactCreate) -> Self {
        Self {
            id,
            name: payload.name,
            number: payload.number,
        }
    }

    /// Case-insensitive substring match on the name. `needle` must already be lowercased.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }
}
