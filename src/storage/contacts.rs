use std::collections::HashSet;

use tracing::{debug, instrument, warn};

use super::{KeyValueStore, StorageError};
use crate::domain::Contact;

/// Fixed key the contact list is stored under.
pub const CONTACTS_KEY: &str = "contacts";

/// Storage adapter for the contact list.
///
/// Reads the serialized list once at startup and rewrites it wholesale on
/// every change.
pub struct ContactRepository {
    backend: Box<dyn KeyValueStore>,
}

impl ContactRepository {
    pub fn new(backend: impl KeyValueStore) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Returns the persisted list. Missing, unreadable or malformed data all
    /// yield an empty list.
    #[instrument(skip(self))]
    pub fn load(&self) -> Vec<Contact> {
        let raw = match self.backend.get_item(CONTACTS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("Nothing persisted yet");
                return Vec::new();
            }
            Err(e) => {
                warn!(error = %e, "Failed to read persisted contacts, starting empty");
                return Vec::new();
            }
        };

        // A stored `null` means nothing was saved.
        match serde_json::from_str::<Option<Vec<Contact>>>(&raw) {
            Ok(contacts) => {
                let contacts = dedup_by_id(contacts.unwrap_or_default());
                debug!(count = contacts.len(), "Loaded contacts");
                contacts
            }
            Err(e) => {
                warn!(error = %e, "Persisted contacts are malformed, starting empty");
                Vec::new()
            }
        }
    }

    /// Serializes the full list and overwrites the stored value.
    #[instrument(skip(self, contacts), fields(count = contacts.len()))]
    pub fn save(&mut self, contacts: &[Contact]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(contacts)?;
        self.backend.set_item(CONTACTS_KEY, &raw)?;
        debug!("Contacts saved");
        Ok(())
    }
}

/// Keeps the first record for each id; later records reusing an id are dropped.
fn dedup_by_id(contacts: Vec<Contact>) -> Vec<Contact> {
    let total = contacts.len();
    let mut seen = HashSet::new();
    let unique: Vec<Contact> = contacts
        .into_iter()
        .filter(|contact| seen.insert(contact.id.clone()))
        .collect();
    if unique.len() < total {
        warn!(dropped = total - unique.len(), "Persisted contacts reuse ids, keeping the first of each");
    }
    unique
}
