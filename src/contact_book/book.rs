use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::domain::{Contact, ContactCreate, ContactId, ContactView};
use crate::notify::{Notice, Notifier};
use crate::storage::ContactRepository;

/// Message shown when an add is rejected because the name is taken.
pub const DUPLICATE_MESSAGE: &str = "This user is already in contact!";

/// Message shown when no unused id could be generated.
pub const ID_EXHAUSTED_MESSAGE: &str = "Could not generate a unique id for this contact";

/// Draws per add before the id generator is considered broken.
const MAX_ID_ATTEMPTS: usize = 16;

/// Result of [`ContactBook::add`]. A rejection is not an error; the user is
/// told through the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(ContactId),
    Rejected,
}

type IdGenerator = Box<dyn FnMut() -> ContactId + Send>;

/// Ordered in-memory contact list with a name filter, mirrored to storage
/// after every mutation.
///
/// Invariants: ids are unique, names are unique (case-sensitive), insertion
/// order is preserved.
pub struct ContactBook {
    contacts: Vec<Contact>,
    filter: String,
    repository: ContactRepository,
    notifier: Arc<dyn Notifier>,
    next_id_fn: IdGenerator,
}

impl ContactBook {
    /// Populates the list from storage; anything unreadable starts empty.
    pub fn open(repository: ContactRepository, notifier: Arc<dyn Notifier>) -> Self {
        let contacts = repository.load();
        info!(count = contacts.len(), "Contact book opened");
        let book = Self {
            contacts,
            filter: String::new(),
            repository,
            notifier,
            next_id_fn: Box::new(ContactId::generate),
        };
        if book.is_empty() {
            debug!("Starting with an empty contact book");
        }
        book
    }

    /// Replaces the id source. Generated ids that already exist are skipped.
    #[cfg(test)]
    pub fn with_id_generator(mut self, next_id_fn: impl FnMut() -> ContactId + Send + 'static) -> Self {
        self.next_id_fn = Box::new(next_id_fn);
        self
    }

    #[instrument(skip(self, payload), fields(name = %payload.name))]
    pub fn add(&mut self, payload: ContactCreate) -> AddOutcome {
        if self.contacts.iter().any(|c| c.name == payload.name) {
            warn!("Duplicate contact name rejected");
            self.notifier
                .notify(Notice::warning(payload.name, DUPLICATE_MESSAGE));
            return AddOutcome::Rejected;
        }

        let Some(id) = self.fresh_id() else {
            error!(attempts = MAX_ID_ATTEMPTS, "Id generator kept returning ids already in use");
            self.notifier
                .notify(Notice::warning(payload.name, ID_EXHAUSTED_MESSAGE));
            return AddOutcome::Rejected;
        };
        self.contacts.push(Contact::from_create(id.clone(), payload));
        info!(contact_id = %id, "Contact added");
        self.persist();
        AddOutcome::Added(id)
    }

    /// Removes the contact with `id`. Unknown ids are a no-op; the list is
    /// persisted either way.
    #[instrument(skip(self), fields(contact_id = %id))]
    pub fn remove(&mut self, id: &ContactId) {
        let before = self.contacts.len();
        self.contacts.retain(|c| &c.id != id);
        if self.contacts.len() < before {
            info!("Contact removed");
        } else {
            debug!("No contact with this id");
        }
        self.persist();
    }

    /// Stores the filter verbatim.
    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
        debug!(filter = %self.filter, "Filter changed");
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Contacts whose name contains the filter, ignoring case, in list order.
    pub fn visible_contacts(&self) -> impl Iterator<Item = &Contact> + '_ {
        let needle = self.filter.to_lowercase();
        self.contacts
            .iter()
            .filter(move |contact| contact.name_contains(&needle))
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn view(&self) -> ContactView {
        ContactView {
            filter: self.filter().to_string(),
            visible: self.visible_contacts().cloned().collect(),
            total: self.len(),
        }
    }

    fn fresh_id(&mut self) -> Option<ContactId> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = (self.next_id_fn)();
            if !self.contacts.iter().any(|c| c.id == id) {
                return Some(id);
            }
            debug!(contact_id = %id, "Generated id already in use, drawing another");
        }
        None
    }

    fn persist(&mut self) {
        if let Err(e) = self.repository.save(&self.contacts) {
            error!(error = %e, "Failed to persist contacts");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_framework::{counter_ids, RecordingNotifier};
    use crate::notify::NoticeKind;
    use crate::storage::{KeyValueStore, MemoryStore, StorageError, CONTACTS_KEY};
    use proptest::prelude::*;
    use std::sync::Mutex;

    /// Backend shared with the test so it can inspect what the book wrote.
    #[derive(Clone, Default)]
    struct SharedStore(Arc<Mutex<MemoryStore>>);

    impl KeyValueStore for SharedStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.lock().unwrap().get_item(key)
        }
        fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.0.lock().unwrap().set_item(key, value)
        }
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }
        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::new(std::io::ErrorKind::Other, "quota exceeded")))
        }
    }

    fn book_with(backend: impl KeyValueStore) -> (ContactBook, RecordingNotifier) {
        let notifier = RecordingNotifier::new();
        let book = ContactBook::open(ContactRepository::new(backend), Arc::new(notifier.clone()))
            .with_id_generator(counter_ids());
        (book, notifier)
    }

    fn names<'a>(contacts: impl Iterator<Item = &'a Contact>) -> Vec<&'a str> {
        contacts.map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_add_appends_in_insertion_order() {
        let (mut book, notifier) = book_with(MemoryStore::new());
        assert!(book.is_empty());
        assert_eq!(book.add(ContactCreate::new("Anna", "1")), AddOutcome::Added(ContactId::new("contact_1")));
        assert_eq!(book.add(ContactCreate::new("Bob", "2")), AddOutcome::Added(ContactId::new("contact_2")));

        assert_eq!(names(book.contacts().iter()), ["Anna", "Bob"]);
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn test_duplicate_name_is_rejected_with_warning() {
        let (mut book, notifier) = book_with(MemoryStore::new());
        book.add(ContactCreate::new("Rex", "111"));

        assert_eq!(book.add(ContactCreate::new("Rex", "999")), AddOutcome::Rejected);

        assert_eq!(book.len(), 1);
        assert_eq!(book.contacts()[0].number, "111");
        let notices = notifier.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Warning);
        assert_eq!(notices[0].title, "Rex");
        assert_eq!(notices[0].message, DUPLICATE_MESSAGE);
    }

    #[test]
    fn test_names_differing_only_in_case_are_both_accepted() {
        let (mut book, notifier) = book_with(MemoryStore::new());
        book.add(ContactCreate::new("Rex", "111"));
        book.add(ContactCreate::new("rex", "222"));

        assert_eq!(book.len(), 2);
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn test_remove_unknown_id_leaves_list_unchanged() {
        let (mut book, _) = book_with(MemoryStore::new());
        book.add(ContactCreate::new("Anna", "1"));
        let before = book.contacts().to_vec();

        book.remove(&ContactId::new("missing"));

        assert_eq!(book.contacts(), before.as_slice());
    }

    #[test]
    fn test_remove_twice_is_idempotent() {
        let (mut book, _) = book_with(MemoryStore::new());
        let AddOutcome::Added(anna) = book.add(ContactCreate::new("Anna", "1")) else {
            panic!("Anna should be accepted");
        };
        book.add(ContactCreate::new("Bob", "2"));

        book.remove(&anna);
        let after_first = book.contacts().to_vec();
        book.remove(&anna);

        assert_eq!(book.contacts(), after_first.as_slice());
        assert_eq!(names(book.contacts().iter()), ["Bob"]);
    }

    #[test]
    fn test_empty_filter_shows_everything_in_order() {
        let (mut book, _) = book_with(MemoryStore::new());
        for name in ["Charlie", "Anna", "Bob"] {
            book.add(ContactCreate::new(name, ""));
        }
        book.set_filter("");
        assert_eq!(names(book.visible_contacts()), ["Charlie", "Anna", "Bob"]);
    }

    #[test]
    fn test_filter_matches_substring_ignoring_case() {
        let (mut book, _) = book_with(MemoryStore::new());
        for name in ["Anna", "Bob", "Annette"] {
            book.add(ContactCreate::new(name, ""));
        }

        book.set_filter("an");
        assert_eq!(names(book.visible_contacts()), ["Anna", "Annette"]);

        book.set_filter("ETT");
        assert_eq!(names(book.visible_contacts()), ["Annette"]);

        // Visible contacts is a pure read.
        assert_eq!(names(book.visible_contacts()), ["Annette"]);
        assert_eq!(book.len(), 3);
    }

    #[test]
    fn test_filter_is_stored_verbatim() {
        let (mut book, _) = book_with(MemoryStore::new());
        book.add(ContactCreate::new("Anna", ""));

        book.set_filter(" an ");
        assert_eq!(book.filter(), " an ");
        assert_eq!(book.visible_contacts().count(), 0);
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let backend = SharedStore::default();
        let (mut book, _) = book_with(backend.clone());
        let stored = || -> Vec<Contact> {
            let raw = backend.get_item(CONTACTS_KEY).unwrap().unwrap();
            serde_json::from_str(&raw).unwrap()
        };

        let AddOutcome::Added(id) = book.add(ContactCreate::new("Anna", "1")) else {
            panic!("Anna should be accepted");
        };
        assert_eq!(stored(), book.contacts());

        book.remove(&id);
        assert!(stored().is_empty());

        // The filter is not persisted.
        book.set_filter("zzz");
        assert!(stored().is_empty());
    }

    #[test]
    fn test_rejected_add_does_not_write() {
        let backend = SharedStore::default();
        let (mut book, _) = book_with(backend.clone());
        book.add(ContactCreate::new("Anna", "1"));
        backend.0.lock().unwrap().set_item(CONTACTS_KEY, "sentinel").unwrap();

        book.add(ContactCreate::new("Anna", "2"));

        assert_eq!(backend.get_item(CONTACTS_KEY).unwrap().as_deref(), Some("sentinel"));
    }

    #[test]
    fn test_reopen_restores_saved_list() {
        let backend = SharedStore::default();
        let (mut book, _) = book_with(backend.clone());
        book.add(ContactCreate::new("Rex", "111"));
        book.add(ContactCreate::new("Anna", "222"));
        let saved = book.contacts().to_vec();
        drop(book);

        let (reopened, _) = book_with(backend);
        assert_eq!(reopened.contacts(), saved.as_slice());
        assert_eq!(reopened.filter(), "");
    }

    #[test]
    fn test_generated_ids_never_collide_with_loaded_ones() {
        let backend = SharedStore::default();
        let (mut book, _) = book_with(backend.clone());
        book.add(ContactCreate::new("Anna", "1"));
        drop(book);

        // A fresh counter would hand out contact_1 again.
        let (mut reopened, _) = book_with(backend);
        let AddOutcome::Added(id) = reopened.add(ContactCreate::new("Bob", "2")) else {
            panic!("Bob should be accepted");
        };
        assert_eq!(id, ContactId::new("contact_2"));
    }

    #[test]
    fn test_stuck_id_generator_rejects_instead_of_spinning() {
        let notifier = RecordingNotifier::new();
        let mut book = ContactBook::open(ContactRepository::new(MemoryStore::new()), Arc::new(notifier.clone()))
            .with_id_generator(|| ContactId::new("same"));

        assert_eq!(book.add(ContactCreate::new("Anna", "1")), AddOutcome::Added(ContactId::new("same")));
        assert_eq!(book.add(ContactCreate::new("Bob", "2")), AddOutcome::Rejected);

        assert_eq!(names(book.contacts().iter()), ["Anna"]);
        let notices = notifier.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Bob");
        assert_eq!(notices[0].message, ID_EXHAUSTED_MESSAGE);
    }

    #[test]
    fn test_write_failure_is_not_fatal() {
        let (mut book, _) = book_with(FailingStore);
        assert!(matches!(book.add(ContactCreate::new("Anna", "1")), AddOutcome::Added(_)));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_view_reflects_filter_and_total() {
        let (mut book, _) = book_with(MemoryStore::new());
        for name in ["Anna", "Bob", "Annette"] {
            book.add(ContactCreate::new(name, ""));
        }
        book.set_filter("bo");

        let view = book.view();
        assert_eq!(view.total, 3);
        assert_eq!(view.filter, "bo");
        assert_eq!(names(view.visible.iter()), ["Bob"]);
        assert!(!view.is_empty());
    }

    proptest! {
        #[test]
        fn prop_list_grows_once_per_distinct_name(names in prop::collection::vec("[a-cA-C]{1,2}", 0..40)) {
            let (mut book, notifier) = book_with(MemoryStore::new());
            let mut seen = std::collections::HashSet::new();
            for name in &names {
                book.add(ContactCreate::new(name.clone(), "0"));
                seen.insert(name.clone());
            }
            prop_assert_eq!(book.len(), seen.len());
            prop_assert_eq!(notifier.notices().len(), names.len() - seen.len());

            let ids: std::collections::HashSet<_> = book.contacts().iter().map(|c| c.id.clone()).collect();
            prop_assert_eq!(ids.len(), book.len());
        }
    }
}
