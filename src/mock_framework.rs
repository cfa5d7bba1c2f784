//! # Mock Framework
//!
//! Utilities for testing clients and the shell in isolation.
//!
//! Use [`create_mock_client`] to get a client, the receiver its requests land
//! on, and the sender for the views it observes. Then use helpers like
//! [`expect_add`] or [`expect_remove`] to assert behavior.

use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, oneshot, watch};

use crate::book_actor::BookRequest;
use crate::clients::BookClient;
use crate::contact_book::AddOutcome;
use crate::domain::{Contact, ContactCreate, ContactId, ContactView};
use crate::notify::{Notice, Notifier};

/// Creates a mock client wired to channels the test controls.
///
/// Requests sent by the client arrive on the returned receiver, and views
/// published through the returned sender are what the client's subscribers see.
pub fn create_mock_client(
    buffer_size: usize,
) -> (BookClient, mpsc::Receiver<BookRequest>, watch::Sender<ContactView>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (views, view_receiver) = watch::channel(ContactView::default());
    (BookClient::new(sender, view_receiver), receiver, views)
}

/// Helper to verify that the next message is an Add request
pub async fn expect_add(
    receiver: &mut mpsc::Receiver<BookRequest>,
) -> Option<(ContactCreate, oneshot::Sender<AddOutcome>)> {
    match receiver.recv().await {
        Some(BookRequest::Add { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Remove request
pub async fn expect_remove(
    receiver: &mut mpsc::Receiver<BookRequest>,
) -> Option<(ContactId, oneshot::Sender<()>)> {
    match receiver.recv().await {
        Some(BookRequest::Remove { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a SetFilter request
pub async fn expect_set_filter(
    receiver: &mut mpsc::Receiver<BookRequest>,
) -> Option<(String, oneshot::Sender<()>)> {
    match receiver.recv().await {
        Some(BookRequest::SetFilter { text, respond_to }) => Some((text, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a VisibleContacts request
pub async fn expect_visible_contacts(
    receiver: &mut mpsc::Receiver<BookRequest>,
) -> Option<oneshot::Sender<Vec<Contact>>> {
    match receiver.recv().await {
        Some(BookRequest::VisibleContacts { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Deterministic ids: `contact_1`, `contact_2`, ...
pub fn counter_ids() -> impl FnMut() -> ContactId + Send + 'static {
    let mut next = 0u64;
    move || {
        next += 1;
        ContactId::new(format!("contact_{next}"))
    }
}

/// Collects notices in memory so tests can assert on them.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver, _views) = create_mock_client(10);

        let add_task = tokio::spawn(async move {
            client.add(ContactCreate::new("Test", "555-0100")).await
        });

        let (payload, responder) = expect_add(&mut receiver).await.expect("Expected Add request");
        assert_eq!(payload.name, "Test");
        assert_eq!(payload.number, "555-0100");
        responder.send(AddOutcome::Added(ContactId::new("contact_1"))).unwrap();

        let result = add_task.await.unwrap();
        assert_eq!(result, Ok(AddOutcome::Added(ContactId::new("contact_1"))));
    }

    #[tokio::test]
    async fn test_mock_views_reach_subscribers() {
        let (client, _receiver, views) = create_mock_client(1);
        let mut subscription = client.subscribe();

        views.send_replace(ContactView {
            filter: "an".to_string(),
            visible: Vec::new(),
            total: 3,
        });

        assert!(subscription.has_changed().unwrap());
        assert_eq!(subscription.borrow_and_update().total, 3);
    }

    #[test]
    fn test_counter_ids_are_sequential() {
        let mut next = counter_ids();
        assert_eq!(next(), ContactId::new("contact_1"));
        assert_eq!(next(), ContactId::new("contact_2"));
    }
}
