use tokio::sync::{mpsc, watch};

use crate::book_actor::BookRequest;
use crate::contact_book::AddOutcome;
use crate::domain::{Contact, ContactCreate, ContactId, ContactView};

/// Cloneable handle to the contact service.
///
/// Mutations go through the mailbox; the latest [`ContactView`] is available
/// through [`BookClient::subscribe`].
#[derive(Clone)]
pub struct BookClient {
    sender: mpsc::Sender<BookRequest>,
    views: watch::Receiver<ContactView>,
}

impl BookClient {
    pub fn new(sender: mpsc::Sender<BookRequest>, views: watch::Receiver<ContactView>) -> Self {
        Self { sender, views }
    }

    /// A receiver that is marked changed whenever the service publishes a view.
    pub fn subscribe(&self) -> watch::Receiver<ContactView> {
        self.views.clone()
    }
}

client_method!(BookClient => fn add(payload: ContactCreate) -> AddOutcome as BookRequest::Add);
client_method!(BookClient => fn remove(id: ContactId) -> () as BookRequest::Remove);
client_method!(BookClient => fn set_filter(text: String) -> () as BookRequest::SetFilter);
client_method!(BookClient => fn visible_contacts() -> Vec<Contact> as BookRequest::VisibleContacts);
