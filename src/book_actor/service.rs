use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument};

use super::{BookRequest, ServiceResponse};
use crate::clients::BookClient;
use crate::contact_book::{AddOutcome, ContactBook};
use crate::domain::{Contact, ContactCreate, ContactId, ContactView};

/// Owns the [`ContactBook`] and applies requests one at a time.
///
/// After every request that may change what the user sees, the current
/// [`ContactView`] is published on a `watch` channel that renderers subscribe to.
pub struct BookService {
    receiver: mpsc::Receiver<BookRequest>,
    book: ContactBook,
    views: watch::Sender<ContactView>,
}

impl BookService {
    pub fn new(buffer_size: usize, book: ContactBook) -> (Self, BookClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (views, view_receiver) = watch::channel(book.view());
        let service = Self {
            receiver,
            book,
            views,
        };
        let client = BookClient::new(sender, view_receiver);
        (service, client)
    }

    /// Runs until every client has been dropped.
    #[instrument(name = "book_service", skip(self))]
    pub async fn run(mut self) {
        info!("BookService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                BookRequest::Add { payload, respond_to } => {
                    self.handle_add(payload, respond_to);
                }
                BookRequest::Remove { id, respond_to } => {
                    self.handle_remove(id, respond_to);
                }
                BookRequest::SetFilter { text, respond_to } => {
                    self.handle_set_filter(text, respond_to);
                }
                BookRequest::VisibleContacts { respond_to } => {
                    self.handle_visible_contacts(respond_to);
                }
            }
        }

        info!("BookService stopped");
    }

    #[instrument(fields(name = %payload.name), skip(self, payload, respond_to))]
    fn handle_add(&mut self, payload: ContactCreate, respond_to: ServiceResponse<AddOutcome>) {
        debug!("Processing add request");
        let outcome = self.book.add(payload);
        if matches!(outcome, AddOutcome::Added(_)) {
            self.publish();
        }
        let _ = respond_to.send(outcome);
    }

    #[instrument(fields(contact_id = %id), skip(self, respond_to))]
    fn handle_remove(&mut self, id: ContactId, respond_to: ServiceResponse<()>) {
        debug!("Processing remove request");
        self.book.remove(&id);
        self.publish();
        let _ = respond_to.send(());
    }

    #[instrument(skip(self, respond_to))]
    fn handle_set_filter(&mut self, text: String, respond_to: ServiceResponse<()>) {
        debug!("Processing set_filter request");
        self.book.set_filter(text);
        debug!(filter = %self.book.filter(), "Filter applied");
        self.publish();
        let _ = respond_to.send(());
    }

    fn handle_visible_contacts(&self, respond_to: ServiceResponse<Vec<Contact>>) {
        let visible = self.book.visible_contacts().cloned().collect();
        let _ = respond_to.send(visible);
    }

    fn publish(&self) {
        // Published before the reply goes out, so a caller that awaited the
        // request always observes its own change.
        self.views.send_replace(self.book.view());
    }
}
