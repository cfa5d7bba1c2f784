use std::sync::Arc;

use tracing::{error, info};

use crate::book_actor::{BookError, BookService};
use crate::clients::BookClient;
use crate::contact_book::ContactBook;
use crate::notify::Notifier;
use crate::storage::ContactRepository;

/// The running application: the contact service task and a client for it.
///
/// Responsible for loading the store, starting the service, and shutting it
/// down once the presentation layer is done.
pub struct PhonebookSystem {
    pub client: BookClient,
    handle: tokio::task::JoinHandle<()>,
}

impl PhonebookSystem {
    /// Loads persisted contacts and starts the service. Must be called from
    /// inside a tokio runtime.
    pub fn start(repository: ContactRepository, notifier: Arc<dyn Notifier>) -> Self {
        info!("Starting phonebook system");
        let book = ContactBook::open(repository, notifier);
        let (service, client) = BookService::new(32, book);
        let handle = tokio::spawn(service.run());
        Self { client, handle }
    }

    /// Waits for the service to drain. Every clone of the client handed out
    /// must already be dropped, or this waits forever.
    pub async fn shutdown(self) -> Result<(), BookError> {
        info!("Shutting down system...");
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!("Service task failed: {:?}", e);
            return Err(BookError::TaskFailed(e.to_string()));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
