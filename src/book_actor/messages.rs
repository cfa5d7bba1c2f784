use tokio::sync::oneshot;

use crate::contact_book::AddOutcome;
use crate::domain::{Contact, ContactCreate, ContactId};

pub type ServiceResponse<T> = oneshot::Sender<T>;

/// Requests understood by [`BookService`](super::BookService). Each carries a
/// oneshot channel for the reply.
#[derive(Debug)]
pub enum BookRequest {
    Add {
        payload: ContactCreate,
        respond_to: ServiceResponse<AddOutcome>,
    },
    Remove {
        id: ContactId,
        respond_to: ServiceResponse<()>,
    },
    SetFilter {
        text: String,
        respond_to: ServiceResponse<()>,
    },
    VisibleContacts {
        respond_to: ServiceResponse<Vec<Contact>>,
    },
}
