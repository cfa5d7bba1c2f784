use thiserror::Error;

/// Errors raised while talking to the contact service.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BookError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
    #[error("Contact service task failed: {0}")]
    TaskFailed(String),
}
