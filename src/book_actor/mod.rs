//! The contact store hosted behind a mailbox, so every mutation is applied
//! strictly in arrival order and each change publishes a fresh view.

pub mod error;
pub mod messages;
mod service;

pub use error::*;
pub use messages::*;
pub use service::*;
