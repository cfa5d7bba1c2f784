//! The contact store: the single source of truth for the contact list.

mod book;

pub use book::*;
