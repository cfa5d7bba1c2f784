#[macro_use]
mod macros;
mod book_client;

pub use book_client::*;
