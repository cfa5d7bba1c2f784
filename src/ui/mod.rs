//! Terminal presentation: rendering, the add-contact form overlay, and the
//! interactive shell loop.

pub mod render;
pub mod session;
pub mod shell;

pub use render::*;
pub use session::*;
pub use shell::*;
