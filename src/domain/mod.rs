pub mod contact;
pub mod view;

pub use contact::*;
pub use view::*;
