//! Key-value persistence: the backend trait, its two implementations, and the
//! adapter that keeps the contact list under a single key.

mod contacts;
pub mod error;
mod file;
mod memory;

pub use contacts::*;
pub use error::*;
pub use file::*;
pub use memory::*;

/// Host-provided durable key-value store, shaped like browser `localStorage`.
pub trait KeyValueStore: Send + 'static {
    /// Returns the stored value, or `None` if the key was never written.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, overwriting any prior value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}
