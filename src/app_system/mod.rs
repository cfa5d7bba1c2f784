//! System orchestration, configuration, startup, and shutdown logic.

pub mod commands;
pub mod config;
pub mod phonebook_system;
pub mod telemetry;

pub use commands::*;
pub use config::*;
pub use phonebook_system::*;
pub use telemetry::*;
