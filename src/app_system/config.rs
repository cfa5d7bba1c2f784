use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::storage::{FileStore, KeyValueStore, MemoryStore};

/// Keep a list of contacts in the terminal.
#[derive(Parser, Debug)]
#[command(name = "phonebook", version, about = "Keep a list of contacts")]
pub struct Cli {
    /// Directory holding the persisted contact list.
    #[arg(long, env = "PHONEBOOK_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Keep contacts in memory only; nothing is written to disk.
    #[arg(long, global = true)]
    pub in_memory: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive phonebook (the default).
    Shell,
    /// Print the contact list.
    List {
        /// Only contacts whose name contains this text, ignoring case.
        #[arg(long, default_value = "")]
        filter: String,
    },
    /// Add a contact.
    Add {
        name: String,
        #[arg(allow_hyphen_values = true)]
        number: String,
    },
    /// Remove the contact with this id.
    Remove { id: String },
}

impl Cli {
    fn default_data_dir() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".phonebook")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(Self::default_data_dir)
    }

    /// The key-value backend selected by the flags.
    pub fn backend(&self) -> Box<dyn KeyValueStore> {
        if self.in_memory {
            Box::new(MemoryStore::new())
        } else {
            Box::new(FileStore::new(self.data_dir()))
        }
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Shell)
    }
}
