//! One-shot commands: open the store, apply a single operation, print the result.

use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::instrument;

use crate::contact_book::{AddOutcome, ContactBook};
use crate::domain::{ContactCreate, ContactId};
use crate::notify::Notifier;
use crate::storage::ContactRepository;
use crate::ui::render_contacts;

use super::Command;

/// How a one-shot command ended. A rejected add is reported, not raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Done,
    Rejected,
}

/// Runs a non-interactive command against a freshly opened book.
#[instrument(skip(repository, notifier, out))]
pub fn run_command(
    command: Command,
    repository: ContactRepository,
    notifier: Arc<dyn Notifier>,
    out: &mut impl Write,
) -> Result<CommandStatus> {
    let mut book = ContactBook::open(repository, notifier);

    match command {
        Command::Shell => bail!("the shell is not a one-shot command"),
        Command::List { filter } => {
            book.set_filter(filter);
            out.write_all(render_contacts(&book.view()).as_bytes())?;
            Ok(CommandStatus::Done)
        }
        Command::Add { name, number } => {
            if name.trim().is_empty() {
                bail!("Name is required");
            }
            match book.add(ContactCreate::new(name, number)) {
                AddOutcome::Added(id) => {
                    writeln!(out, "{id}")?;
                    Ok(CommandStatus::Done)
                }
                AddOutcome::Rejected => Ok(CommandStatus::Rejected),
            }
        }
        Command::Remove { id } => {
            let id = ContactId::new(id);
            let before = book.len();
            book.remove(&id);
            if book.len() < before {
                writeln!(out, "Removed {id}")?;
            } else {
                writeln!(out, "No contact with id {id}")?;
            }
            Ok(CommandStatus::Done)
        }
    }
}
