mod domain;
mod notify;
mod storage;
mod contact_book;

mod clients;
mod book_actor;
mod ui;

mod app_system;

#[cfg(test)]
mod mock_framework;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing::info;

use crate::app_system::{run_command, setup_tracing, Cli, Command, CommandStatus, PhonebookSystem};
use crate::notify::TerminalNotifier;
use crate::storage::ContactRepository;
use crate::ui::run_shell;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    setup_tracing();

    let repository = ContactRepository::new(cli.backend());
    info!(in_memory = cli.in_memory, data_dir = %cli.data_dir().display(), "Phonebook starting");

    match cli.command() {
        Command::Shell => {
            let system = PhonebookSystem::start(repository, Arc::new(TerminalNotifier::stdout()));

            let input = BufReader::new(tokio::io::stdin());
            run_shell(system.client.clone(), input, tokio::io::stdout())
                .await
                .context("shell session failed")?;

            system.shutdown().await?;
            Ok(ExitCode::SUCCESS)
        }
        command => {
            let mut stdout = std::io::stdout().lock();
            let status = run_command(command, repository, Arc::new(TerminalNotifier::stderr()), &mut stdout)?;
            Ok(match status {
                CommandStatus::Done => ExitCode::SUCCESS,
                CommandStatus::Rejected => ExitCode::FAILURE,
            })
        }
    }
}
