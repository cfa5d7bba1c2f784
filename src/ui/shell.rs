use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::watch;
use tracing::{debug, info, instrument};

use super::{render_contacts, render_prompt, render_screen, Action, Session, HELP_TEXT};
use crate::clients::BookClient;
use crate::contact_book::AddOutcome;
use crate::domain::ContactView;

/// Interactive loop: reads one line at a time, forwards store operations
/// through `client`, and re-renders from the published view.
///
/// Returns when the user quits or the input ends.
#[instrument(name = "shell", skip_all)]
pub async fn run_shell<R, W>(client: BookClient, input: R, mut output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("Shell started");
    let mut views = client.subscribe();
    let mut session = Session::new();
    let mut lines = input.lines();

    let screen = render_screen(&latest(&mut views));
    output.write_all(screen.as_bytes()).await?;

    loop {
        output
            .write_all(render_prompt(session.overlay()).as_bytes())
            .await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            debug!("Input closed");
            break;
        };

        let view = views.borrow().clone();
        let text = match session.handle_line(&line, &view) {
            Action::Idle | Action::Prompt => continue,
            Action::Quit => break,
            Action::Help => HELP_TEXT.to_string(),
            Action::Invalid(message) => format!("{message}\n"),
            Action::Render => render_screen(&latest(&mut views)),
            Action::List => {
                // `list` asks the store directly rather than trusting the last snapshot.
                let visible = client.visible_contacts().await?;
                let view = ContactView {
                    visible,
                    ..latest(&mut views)
                };
                render_screen(&view)
            }
            Action::Submit(payload) => {
                if let AddOutcome::Added(id) = client.add(payload).await? {
                    debug!(contact_id = %id, "Contact added from form");
                }
                render_screen(&latest(&mut views))
            }
            Action::Remove(id) => {
                client.remove(id).await?;
                render_contacts(&latest(&mut views))
            }
            Action::SetFilter(text) => {
                client.set_filter(text).await?;
                render_contacts(&latest(&mut views))
            }
        };
        output.write_all(text.as_bytes()).await?;
    }

    output.flush().await?;
    info!("Shell finished");
    Ok(())
}

/// Clones the newest view out of the channel so no borrow is held across an await.
fn latest(views: &mut watch::Receiver<ContactView>) -> ContactView {
    views.borrow_and_update().clone()
}
