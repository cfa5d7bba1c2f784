//! The `notify(kind, message)` capability the contact store signals through.
//!
//! The store never touches the terminal directly; the presentation layer
//! decides how a notice is shown.

use std::fmt;
use std::io::Write;
use std::sync::Mutex;

use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Warning,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeKind::Warning => f.write_str("Warning"),
        }
    }
}

/// A transient, advisory message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            title: title.into(),
            message: message.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Prints notices as a framed block on the terminal.
pub struct TerminalNotifier {
    out: Mutex<Box<dyn Write + Send>>,
}

impl TerminalNotifier {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }

    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
        }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        debug!(kind = %notice.kind, title = %notice.title, "Showing notice");
        let Ok(mut out) = self.out.lock() else {
            warn!(title = %notice.title, "Terminal writer lock poisoned, notice dropped");
            return;
        };
        let body = format_notice(&notice);
        // Advisory only; a broken terminal is not worth failing the store over.
        let _ = out.write_all(body.as_bytes()).and_then(|_| out.flush());
    }
}

/// Renders the framed block shown for a notice.
pub fn format_notice(notice: &Notice) -> String {
    let width = notice
        .title
        .chars()
        .count()
        .max(notice.message.chars().count())
        .max(notice.kind.to_string().len() + 2)
        + 2;
    let rule = "-".repeat(width);
    format!(
        "+{rule}+\n| {kind:<w$} |\n| {title:<w$} |\n| {message:<w$} |\n+{rule}+\n",
        kind = format!("[{}]", notice.kind),
        title = notice.title,
        message = notice.message,
        w = width - 2,
    )
}
