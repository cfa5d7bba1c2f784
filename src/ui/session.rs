use crate::domain::{ContactCreate, ContactId, ContactView};

/// Where the add-contact form is in its input sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStage {
    Name,
    Number { name: String },
}

/// What the shell should do in response to one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing to do; show the prompt again.
    Idle,
    Render,
    /// Re-read the visible contacts from the store and show the screen.
    List,
    Help,
    Quit,
    /// The form overlay opened or advanced; prompt for the next field.
    Prompt,
    Submit(ContactCreate),
    Remove(ContactId),
    SetFilter(String),
    /// The input could not be used; show the message and carry on.
    Invalid(String),
}

const ESC: &str = "\u{1b}";

/// Presentation state: only the form overlay lives here. Everything about
/// contacts comes from the [`ContactView`] passed in.
#[derive(Debug, Default)]
pub struct Session {
    overlay: Option<FormStage>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The form stage while the overlay is open.
    pub fn overlay(&self) -> Option<&FormStage> {
        self.overlay.as_ref()
    }

    pub fn toggle_overlay(&mut self) {
        self.overlay = match self.overlay {
            Some(_) => None,
            None => Some(FormStage::Name),
        };
    }

    pub fn handle_line(&mut self, line: &str, view: &ContactView) -> Action {
        match self.overlay.take() {
            Some(stage) => self.handle_form_input(stage, line),
            None => self.handle_command(line, view),
        }
    }

    fn handle_form_input(&mut self, stage: FormStage, line: &str) -> Action {
        if line == ESC || line.trim() == ":close" {
            return Action::Render;
        }

        match stage {
            FormStage::Name => {
                if line.trim().is_empty() {
                    self.overlay = Some(FormStage::Name);
                    return Action::Invalid("Name is required".to_string());
                }
                self.overlay = Some(FormStage::Number { name: line.to_string() });
                Action::Prompt
            }
            FormStage::Number { name } => {
                if line.trim().is_empty() {
                    self.overlay = Some(FormStage::Number { name });
                    return Action::Invalid("Number is required".to_string());
                }
                // The overlay closes on submit whether or not the add is accepted.
                Action::Submit(ContactCreate::new(name, line))
            }
        }
    }

    fn handle_command(&mut self, line: &str, view: &ContactView) -> Action {
        let line = line.trim_start();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));

        match word {
            "" => Action::Idle,
            "add" => {
                self.toggle_overlay();
                Action::Prompt
            }
            "delete" | "rm" => match rest.trim() {
                "" => Action::Invalid("Usage: delete <n|id>".to_string()),
                target => resolve_delete_target(target, view),
            },
            // Everything after the first space is the filter, untouched.
            "filter" => Action::SetFilter(rest.to_string()),
            "list" | "ls" => Action::List,
            "help" | "?" => Action::Help,
            "quit" | "exit" | "q" => Action::Quit,
            ":close" | ESC => Action::Invalid("The form is not open".to_string()),
            other => Action::Invalid(format!("Unknown command: {other} (try `help`)")),
        }
    }
}

/// Delete controls exist only for listed contacts, so both positions and ids
/// are resolved against the visible list.
fn resolve_delete_target(target: &str, view: &ContactView) -> Action {
    if let Ok(position) = target.parse::<usize>() {
        return match view.nth_visible(position) {
            Some(contact) => Action::Remove(contact.id.clone()),
            None => Action::Invalid(format!("No contact listed at {position}")),
        };
    }

    match view.visible.iter().find(|contact| contact.id.as_str() == target) {
        Some(contact) => Action::Remove(contact.id.clone()),
        None => Action::Invalid(format!("No listed contact with id {target}")),
    }
}
