use std::fmt::Write;

use crate::domain::ContactView;

use super::FormStage;

pub const EMPTY_LIST_TEXT: &str = "Contact list is empty";

/// Renders the whole screen for `view`.
pub fn render_screen(view: &ContactView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Phonebook");
    let _ = writeln!(out, "[add] Add contact");
    let _ = writeln!(out);
    let _ = writeln!(out, "Contacts");
    out.push_str(&render_contacts(view));
    out
}

/// Renders the filter input and list, or the empty-list message.
///
/// The filter is only offered while the full list has entries; an active
/// filter that matches nothing still shows the (empty) filter line.
pub fn render_contacts(view: &ContactView) -> String {
    if view.is_empty() {
        return format!("{EMPTY_LIST_TEXT}\n");
    }

    let mut out = String::new();
    let _ = writeln!(out, "Find contacts by name: {}", view.filter);
    for (index, contact) in view.visible.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {}: {}  [delete {}]",
            index + 1,
            contact.name,
            contact.number,
            index + 1
        );
    }
    out
}

/// Prompt shown before reading the next line.
pub fn render_prompt(stage: Option<&FormStage>) -> &'static str {
    match stage {
        None => "> ",
        Some(FormStage::Name) => "Name: ",
        Some(FormStage::Number { .. }) => "Number: ",
    }
}

pub const HELP_TEXT: &str = "\
Commands:
  add              open the add-contact form
  delete <n|id>    delete the n-th listed contact, or the contact with this id
  filter [text]    show contacts whose name contains text (bare `filter` clears)
  list             show the contact list
  help             show this help
  quit             leave the phonebook
In the form, enter the name, then the number. Esc or `:close` closes the form.
";
