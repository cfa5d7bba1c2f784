use super::Contact;

/// Immutable snapshot of the contact store, published after every change.
///
/// Renderers hold one of these instead of a reference into the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactView {
    pub filter: String,
    pub visible: Vec<Contact>,
    pub total: usize,
}

impl ContactView {
    /// True when the whole list is empty, regardless of the filter.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Looks up a visible contact by its 1-based position in the rendered list.
    pub fn nth_visible(&self, position: usize) -> Option<&Contact> {
        position.checked_sub(1).and_then(|index| self.visible.get(index))
    }
}
