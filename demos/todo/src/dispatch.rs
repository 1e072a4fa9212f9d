//! Components that turn user input into actions.

use crate::types::{Todo, TodoAction, TodoId};

/// Entry form for new records
///
/// Keeps the text typed so far. Submitting trims it; blank input is
/// dropped and left in place. The text stays until [`SubmissionForm::clear`]
/// so a rejected dispatch does not lose it.
#[derive(Clone, Debug, Default)]
pub struct SubmissionForm {
    text: String,
}

impl SubmissionForm {
    /// Empty form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the scratch text
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Current scratch text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Builds an `AddTodo` from the trimmed text
    ///
    /// Returns `None` when the text is blank.
    #[must_use]
    pub fn submission(&self) -> Option<TodoAction> {
        let name = self.text.trim();
        if name.is_empty() {
            tracing::trace!("Blank submission ignored");
            return None;
        }

        Some(TodoAction::AddTodo {
            name: name.to_string(),
        })
    }

    /// Empties the scratch text once a submission has been accepted
    pub fn clear(&mut self) {
        self.text.clear();
    }
}

/// Toggle and delete controls for one record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemControls {
    id: TodoId,
}

impl ItemControls {
    /// Controls for `todo`
    #[must_use]
    pub const fn for_todo(todo: &Todo) -> Self {
        Self { id: todo.id }
    }

    /// Record these controls act on
    #[must_use]
    pub const fn id(&self) -> TodoId {
        self.id
    }

    /// Action flipping the record's completion
    #[must_use]
    pub const fn toggle(&self) -> TodoAction {
        TodoAction::ToggleTodo { id: self.id }
    }

    /// Action removing the record
    #[must_use]
    pub const fn delete(&self) -> TodoAction {
        TodoAction::DeleteTodo { id: self.id }
    }
}
