//! Text rendering of the todo list.

use crate::types::{Todo, TodoList};

/// Line shown in place of an empty list
pub const EMPTY_PLACEHOLDER: &str = "(nothing to do)";

/// Renders one record as `[x] name` or `[ ] name`
#[must_use]
pub fn render_item(todo: &Todo) -> String {
    let mark = if todo.complete { 'x' } else { ' ' };
    format!("[{mark}] {}", todo.name)
}

/// Renders every record in order, or the placeholder when there are none
#[must_use]
pub fn render_list(todos: &TodoList) -> Vec<String> {
    if todos.is_empty() {
        return vec![EMPTY_PLACEHOLDER.to_string()];
    }
    todos.iter().map(render_item).collect()
}

/// Prefixes rendered lines with 1-based item numbers
///
/// The empty-list placeholder is not an item and stays unnumbered.
#[must_use]
pub fn number_lines(lines: &[String]) -> Vec<String> {
    if matches!(lines, [only] if only == EMPTY_PLACEHOLDER) {
        return lines.to_vec();
    }
    lines
        .iter()
        .enumerate()
        .map(|(index, line)| format!("{:>3}. {line}", index + 1))
        .collect()
}

/// Cached rendering that only redraws when the list changes identity
#[derive(Debug, Default)]
pub struct TodoView {
    rendered: Option<TodoList>,
    lines: Vec<String>,
    renders: u64,
}

impl TodoView {
    /// View that has not rendered yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the view up to date with `todos`
    ///
    /// Returns `true` if a render pass ran.
    pub fn render(&mut self, todos: &TodoList) -> bool {
        if self
            .rendered
            .as_ref()
            .is_some_and(|previous| previous.same_as(todos))
        {
            return false;
        }

        self.lines = render_list(todos);
        self.rendered = Some(todos.clone());
        self.renders += 1;
        tracing::trace!(renders = self.renders, "Rendered todo list");
        true
    }

    /// Lines from the latest render pass
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// How many render passes have run
    #[must_use]
    pub const fn render_count(&self) -> u64 {
        self.renders
    }
}
