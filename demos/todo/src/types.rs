//! Domain types for the todo list.
//!
//! A todo list is an ordered collection of records that can be added,
//! toggled, and deleted. The collection is an immutable shared slice: every
//! change builds a new one, and a transition that changes nothing hands back
//! the very same allocation.

use hooks_lab_macros::Action;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Unique identifier for a todo record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Wraps a raw id
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,
    /// Text entered when the record was added
    pub name: String,
    /// Whether the record is done
    pub complete: bool,
}

impl Todo {
    /// Creates an incomplete record
    #[must_use]
    pub fn new(id: TodoId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            complete: false,
        }
    }

    /// Copy of this record with `complete` flipped
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            complete: !self.complete,
            ..self.clone()
        }
    }
}

/// Ordered, immutable collection of todo records
///
/// Cloning is cheap and shares the backing slice. Equality compares
/// contents; [`TodoList::same_as`] compares identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoList {
    items: Arc<[Todo]>,
}

impl TodoList {
    /// The empty list
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Arc::from(Vec::new()),
        }
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when there are no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Records in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Todo> {
        self.items.iter()
    }

    /// Records as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[Todo] {
        &self.items
    }

    /// Record at `index`, in insertion order
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Todo> {
        self.items.get(index)
    }

    /// Record with the given id
    #[must_use]
    pub fn find(&self, id: TodoId) -> Option<&Todo> {
        self.items.iter().find(|todo| todo.id == id)
    }

    /// Position of the record with the given id
    #[must_use]
    pub fn position(&self, id: TodoId) -> Option<usize> {
        self.items.iter().position(|todo| todo.id == id)
    }

    /// Number of completed records
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|todo| todo.complete).count()
    }

    /// True when both values share one backing allocation
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

impl Default for TodoList {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<Todo>> for TodoList {
    fn from(items: Vec<Todo>) -> Self {
        Self {
            items: Arc::from(items),
        }
    }
}

impl FromIterator<Todo> for TodoList {
    fn from_iter<I: IntoIterator<Item = Todo>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TodoList {
    type Item = &'a Todo;
    type IntoIter = std::slice::Iter<'a, Todo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Everything that can be dispatched to the todo list
///
/// The wire tag of each variant is its kebab-case name (`add-todo`,
/// `toggle-todo`, `delete-todo`). Tags nobody handles decode to
/// [`TodoAction::Unrecognized`], which the reducer ignores.
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    /// Append a new incomplete record
    AddTodo {
        /// Text of the record
        name: String,
    },

    /// Flip `complete` on the matching record
    ToggleTodo {
        /// Record to toggle
        id: TodoId,
    },

    /// Remove the matching record
    DeleteTodo {
        /// Record to remove
        id: TodoId,
    },

    /// An action with a tag this list does not handle
    #[unrecognized]
    Unrecognized {
        /// The tag as received
        kind: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(names: &[&str]) -> TodoList {
        names
            .iter()
            .zip(1..)
            .map(|(name, id)| Todo::new(TodoId::new(id), *name))
            .collect()
    }

    #[test]
    fn todo_starts_incomplete() {
        let todo = Todo::new(TodoId::new(1), "Buy milk");
        assert!(!todo.complete);
        assert_eq!(todo.name, "Buy milk");
    }

    #[test]
    fn toggled_flips_only_complete() {
        let todo = Todo::new(TodoId::new(7), "Walk dog");
        let done = todo.toggled();
        assert!(done.complete);
        assert_eq!(done.id, todo.id);
        assert_eq!(done.name, todo.name);
        assert_eq!(done.toggled(), todo);
    }

    #[test]
    fn clone_shares_backing_slice() {
        let todos = list(&["a", "b"]);
        let alias = todos.clone();
        assert!(alias.same_as(&todos));

        let rebuilt = list(&["a", "b"]);
        assert_eq!(rebuilt, todos);
        assert!(!rebuilt.same_as(&todos));
    }

    #[test]
    fn lookup_by_id_and_position() {
        let todos = list(&["a", "b", "c"]);
        assert_eq!(todos.position(TodoId::new(2)), Some(1));
        assert_eq!(todos.find(TodoId::new(3)).map(|t| t.name.as_str()), Some("c"));
        assert!(todos.find(TodoId::new(9)).is_none());
        assert_eq!(todos.completed_count(), 0);
    }

    #[test]
    fn list_serializes_as_plain_array() {
        let todos = list(&["a"]);
        let json = serde_json::to_value(&todos).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "id": 1, "name": "a", "complete": false }])
        );
    }

    #[test]
    fn action_kinds() {
        assert_eq!(TodoAction::KINDS, &["add-todo", "toggle-todo", "delete-todo"]);
        assert_eq!(TodoAction::ToggleTodo { id: TodoId::new(1) }.kind(), "toggle-todo");
    }
}
