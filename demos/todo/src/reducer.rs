//! Reducer logic for the todo list.
//!
//! The transition function never fails and never produces effects. Toggling
//! or deleting an id that is not in the list, and any unrecognized action,
//! return the input list itself (same backing slice), so observers can tell
//! "nothing happened" by identity alone.

use crate::types::{Todo, TodoAction, TodoId, TodoList};
use hooks_lab_core::{
    effect::Effect,
    environment::{IdGenerator, SequentialIds},
    reducer::Reducer,
    SmallVec,
};
use std::sync::Arc;

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Source of fresh record ids
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }
}

impl Default for TodoEnvironment {
    fn default() -> Self {
        Self::new(Arc::new(SequentialIds::new()))
    }
}

/// Computes the list that follows `todos` after `action`
///
/// Only `AddTodo` draws an id from `ids`.
#[must_use]
pub fn reduce_todos(todos: &TodoList, action: &TodoAction, ids: &dyn IdGenerator) -> TodoList {
    match action {
        TodoAction::AddTodo { name } => {
            let todo = Todo::new(TodoId::new(ids.next_id()), name.clone());
            tracing::debug!(id = %todo.id, "Adding todo");
            todos.iter().cloned().chain(std::iter::once(todo)).collect()
        },
        TodoAction::ToggleTodo { id } => {
            if todos.position(*id).is_none() {
                tracing::debug!(%id, "Toggle for unknown todo ignored");
                return todos.clone();
            }
            todos
                .iter()
                .map(|todo| if todo.id == *id { todo.toggled() } else { todo.clone() })
                .collect()
        },
        TodoAction::DeleteTodo { id } => {
            if todos.position(*id).is_none() {
                tracing::debug!(%id, "Delete for unknown todo ignored");
                return todos.clone();
            }
            todos.iter().filter(|todo| todo.id != *id).cloned().collect()
        },
        TodoAction::Unrecognized { kind } => {
            tracing::debug!(%kind, "Ignoring unrecognized action");
            todos.clone()
        },
    }
}

/// Reducer for the todo list
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for TodoReducer {
    type State = TodoList;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        *state = reduce_todos(state, &action, env.ids.as_ref());
        SmallVec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hooks_lab_testing::{assertions, FixedIds, ReducerTest};
    use proptest::prelude::*;

    fn create_test_env() -> TodoEnvironment {
        TodoEnvironment::new(FixedIds::shared())
    }

    fn seeded(names: &[&str]) -> TodoList {
        names
            .iter()
            .zip(1..)
            .map(|(name, id)| Todo::new(TodoId::new(id), *name))
            .collect()
    }

    #[test]
    fn test_add_todo_appends_incomplete_record() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment::new(Arc::new(FixedIds::scripted([41]))))
            .given_state(seeded(&["Buy milk"]))
            .when_action(TodoAction::AddTodo {
                name: "Walk dog".to_string(),
            })
            .then_state(|todos| {
                assert_eq!(todos.len(), 2);
                let last = todos.get(1).unwrap();
                assert_eq!(last.id, TodoId::new(41));
                assert_eq!(last.name, "Walk dog");
                assert!(!last.complete);
                assert_eq!(todos.get(0).unwrap().name, "Buy milk");
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_toggle_todo_flips_only_target() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(seeded(&["a", "b", "c"]))
            .when_action(TodoAction::ToggleTodo { id: TodoId::new(2) })
            .then_state(|todos| {
                let flags: Vec<bool> = todos.iter().map(|t| t.complete).collect();
                assert_eq!(flags, vec![false, true, false]);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_delete_todo_preserves_order() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(seeded(&["a", "b", "c"]))
            .when_action(TodoAction::DeleteTodo { id: TodoId::new(2) })
            .then_state(|todos| {
                let names: Vec<&str> = todos.iter().map(|t| t.name.as_str()).collect();
                assert_eq!(names, vec!["a", "c"]);
            })
            .run();
    }

    #[test]
    fn test_missing_id_returns_same_list() {
        let ids = FixedIds::new();
        let todos = seeded(&["a", "b"]);

        let toggled = reduce_todos(&todos, &TodoAction::ToggleTodo { id: TodoId::new(99) }, &ids);
        assert!(toggled.same_as(&todos));

        let deleted = reduce_todos(&todos, &TodoAction::DeleteTodo { id: TodoId::new(99) }, &ids);
        assert!(deleted.same_as(&todos));
    }

    #[test]
    fn test_unrecognized_action_is_identity() {
        let ids = FixedIds::new();
        let todos = seeded(&["a"]);
        let next = reduce_todos(
            &todos,
            &TodoAction::Unrecognized {
                kind: "rename-todo".to_string(),
            },
            &ids,
        );
        assert!(next.same_as(&todos));
        assert_eq!(ids.issued(), 0);
    }

    #[test]
    fn test_reducer_does_not_validate_names() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoList::empty())
            .when_action(TodoAction::AddTodo {
                name: "   ".to_string(),
            })
            .then_state(|todos| assert_eq!(todos.get(0).unwrap().name, "   "))
            .run();
    }

    #[test]
    fn test_end_to_end_scenario() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoList::empty())
            .when_actions([
                TodoAction::AddTodo {
                    name: "Buy milk".to_string(),
                },
                TodoAction::AddTodo {
                    name: "Walk dog".to_string(),
                },
                TodoAction::ToggleTodo { id: TodoId::new(1) },
                TodoAction::DeleteTodo { id: TodoId::new(2) },
            ])
            .then_state(|todos| {
                assert_eq!(todos.len(), 1);
                let only = todos.get(0).unwrap();
                assert_eq!(only.name, "Buy milk");
                assert!(only.complete);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    fn arb_list() -> impl Strategy<Value = TodoList> {
        prop::collection::vec(("[a-z]{1,8}", any::<bool>()), 0..12).prop_map(|rows| {
            rows.into_iter()
                .zip(1..)
                .map(|((name, complete), id)| Todo {
                    id: TodoId::new(id),
                    name,
                    complete,
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_add_appends_one(todos in arb_list(), name in hooks_lab_testing::properties::non_blank_text()) {
            let ids = FixedIds::scripted([1000]);
            let trimmed = name.trim().to_string();
            let next = reduce_todos(&todos, &TodoAction::AddTodo { name: trimmed.clone() }, &ids);

            prop_assert_eq!(next.len(), todos.len() + 1);
            let last = next.get(todos.len()).unwrap();
            prop_assert_eq!(&last.name, &trimmed);
            prop_assert!(!last.complete);
            prop_assert!(todos.find(last.id).is_none());
            prop_assert_eq!(&next.as_slice()[..todos.len()], todos.as_slice());
        }

        #[test]
        fn prop_toggle_flips_exactly_one(todos in arb_list(), pick in any::<prop::sample::Index>()) {
            prop_assume!(!todos.is_empty());
            let ids = FixedIds::new();
            let target = todos.get(pick.index(todos.len())).unwrap().id;

            let once = reduce_todos(&todos, &TodoAction::ToggleTodo { id: target }, &ids);
            prop_assert_eq!(once.len(), todos.len());
            for (before, after) in todos.iter().zip(once.iter()) {
                if before.id == target {
                    prop_assert_eq!(after.complete, !before.complete);
                } else {
                    prop_assert_eq!(after, before);
                }
            }

            let twice = reduce_todos(&once, &TodoAction::ToggleTodo { id: target }, &ids);
            prop_assert_eq!(twice, todos);
        }

        #[test]
        fn prop_delete_removes_exactly_one(todos in arb_list(), pick in any::<prop::sample::Index>()) {
            prop_assume!(!todos.is_empty());
            let ids = FixedIds::new();
            let target = todos.get(pick.index(todos.len())).unwrap().id;

            let next = reduce_todos(&todos, &TodoAction::DeleteTodo { id: target }, &ids);
            prop_assert_eq!(next.len(), todos.len() - 1);
            prop_assert!(next.find(target).is_none());
            let expected: Vec<&Todo> = todos.iter().filter(|t| t.id != target).collect();
            let actual: Vec<&Todo> = next.iter().collect();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn prop_absent_id_is_identity(todos in arb_list(), offset in 1_u64..100) {
            let ids = FixedIds::new();
            let absent = TodoId::new(todos.len() as u64 + offset);

            let toggled = reduce_todos(&todos, &TodoAction::ToggleTodo { id: absent }, &ids);
            prop_assert!(toggled.same_as(&todos));
            let deleted = reduce_todos(&todos, &TodoAction::DeleteTodo { id: absent }, &ids);
            prop_assert!(deleted.same_as(&todos));
        }
    }
}
