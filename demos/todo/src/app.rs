//! The todo application: form, per-item controls and view bound to one store.

use crate::dispatch::{ItemControls, SubmissionForm};
use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{TodoAction, TodoList};
use crate::view::TodoView;
use hooks_lab_runtime::{Store, StoreError};

/// Store type used by the todo application
pub type TodoStore = Store<TodoList, TodoAction, TodoEnvironment, TodoReducer>;

/// Todo list wired to a store
///
/// Every action goes through the store's single dispatch channel. Dispatch
/// does not wait for anything; the next [`TodoApp::render`] shows the result.
pub struct TodoApp {
    store: TodoStore,
    form: SubmissionForm,
    view: TodoView,
}

impl TodoApp {
    /// App with an empty list
    #[must_use]
    pub fn new(env: TodoEnvironment) -> Self {
        Self::with_store(Store::new(TodoList::empty(), TodoReducer::new(), env))
    }

    /// App over an existing store
    #[must_use]
    pub fn with_store(store: TodoStore) -> Self {
        Self {
            store,
            form: SubmissionForm::new(),
            view: TodoView::new(),
        }
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &TodoStore {
        &self.store
    }

    /// Types into the entry form
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.form.set_text(text);
    }

    /// Text currently in the entry form
    #[must_use]
    pub fn text(&self) -> &str {
        self.form.text()
    }

    /// Submits the entry form
    ///
    /// Returns `false` when the text was blank and nothing was dispatched.
    /// The form is cleared only after the store accepts the action.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting
    /// down; the typed text is kept.
    pub async fn submit(&mut self) -> Result<bool, StoreError> {
        let Some(action) = self.form.submission() else {
            return Ok(false);
        };
        self.dispatch(action).await?;
        self.form.clear();
        Ok(true)
    }

    /// Sends an action to the store
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn dispatch(&self, action: TodoAction) -> Result<(), StoreError> {
        tracing::debug!(kind = action.kind(), "Dispatching");
        self.store.send(action).await.map(drop)
    }

    /// Current list
    pub async fn todos(&self) -> TodoList {
        self.store.state(TodoList::clone).await
    }

    /// Controls for the record at `index` (0-based, in list order)
    pub async fn controls(&self, index: usize) -> Option<ItemControls> {
        self.store
            .state(|todos| todos.get(index).map(ItemControls::for_todo))
            .await
    }

    /// Brings the view up to date and returns its lines
    pub async fn render(&mut self) -> &[String] {
        let todos = self.todos().await;
        self.view.render(&todos);
        self.view.lines()
    }

    /// How many times the view has redrawn
    #[must_use]
    pub const fn render_count(&self) -> u64 {
        self.view.render_count()
    }
}
