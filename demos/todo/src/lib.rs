//! Todo list driven by a single reducer.
//!
//! Records are added, toggled and deleted by dispatching actions to a
//! [`Store`](hooks_lab_runtime::Store). The reducer is a pure function
//! over an immutable list; views compare list identity to decide whether
//! to redraw.
//!
//! - [`types`]: records, the list and the action vocabulary
//! - [`reducer`]: the transition function and its `Reducer` impl
//! - [`wire`]: JSON envelopes for actions
//! - [`dispatch`]: entry form and per-item controls
//! - [`view`]: text rendering
//! - [`app`]: everything bound to one store
//!
//! # Quick Start
//!
//! ```no_run
//! use todo::{TodoApp, TodoEnvironment};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut app = TodoApp::new(TodoEnvironment::default());
//!
//! app.set_text("Buy milk");
//! app.submit().await?;
//!
//! if let Some(controls) = app.controls(0).await {
//!     app.dispatch(controls.toggle()).await?;
//! }
//!
//! for line in app.render().await {
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod dispatch;
pub mod reducer;
pub mod types;
pub mod view;
pub mod wire;

// Re-export commonly used types
pub use app::{TodoApp, TodoStore};
pub use dispatch::{ItemControls, SubmissionForm};
pub use reducer::{reduce_todos, TodoEnvironment, TodoReducer};
pub use types::{Todo, TodoAction, TodoId, TodoList};
pub use view::{number_lines, render_item, render_list, TodoView};
pub use wire::ActionDecodeError;
