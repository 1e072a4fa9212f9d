//! # Hooks Lab Core
//!
//! Core traits and hook primitives for the Hooks Lab reducer architecture.
//!
//! Every demo in this workspace is built from the same handful of pieces:
//!
//! - **State**: plain owned data for a feature
//! - **Action**: every input that can change that state
//! - **Reducer**: pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: a description of side work, executed by the runtime
//! - **Environment**: injected dependencies (clock, id generator, loaders)
//!
//! On top of those, three small primitives cover the remaining UI-state
//! patterns without any implicit global state:
//!
//! - [`context::Context`]: a value + updater pair passed by handle
//! - [`memo::Memo`]: a single-slot cache keyed by dependency equality
//! - [`refs::Ref`]: a mutable cell whose writes never notify anyone
//!
//! ## Example
//!
//! ```
//! use hooks_lab_core::{smallvec, Effect, Reducer, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i64,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//!     Decrement,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         match action {
//!             CounterAction::Increment => state.count += 1,
//!             CounterAction::Decrement => state.count -= 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = CounterState::default();
//! CounterReducer.reduce(&mut state, CounterAction::Increment, &());
//! assert_eq!(state.count, 1);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

pub use effect::Effect;
pub use reducer::Reducer;

/// Reducer composition (`combine_reducers`, `scope_reducer`)
pub mod composition;

/// Shared value + updater handles
pub mod context;

/// Declarative macros for building effects
pub mod effect_macros;

/// Dependency-keyed memoization
pub mod memo;

/// Mutable cells outside the render/notify cycle
pub mod refs;

/// The [`Reducer`](reducer::Reducer) trait
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// Every state transition of a feature, in one place
    ///
    /// A reducer mutates the state it is given and describes any side work
    /// as [`Effect`] values; it never performs I/O itself. Anything that
    /// would make it nondeterministic (time, ids, loaders) comes in through
    /// `Environment`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for TodoReducer {
    ///     type State = TodoState;
    ///     type Action = TodoAction;
    ///     type Environment = TodoEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut TodoState,
    ///         action: TodoAction,
    ///         env: &TodoEnvironment,
    ///     ) -> SmallVec<[Effect<TodoAction>; 4]> {
    ///         state.todos = reduce_todos(&state.todos, &action, env.ids.as_ref());
    ///         SmallVec::new()
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// State owned by the feature
        type State;

        /// Inputs that may change the state
        type Action;

        /// Injected dependencies
        type Environment;

        /// Applies `action` to `state` and returns the side work to run
        ///
        /// Most reducers return no effects; an empty `SmallVec` and one
        /// holding only [`Effect::None`] mean the same thing.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Descriptions of side work returned by reducers
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Side work for the runtime to perform after a reduction
    ///
    /// Building an effect does nothing; the store runs it. Any action an
    /// effect yields is sent back to the same store.
    pub enum Effect<Action> {
        /// Nothing to do
        None,

        /// Run all at once
        Parallel(Vec<Effect<Action>>),

        /// Run one after another, each waiting for the previous one
        Sequential(Vec<Effect<Action>>),

        /// Send `action` after `duration`
        Delay {
            /// Wait before sending
            duration: Duration,
            /// Sent once the wait is over
            action: Box<Action>,
        },

        /// Async work that may yield an action
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Futures have no Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Returns true for `Effect::None`
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }

        /// Transform the actions this effect will produce
        ///
        /// Used when a child reducer's effects are lifted into a parent
        /// action type (see [`crate::composition::scope_reducer`]).
        #[must_use]
        pub fn map<B, F>(self, f: F) -> Effect<B>
        where
            F: Fn(Action) -> B + Clone + Send + 'static,
            Action: Send + 'static,
            B: 'static,
        {
            match self {
                Effect::None => Effect::None,
                Effect::Parallel(effects) => Effect::Parallel(
                    effects.into_iter().map(|e| e.map(f.clone())).collect(),
                ),
                Effect::Sequential(effects) => Effect::Sequential(
                    effects.into_iter().map(|e| e.map(f.clone())).collect(),
                ),
                Effect::Delay { duration, action } => Effect::Delay {
                    duration,
                    action: Box::new(f(*action)),
                },
                Effect::Future(fut) => Effect::Future(Box::pin(async move { fut.await.map(f) })),
            }
        }
    }
}

/// Traits for the nondeterministic inputs reducers receive through their
/// environment, with production implementations
pub mod environment {
    use chrono::{DateTime, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Source of the current time
    pub trait Clock: Send + Sync {
        /// Now, in UTC
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall-clock time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Source of identifiers for newly created records
    ///
    /// Implementations must never hand out the same value twice for the
    /// lifetime of the generator.
    pub trait IdGenerator: Send + Sync {
        /// Returns the next identifier
        fn next_id(&self) -> u64;
    }

    /// Monotonic counter starting at 1
    ///
    /// Unlike timestamp-derived ids, two records created in the same
    /// instant still get distinct ids.
    #[derive(Debug, Default)]
    pub struct SequentialIds {
        last: AtomicU64,
    }

    impl SequentialIds {
        /// Creates a generator whose first id is 1
        #[must_use]
        pub const fn new() -> Self {
            Self {
                last: AtomicU64::new(0),
            }
        }

        /// Creates a generator whose first id is `last + 1`
        #[must_use]
        pub const fn starting_after(last: u64) -> Self {
            Self {
                last: AtomicU64::new(last),
            }
        }
    }

    impl IdGenerator for SequentialIds {
        fn next_id(&self) -> u64 {
            self.last.fetch_add(1, Ordering::Relaxed) + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::environment::{IdGenerator, SequentialIds};
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn sequential_ids_are_monotonic() {
        let ids = SequentialIds::new();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.next_id(), 3);
    }

    #[test]
    fn sequential_ids_resume_after_seed() {
        let ids = SequentialIds::starting_after(41);
        assert_eq!(ids.next_id(), 42);
    }

    #[test]
    fn sequential_ids_are_unique_across_threads() {
        let ids = Arc::new(SequentialIds::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                std::thread::spawn(move || (0..250).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            #[allow(clippy::unwrap_used)]
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(seen.len(), 1000);
    }

    #[test]
    fn effect_debug_hides_future() {
        let effect: Effect<()> = Effect::Future(Box::pin(async { None }));
        assert_eq!(format!("{effect:?}"), "Effect::Future(<future>)");
        assert!(Effect::<()>::None.is_none());
    }
}
