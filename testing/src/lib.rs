//! # Hooks Lab Testing
//!
//! Testing utilities and helpers for the Hooks Lab reducer architecture.
//!
//! This crate provides:
//! - Deterministic environment implementations (clock, ids)
//! - The Given-When-Then [`ReducerTest`] harness
//! - Property-based testing strategies for user-entered text
//! - Helpers for driving a [`Store`](hooks_lab_runtime::Store) to quiescence
//!
//! ## Example
//!
//! ```ignore
//! use hooks_lab_testing::{FixedIds, ReducerTest};
//!
//! ReducerTest::new(TodoReducer)
//!     .with_env(TodoEnvironment::new(FixedIds::shared()))
//!     .given_state(TodoList::empty())
//!     .when_action(TodoAction::AddTodo { name: "milk".into() })
//!     .then_state(|todos| assert_eq!(todos.len(), 1))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use hooks_lab_core::environment::{Clock, IdGenerator};


pub use reducer_test::{assertions, ReducerTest};

/// Deterministic implementations of environment traits
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex, PoisonError};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use hooks_lab_testing::mocks::FixedClock;
    /// use hooks_lab_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Id generator with a predictable sequence
    ///
    /// Hands out the scripted ids first, then counts upward from the
    /// largest id seen so far. Ids never repeat as long as the script
    /// itself holds no duplicates.
    #[derive(Debug, Default)]
    pub struct FixedIds {
        scripted: Mutex<VecDeque<u64>>,
        last: AtomicU64,
        issued: AtomicU64,
    }

    impl FixedIds {
        /// Counter starting at 1
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Shared handle, as environments expect
        #[must_use]
        pub fn shared() -> Arc<Self> {
            Arc::new(Self::new())
        }

        /// Generator that returns `ids` in order before counting on
        #[must_use]
        pub fn scripted(ids: impl IntoIterator<Item = u64>) -> Self {
            Self {
                scripted: Mutex::new(ids.into_iter().collect()),
                ..Self::default()
            }
        }

        /// How many ids have been handed out
        #[must_use]
        pub fn issued(&self) -> u64 {
            self.issued.load(Ordering::SeqCst)
        }
    }

    impl IdGenerator for FixedIds {
        fn next_id(&self) -> u64 {
            self.issued.fetch_add(1, Ordering::SeqCst);
            let scripted = self
                .scripted
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front();

            match scripted {
                Some(id) => {
                    self.last.fetch_max(id, Ordering::SeqCst);
                    id
                },
                None => self.last.fetch_add(1, Ordering::SeqCst) + 1,
            }
        }
    }
}

/// Property-based testing strategies
///
/// Strategies for the kinds of text a user types into a form.
pub mod properties {
    use proptest::prelude::*;

    /// Text with at least one non-whitespace character
    pub fn non_blank_text() -> impl Strategy<Value = String> {
        ("[ \t]{0,3}", "[a-zA-Z0-9][a-zA-Z0-9 ]{0,20}", "[ \t]{0,3}")
            .prop_map(|(lead, body, trail)| format!("{lead}{body}{trail}"))
    }

    /// Empty or whitespace-only text
    pub fn blank_text() -> impl Strategy<Value = String> {
        "[ \t\n]{0,6}"
    }
}

/// Test helpers and utilities
pub mod helpers {
    use hooks_lab_core::reducer::Reducer;
    use hooks_lab_runtime::{Store, StoreError};
    use std::time::Duration;

    /// Send each action and wait for all effects it spawned
    ///
    /// # Errors
    ///
    /// Returns the first [`StoreError`] from sending or from waiting on
    /// an action's effects.
    pub async fn send_all<S, A, E, R>(
        store: &Store<S, A, E, R>,
        actions: impl IntoIterator<Item = A>,
        per_action: Duration,
    ) -> Result<(), StoreError>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Clone + Send + Sync + 'static,
    {
        for action in actions {
            let mut handle = store.send(action).await?;
            handle.wait_with_timeout(per_action).await?;
        }
        Ok(())
    }

    /// Install a test subscriber that writes through the test harness
    ///
    /// Safe to call from every test; only the first call installs.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use mocks::{test_clock, FixedClock, FixedIds};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    #[test]
    fn test_fixed_ids_count_from_one() {
        let ids = FixedIds::new();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn test_scripted_ids_then_continue() {
        let ids = FixedIds::scripted([10, 4]);
        assert_eq!(ids.next_id(), 10);
        assert_eq!(ids.next_id(), 4);
        assert_eq!(ids.next_id(), 11);
    }

    mod strategies {
        use super::super::properties::{blank_text, non_blank_text};
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn non_blank_text_survives_trim(text in non_blank_text()) {
                prop_assert!(!text.trim().is_empty());
            }

            #[test]
            fn blank_text_trims_to_nothing(text in blank_text()) {
                prop_assert!(text.trim().is_empty());
            }
        }
    }
}
