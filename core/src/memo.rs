//! Dependency-keyed memoization
//!
//! [`Memo`] caches the result of a pure computation together with the
//! dependencies it was computed from. Asking for the value again with equal
//! dependencies returns the cached result; different dependencies
//! recompute and replace it. Only the most recent entry is kept.
//!
//! [`Callback`] is a shareable function whose identity can be compared,
//! so a `Memo<D, Callback<A, O>>` hands out the *same* callback for as long
//! as its dependencies stay equal.

use std::fmt;
use std::sync::Arc;

/// Single-slot cache keyed by dependency equality
#[derive(Debug, Clone)]
pub struct Memo<D, V> {
    entry: Option<(D, V)>,
    computations: u64,
}

impl<D, V> Default for Memo<D, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, V> Memo<D, V> {
    /// Creates an empty memo
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entry: None,
            computations: 0,
        }
    }

    /// Number of times the computation actually ran
    #[must_use]
    pub const fn computations(&self) -> u64 {
        self.computations
    }

    /// Cached value, if any, without checking dependencies
    #[must_use]
    pub fn peek(&self) -> Option<&V> {
        self.entry.as_ref().map(|(_, value)| value)
    }

    /// Drops the cached entry so the next lookup recomputes
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

impl<D: PartialEq, V> Memo<D, V> {
    /// Returns the cached value for `deps`, computing it first if the
    /// dependencies differ from the cached ones
    pub fn get_or_compute(&mut self, deps: D, compute: impl FnOnce(&D) -> V) -> &V {
        let entry = match self.entry.take() {
            Some(entry) if entry.0 == deps => entry,
            _ => {
                let value = compute(&deps);
                self.computations += 1;
                (deps, value)
            },
        };
        &self.entry.insert(entry).1
    }

    /// Returns true if `deps` would hit the cache
    #[must_use]
    pub fn is_fresh(&self, deps: &D) -> bool {
        self.entry
            .as_ref()
            .is_some_and(|(cached_deps, _)| cached_deps == deps)
    }
}

/// Shareable function with comparable identity
///
/// Two `Callback`s are equal only if they are clones of the same allocation,
/// never because their bodies happen to behave the same.
pub struct Callback<A, O> {
    f: Arc<dyn Fn(A) -> O + Send + Sync>,
}

impl<A, O> Callback<A, O> {
    /// Wraps a closure
    pub fn new(f: impl Fn(A) -> O + Send + Sync + 'static) -> Self {
        Self { f: Arc::new(f) }
    }

    /// Invokes the callback
    pub fn call(&self, arg: A) -> O {
        (self.f)(arg)
    }

    /// True if both handles point at the same closure
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl<A, O> Clone for Callback<A, O> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl<A, O> PartialEq for Callback<A, O> {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl<A, O> fmt::Debug for Callback<A, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("ptr", &Arc::as_ptr(&self.f).cast::<()>())
            .finish()
    }
}

/// Memo specialised for callbacks
pub type CallbackMemo<D, A, O> = Memo<D, Callback<A, O>>;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn computes_once_for_equal_deps() {
        let mut memo = Memo::new();

        assert_eq!(*memo.get_or_compute(3, |n| n * 2), 6);
        assert_eq!(*memo.get_or_compute(3, |_| unreachable!("cached")), 6);
        assert_eq!(memo.computations(), 1);
    }

    #[test]
    fn recomputes_when_deps_change() {
        let mut memo = Memo::new();

        memo.get_or_compute(1, |n| n * 2);
        assert_eq!(*memo.get_or_compute(2, |n| n * 2), 4);
        assert_eq!(memo.computations(), 2);
        assert!(memo.is_fresh(&2));
        assert!(!memo.is_fresh(&1));
    }

    #[test]
    fn only_the_latest_entry_is_kept() {
        let mut memo = Memo::new();

        memo.get_or_compute('a', |_| 1);
        memo.get_or_compute('b', |_| 2);
        assert_eq!(*memo.get_or_compute('a', |_| 3), 3);
        assert_eq!(memo.peek(), Some(&3));
        assert_eq!(memo.computations(), 3);
    }

    #[test]
    fn invalidate_forces_recompute() {
        let mut memo = Memo::new();
        memo.get_or_compute("dark", |_| 1);
        memo.invalidate();
        assert!(memo.peek().is_none());
        memo.get_or_compute("dark", |_| 1);
        assert_eq!(memo.computations(), 2);
    }

    #[test]
    fn callback_identity_is_stable_while_deps_are_equal() {
        let mut memo: CallbackMemo<i64, i64, i64> = Memo::new();

        let first = memo
            .get_or_compute(1, |n| {
                let n = *n;
                Callback::new(move |i| n + i)
            })
            .clone();
        let second = memo
            .get_or_compute(1, |n| {
                let n = *n;
                Callback::new(move |i| n + i)
            })
            .clone();
        assert!(first.same_as(&second));

        let third = memo
            .get_or_compute(2, |n| {
                let n = *n;
                Callback::new(move |i| n + i)
            })
            .clone();
        assert_ne!(first, third);
        assert_eq!(third.call(1), 3);
    }

    #[test]
    fn identical_bodies_are_not_equal() {
        let a: Callback<(), ()> = Callback::new(|()| ());
        let b: Callback<(), ()> = Callback::new(|()| ());
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    proptest! {
        #[test]
        fn computation_count_matches_dependency_changes(deps in proptest::collection::vec(0_u8..4, 0..40)) {
            let mut memo = Memo::new();
            let mut expected = 0_u64;
            let mut last = None;

            for d in deps {
                if last != Some(d) {
                    expected += 1;
                }
                last = Some(d);
                let value = *memo.get_or_compute(d, |d| u32::from(*d) * 10);
                prop_assert_eq!(value, u32::from(d) * 10);
            }

            prop_assert_eq!(memo.computations(), expected);
        }
    }
}
