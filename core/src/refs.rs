//! Mutable cells outside the render/notify cycle
//!
//! A [`Ref`] holds a value that components may read and overwrite freely.
//! Writing to it never notifies anyone and never dispatches an action, which
//! makes it the right place for bookkeeping such as "the value before the
//! last change" or "how many times did we render".

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared mutable cell that never triggers updates
#[derive(Debug, Default)]
pub struct Ref<T> {
    current: Arc<Mutex<T>>,
}

impl<T> Clone for Ref<T> {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
        }
    }
}

impl<T> Ref<T> {
    /// Creates a ref holding `initial`
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            current: Arc::new(Mutex::new(initial)),
        }
    }

    // A panic while holding the lock leaves a plain value behind; keep using it.
    fn lock(&self) -> MutexGuard<'_, T> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reads the current value through a closure
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.lock())
    }

    /// Mutates the current value in place
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.lock())
    }

    /// Overwrites the current value, returning the old one
    pub fn replace(&self, value: T) -> T {
        std::mem::replace(&mut *self.lock(), value)
    }
}

impl<T: Clone> Ref<T> {
    /// Returns a copy of the current value
    #[must_use]
    pub fn get(&self) -> T {
        self.lock().clone()
    }
}

/// Remembers the value a field had before its latest change
///
/// Call [`PreviousValue::commit`] after each render with the value that was
/// rendered. [`PreviousValue::previous`] then reports what was rendered the
/// time before.
#[derive(Debug, Clone)]
pub struct PreviousValue<T> {
    previous: T,
    last_committed: T,
}

impl<T: Clone + PartialEq> PreviousValue<T> {
    /// Starts tracking with `initial` as both the current and previous value
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            previous: initial.clone(),
            last_committed: initial,
        }
    }

    /// Records `current` as rendered; only a change moves the previous value
    pub fn commit(&mut self, current: &T) {
        if *current != self.last_committed {
            self.previous = std::mem::replace(&mut self.last_committed, current.clone());
        }
    }

    /// Value before the latest change
    #[must_use]
    pub const fn previous(&self) -> &T {
        &self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ref_writes_are_shared_between_clones() {
        let counter = Ref::new(0_u32);
        let alias = counter.clone();

        alias.with_mut(|n| *n += 1);
        counter.with_mut(|n| *n += 1);

        assert_eq!(counter.get(), 2);
        assert_eq!(alias.with(|n| *n), 2);
    }

    #[test]
    fn replace_returns_old_value() {
        let name = Ref::new(String::from("a"));
        assert_eq!(name.replace(String::from("b")), "a");
        assert_eq!(name.get(), "b");
    }

    #[test]
    fn ref_survives_poisoned_lock() {
        let value = Ref::new(1_u8);
        let alias = value.clone();
        let _ = std::thread::spawn(move || {
            alias.with_mut(|_| {
                #[allow(clippy::panic)]
                {
                    panic!("poison the lock");
                }
            });
        })
        .join();

        assert_eq!(value.get(), 1);
    }

    #[test]
    fn previous_value_tracks_last_change() {
        let mut prev = PreviousValue::new(String::new());

        prev.commit(&"K".to_string());
        assert_eq!(prev.previous(), "");

        prev.commit(&"Ky".to_string());
        assert_eq!(prev.previous(), "K");

        // Re-rendering the same value keeps the previous one
        prev.commit(&"Ky".to_string());
        assert_eq!(prev.previous(), "K");
    }
}
