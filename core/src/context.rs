//! Shared value + updater handles
//!
//! A [`Context`] owns one value that any number of descendants can read and
//! update without threading it through every layer by hand. It is an
//! explicit handle: whoever builds a component tree creates the context and
//! passes clones (or the narrower [`ContextValue`] / [`ContextUpdater`]
//! halves) into the components that need them. There is no process-wide
//! registry.
//!
//! Every update bumps the value on a `tokio::sync::watch` channel, so
//! readers can either peek at the latest value or await the next change.
//!
//! # Example
//!
//! ```
//! use hooks_lab_core::context::Context;
//!
//! let theme = Context::new(true);
//! let value = theme.value();
//! let toggle = theme.updater();
//!
//! toggle.update(|dark| *dark = !*dark);
//! assert!(!value.get());
//! ```

use std::sync::Arc;
use tokio::sync::watch;

/// Owner of a shared value
///
/// Cloning a `Context` yields another handle to the same value.
#[derive(Debug)]
pub struct Context<T> {
    sender: Arc<watch::Sender<T>>,
}

impl<T> Clone for Context<T> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<T> Context<T> {
    /// Creates a context holding `initial`
    #[must_use]
    pub fn new(initial: T) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Read-only handle to the current value
    #[must_use]
    pub fn value(&self) -> ContextValue<T> {
        ContextValue {
            receiver: self.sender.subscribe(),
        }
    }

    /// Write-only handle that can change the value
    #[must_use]
    pub fn updater(&self) -> ContextUpdater<T> {
        ContextUpdater {
            sender: Arc::clone(&self.sender),
        }
    }

    /// Reads the current value through a closure
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.sender.borrow())
    }

    /// Applies `f` to the current value and notifies readers
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.sender.send_modify(f);
    }

    /// Replaces the value and notifies readers, returning the old value
    pub fn replace(&self, value: T) -> T {
        self.sender.send_replace(value)
    }
}

impl<T: Clone> Context<T> {
    /// Returns a copy of the current value
    #[must_use]
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }
}

/// Read half of a [`Context`]
#[derive(Debug, Clone)]
pub struct ContextValue<T> {
    receiver: watch::Receiver<T>,
}

impl<T> ContextValue<T> {
    /// Reads the current value through a closure
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.receiver.borrow())
    }

    /// Returns true if the value changed since this handle last looked
    ///
    /// Returns false once every owner and updater has been dropped.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Waits for the next update and returns whether one arrived
    ///
    /// Resolves to `false` when every owner and updater has been dropped.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }

    /// Marks the current value as seen and returns a copy of it
    pub fn get_and_mark_seen(&mut self) -> T
    where
        T: Clone,
    {
        self.receiver.borrow_and_update().clone()
    }
}

impl<T: Clone> ContextValue<T> {
    /// Returns a copy of the current value
    #[must_use]
    pub fn get(&self) -> T {
        self.receiver.borrow().clone()
    }
}

/// Write half of a [`Context`]
#[derive(Debug)]
pub struct ContextUpdater<T> {
    sender: Arc<watch::Sender<T>>,
}

impl<T> Clone for ContextUpdater<T> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<T> ContextUpdater<T> {
    /// Applies `f` to the current value and notifies readers
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.sender.send_modify(f);
    }

    /// Replaces the value and notifies readers
    pub fn set(&self, value: T) {
        self.sender.send_replace(value);
    }
}
