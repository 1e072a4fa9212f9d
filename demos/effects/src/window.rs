//! Window resize events and the listener that forwards them to a store

use crate::reducer::{EffectsAction, EffectsEnvironment, EffectsReducer, EffectsState};
use hooks_lab_runtime::Store;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Store type driven by the effects demo
pub type EffectsStore = Store<EffectsState, EffectsAction, EffectsEnvironment, EffectsReducer>;

/// Stand-in for the browser window
///
/// Cloning shares the same window.
#[derive(Debug, Clone)]
pub struct Window {
    width: Arc<AtomicU32>,
    resizes: broadcast::Sender<u32>,
}

impl Window {
    /// Window of `width` pixels with no listeners
    #[must_use]
    pub fn new(width: u32) -> Self {
        let (resizes, _) = broadcast::channel(16);
        Self {
            width: Arc::new(AtomicU32::new(width)),
            resizes,
        }
    }

    /// Current width in pixels
    #[must_use]
    pub fn inner_width(&self) -> u32 {
        self.width.load(Ordering::SeqCst)
    }

    /// Changes the width and notifies listeners
    ///
    /// Returns how many listeners were notified.
    pub fn resize(&self, width: u32) -> usize {
        self.width.store(width, Ordering::SeqCst);
        self.resizes.send(width).unwrap_or(0)
    }

    /// Number of attached listeners
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.resizes.receiver_count()
    }

    fn subscribe(&self) -> broadcast::Receiver<u32> {
        self.resizes.subscribe()
    }
}

/// Subscription forwarding resizes into a store as
/// [`EffectsAction::WindowResized`]
///
/// Detaches when dropped.
#[derive(Debug)]
pub struct ResizeListener {
    task: JoinHandle<()>,
}

impl ResizeListener {
    /// Starts forwarding resizes of `window` to `store`
    ///
    /// Must be called inside a Tokio runtime.
    #[must_use]
    pub fn attach(window: &Window, store: EffectsStore) -> Self {
        let mut resizes = window.subscribe();
        let task = tokio::spawn(async move {
            loop {
                match resizes.recv().await {
                    Ok(width) => {
                        if store.send(EffectsAction::WindowResized(width)).await.is_err() {
                            tracing::debug!("Store closed, detaching resize listener");
                            break;
                        }
                    },
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Resize listener lagged");
                    },
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
        tracing::debug!("Resize listener attached");
        Self { task }
    }

    /// Whether the forwarding task has stopped
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        self.task.abort();
        tracing::debug!("Resize listener detached");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_without_listeners_updates_width() {
        let window = Window::new(800);
        assert_eq!(window.resize(640), 0);
        assert_eq!(window.inner_width(), 640);
        assert_eq!(window.clone().inner_width(), 640);
    }
}
