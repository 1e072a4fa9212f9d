//! # Hooks Lab Runtime
//!
//! The [`Store`] ties a reducer to its state and environment. Every action
//! goes through [`Store::send`], which runs the reducer under a write lock,
//! bumps the store's revision and starts whatever effects the reducer asked
//! for. Actions produced by effects come back through `send` as well, so
//! there is exactly one path into the state.
//!
//! Views learn about changes in one of two ways:
//!
//! - [`Store::subscribe_revisions`]: a `watch` receiver that changes after
//!   every reduction
//! - [`Store::subscribe_actions`]: a `broadcast` receiver of actions
//!   produced by effects
//!
//! ## Example
//!
//! ```ignore
//! use hooks_lab_runtime::Store;
//!
//! let store = Store::new(TodoList::empty(), TodoReducer, TodoEnvironment::default());
//!
//! store.send(TodoAction::AddTodo { name: "Buy milk".into() }).await?;
//!
//! let open = store.state(|todos| todos.len()).await;
//! ```

use hooks_lab_core::{effect::Effect, reducer::Reducer};
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors returned by [`crate::Store`] operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// The store no longer accepts actions
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Effects were still running when the shutdown timeout expired
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Nothing matching arrived in time
        #[error("Timeout waiting for action")]
        Timeout,

        /// The action broadcast channel closed
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

/// Store tuning knobs
///
/// ```
/// use hooks_lab_runtime::StoreConfig;
/// use std::time::Duration;
///
/// let config = StoreConfig::default()
///     .with_broadcast_capacity(64)
///     .with_shutdown_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.broadcast_capacity, 64);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Effect-produced actions buffered for slow observers
    pub broadcast_capacity: usize,
    /// Timeout used by [`Store::shutdown_with_default`]
    pub default_shutdown_timeout: Duration,
}

impl StoreConfig {
    /// Configuration with explicit values
    #[must_use]
    pub const fn new(broadcast_capacity: usize, default_shutdown_timeout: Duration) -> Self {
        Self {
            broadcast_capacity,
            default_shutdown_timeout,
        }
    }

    /// Sets the broadcast capacity (at least one)
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = if capacity == 0 { 1 } else { capacity };
        self
    }

    /// Sets the timeout used by [`Store::shutdown_with_default`]
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.default_shutdown_timeout = timeout;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(16, Duration::from_secs(30))
    }
}

/// Completion handle for the effects started by one [`Store::send`]
///
/// Counts the effects of that action only. Actions fed back by those
/// effects are reduced before the effect counts as done, but any effects
/// *they* start are not tracked here.
///
/// ```ignore
/// let mut handle = store.send(EffectsAction::SelectResource(ResourceType::Users)).await?;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    running: Arc<AtomicUsize>,
    done: watch::Receiver<()>,
}

impl EffectHandle {
    fn new() -> (Self, EffectTracking) {
        let running = Arc::new(AtomicUsize::new(0));
        let (notify, done) = watch::channel(());

        let handle = Self {
            running: Arc::clone(&running),
            done,
        };
        let tracking = EffectTracking {
            running,
            notify: Arc::new(notify),
        };
        (handle, tracking)
    }

    /// Handle with nothing to wait for
    #[must_use]
    pub fn completed() -> Self {
        Self::new().0
    }

    /// Effects still running
    #[must_use]
    pub fn pending(&self) -> usize {
        self.running.load(Ordering::SeqCst)
    }

    /// Waits until every tracked effect has finished
    pub async fn wait(&mut self) {
        while self.pending() > 0 {
            if self.done.changed().await.is_err() {
                break;
            }
        }
    }

    /// [`EffectHandle::wait`] bounded by `timeout`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if effects are still running after
    /// `timeout`.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}

/// Sender side of an [`EffectHandle`]
#[derive(Clone)]
struct EffectTracking {
    running: Arc<AtomicUsize>,
    notify: Arc<watch::Sender<()>>,
}

/// Counts one spawned effect against both its handle and the store
///
/// Released on drop, so a panicking effect still counts as finished.
struct InFlight {
    tracking: EffectTracking,
    store_pending: Arc<AtomicUsize>,
}

impl InFlight {
    fn start(tracking: &EffectTracking, store_pending: &Arc<AtomicUsize>) -> Self {
        tracking.running.fetch_add(1, Ordering::SeqCst);
        store_pending.fetch_add(1, Ordering::SeqCst);
        Self {
            tracking: tracking.clone(),
            store_pending: Arc::clone(store_pending),
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.store_pending.fetch_sub(1, Ordering::SeqCst);
        if self.tracking.running.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.tracking.notify.send_replace(());
        }
    }
}

/// Store runtime for coordinating reducer execution and effect handling.
pub mod store {
    use super::{
        Arc, AtomicBool, AtomicUsize, Duration, Effect, EffectHandle, EffectTracking, Future,
        InFlight, Ordering, Reducer, RwLock, StoreConfig, StoreError,
    };
    use tokio::sync::{broadcast, watch};

    /// Owner of one piece of state and the only way to change it
    ///
    /// Dispatch is serialized: the reducer runs under the write lock, so
    /// actions are applied one at a time in the order `send` acquires it.
    /// Cloning is cheap and every clone drives the same state.
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        shutdown: Arc<AtomicBool>,
        pending_effects: Arc<AtomicUsize>,
        default_shutdown_timeout: Duration,
        action_broadcast: broadcast::Sender<A>,
        revision: Arc<watch::Sender<u64>>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Store with [`StoreConfig::default`]
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Store with explicit configuration
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity.max(1));
            let (revision, _) = watch::channel(0);

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                shutdown: Arc::new(AtomicBool::new(false)),
                pending_effects: Arc::new(AtomicUsize::new(0)),
                default_shutdown_timeout: config.default_shutdown_timeout,
                action_broadcast,
                revision: Arc::new(revision),
            }
        }

        /// Stops accepting actions and waits for running effects
        ///
        /// Actions fed back by effects after this point are dropped.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] with the number of effects
        /// still running if they outlast `timeout`.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            const POLL: Duration = Duration::from_millis(10);

            tracing::info!("Initiating graceful shutdown");
            metrics::counter!("store.shutdown.initiated").increment(1);
            self.shutdown.store(true, Ordering::Release);

            let deadline = tokio::time::Instant::now() + timeout;
            loop {
                let pending = self.pending_effects.load(Ordering::Acquire);
                if pending == 0 {
                    tracing::info!("All effects completed, shutdown successful");
                    metrics::counter!("store.shutdown.completed").increment(1);
                    return Ok(());
                }
                if tokio::time::Instant::now() >= deadline {
                    tracing::error!(pending_effects = pending, "Shutdown timeout");
                    metrics::counter!("store.shutdown.timeout").increment(1);
                    return Err(StoreError::ShutdownTimeout(pending));
                }
                tracing::debug!(pending_effects = pending, "Waiting for effects to complete");
                tokio::time::sleep(POLL).await;
            }
        }

        /// [`Store::shutdown`] with the configured default timeout
        ///
        /// # Errors
        ///
        /// See [`Store::shutdown`].
        pub async fn shutdown_with_default(&self) -> Result<(), StoreError> {
            self.shutdown(self.default_shutdown_timeout).await
        }

        /// Whether shutdown has started
        #[must_use]
        pub fn is_shutting_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }

        /// Applies `action` and starts its effects
        ///
        /// Returns once the reducer has run and its effects have been
        /// spawned; use the returned handle to wait for the effects.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] once shutdown has started.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError>
        where
            R: Clone,
            E: Clone,
        {
            if self.is_shutting_down() {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            metrics::counter!("store.commands.total").increment(1);
            let (handle, tracking) = EffectHandle::new();

            let effects = {
                let mut state = self.state.write().await;
                let _span = tracing::debug_span!("reducer_execution").entered();

                let started = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut state, action, &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(started.elapsed().as_secs_f64());

                // Still under the write lock, so revisions follow dispatch order
                self.revision.send_modify(|revision| *revision += 1);
                effects
            };

            tracing::trace!(effects = effects.len(), "Reducer completed");
            for effect in effects {
                self.run_effect(effect, &tracking);
            }
            Ok(handle)
        }

        /// Sends `action` and waits for the first effect-produced action
        /// matching `predicate`
        ///
        /// Subscribes before sending, so a fast effect cannot be missed.
        ///
        /// # Errors
        ///
        /// - [`StoreError::ShutdownInProgress`]: the store rejected `action`
        /// - [`StoreError::Timeout`]: nothing matched within `timeout`
        /// - [`StoreError::ChannelClosed`]: the broadcast channel closed
        pub async fn send_and_wait_for<F>(
            &self,
            action: A,
            predicate: F,
            timeout: Duration,
        ) -> Result<A, StoreError>
        where
            R: Clone,
            E: Clone,
            F: Fn(&A) -> bool,
        {
            let mut observed = self.action_broadcast.subscribe();
            self.send(action).await?;

            let wait = async {
                loop {
                    match observed.recv().await {
                        Ok(action) if predicate(&action) => return Ok(action),
                        Ok(_) => {},
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "Action observer lagged");
                        },
                        Err(broadcast::error::RecvError::Closed) => {
                            return Err(StoreError::ChannelClosed);
                        },
                    }
                }
            };
            tokio::time::timeout(timeout, wait)
                .await
                .map_err(|_| StoreError::Timeout)?
        }

        /// Actions produced by effects, each published once the store has
        /// applied it
        ///
        /// Actions passed to `send` by callers are not published.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Revision updates
        ///
        /// The current revision starts out seen; `changed().await` resolves
        /// after the next reduction.
        #[must_use]
        pub fn subscribe_revisions(&self) -> watch::Receiver<u64> {
            self.revision.subscribe()
        }

        /// Reductions performed so far
        #[must_use]
        pub fn revision(&self) -> u64 {
            *self.revision.borrow()
        }

        /// Reads state through `f` under the read lock
        ///
        /// ```ignore
        /// let done = store.state(|todos| todos.completed_count()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Sends an effect-produced action back in, then publishes it
        async fn feed_back(&self, action: A)
        where
            R: Clone,
            E: Clone,
        {
            let published = action.clone();
            match self.send(action).await {
                Ok(_) => {
                    let _ = self.action_broadcast.send(published);
                },
                Err(error) => tracing::warn!(%error, "Dropped action produced by effect"),
            }
        }

        /// Spawns `work`, counted against `tracking` and the store until it ends
        fn spawn_tracked<W>(&self, tracking: &EffectTracking, work: W)
        where
            W: Future<Output = ()> + Send + 'static,
        {
            let in_flight = InFlight::start(tracking, &self.pending_effects);
            tokio::spawn(async move {
                let _in_flight = in_flight;
                work.await;
            });
        }

        #[tracing::instrument(skip_all, name = "execute_effect")]
        fn run_effect(&self, effect: Effect<A>, tracking: &EffectTracking)
        where
            R: Clone,
            E: Clone,
        {
            match effect {
                Effect::None => {
                    metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                },
                Effect::Future(fut) => {
                    metrics::counter!("store.effects.executed", "type" => "future").increment(1);
                    let store = self.clone();
                    self.spawn_tracked(tracking, async move {
                        if let Some(action) = fut.await {
                            store.feed_back(action).await;
                        }
                    });
                },
                Effect::Delay { duration, action } => {
                    metrics::counter!("store.effects.executed", "type" => "delay").increment(1);
                    let store = self.clone();
                    self.spawn_tracked(tracking, async move {
                        tokio::time::sleep(duration).await;
                        store.feed_back(*action).await;
                    });
                },
                Effect::Parallel(effects) => {
                    metrics::counter!("store.effects.executed", "type" => "parallel").increment(1);
                    for effect in effects {
                        self.run_effect(effect, tracking);
                    }
                },
                Effect::Sequential(effects) => {
                    metrics::counter!("store.effects.executed", "type" => "sequential").increment(1);
                    let store = self.clone();
                    self.spawn_tracked(tracking, async move {
                        for effect in effects {
                            let (mut step, step_tracking) = EffectHandle::new();
                            store.run_effect(effect, &step_tracking);
                            step.wait().await;
                        }
                    });
                },
            }
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                shutdown: Arc::clone(&self.shutdown),
                pending_effects: Arc::clone(&self.pending_effects),
                default_shutdown_timeout: self.default_shutdown_timeout,
                action_broadcast: self.action_broadcast.clone(),
                revision: Arc::clone(&self.revision),
            }
        }
    }
}

pub use store::Store;

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use hooks_lab_core::{smallvec, SmallVec};

    #[derive(Debug, Clone, Default)]
    struct Meter {
        reading: i64,
        log: Vec<i64>,
    }

    #[derive(Debug, Clone)]
    enum MeterAction {
        Add(i64),
        Hold,
        AddAsync(i64),
        AddAfter(Duration, i64),
        AddEach(Vec<i64>),
        AddInTurn(Vec<i64>),
        Stall(Duration),
    }

    #[derive(Debug, Clone, Copy)]
    struct MeterReducer;

    impl Reducer for MeterReducer {
        type State = Meter;
        type Action = MeterAction;
        type Environment = ();

        fn reduce(
            &self,
            meter: &mut Meter,
            action: MeterAction,
            _env: &(),
        ) -> SmallVec<[Effect<MeterAction>; 4]> {
            let add_later = |n: i64| -> Effect<MeterAction> {
                Effect::Future(Box::pin(async move { Some(MeterAction::Add(n)) }))
            };
            match action {
                MeterAction::Add(n) => {
                    meter.reading += n;
                    meter.log.push(n);
                    SmallVec::new()
                },
                MeterAction::Hold => smallvec![Effect::None],
                MeterAction::AddAsync(n) => smallvec![add_later(n)],
                MeterAction::AddAfter(duration, n) => smallvec![Effect::Delay {
                    duration,
                    action: Box::new(MeterAction::Add(n)),
                }],
                MeterAction::AddEach(ns) => {
                    smallvec![Effect::Parallel(ns.into_iter().map(add_later).collect())]
                },
                MeterAction::AddInTurn(ns) => {
                    smallvec![Effect::Sequential(ns.into_iter().map(add_later).collect())]
                },
                MeterAction::Stall(duration) => smallvec![Effect::Future(Box::pin(async move {
                    tokio::time::sleep(duration).await;
                    None
                }))],
            }
        }
    }

    type MeterStore = Store<Meter, MeterAction, (), MeterReducer>;

    fn meter() -> MeterStore {
        Store::new(Meter::default(), MeterReducer, ())
    }

    const WAIT: Duration = Duration::from_secs(1);

    #[tokio::test]
    async fn new_store_starts_at_revision_zero() {
        let store = meter();
        assert_eq!(store.state(|m| m.reading).await, 0);
        assert_eq!(store.revision(), 0);
    }

    #[tokio::test]
    async fn every_send_is_one_revision() {
        let store = meter();
        store.send(MeterAction::Add(5)).await.unwrap();
        store.send(MeterAction::Hold).await.unwrap();
        store.send(MeterAction::Add(-2)).await.unwrap();

        assert_eq!(store.state(|m| m.reading).await, 3);
        assert_eq!(store.revision(), 3);
    }

    #[tokio::test]
    async fn future_output_is_reduced_before_handle_completes() {
        let store = meter();
        let mut handle = store.send(MeterAction::AddAsync(4)).await.unwrap();
        handle.wait_with_timeout(WAIT).await.unwrap();

        assert_eq!(store.state(|m| m.reading).await, 4);
        assert_eq!(store.revision(), 2);
    }

    #[tokio::test]
    async fn delayed_action_waits_for_its_duration() {
        let store = meter();
        let mut handle = store
            .send(MeterAction::AddAfter(Duration::from_millis(20), 1))
            .await
            .unwrap();
        assert_eq!(handle.pending(), 1);
        assert_eq!(store.state(|m| m.reading).await, 0);

        handle.wait_with_timeout(WAIT).await.unwrap();
        assert_eq!(store.state(|m| m.reading).await, 1);
    }

    #[tokio::test]
    async fn parallel_effects_are_tracked_individually() {
        let store = meter();
        let mut handle = store.send(MeterAction::AddEach(vec![1, 2, 3])).await.unwrap();
        assert_eq!(handle.pending(), 3);

        handle.wait_with_timeout(WAIT).await.unwrap();
        assert_eq!(store.state(|m| m.reading).await, 6);
    }

    #[tokio::test]
    async fn sequential_effects_run_in_order() {
        let store = meter();
        let mut handle = store.send(MeterAction::AddInTurn(vec![3, 1, 2])).await.unwrap();
        handle.wait_with_timeout(WAIT).await.unwrap();

        assert_eq!(store.state(|m| m.log.clone()).await, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn revision_receiver_sees_reductions() {
        let store = meter();
        let mut revisions = store.subscribe_revisions();

        store.send(MeterAction::Add(1)).await.unwrap();
        revisions.changed().await.unwrap();
        assert_eq!(*revisions.borrow_and_update(), 1);
    }

    #[tokio::test]
    async fn published_actions_are_already_applied() {
        let store = meter();
        let mut observed = store.subscribe_actions();

        store.send(MeterAction::AddAsync(7)).await.unwrap();
        let action = observed.recv().await.unwrap();

        assert!(matches!(action, MeterAction::Add(7)));
        assert_eq!(store.state(|m| m.reading).await, 7);
    }

    #[tokio::test]
    async fn shutdown_rejects_new_actions() {
        let store = meter();
        store.shutdown(WAIT).await.unwrap();

        assert!(store.is_shutting_down());
        assert_eq!(
            store.send(MeterAction::Add(1)).await.unwrap_err(),
            StoreError::ShutdownInProgress
        );
        assert_eq!(store.revision(), 0);
    }

    #[tokio::test]
    async fn shutdown_reports_stragglers() {
        let store = meter();
        store.send(MeterAction::Stall(Duration::from_millis(300))).await.unwrap();

        let result = store.shutdown(Duration::from_millis(20)).await;
        assert_eq!(result, Err(StoreError::ShutdownTimeout(1)));
    }

    #[tokio::test]
    async fn completed_handle_never_waits() {
        let mut handle = EffectHandle::completed();
        handle.wait_with_timeout(Duration::from_millis(10)).await.unwrap();
        assert_eq!(handle.pending(), 0);
    }

    #[test]
    fn zero_broadcast_capacity_is_bumped() {
        let config = StoreConfig::default()
            .with_broadcast_capacity(0)
            .with_shutdown_timeout(Duration::from_secs(1));
        assert_eq!(config.broadcast_capacity, 1);
        assert_eq!(config.default_shutdown_timeout, Duration::from_secs(1));
    }
}
