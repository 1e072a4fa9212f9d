//! # Counter Example
//!
//! Three independent counters living in one store:
//!
//! - a plain count whose starting value comes from a lazy initializer that
//!   runs exactly once, updated from its previous value
//! - a panel with `{ count_number, theme }` where incrementing the number
//!   keeps the theme
//! - a classic reducer counter `{ count }` with increment and decrement
//!
//! Each counter has its own reducer; [`counter_reducer`] scopes them onto
//! slices of [`CounterState`] and combines them.
//!
//! ## Example
//!
//! ```no_run
//! use counter::{counter_reducer, count_initial, CounterAction, CounterState, CountAction};
//! use hooks_lab_runtime::Store;
//!
//! # async fn example() {
//! let store = Store::new(CounterState::new(count_initial), counter_reducer(), ());
//!
//! let _ = store.send(CounterAction::Count(CountAction::Increment)).await;
//! assert_eq!(store.state(|s| s.count).await, 5);
//! # }
//! ```

use hooks_lab_core::{
    composition::{combine_reducers, scope_reducer, BoxedReducer, CombinedReducer},
    effect::Effect,
    reducer::Reducer,
    SmallVec,
};
use hooks_lab_macros::Action;
use serde::{Deserialize, Serialize};

/// Starting count used by the binary
///
/// Logs each time it runs, which makes the "runs once" property visible.
#[must_use]
pub fn count_initial() -> i64 {
    tracing::info!("Initial count set to 4");
    4
}

/// Panel state updated as a whole object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelState {
    /// Number shown on the panel
    pub count_number: u32,
    /// Theme label, untouched by increments
    pub theme: String,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            count_number: 0,
            theme: "R".to_string(),
        }
    }
}

/// State of the reducer-driven counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyState {
    /// Current value
    pub count: i64,
}

/// Everything the counter store holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    /// Lazily initialized count
    pub count: i64,
    /// Object-shaped state
    pub panel: PanelState,
    /// Reducer counter
    pub tally: TallyState,
}

impl CounterState {
    /// Builds the initial state, calling `init` once for the starting count
    pub fn new(init: impl FnOnce() -> i64) -> Self {
        Self {
            count: init(),
            panel: PanelState::default(),
            tally: TallyState::default(),
        }
    }
}

/// Functional updates of the lazily initialized count
#[derive(Action, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountAction {
    /// `count = previous + 1`
    Increment,
    /// `count = previous - 1`
    Decrement,
}

/// Updates of the panel object
#[derive(Action, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    /// Bump `count_number`, keep every other field
    IncrementCountNumber,
}

/// Actions of the reducer counter
#[derive(Action, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TallyAction {
    /// Add one
    Increment,
    /// Subtract one
    Decrement,
}

/// Actions for the whole counter store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterAction {
    /// For the lazily initialized count
    Count(CountAction),
    /// For the panel object
    Panel(PanelAction),
    /// For the reducer counter
    Tally(TallyAction),
}

/// Reducer for the lazily initialized count
#[derive(Debug, Clone, Copy, Default)]
pub struct CountReducer;

impl Reducer for CountReducer {
    type State = i64;
    type Action = CountAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let update: fn(i64) -> i64 = match action {
            CountAction::Increment => |previous| previous + 1,
            CountAction::Decrement => |previous| previous - 1,
        };
        *state = update(*state);
        tracing::debug!(kind = action.kind(), count = *state, "Count updated");
        SmallVec::new()
    }
}

/// Reducer for the panel object
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelReducer;

impl Reducer for PanelReducer {
    type State = PanelState;
    type Action = PanelAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            PanelAction::IncrementCountNumber => {
                *state = PanelState {
                    count_number: state.count_number + 1,
                    ..state.clone()
                };
            },
        }
        SmallVec::new()
    }
}

/// Reducer for the reducer counter
#[derive(Debug, Clone, Copy, Default)]
pub struct TallyReducer;

impl Reducer for TallyReducer {
    type State = TallyState;
    type Action = TallyAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        state.count += match action {
            TallyAction::Increment => 1,
            TallyAction::Decrement => -1,
        };
        SmallVec::new()
    }
}

/// Reducer over the whole [`CounterState`]
pub type CounterReducer = CombinedReducer<CounterState, CounterAction, ()>;

/// Scopes the three counter reducers onto their slices and combines them
#[must_use]
pub fn counter_reducer() -> CounterReducer {
    let reducers: Vec<BoxedReducer<CounterState, CounterAction, ()>> = vec![
        Box::new(scope_reducer(
            CountReducer,
            |s: &CounterState| &s.count,
            |s: &mut CounterState, count| s.count = count,
            |a: CounterAction| match a {
                CounterAction::Count(inner) => Some(inner),
                _ => None,
            },
            CounterAction::Count,
        )),
        Box::new(scope_reducer(
            PanelReducer,
            |s: &CounterState| &s.panel,
            |s: &mut CounterState, panel| s.panel = panel,
            |a: CounterAction| match a {
                CounterAction::Panel(inner) => Some(inner),
                _ => None,
            },
            CounterAction::Panel,
        )),
        Box::new(scope_reducer(
            TallyReducer,
            |s: &CounterState| &s.tally,
            |s: &mut CounterState, tally| s.tally = tally,
            |a: CounterAction| match a {
                CounterAction::Tally(inner) => Some(inner),
                _ => None,
            },
            CounterAction::Tally,
        )),
    ];
    combine_reducers(reducers)
}
