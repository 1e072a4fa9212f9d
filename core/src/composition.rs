//! Building one store reducer out of several small ones
//!
//! A page with independent widgets keeps one state struct with a field per
//! widget and one action enum with a variant per widget. Each widget keeps
//! its own reducer over its own slice; [`scope_reducer`] lifts it to the
//! page types and [`combine_reducers`] runs the lifted reducers together.
//!
//! ```
//! use hooks_lab_core::composition::{combine_reducers, scope_reducer, BoxedReducer};
//! use hooks_lab_core::{Effect, Reducer, SmallVec};
//!
//! #[derive(Clone, Default)]
//! struct Clicks(u32);
//!
//! #[derive(Clone)]
//! struct Click;
//!
//! struct ClickReducer;
//!
//! impl Reducer for ClickReducer {
//!     type State = Clicks;
//!     type Action = Click;
//!     type Environment = ();
//!
//!     fn reduce(&self, clicks: &mut Clicks, _: Click, _: &()) -> SmallVec<[Effect<Click>; 4]> {
//!         clicks.0 += 1;
//!         SmallVec::new()
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Page {
//!     left: Clicks,
//!     right: Clicks,
//! }
//!
//! #[derive(Clone)]
//! enum PageAction {
//!     Left(Click),
//!     Right(Click),
//! }
//!
//! let widgets: Vec<BoxedReducer<Page, PageAction, ()>> = vec![
//!     Box::new(scope_reducer(
//!         ClickReducer,
//!         |page: &Page| &page.left,
//!         |page: &mut Page, left| page.left = left,
//!         |action| match action {
//!             PageAction::Left(click) => Some(click),
//!             PageAction::Right(_) => None,
//!         },
//!         PageAction::Left,
//!     )),
//!     Box::new(scope_reducer(
//!         ClickReducer,
//!         |page: &Page| &page.right,
//!         |page: &mut Page, right| page.right = right,
//!         |action| match action {
//!             PageAction::Right(click) => Some(click),
//!             PageAction::Left(_) => None,
//!         },
//!         PageAction::Right,
//!     )),
//! ];
//! let page_reducer = combine_reducers(widgets);
//!
//! let mut page = Page::default();
//! page_reducer.reduce(&mut page, PageAction::Right(Click), &());
//! page_reducer.reduce(&mut page, PageAction::Right(Click), &());
//! assert_eq!((page.left.0, page.right.0), (0, 2));
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;
use std::marker::PhantomData;
use std::sync::Arc;

/// Type-erased reducer, as held by [`CombinedReducer`]
pub type BoxedReducer<S, A, E> =
    Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>;

/// Runs every reducer in `reducers` on each action, in list order
///
/// Each reducer sees the state as left by the one before it. Effects are
/// concatenated in the same order.
#[must_use]
pub fn combine_reducers<S, A, E>(reducers: Vec<BoxedReducer<S, A, E>>) -> CombinedReducer<S, A, E>
where
    A: Clone,
{
    CombinedReducer {
        reducers: reducers.into(),
    }
}

/// Reducer returned by [`combine_reducers`]
///
/// Clones share the reducer list.
pub struct CombinedReducer<S, A, E> {
    reducers: Arc<[BoxedReducer<S, A, E>]>,
}

impl<S, A, E> CombinedReducer<S, A, E> {
    /// Number of combined reducers
    #[must_use]
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    /// Whether nothing was combined
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S, A, E> Clone for CombinedReducer<S, A, E> {
    fn clone(&self) -> Self {
        Self {
            reducers: Arc::clone(&self.reducers),
        }
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    A: Clone,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(&self, state: &mut S, action: A, env: &E) -> SmallVec<[Effect<A>; 4]> {
        self.reducers
            .iter()
            .flat_map(|reducer| reducer.reduce(state, action.clone(), env))
            .collect()
    }
}

/// Lifts a reducer over `SubS`/`SubA` to one over `S`/`A`
///
/// `extract` picks the child's action out of a parent action; parent
/// actions it maps to `None` leave the state untouched and produce no
/// effects. `embed` wraps actions coming back from the child's effects.
/// The child works on a clone of its slice, written back with `set_state`
/// after it returns.
pub fn scope_reducer<S, SubS, A, SubA, E, R>(
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
    extract: fn(A) -> Option<SubA>,
    embed: fn(SubA) -> A,
) -> ScopedReducer<S, SubS, A, SubA, E, R>
where
    SubS: Clone,
    R: Reducer<State = SubS, Action = SubA, Environment = E>,
{
    ScopedReducer {
        reducer,
        get_state,
        set_state,
        extract,
        embed,
        _environment: PhantomData,
    }
}

/// Reducer returned by [`scope_reducer`]
pub struct ScopedReducer<S, SubS, A, SubA, E, R> {
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
    extract: fn(A) -> Option<SubA>,
    embed: fn(SubA) -> A,
    _environment: PhantomData<fn(&E)>,
}

impl<S, SubS, A, SubA, E, R: Clone> Clone for ScopedReducer<S, SubS, A, SubA, E, R> {
    fn clone(&self) -> Self {
        Self {
            reducer: self.reducer.clone(),
            get_state: self.get_state,
            set_state: self.set_state,
            extract: self.extract,
            embed: self.embed,
            _environment: PhantomData,
        }
    }
}

impl<S, SubS, A, SubA, E, R> Reducer for ScopedReducer<S, SubS, A, SubA, E, R>
where
    SubS: Clone,
    A: Send + 'static,
    SubA: Send + 'static,
    R: Reducer<State = SubS, Action = SubA, Environment = E>,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(&self, state: &mut S, action: A, env: &E) -> SmallVec<[Effect<A>; 4]> {
        let Some(child_action) = (self.extract)(action) else {
            return SmallVec::new();
        };

        let mut slice = (self.get_state)(state).clone();
        let effects = self.reducer.reduce(&mut slice, child_action, env);
        (self.set_state)(state, slice);

        effects.into_iter().map(|effect| effect.map(self.embed)).collect()
    }
}
