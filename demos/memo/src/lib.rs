//! # Memo Example
//!
//! The store holds a number and a theme flag. The view derives two things
//! from them: the number doubled by a deliberately slow function, and a
//! style object for the theme. Each derivation is memoized on exactly the
//! input it reads, so flipping the theme never re-runs the slow doubling
//! and typing a number never rebuilds the styles.

use hooks_lab_core::{effect::Effect, memo::Memo, reducer::Reducer, SmallVec};
use hooks_lab_macros::Action;

/// Iterations of busy work per doubling
pub const DEFAULT_WORK: u64 = 50_000_000;

/// Doubles `n` after spinning for `work` iterations
///
/// Saturates at the `i64` bounds.
#[must_use]
pub fn slow_double(n: i64, work: u64) -> i64 {
    tracing::info!(n, "Calling slow function");
    let mut spin = 0_u64;
    for i in 0..work {
        spin = std::hint::black_box(spin.wrapping_add(i));
    }
    std::hint::black_box(spin);
    n.saturating_mul(2)
}

/// Inputs owned by the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoState {
    /// Number typed by the user
    pub number: i64,
    /// Dark theme selected
    pub dark: bool,
}

/// Changes to [`MemoState`]
#[derive(Action, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoAction {
    /// Replace the number
    SetNumber(i64),
    /// Flip the theme
    ToggleTheme,
}

/// Reducer for [`MemoState`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoReducer;

impl Reducer for MemoReducer {
    type State = MemoState;
    type Action = MemoAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            MemoAction::SetNumber(number) => state.number = number,
            MemoAction::ToggleTheme => state.dark = !state.dark,
        }
        SmallVec::new()
    }
}

/// Colors of the result panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelStyles {
    /// Background color
    pub background_color: &'static str,
    /// Text color
    pub color: &'static str,
}

impl PanelStyles {
    /// Black on white, or white on black
    #[must_use]
    pub const fn for_theme(dark: bool) -> Self {
        if dark {
            Self {
                background_color: "black",
                color: "white",
            }
        } else {
            Self {
                background_color: "white",
                color: "black",
            }
        }
    }
}

/// One rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoFrame {
    /// The doubled number
    pub doubled: i64,
    /// Styles for the current theme
    pub styles: PanelStyles,
}

/// View with one memo per derived value
#[derive(Debug)]
pub struct MemoView {
    work: u64,
    doubled: Memo<i64, i64>,
    styles: Memo<bool, PanelStyles>,
}

impl Default for MemoView {
    fn default() -> Self {
        Self::new(DEFAULT_WORK)
    }
}

impl MemoView {
    /// View whose doubling spins `work` iterations
    #[must_use]
    pub const fn new(work: u64) -> Self {
        Self {
            work,
            doubled: Memo::new(),
            styles: Memo::new(),
        }
    }

    /// Derives the frame for `state`
    pub fn render(&mut self, state: &MemoState) -> MemoFrame {
        let work = self.work;
        let doubled = *self
            .doubled
            .get_or_compute(state.number, |n| slow_double(*n, work));
        let styles = *self.styles.get_or_compute(state.dark, |dark| {
            tracing::debug!(dark, "Theme changed");
            PanelStyles::for_theme(*dark)
        });
        MemoFrame { doubled, styles }
    }

    /// How many times the slow doubling ran
    #[must_use]
    pub const fn doublings(&self) -> u64 {
        self.doubled.computations()
    }

    /// How many times the styles were rebuilt
    #[must_use]
    pub const fn style_builds(&self) -> u64 {
        self.styles.computations()
    }
}
