//! # Memoized Callback Example
//!
//! The app hands a `get_items` callback to an [`ItemList`]. The list only
//! re-derives its items when it receives a callback with a different
//! identity. Memoizing the callback on `number` means toggling the theme
//! passes the same callback again and the list stays put.

use hooks_lab_core::{
    effect::Effect,
    memo::{Callback, CallbackMemo},
    reducer::Reducer,
    SmallVec,
};
use hooks_lab_macros::Action;

/// Callback from an incrementor to the list items
pub type GetItems = Callback<i64, Vec<i64>>;

/// Inputs owned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackState {
    /// Base number of the list
    pub number: i64,
    /// Dark theme selected
    pub dark: bool,
}

impl Default for CallbackState {
    fn default() -> Self {
        Self {
            number: 1,
            dark: false,
        }
    }
}

/// Changes to [`CallbackState`]
#[derive(Action, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    /// Replace the base number
    SetNumber(i64),
    /// Flip the theme
    ToggleTheme,
}

/// Reducer for [`CallbackState`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CallbackReducer;

impl Reducer for CallbackReducer {
    type State = CallbackState;
    type Action = CallbackAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CallbackAction::SetNumber(number) => state.number = number,
            CallbackAction::ToggleTheme => state.dark = !state.dark,
        }
        SmallVec::new()
    }
}

/// `[n + i, n + 1 + i, n + 2 + i]`, saturating at the `i64` bounds
#[must_use]
pub fn items_for(number: i64, incrementor: i64) -> Vec<i64> {
    (0..3)
        .map(|offset| number.saturating_add(offset).saturating_add(incrementor))
        .collect()
}

/// App colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppTheme {
    /// Background color
    pub background_color: &'static str,
    /// Text color
    pub color: &'static str,
}

impl AppTheme {
    /// Colors for the dark or light theme
    #[must_use]
    pub const fn for_theme(dark: bool) -> Self {
        if dark {
            Self {
                background_color: "#333",
                color: "#FFF",
            }
        } else {
            Self {
                background_color: "#FFF",
                color: "#333",
            }
        }
    }
}

/// List that derives its items from the callback it is given
#[derive(Debug, Default)]
pub struct ItemList {
    source: Option<GetItems>,
    items: Vec<i64>,
    updates: u64,
}

impl ItemList {
    /// List with no items yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders with `get_items`, re-deriving only for a new callback
    pub fn render(&mut self, get_items: &GetItems) -> &[i64] {
        let unchanged = self
            .source
            .as_ref()
            .is_some_and(|source| source.same_as(get_items));

        if !unchanged {
            self.items = get_items.call(1);
            self.source = Some(get_items.clone());
            self.updates += 1;
            tracing::info!(items = ?self.items, "Updating items");
        }
        &self.items
    }

    /// How many times the items were re-derived
    #[must_use]
    pub const fn updates(&self) -> u64 {
        self.updates
    }
}

/// Parent component: memoizes the callback and renders the list
#[derive(Debug, Default)]
pub struct CallbackApp {
    get_items: CallbackMemo<i64, i64, Vec<i64>>,
    list: ItemList,
}

/// One rendered frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppFrame {
    /// App colors
    pub theme: AppTheme,
    /// Items shown by the list
    pub items: Vec<i64>,
}

impl CallbackApp {
    /// App that has not rendered yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The callback for `number`, the same one as last time if `number` is unchanged
    pub fn get_items(&mut self, number: i64) -> GetItems {
        self.get_items
            .get_or_compute(number, |number| {
                let number = *number;
                Callback::new(move |incrementor| items_for(number, incrementor))
            })
            .clone()
    }

    /// Renders the app for `state`
    pub fn render(&mut self, state: &CallbackState) -> AppFrame {
        let get_items = self.get_items(state.number);
        let items = self.list.render(&get_items).to_vec();
        AppFrame {
            theme: AppTheme::for_theme(state.dark),
            items,
        }
    }

    /// How many times the list re-derived its items
    #[must_use]
    pub const fn list_updates(&self) -> u64 {
        self.list.updates()
    }
}
