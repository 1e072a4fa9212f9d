//! # Refs Example
//!
//! The store holds a name. The view keeps three refs beside it:
//!
//! - the name before its latest change ([`PreviousValue`])
//! - how many times it has rendered (a [`Ref`] counter)
//! - the text input element, so a button can focus it ([`ElementRef`])
//!
//! None of them go through the store. Writing to them never dispatches an
//! action and never causes another render.

use hooks_lab_core::{
    effect::Effect,
    reducer::Reducer,
    refs::{PreviousValue, Ref},
    SmallVec,
};
use hooks_lab_macros::Action;

/// Store state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameState {
    /// Text in the input
    pub name: String,
}

/// Changes to [`NameState`]
#[derive(Action, Debug, Clone, PartialEq, Eq)]
pub enum NameAction {
    /// The user typed; carries the whole new text
    SetName(String),
}

/// Reducer for [`NameState`]
#[derive(Debug, Clone, Copy, Default)]
pub struct NameReducer;

impl Reducer for NameReducer {
    type State = NameState;
    type Action = NameAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            NameAction::SetName(name) => state.name = name,
        }
        SmallVec::new()
    }
}

/// A text input element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    /// Hint shown while empty
    pub placeholder: String,
    /// Whether the input has keyboard focus
    pub focused: bool,
}

impl TextInput {
    /// Unfocused input with a placeholder
    #[must_use]
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            focused: false,
        }
    }

    /// Gives the input focus
    pub fn focus(&mut self) {
        self.focused = true;
    }
}

/// Handle to an element that exists only while mounted
pub type ElementRef<T> = Ref<Option<T>>;

/// Focuses the input behind `input`
///
/// Returns `false` when nothing is mounted.
pub fn focus_input(input: &ElementRef<TextInput>) -> bool {
    input.with_mut(|element| match element {
        Some(element) => {
            element.focus();
            true
        },
        None => false,
    })
}

/// Name view with its refs
#[derive(Debug)]
pub struct NameView {
    previous: PreviousValue<String>,
    render_count: Ref<u64>,
    input: ElementRef<TextInput>,
}

impl Default for NameView {
    fn default() -> Self {
        Self::new()
    }
}

impl NameView {
    /// View with nothing mounted
    #[must_use]
    pub fn new() -> Self {
        Self {
            previous: PreviousValue::new(String::new()),
            render_count: Ref::new(0),
            input: Ref::new(None),
        }
    }

    /// Creates the input element
    pub fn mount(&self) {
        self.input
            .replace(Some(TextInput::new("Type anything to rerender the component")));
    }

    /// Removes the input element
    pub fn unmount(&self) {
        self.input.replace(None);
    }

    /// Handle to the input element, for a focus button
    #[must_use]
    pub fn input_ref(&self) -> ElementRef<TextInput> {
        self.input.clone()
    }

    /// Handle to the render counter
    #[must_use]
    pub fn render_count_ref(&self) -> Ref<u64> {
        self.render_count.clone()
    }

    /// Renders the heading for `state`
    pub fn render(&mut self, state: &NameState) -> String {
        let renders = self.render_count.with_mut(|count| {
            *count += 1;
            *count
        });
        self.previous.commit(&state.name);
        tracing::debug!(renders, "Rendered name view");

        format!(
            "My name is {} and it was {} before",
            state.name,
            self.previous.previous()
        )
    }

    /// Times rendered so far
    #[must_use]
    pub fn renders(&self) -> u64 {
        self.render_count.get()
    }
}
