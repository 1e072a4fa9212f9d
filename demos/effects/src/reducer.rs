//! State, actions and the reducer that decides when to load

use crate::loader::{ResourceError, ResourceLoader, ResourceType};
use hooks_lab_core::{
    async_effect,
    effect::Effect,
    environment::{Clock, SystemClock},
    reducer::Reducer,
    smallvec, DateTime, SmallVec, Utc,
};
use hooks_lab_macros::Action;
use serde_json::Value;
use std::sync::Arc;

/// Window width assumed before the first resize
pub const DEFAULT_WINDOW_WIDTH: u32 = 1024;

/// Dependencies of [`EffectsReducer`]
#[derive(Clone)]
pub struct EffectsEnvironment {
    /// Where resource items come from
    pub loader: Arc<dyn ResourceLoader>,
    /// Stamps finished loads
    pub clock: Arc<dyn Clock>,
}

impl EffectsEnvironment {
    /// Environment around `loader`, on wall-clock time
    #[must_use]
    pub fn new(loader: Arc<dyn ResourceLoader>) -> Self {
        Self::with_clock(loader, Arc::new(SystemClock))
    }

    /// Environment around `loader` and `clock`
    #[must_use]
    pub fn with_clock(loader: Arc<dyn ResourceLoader>, clock: Arc<dyn Clock>) -> Self {
        Self { loader, clock }
    }
}

/// Everything the page shows
#[derive(Debug, Clone, PartialEq)]
pub struct EffectsState {
    /// Selected resource type
    pub resource_type: ResourceType,
    /// Items of the selected type, once loaded
    pub items: Vec<Value>,
    /// Last known window width
    pub window_width: u32,
    /// Resource type with a load in flight
    pub loading: Option<ResourceType>,
    /// When the shown items arrived
    pub loaded_at: Option<DateTime<Utc>>,
    /// Why the last load failed
    pub last_error: Option<ResourceError>,
}

impl EffectsState {
    /// Posts selected, nothing loaded yet
    #[must_use]
    pub const fn new(window_width: u32) -> Self {
        Self {
            resource_type: ResourceType::Posts,
            items: Vec::new(),
            window_width,
            loading: None,
            loaded_at: None,
            last_error: None,
        }
    }
}

impl Default for EffectsState {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_WIDTH)
    }
}

/// Changes to [`EffectsState`]
#[derive(Action, Debug, Clone, PartialEq)]
pub enum EffectsAction {
    /// First render: load whatever is selected
    Mount,
    /// User picked a resource type
    SelectResource(ResourceType),
    /// Load finished
    Loaded {
        /// Type that was requested
        resource_type: ResourceType,
        /// Items returned by the loader
        items: Vec<Value>,
    },
    /// Load failed
    LoadFailed {
        /// Type that was requested
        resource_type: ResourceType,
        /// What the loader reported
        error: ResourceError,
    },
    /// Window width changed
    WindowResized(u32),
}

/// Reducer for [`EffectsState`]
///
/// A load is issued only when the selected type actually changes, so
/// re-selecting the current type is free. Responses for a type that is no
/// longer selected are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct EffectsReducer;

impl EffectsReducer {
    fn load(
        state: &mut EffectsState,
        resource_type: ResourceType,
        env: &EffectsEnvironment,
    ) -> Effect<EffectsAction> {
        state.loading = Some(resource_type);
        let loader = Arc::clone(&env.loader);
        tracing::debug!(%resource_type, "Issuing load");

        async_effect! {
            match loader.load(resource_type).await {
                Ok(items) => Some(EffectsAction::Loaded { resource_type, items }),
                Err(error) => Some(EffectsAction::LoadFailed { resource_type, error }),
            }
        }
    }
}

impl Reducer for EffectsReducer {
    type State = EffectsState;
    type Action = EffectsAction;
    type Environment = EffectsEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            EffectsAction::Mount => {
                let resource_type = state.resource_type;
                smallvec![Self::load(state, resource_type, env)]
            },

            EffectsAction::SelectResource(resource_type) => {
                if resource_type == state.resource_type {
                    return SmallVec::new();
                }
                state.resource_type = resource_type;
                state.items.clear();
                state.loaded_at = None;
                state.last_error = None;
                smallvec![Self::load(state, resource_type, env)]
            },

            EffectsAction::Loaded {
                resource_type,
                items,
            } => {
                if resource_type != state.resource_type {
                    tracing::debug!(%resource_type, "Ignoring stale response");
                    return SmallVec::new();
                }
                state.items = items;
                state.loading = None;
                state.loaded_at = Some(env.clock.now());
                state.last_error = None;
                SmallVec::new()
            },

            EffectsAction::LoadFailed {
                resource_type,
                error,
            } => {
                if resource_type != state.resource_type {
                    return SmallVec::new();
                }
                tracing::warn!(%resource_type, %error, "Load failed");
                state.loading = None;
                state.last_error = Some(error);
                SmallVec::new()
            },

            EffectsAction::WindowResized(width) => {
                state.window_width = width;
                SmallVec::new()
            },
        }
    }
}
