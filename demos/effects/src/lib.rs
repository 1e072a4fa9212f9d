//! # Effects Example
//!
//! Side effects tied to what changed. Picking a resource type loads its
//! items through an injected [`ResourceLoader`], but only when the type is
//! different from the one already selected. A [`ResizeListener`] keeps the
//! store's window width current and stops forwarding once dropped.

pub mod loader;
pub mod reducer;
pub mod window;

pub use loader::{CatalogLoader, ResourceError, ResourceLoader, ResourceType};
pub use reducer::{
    EffectsAction, EffectsEnvironment, EffectsReducer, EffectsState, DEFAULT_WINDOW_WIDTH,
};
pub use window::{EffectsStore, ResizeListener, Window};

/// One line per item: its `title`, else its `name`, else the raw JSON
#[must_use]
pub fn render_items(state: &EffectsState) -> Vec<String> {
    state
        .items
        .iter()
        .map(|item| {
            item.get("title")
                .or_else(|| item.get("name"))
                .and_then(serde_json::Value::as_str)
                .map_or_else(|| item.to_string(), str::to_string)
        })
        .collect()
}
