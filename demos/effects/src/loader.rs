//! Resource loading behind a trait.
//!
//! The reducer only ever sees [`ResourceLoader`]; the binary and the tests
//! plug in a [`CatalogLoader`] that serves canned JSON from memory.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Kinds of resource the app can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// Blog posts
    Posts,
    /// User accounts
    Users,
    /// Post comments
    Comments,
}

impl ResourceType {
    /// Every resource type, in button order
    pub const ALL: [Self; 3] = [Self::Posts, Self::Users, Self::Comments];

    /// Lowercase name, as used in paths
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Users => "users",
            Self::Comments => "comments",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from loading a resource
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceError {
    /// The loader has nothing for this resource type
    #[error("no {0} available")]
    NotFound(ResourceType),

    /// The source could not be reached or answered with garbage
    #[error("{resource} unavailable: {reason}")]
    Unavailable {
        /// What was requested
        resource: ResourceType,
        /// What went wrong
        reason: String,
    },
}

/// Source of resource items
///
/// Returns a boxed future so the loader can live behind
/// `Arc<dyn ResourceLoader>` in an environment.
pub trait ResourceLoader: Send + Sync {
    /// Loads every item of `resource`
    ///
    /// # Errors
    ///
    /// Returns a [`ResourceError`] if the items cannot be produced.
    fn load(
        &self,
        resource: ResourceType,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Value>, ResourceError>> + Send + '_>>;
}

/// In-memory loader with optional latency
#[derive(Debug, Default)]
pub struct CatalogLoader {
    catalog: HashMap<ResourceType, Vec<Value>>,
    latency: Duration,
    loads: AtomicUsize,
}

impl CatalogLoader {
    /// Loader with no entries
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loader with a few items of every resource type
    #[must_use]
    pub fn sample() -> Self {
        Self::empty()
            .with(
                ResourceType::Posts,
                vec![
                    json!({ "id": 1, "userId": 1, "title": "sunt aut facere" }),
                    json!({ "id": 2, "userId": 1, "title": "qui est esse" }),
                ],
            )
            .with(
                ResourceType::Users,
                vec![
                    json!({ "id": 1, "name": "Leanne Graham", "username": "Bret" }),
                    json!({ "id": 2, "name": "Ervin Howell", "username": "Antonette" }),
                ],
            )
            .with(
                ResourceType::Comments,
                vec![json!({ "id": 1, "postId": 1, "name": "id labore ex et quam laborum" })],
            )
    }

    /// Adds or replaces the items of `resource`
    #[must_use]
    pub fn with(mut self, resource: ResourceType, items: Vec<Value>) -> Self {
        self.catalog.insert(resource, items);
        self
    }

    /// Delays every load by `latency`
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of loads started so far
    #[must_use]
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ResourceLoader for CatalogLoader {
    fn load(
        &self,
        resource: ResourceType,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Value>, ResourceError>> + Send + '_>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            tracing::debug!(%resource, "Serving from catalog");
            self.catalog
                .get(&resource)
                .cloned()
                .ok_or(ResourceError::NotFound(resource))
        })
    }
}
