//! Loading and resize subscriptions through a real store

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use effects::{
    CatalogLoader, EffectsAction, EffectsEnvironment, EffectsReducer, EffectsState,
    EffectsStore, ResizeListener, ResourceError, ResourceLoader, ResourceType, Window,
};
use hooks_lab_testing::helpers::init_test_tracing;
use std::sync::Arc;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(1);

fn store_with(loader: &Arc<CatalogLoader>) -> EffectsStore {
    EffectsStore::new(
        EffectsState::default(),
        EffectsReducer,
        EffectsEnvironment::new(Arc::clone(loader) as Arc<dyn ResourceLoader>),
    )
}

async fn dispatch(store: &EffectsStore, action: EffectsAction) {
    let mut handle = store.send(action).await.unwrap();
    handle.wait_with_timeout(WAIT).await.unwrap();
}

#[tokio::test]
async fn mount_loads_posts() {
    let loader = Arc::new(CatalogLoader::sample());
    let store = store_with(&loader);

    let result = store
        .send_and_wait_for(
            EffectsAction::Mount,
            |action| matches!(action, EffectsAction::Loaded { .. }),
            WAIT,
        )
        .await
        .unwrap();

    assert!(matches!(
        result,
        EffectsAction::Loaded { resource_type: ResourceType::Posts, ref items } if items.len() == 2
    ));
    assert_eq!(loader.loads(), 1);
}

#[tokio::test]
async fn reselecting_does_not_reload() {
    let loader = Arc::new(CatalogLoader::sample());
    let store = store_with(&loader);

    dispatch(&store, EffectsAction::Mount).await;
    dispatch(&store, EffectsAction::SelectResource(ResourceType::Users)).await;
    dispatch(&store, EffectsAction::SelectResource(ResourceType::Users)).await;
    dispatch(&store, EffectsAction::SelectResource(ResourceType::Users)).await;

    assert_eq!(loader.loads(), 2);
    let state = store.state(Clone::clone).await;
    assert_eq!(state.resource_type, ResourceType::Users);
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.loading, None);
}

#[tokio::test]
async fn failed_load_sets_error() {
    init_test_tracing();
    let loader = Arc::new(CatalogLoader::empty());
    let store = store_with(&loader);

    dispatch(&store, EffectsAction::SelectResource(ResourceType::Comments)).await;

    let state = store.state(Clone::clone).await;
    assert_eq!(
        state.last_error,
        Some(ResourceError::NotFound(ResourceType::Comments))
    );
    assert!(state.items.is_empty());
    assert_eq!(state.loading, None);
}

#[tokio::test]
async fn slow_response_for_old_type_is_dropped() {
    let loader = Arc::new(CatalogLoader::sample().with_latency(Duration::from_millis(50)));
    let store = store_with(&loader);

    let mut first = store.send(EffectsAction::Mount).await.unwrap();
    dispatch(&store, EffectsAction::SelectResource(ResourceType::Comments)).await;
    first.wait_with_timeout(WAIT).await.unwrap();

    let state = store.state(Clone::clone).await;
    assert_eq!(state.resource_type, ResourceType::Comments);
    assert_eq!(state.items.len(), 1);
}

#[tokio::test]
async fn listener_forwards_until_dropped() {
    let store = store_with(&Arc::new(CatalogLoader::sample()));
    let window = Window::new(1024);
    let mut revisions = store.subscribe_revisions();

    let listener = ResizeListener::attach(&window, store.clone());
    assert_eq!(window.listener_count(), 1);

    assert_eq!(window.resize(800), 1);
    tokio::time::timeout(WAIT, revisions.changed())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(store.state(|state| state.window_width).await, 800);

    drop(listener);
    tokio::time::timeout(WAIT, async {
        while window.listener_count() > 0 {
            tokio::task::yield_now().await;
        }
    })
    .await
    .unwrap();

    let revision = store.revision();
    window.resize(320);
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(store.revision(), revision);
    assert_eq!(store.state(|state| state.window_width).await, 800);
    assert_eq!(window.inner_width(), 320);
}

#[tokio::test]
async fn listener_detaches_when_store_shuts_down() {
    let store = store_with(&Arc::new(CatalogLoader::sample()));
    let window = Window::new(1024);
    let listener = ResizeListener::attach(&window, store.clone());

    store.shutdown(WAIT).await.unwrap();
    window.resize(500);

    tokio::time::timeout(WAIT, async {
        while !listener.is_detached() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .unwrap();
}
