//! Effects example binary

use effects::{
    render_items, CatalogLoader, EffectsAction, EffectsEnvironment, EffectsReducer,
    EffectsState, EffectsStore, ResizeListener, ResourceLoader, ResourceType, Window,
};
use hooks_lab_runtime::StoreError;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const WAIT: Duration = Duration::from_secs(2);

async fn show(store: &EffectsStore) {
    let state = store.state(Clone::clone).await;
    println!(
        "[{}] width={} items={}",
        state.resource_type,
        state.window_width,
        state.items.len()
    );
    if let Some(at) = state.loaded_at {
        println!("  loaded at {}", at.format("%H:%M:%S%.3f"));
    }
    for line in render_items(&state) {
        println!("  {line}");
    }
}

async fn dispatch(store: &EffectsStore, action: EffectsAction) -> Result<(), StoreError> {
    let mut handle = store.send(action).await?;
    handle.wait_with_timeout(WAIT).await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "effects=debug,hooks_lab_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Effects Example ===\n");

    let loader = Arc::new(CatalogLoader::sample().with_latency(Duration::from_millis(50)));
    let window = Window::new(1280);
    let store = EffectsStore::new(
        EffectsState::new(window.inner_width()),
        EffectsReducer,
        EffectsEnvironment::new(Arc::clone(&loader) as Arc<dyn ResourceLoader>),
    );

    dispatch(&store, EffectsAction::Mount).await?;
    show(&store).await;

    for resource_type in [ResourceType::Users, ResourceType::Comments] {
        println!("\n>>> Select {resource_type}");
        dispatch(&store, EffectsAction::SelectResource(resource_type)).await?;
        show(&store).await;
    }

    println!("\n>>> Select comments again");
    store.send(EffectsAction::SelectResource(ResourceType::Comments)).await?;
    println!("Loads so far: {}", loader.loads());

    println!("\n>>> Resize with listener attached");
    let listener = ResizeListener::attach(&window, store.clone());
    let mut revisions = store.subscribe_revisions();
    window.resize(800);
    revisions.changed().await?;
    show(&store).await;

    drop(listener);
    while window.listener_count() > 0 {
        tokio::task::yield_now().await;
    }
    window.resize(400);
    println!("\n>>> Resized to 400 after detaching");
    show(&store).await;

    store.shutdown_with_default().await?;
    Ok(())
}
