//! Memoized callback example binary

use callback::{CallbackAction, CallbackApp, CallbackReducer, CallbackState};
use hooks_lab_runtime::Store;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "callback=debug,hooks_lab_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Memoized Callback Example ===\n");

    let store = Store::new(CallbackState::default(), CallbackReducer, ());
    let mut app = CallbackApp::new();

    let frame = app.render(&store.state(|s| *s).await);
    println!("Initial items: {:?}", frame.items);

    for action in [
        CallbackAction::ToggleTheme,
        CallbackAction::SetNumber(5),
        CallbackAction::ToggleTheme,
        CallbackAction::SetNumber(5),
    ] {
        store.send(action).await?;
        let frame = app.render(&store.state(|s| *s).await);
        println!(
            ">>> {:<12} items {:?} on {}",
            action.kind(),
            frame.items,
            frame.theme.background_color
        );
    }

    println!("\nList updated {} times", app.list_updates());
    Ok(())
}
