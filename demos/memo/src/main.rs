//! Memo example binary

use hooks_lab_runtime::Store;
use memo::{MemoAction, MemoReducer, MemoState, MemoView};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memo=debug,hooks_lab_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Memo Example ===\n");

    let store = Store::new(MemoState::default(), MemoReducer, ());
    let mut view = MemoView::default();

    let actions = [
        MemoAction::SetNumber(3),
        MemoAction::ToggleTheme,
        MemoAction::ToggleTheme,
        MemoAction::SetNumber(3),
        MemoAction::SetNumber(10),
    ];

    for action in actions {
        println!(">>> {}", action.kind());
        store.send(action).await?;
        let state = store.state(|s| *s).await;
        let start = std::time::Instant::now();
        let frame = view.render(&state);
        println!(
            "    {} on {} ({:?})",
            frame.doubled,
            frame.styles.background_color,
            start.elapsed()
        );
    }

    println!(
        "\nSlow doubling ran {} times, styles built {} times",
        view.doublings(),
        view.style_builds()
    );
    Ok(())
}
