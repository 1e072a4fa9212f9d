//! Refs example binary

use hooks_lab_runtime::Store;
use refs::{focus_input, NameAction, NameReducer, NameState, NameView};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "refs=debug,hooks_lab_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Refs Example ===\n");

    let store = Store::new(NameState::default(), NameReducer, ());
    let mut view = NameView::new();
    view.mount();

    // Typing one key at a time
    let mut typed = String::new();
    for ch in "Kyle".chars() {
        typed.push(ch);
        store.send(NameAction::SetName(typed.clone())).await?;
        let state = store.state(Clone::clone).await;
        println!("{}", view.render(&state));
    }

    let before = store.revision();
    println!("\n>>> Focus");
    let focused = focus_input(&view.input_ref());
    println!("Input focused: {focused}");
    println!(
        "Store revision unchanged: {} (rendered {} times)",
        store.revision() == before,
        view.renders()
    );
    Ok(())
}
