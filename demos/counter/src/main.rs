//! Counter example binary
//!
//! Walks through the three counters held by one store.

use counter::{
    count_initial, counter_reducer, CountAction, CounterAction, CounterState, PanelAction,
    TallyAction,
};
use hooks_lab_runtime::Store;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "counter=debug,hooks_lab_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Counter Example ===\n");

    // count_initial runs here and never again
    let store = Store::new(CounterState::new(count_initial), counter_reducer(), ());

    let count = store.state(|s| s.count).await;
    println!("Initial count: {count}");

    for action in [CountAction::Increment, CountAction::Increment, CountAction::Decrement] {
        println!("\n>>> Sending: {}", action.kind());
        store.send(CounterAction::Count(action)).await?;
        let count = store.state(|s| s.count).await;
        println!("Count: {count}");
    }

    println!("\n>>> Sending: {}", PanelAction::IncrementCountNumber.kind());
    store
        .send(CounterAction::Panel(PanelAction::IncrementCountNumber))
        .await?;
    let panel = store.state(|s| s.panel.clone()).await;
    println!("Theme: {} Count: {}", panel.theme, panel.count_number);

    for action in [TallyAction::Increment, TallyAction::Increment, TallyAction::Decrement] {
        store.send(CounterAction::Tally(action)).await?;
    }
    let tally = store.state(|s| s.tally.count).await;
    println!("\nReducer counter: {tally}");

    store.shutdown_with_default().await?;
    Ok(())
}
