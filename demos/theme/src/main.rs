//! Theme context example binary
//!
//! A panel task redraws whenever the button flips the theme.

use theme::{ThemePanel, ThemeProvider};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "theme=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Theme Context Example ===\n");

    let provider = ThemeProvider::new();
    let mut panel = ThemePanel::new(provider.use_theme());
    println!("Initial: {}", serde_json::to_string(&panel.render())?);

    let watcher = tokio::spawn(async move {
        while let Some(styles) = panel.next_render().await {
            match serde_json::to_string(&styles) {
                Ok(css) => println!("Panel redrawn: {css}"),
                Err(error) => tracing::warn!(%error, "Could not encode styles"),
            }
        }
        panel.render_count()
    });

    let button = provider.use_update_theme();
    for _ in 0..2 {
        println!("\n>>> Toggle Theme");
        button.toggle();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }

    // Closing every writer ends the panel's loop
    drop(button);
    drop(provider);
    let renders = watcher.await?;
    println!("\nPanel rendered {renders} times");
    Ok(())
}
