//! Command-line walkthrough of the todo list.
//!
//! Without flags, runs a scripted session. With `--interactive`, reads
//! commands from stdin: `add <name>`, `toggle <n>`, `delete <n>`, `list`,
//! `quit` (`n` counts from 1).

use clap::Parser;
use std::io::{self, Write};
use todo::{number_lines, TodoAction, TodoApp, TodoEnvironment};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "todo", about = "Reducer-driven todo list")]
struct Cli {
    /// Read commands from stdin instead of running the scripted session
    #[arg(long)]
    interactive: bool,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo=debug,hooks_lab_runtime=debug".into()),
        )
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    let mut app = TodoApp::new(TodoEnvironment::default());

    if cli.interactive {
        interactive(&mut app).await?;
    } else {
        scripted(&mut app).await?;
    }

    app.store().shutdown_with_default().await?;
    Ok(())
}

async fn scripted(app: &mut TodoApp) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Todo Example ===\n");

    for name in ["Buy milk", "Walk dog", "   "] {
        app.set_text(name);
        if !app.submit().await? {
            info!("Blank entry was not added");
        }
    }
    print_list(app).await;

    if let Some(controls) = app.controls(0).await {
        println!("\nCompleting the first todo...");
        app.dispatch(controls.toggle()).await?;
    }
    if let Some(controls) = app.controls(1).await {
        println!("Deleting the second todo...");
        app.dispatch(controls.delete()).await?;
    }
    print_list(app).await;

    // Unknown kinds decode fine and change nothing
    let action = TodoAction::from_json(r#"{"type":"rename-todo","payload":{"id":1}}"#)?;
    app.dispatch(action).await?;
    print_list(app).await;

    println!("\nRender passes: {}", app.render_count());
    Ok(())
}

async fn interactive(app: &mut TodoApp) -> Result<(), Box<dyn std::error::Error>> {
    println!("Commands: add <name> | toggle <n> | delete <n> | list | quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let (command, rest) = line
            .trim()
            .split_once(' ')
            .unwrap_or((line.trim(), ""));

        match command {
            "add" => {
                app.set_text(rest);
                if !app.submit().await? {
                    println!("Nothing to add");
                }
            },
            "toggle" | "delete" => match item_number(rest) {
                Some(index) => match app.controls(index).await {
                    Some(controls) => {
                        let action = if command == "toggle" {
                            controls.toggle()
                        } else {
                            controls.delete()
                        };
                        app.dispatch(action).await?;
                    },
                    None => println!("No todo #{rest}"),
                },
                None => println!("Expected a todo number, got {rest:?}"),
            },
            "list" => print_list(app).await,
            "quit" => break,
            "" => {},
            other => println!("Unknown command: {other}"),
        }
        io::stdout().flush()?;
    }

    Ok(())
}

/// 1-based item number to list index
fn item_number(text: &str) -> Option<usize> {
    text.trim().parse::<usize>().ok()?.checked_sub(1)
}

async fn print_list(app: &mut TodoApp) {
    println!();
    for line in number_lines(app.render().await) {
        println!("{line}");
    }
}
