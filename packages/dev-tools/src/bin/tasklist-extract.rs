//! Task Extraction Binary
//!
//! Parses a wiki page and prints the extracted task tree as JSON. Useful for
//! checking how a page is indexed without running the full application.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin tasklist-extract -- notes/Projects.txt
//!
//! # Custom settings (JSON, same shape as TaskListConfig)
//! TASKLIST_CONFIG=tasklist.json cargo run --bin tasklist-extract -- page.txt
//! ```
//!
//! # Environment Variables
//!
//! - `TASKLIST_CONFIG`: Path to a JSON config file (default: built-in defaults)
//! - `RUST_LOG`: Logging level (e.g., "info", "debug", "trace")

use std::env;
use std::fs;

use anyhow::Context;
use tasklist_core::{TaskEntry, TaskExtractor, TaskListConfig, WikiParser};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("Usage: tasklist-extract <page.txt>"))?;

    let config = match env::var("TASKLIST_CONFIG") {
        Ok(config_path) => {
            tracing::info!("Loading config from {}", config_path);
            TaskListConfig::load(&config_path)
                .with_context(|| format!("Failed to load config {}", config_path))?
        }
        Err(_) => TaskListConfig::default(),
    };

    let text = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))?;
    let tree = WikiParser::new().parse(&text);

    let extractor = TaskExtractor::new(config)?;
    let tasks = extractor.extract_tasks(&tree);

    let total: usize = tasks.iter().map(TaskEntry::count).sum();
    let open = tasks
        .iter()
        .flat_map(TaskEntry::iter)
        .filter(|task| task.open)
        .count();
    tracing::info!("Extracted {} tasks ({} open) from {}", total, open, path);

    println!("{}", serde_json::to_string_pretty(&tasks)?);
    Ok(())
}
