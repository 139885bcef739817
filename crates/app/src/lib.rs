//! Command-line front end over the in-memory store.
//!
//! Every command runs against a freshly bootstrapped store and yields a JSON
//! document; notifications raised while it ran are attached to the output.

pub mod cli;

use anyhow::Context;
use serde_json::{Value, json};

use weide_infra::DairyStore;

pub use cli::{Cli, Command, ReportKind};

pub fn run(command: &Command, store: &mut DairyStore) -> anyhow::Result<Value> {
    let inbox = store.subscribe_notifications();

    let mut output = match command {
        Command::Dashboard => serde_json::to_value(store.dashboard())?,
        Command::Products { search } => {
            serde_json::to_value(store.search_products(search.as_deref().unwrap_or_default()))?
        }
        Command::Inventory { search, low } => {
            let min_level = store.config().min_stock_level;
            let rows: Vec<_> = store
                .search_inventory(search.as_deref().unwrap_or_default())
                .into_iter()
                .filter(|row| !*low || row.is_low(min_level))
                .collect();
            serde_json::to_value(rows)?
        }
        Command::Warnings => serde_json::to_value(store.warnings())?,
        Command::Activity { limit } => {
            let activities = store.recent_activities();
            serde_json::to_value(&activities[..activities.len().min(*limit)])?
        }
        Command::Import { file } => {
            let text = std::fs::read_to_string(file)
                .with_context(|| format!("reading import file {}", file.display()))?;
            let imported = store
                .import_products(&text)
                .with_context(|| format!("importing {}", file.display()))?;
            json!({ "imported": imported, "products": store.products() })
        }
        Command::Report { kind } => match kind {
            ReportKind::Inventory => serde_json::to_value(store.inventory_report())?,
            ReportKind::Dispatches { from, to } => serde_json::to_value(store.dispatch_report(*from, *to)?)?,
        },
    };

    let notifications = inbox.drain();
    if !notifications.is_empty() {
        tracing::debug!(count = notifications.len(), "notifications raised");
        output = json!({ "result": output, "notifications": notifications });
    }
    Ok(output)
}
