//! Task Manager - console task manager backed by a JSON file.
//!
//! Features:
//! - Add, list, edit, complete and delete tasks
//! - Search by keywords (ranked), category or status
//! - Validated input for ids, due dates, priorities and statuses
//! - English or Russian priority/status labels

mod app;
mod command;
mod config;
mod console;
mod error;
mod logging;
mod table;
mod validate;

use anyhow::{Context, Result};
use app::App;
use config::Config;
use console::{StdinReader, StdoutRenderer};
use task_store::TaskStore;

fn main() -> Result<()> {
    // Subscriber first, so a rejected config file is reported
    let loaded = Config::load();
    let level = loaded
        .as_ref()
        .map_or("warn", |config| config.logging.level.as_str());
    logging::init(level);
    let config = Config::or_default(loaded);

    if Config::config_path().is_some_and(|p| !p.exists()) {
        if let Err(e) = config.save() {
            tracing::warn!(error = %e, "could not write default config");
        }
    }

    // Optional first argument overrides the storage path
    let path = config.storage_path(std::env::args().nth(1));
    let store = TaskStore::open(&path)
        .with_context(|| format!("failed to open task file {}", path.display()))?;
    tracing::debug!(path = %store.path().display(), "store opened");

    let mut app = App::new(
        store,
        StdinReader::new(),
        StdoutRenderer::new(),
        config.display.locale,
    );
    app.run()?;
    Ok(())
}
