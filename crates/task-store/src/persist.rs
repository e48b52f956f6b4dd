//! Raw JSON file read/write for the task collection.

use crate::error::StoreResult;
use crate::models::Task;
use std::io::ErrorKind;
use std::path::Path;

/// Read the whole collection. Returns `None` if the file does not exist.
pub fn read_tasks(path: &Path) -> StoreResult<Option<Vec<Task>>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let tasks = serde_json::from_str(&content)?;
    Ok(Some(tasks))
}

/// Replace the file with the given collection.
pub fn write_tasks(path: &Path, tasks: &[Task]) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let content = serde_json::to_string_pretty(tasks)?;
    std::fs::write(path, content)?;
    tracing::debug!(path = %path.display(), count = tasks.len(), "wrote task file");
    Ok(())
}
