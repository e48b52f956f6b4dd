//! In-memory cache of the task collection.

use crate::models::Task;

/// Holds the whole task collection between a load and the next write.
///
/// The cache is either empty (next access reloads from disk) or holds exactly
/// what was last read. Mutations go through the cached collection and are
/// followed by [`TaskCache::invalidate`].
#[derive(Debug, Default)]
pub struct TaskCache {
    tasks: Option<Vec<Task>>,
}

impl TaskCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached collection, calling `load` to populate it first if empty.
    pub fn load_if_absent<E>(
        &mut self,
        load: impl FnOnce() -> Result<Vec<Task>, E>,
    ) -> Result<&mut Vec<Task>, E> {
        if self.tasks.is_none() {
            self.tasks = Some(load()?);
        }
        Ok(self.tasks.get_or_insert_with(Vec::new))
    }

    /// Drop the cached collection.
    pub fn invalidate(&mut self) {
        self.tasks = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.tasks.is_some()
    }
}
