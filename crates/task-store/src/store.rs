//! JSON-file task store.

use crate::cache::TaskCache;
use crate::error::{StoreError, StoreResult};
use crate::models::{NewTask, Status, Task, TaskEdit, TaskId};
use crate::persist;
use crate::search::{self, DeleteCriterion, SearchCriterion};
use std::path::{Path, PathBuf};

/// Durable task collection backed by a single JSON file.
///
/// Every mutation rewrites the whole file and drops the cache, so the next
/// read reloads from disk. The store assumes it is the only writer.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    cache: TaskCache,
    last_id: TaskId,
}

impl TaskStore {
    /// Open the store at `path`, creating an empty file if none exists.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let mut store = Self {
            path: path.into(),
            cache: TaskCache::new(),
            last_id: 0,
        };
        store.last_id = store.max_id()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a task under the next free id and persist.
    pub fn add_task(&mut self, new_task: NewTask) -> StoreResult<Task> {
        let next_id = self.max_id()?.max(self.last_id) + 1;
        let task = self.mutate(|tasks| {
            let task = new_task.into_task(next_id);
            tasks.push(task.clone());
            Ok(task)
        })?;
        self.last_id = next_id;
        tracing::info!(id = task.id, "task added");
        Ok(task)
    }

    /// All tasks in storage order.
    pub fn list_tasks(&mut self) -> StoreResult<&[Task]> {
        Ok(self.load()?.as_slice())
    }

    /// Tasks selected by `criterion`, at most `limit` of them.
    pub fn search_tasks(
        &mut self,
        criterion: &SearchCriterion,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Task>> {
        let tasks = self.load()?;
        let found = search::select(tasks, criterion, limit)
            .into_iter()
            .map(|idx| tasks[idx].clone())
            .collect::<Vec<_>>();
        tracing::debug!(?criterion, found = found.len(), "search");
        Ok(found)
    }

    /// The task with `id`, if any.
    pub fn get_task(&mut self, id: TaskId) -> StoreResult<Option<Task>> {
        Ok(self
            .search_tasks(&SearchCriterion::Id(id), Some(1))?
            .into_iter()
            .next())
    }

    /// Replace one field of the task with `id` and persist.
    pub fn edit_task(&mut self, id: TaskId, edit: TaskEdit) -> StoreResult<Task> {
        let field = edit.field();
        let task = self.mutate(|tasks| {
            let task = find_by_id(tasks, id)?;
            edit.apply(task);
            Ok(task.clone())
        })?;
        tracing::info!(id, %field, "task edited");
        Ok(task)
    }

    /// Mark the task with `id` as done and persist.
    pub fn complete_task(&mut self, id: TaskId) -> StoreResult<Task> {
        let task = self.mutate(|tasks| {
            let task = find_by_id(tasks, id)?;
            task.status = Status::Done;
            Ok(task.clone())
        })?;
        tracing::info!(id, "task completed");
        Ok(task)
    }

    /// Remove every task selected by `criterion` and persist.
    ///
    /// Returns the removed tasks; fails with `NotFound` if nothing matched.
    pub fn delete_tasks(&mut self, criterion: &DeleteCriterion) -> StoreResult<Vec<Task>> {
        let (search, limit) = criterion.to_search();
        let removed = self.mutate(|tasks| {
            let positions = search::select(tasks, &search, limit);
            if positions.is_empty() {
                return Err(StoreError::NotFound(format!(
                    "No task found with {}",
                    criterion
                )));
            }
            let mut position = 0;
            let mut removed = Vec::with_capacity(positions.len());
            tasks.retain(|task| {
                let keep = !positions.contains(&position);
                if !keep {
                    removed.push(task.clone());
                }
                position += 1;
                keep
            });
            Ok(removed)
        })?;
        tracing::info!(%criterion, count = removed.len(), "tasks deleted");
        Ok(removed)
    }

    fn max_id(&mut self) -> StoreResult<TaskId> {
        Ok(self.load()?.iter().map(|t| t.id).max().unwrap_or(0))
    }

    fn load(&mut self) -> StoreResult<&mut Vec<Task>> {
        let path = &self.path;
        self.cache.load_if_absent(|| load_or_init(path))
    }

    /// Read-modify-write over the whole collection.
    ///
    /// Nothing is written if `f` fails.
    fn mutate<T>(
        &mut self,
        f: impl FnOnce(&mut Vec<Task>) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let path = &self.path;
        let tasks = self.cache.load_if_absent(|| load_or_init(path))?;
        let result = match f(&mut *tasks) {
            Ok(result) => result,
            Err(e) => {
                self.cache.invalidate();
                return Err(e);
            }
        };
        let written = persist::write_tasks(path, tasks);
        self.cache.invalidate();
        tracing::debug!(path = %path.display(), "cache invalidated");
        written?;
        Ok(result)
    }
}

fn load_or_init(path: &Path) -> StoreResult<Vec<Task>> {
    match persist::read_tasks(path)? {
        Some(tasks) => {
            tracing::debug!(path = %path.display(), count = tasks.len(), "loaded tasks");
            Ok(tasks)
        }
        None => {
            tracing::debug!(path = %path.display(), "no task file, creating empty store");
            persist::write_tasks(path, &[])?;
            Ok(Vec::new())
        }
    }
}

fn find_by_id(tasks: &mut [Task], id: TaskId) -> StoreResult<&mut Task> {
    tasks
        .iter_mut()
        .find(|task| task.id == id)
        .ok_or_else(|| StoreError::NotFound(format!("No task found with id {}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, TaskField};
    use chrono::NaiveDate;
    use tempfile::{tempdir, TempDir};

    fn due(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 3, day).unwrap()
    }

    fn open_store() -> (TempDir, TaskStore) {
        let dir = tempdir().unwrap();
        let store = TaskStore::open(dir.path().join("tasks.json")).unwrap();
        (dir, store)
    }

    fn sample(title: &str, category: &str) -> NewTask {
        NewTask::new(title, due(1))
            .with_description(format!("{} description", title))
            .with_category(category)
            .with_priority(Priority::High)
    }

    #[test]
    fn test_open_creates_empty_file() {
        let (dir, mut store) = open_store();
        let path = dir.path().join("tasks.json");

        assert!(path.exists());
        assert!(store.list_tasks().unwrap().is_empty());
        assert_eq!(std::fs::read_to_string(path).unwrap(), "[]");
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let (_dir, mut store) = open_store();

        let first = store.add_task(sample("first", "Work")).unwrap();
        let second = store.add_task(sample("second", "Home")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let tasks = store.list_tasks().unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0], first);
        assert_eq!(tasks[0].title, "first");
        assert_eq!(tasks[0].description, "first description");
        assert_eq!(tasks[0].category, "Work");
        assert_eq!(tasks[0].due_date, due(1));
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[0].status, Status::NotDone);
    }

    #[test]
    fn test_add_continues_from_existing_max() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let existing = vec![sample("a", "Work").into_task(7), sample("b", "Work").into_task(3)];
        persist::write_tasks(&path, &existing).unwrap();

        let mut store = TaskStore::open(&path).unwrap();
        let task = store.add_task(sample("c", "Work")).unwrap();

        assert_eq!(task.id, 8);
    }

    #[test]
    fn test_deleted_id_not_reused() {
        let (_dir, mut store) = open_store();
        store.add_task(sample("a", "Work")).unwrap();
        let b = store.add_task(sample("b", "Work")).unwrap();

        store.delete_tasks(&DeleteCriterion::Id(b.id)).unwrap();
        let c = store.add_task(sample("c", "Work")).unwrap();

        assert_eq!(c.id, 3);
    }

    #[test]
    fn test_complete_only_changes_status() {
        let (_dir, mut store) = open_store();
        let added = store.add_task(sample("report", "Work")).unwrap();

        let done = store.complete_task(added.id).unwrap();

        assert_eq!(done.status, Status::Done);
        let stored = store.get_task(added.id).unwrap().unwrap();
        assert_eq!(stored, Task { status: Status::Done, ..added });
    }

    #[test]
    fn test_complete_missing() {
        let (_dir, mut store) = open_store();
        let err = store.complete_task(1).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_edit_each_field() {
        let (_dir, mut store) = open_store();
        let added = store.add_task(sample("report", "Work")).unwrap();

        let edits = vec![
            TaskEdit::Title("new title".into()),
            TaskEdit::Description("new description".into()),
            TaskEdit::Category("New category".into()),
            TaskEdit::DueDate(due(2)),
            TaskEdit::Priority(Priority::Low),
            TaskEdit::Status(Status::Done),
        ];
        for edit in edits {
            let before = store.get_task(added.id).unwrap().unwrap();
            let field = edit.field();
            let after = store.edit_task(added.id, edit).unwrap();

            let changed = |f: TaskField| match f {
                TaskField::Title => before.title != after.title,
                TaskField::Description => before.description != after.description,
                TaskField::Category => before.category != after.category,
                TaskField::DueDate => before.due_date != after.due_date,
                TaskField::Priority => before.priority != after.priority,
                TaskField::Status => before.status != after.status,
            };
            for other in TaskField::ALL {
                assert_eq!(changed(other), other == field, "field {}", other);
            }
        }

        let stored = store.get_task(added.id).unwrap().unwrap();
        assert_eq!(stored.title, "new title");
        assert_eq!(stored.description, "new description");
        assert_eq!(stored.category, "New category");
        assert_eq!(stored.due_date, due(2));
        assert_eq!(stored.priority, Priority::Low);
        assert_eq!(stored.status, Status::Done);
    }

    #[test]
    fn test_edit_missing() {
        let (_dir, mut store) = open_store();
        store.add_task(sample("report", "Work")).unwrap();

        let err = store.edit_task(5, TaskEdit::Title("x".into())).unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(store.list_tasks().unwrap()[0].title, "report");
    }

    #[test]
    fn test_delete_by_id_removes_one() {
        let (_dir, mut store) = open_store();
        let a = store.add_task(sample("a", "Work")).unwrap();
        let b = store.add_task(sample("b", "Work")).unwrap();
        let c = store.add_task(sample("c", "Home")).unwrap();

        let removed = store.delete_tasks(&DeleteCriterion::Id(b.id)).unwrap();

        assert_eq!(removed, vec![b]);
        assert_eq!(store.list_tasks().unwrap(), &[a, c][..]);
    }

    #[test]
    fn test_delete_by_category_removes_all() {
        let (_dir, mut store) = open_store();
        store.add_task(sample("a", "Work")).unwrap();
        let home = store.add_task(sample("b", "Home")).unwrap();
        store.add_task(sample("c", "Work")).unwrap();

        let removed = store
            .delete_tasks(&DeleteCriterion::Category("Work".into()))
            .unwrap();

        assert_eq!(removed.len(), 2);
        assert_eq!(store.list_tasks().unwrap(), &[home][..]);
    }

    #[test]
    fn test_delete_missing() {
        let (_dir, mut store) = open_store();
        store.add_task(sample("a", "Work")).unwrap();

        for criterion in [DeleteCriterion::Id(9), DeleteCriterion::Category("Other".into())] {
            let err = store.delete_tasks(&criterion).unwrap_err();
            assert!(err.is_not_found());
        }
        assert_eq!(store.list_tasks().unwrap().len(), 1);
    }

    #[test]
    fn test_search_criteria() {
        let (_dir, mut store) = open_store();
        let first = store
            .add_task(
                NewTask::new("test task", due(1))
                    .with_description("first test task")
                    .with_category("Test category"),
            )
            .unwrap();

        let criteria = vec![
            SearchCriterion::Category("Test category".into()),
            SearchCriterion::Status(Status::NotDone),
            SearchCriterion::Keywords(vec!["test".into(), "first".into()]),
        ];
        for criterion in &criteria {
            assert_eq!(store.search_tasks(criterion, None).unwrap(), vec![first.clone()]);
        }

        store.delete_tasks(&DeleteCriterion::Id(first.id)).unwrap();
        for criterion in &criteria {
            assert!(store.search_tasks(criterion, None).unwrap().is_empty());
        }
    }

    #[test]
    fn test_reload_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let mut store = TaskStore::open(&path).unwrap();
        for (i, category) in ["Work", "Home", "Work", "Errands"].iter().enumerate() {
            store.add_task(sample(&format!("task {}", i), category)).unwrap();
        }
        store.complete_task(2).unwrap();
        let written = store.list_tasks().unwrap().to_vec();

        let mut reopened = TaskStore::open(&path).unwrap();

        assert_eq!(reopened.list_tasks().unwrap(), written.as_slice());
    }

    #[test]
    fn test_reads_external_changes_after_mutation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let mut store = TaskStore::open(&path).unwrap();
        store.add_task(sample("a", "Work")).unwrap();

        let mut on_disk = persist::read_tasks(&path).unwrap().unwrap();
        on_disk[0].title = "changed on disk".into();
        persist::write_tasks(&path, &on_disk).unwrap();

        assert_eq!(store.list_tasks().unwrap()[0].title, "changed on disk");
    }

    #[test]
    fn test_scenario() {
        let (_dir, mut store) = open_store();

        let t1 = store.add_task(sample("T1", "Work")).unwrap();
        assert_eq!(t1.id, 1);
        assert_eq!(store.list_tasks().unwrap().len(), 1);

        let t2 = store.add_task(sample("T2", "Home")).unwrap();
        assert_eq!(t2.id, 2);

        store.delete_tasks(&DeleteCriterion::Id(t1.id)).unwrap();
        assert_eq!(store.list_tasks().unwrap(), &[t2.clone()][..]);

        let found = store
            .search_tasks(&SearchCriterion::Category(t2.category.clone()), None)
            .unwrap();
        assert_eq!(found, vec![t2]);
    }
}
