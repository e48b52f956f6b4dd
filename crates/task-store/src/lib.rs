//! Task storage for the task manager.
//!
//! A [`TaskStore`] keeps the whole task collection in one JSON file:
//! - reads go through a lazily populated [`TaskCache`]
//! - every mutation rewrites the file and invalidates the cache
//! - exact-match search by id, category or status, plus ranked keyword search

pub mod cache;
pub mod error;
pub mod models;
pub mod persist;
pub mod search;
pub mod store;

pub use cache::TaskCache;
pub use error::{StoreError, StoreResult};
pub use models::{capitalize, Locale, NewTask, Priority, Status, Task, TaskEdit, TaskField, TaskId};
pub use search::{rank_by_keywords, DeleteCriterion, KeywordMatcher, SearchCriterion};
pub use store::TaskStore;
