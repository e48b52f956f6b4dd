//! Search criteria and keyword ranking.

use crate::models::{Status, Task, TaskId};
use regex::Regex;
use std::fmt;

/// How to select tasks for a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCriterion {
    /// Exact id match.
    Id(TaskId),
    /// Exact category match.
    Category(String),
    /// Exact status match.
    Status(Status),
    /// Whole-word keyword match in title or description, ranked by hit count.
    Keywords(Vec<String>),
}

impl SearchCriterion {
    /// Exact-match test. Keyword criteria are ranked, not filtered, so never match here.
    fn matches(&self, task: &Task) -> bool {
        match self {
            SearchCriterion::Id(id) => task.id == *id,
            SearchCriterion::Category(category) => task.category == *category,
            SearchCriterion::Status(status) => task.status == *status,
            SearchCriterion::Keywords(_) => false,
        }
    }
}

/// How to select tasks for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteCriterion {
    /// The single task with this id.
    Id(TaskId),
    /// Every task in this category.
    Category(String),
}

impl DeleteCriterion {
    pub(crate) fn to_search(&self) -> (SearchCriterion, Option<usize>) {
        match self {
            DeleteCriterion::Id(id) => (SearchCriterion::Id(*id), Some(1)),
            DeleteCriterion::Category(category) => {
                (SearchCriterion::Category(category.clone()), None)
            }
        }
    }
}

impl fmt::Display for DeleteCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeleteCriterion::Id(id) => write!(f, "id {}", id),
            DeleteCriterion::Category(category) => write!(f, "category '{}'", category),
        }
    }
}

/// Positions of the tasks selected by `criterion`, in the order they should be returned.
pub(crate) fn select(tasks: &[Task], criterion: &SearchCriterion, limit: Option<usize>) -> Vec<usize> {
    match criterion {
        SearchCriterion::Keywords(words) => {
            let mut ranked = rank_by_keywords(tasks, words);
            if let Some(limit) = limit {
                ranked.truncate(limit);
            }
            ranked
        }
        exact => {
            let mut found = Vec::new();
            for (idx, task) in tasks.iter().enumerate() {
                if Some(found.len()) == limit {
                    break;
                }
                if exact.matches(task) {
                    found.push(idx);
                }
            }
            found
        }
    }
}

/// Whole-word matcher for an alternation of literal keywords.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    regex: Regex,
}

impl KeywordMatcher {
    /// Build a matcher. Empty words are ignored; returns `None` if nothing is left.
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Option<Self> {
        let alternation = keywords
            .iter()
            .map(AsRef::as_ref)
            .filter(|word| !word.is_empty())
            .map(regex::escape)
            .collect::<Vec<_>>();
        if alternation.is_empty() {
            return None;
        }

        let pattern = format!(r"\b(?:{})\b", alternation.join("|"));
        match Regex::new(&pattern) {
            Ok(regex) => Some(Self { regex }),
            Err(e) => {
                tracing::warn!(error = %e, "keyword pattern rejected");
                None
            }
        }
    }

    pub fn count(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }

    /// Larger of the title and description hit counts.
    pub fn score(&self, task: &Task) -> usize {
        self.count(&task.title).max(self.count(&task.description))
    }
}

/// Positions of tasks with at least one keyword hit, best score first.
///
/// Equal scores put the later position first.
pub fn rank_by_keywords<S: AsRef<str>>(tasks: &[Task], keywords: &[S]) -> Vec<usize> {
    let Some(matcher) = KeywordMatcher::new(keywords) else {
        return Vec::new();
    };

    let mut scored: Vec<(usize, usize)> = tasks
        .iter()
        .enumerate()
        .filter_map(|(idx, task)| {
            let score = matcher.score(task);
            (score > 0).then_some((idx, score))
        })
        .collect();
    scored.sort_by(|a, b| (b.1, b.0).cmp(&(a.1, a.0)));
    scored.into_iter().map(|(idx, _)| idx).collect()
}
