//! Data models for the task store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique task identifier.
pub type TaskId = u64;

/// Language used for priority and status labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ru")]
    Russian,
}

/// Task priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Priority {
    #[default]
    #[serde(alias = "Низкий")]
    Low,
    #[serde(alias = "Средний")]
    Medium,
    #[serde(alias = "Высокий")]
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Priority::Low, Locale::English) => "Low",
            (Priority::Medium, Locale::English) => "Medium",
            (Priority::High, Locale::English) => "High",
            (Priority::Low, Locale::Russian) => "Низкий",
            (Priority::Medium, Locale::Russian) => "Средний",
            (Priority::High, Locale::Russian) => "Высокий",
        }
    }

    /// Parse user input against the labels of `locale` after capitalizing it.
    pub fn parse(input: &str, locale: Locale) -> Option<Priority> {
        let input = capitalize(input);
        Self::ALL.into_iter().find(|p| p.label(locale) == input)
    }
}

/// Task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    #[serde(rename = "Not done", alias = "Не выполнена")]
    NotDone,
    #[serde(alias = "Выполнена")]
    Done,
}

impl Status {
    pub const ALL: [Status; 2] = [Status::NotDone, Status::Done];

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Status::NotDone, Locale::English) => "Not done",
            (Status::Done, Locale::English) => "Done",
            (Status::NotDone, Locale::Russian) => "Не выполнена",
            (Status::Done, Locale::Russian) => "Выполнена",
        }
    }

    /// Parse user input against the labels of `locale` after capitalizing it.
    pub fn parse(input: &str, locale: Locale) -> Option<Status> {
        let input = capitalize(input);
        Self::ALL.into_iter().find(|s| s.label(locale) == input)
    }
}

/// A task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub status: Status,
}

/// Field values for a task that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub category: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub status: Status,
}

impl NewTask {
    pub fn new(title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            category: String::new(),
            due_date,
            priority: Priority::default(),
            status: Status::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub(crate) fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            due_date: self.due_date,
            priority: self.priority,
            status: self.status,
        }
    }
}

/// The fields of a task that can be edited after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Title,
    Description,
    Category,
    DueDate,
    Priority,
    Status,
}

impl TaskField {
    pub const ALL: [TaskField; 6] = [
        TaskField::Title,
        TaskField::Description,
        TaskField::Category,
        TaskField::DueDate,
        TaskField::Priority,
        TaskField::Status,
    ];

    /// Name as it appears in the storage file.
    pub fn name(&self) -> &'static str {
        match self {
            TaskField::Title => "title",
            TaskField::Description => "description",
            TaskField::Category => "category",
            TaskField::DueDate => "due_date",
            TaskField::Priority => "priority",
            TaskField::Status => "status",
        }
    }

    pub fn from_name(name: &str) -> Option<TaskField> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single-field replacement applied to a stored task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEdit {
    Title(String),
    Description(String),
    Category(String),
    DueDate(NaiveDate),
    Priority(Priority),
    Status(Status),
}

impl TaskEdit {
    pub fn field(&self) -> TaskField {
        match self {
            TaskEdit::Title(_) => TaskField::Title,
            TaskEdit::Description(_) => TaskField::Description,
            TaskEdit::Category(_) => TaskField::Category,
            TaskEdit::DueDate(_) => TaskField::DueDate,
            TaskEdit::Priority(_) => TaskField::Priority,
            TaskEdit::Status(_) => TaskField::Status,
        }
    }

    pub(crate) fn apply(self, task: &mut Task) {
        match self {
            TaskEdit::Title(v) => task.title = v,
            TaskEdit::Description(v) => task.description = v,
            TaskEdit::Category(v) => task.category = v,
            TaskEdit::DueDate(v) => task.due_date = v,
            TaskEdit::Priority(v) => task.priority = v,
            TaskEdit::Status(v) => task.status = v,
        }
    }
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn due() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 1, 15).unwrap()
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("hello WORLD"), "Hello world");
        assert_eq!(capitalize("высокий"), "Высокий");
        assert_eq!(capitalize("НЕ ВЫПОЛНЕНА"), "Не выполнена");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!(Priority::parse("high", Locale::English), Some(Priority::High));
        assert_eq!(Priority::parse("MEDIUM", Locale::English), Some(Priority::Medium));
        assert_eq!(Priority::parse("низкий", Locale::Russian), Some(Priority::Low));
        assert_eq!(Priority::parse("низкий", Locale::English), None);
        assert_eq!(Priority::parse("invalid priority", Locale::English), None);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(Status::parse("not done", Locale::English), Some(Status::NotDone));
        assert_eq!(Status::parse("done", Locale::English), Some(Status::Done));
        assert_eq!(Status::parse("не выполнена", Locale::Russian), Some(Status::NotDone));
        assert_eq!(Status::parse("not", Locale::English), None);
    }

    #[test]
    fn test_task_field_names() {
        for field in TaskField::ALL {
            assert_eq!(TaskField::from_name(field.name()), Some(field));
        }
        assert_eq!(TaskField::from_name("id"), None);
        assert_eq!(TaskField::from_name("Title"), None);
    }

    #[test]
    fn test_edit_replaces_single_field() {
        let mut task = NewTask::new("write report", due()).with_category("Work").into_task(3);
        let before = task.clone();

        TaskEdit::Priority(Priority::High).apply(&mut task);

        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.title, before.title);
        assert_eq!(task.category, before.category);
        assert_eq!(task.status, before.status);
        assert_eq!(task.id, 3);
    }

    #[test]
    fn test_task_json_shape() {
        let task = NewTask::new("t", due()).with_priority(Priority::Medium).into_task(1);
        let value = serde_json::to_value(&task).unwrap();

        assert_eq!(value["due_date"], "2030-01-15");
        assert_eq!(value["priority"], "Medium");
        assert_eq!(value["status"], "Not done");
    }

    #[test]
    fn test_russian_labels_load() {
        let json = r#"{"id": 1, "title": "t", "description": "d", "category": "Дом",
            "due_date": "2030-01-15", "priority": "Высокий", "status": "Выполнена"}"#;
        let task: Task = serde_json::from_str(json).unwrap();

        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.status, Status::Done);
    }

    proptest! {
        #[test]
        fn test_capitalize_idempotent(s in "[a-zA-Zа-яА-Я ]{0,24}") {
            let once = capitalize(&s);
            prop_assert_eq!(capitalize(&once), once);
        }
    }
}
