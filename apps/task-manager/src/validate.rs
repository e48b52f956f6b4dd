//! Validation of prompted field values.
//!
//! Every check fails with [`AppError::InvalidInputData`] and a message naming
//! the rejected value.

use crate::error::{AppError, AppResult};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;
use task_store::{capitalize, Locale, Priority, Status, TaskField, TaskId};

static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("id pattern"));
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern"));

pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn invalid(message: String) -> AppError {
    AppError::InvalidInputData(message)
}

pub fn task_id(input: &str) -> AppResult<TaskId> {
    if !ID_PATTERN.is_match(input) {
        return Err(invalid(format!("Could not read task id '{}'", input)));
    }
    input
        .parse()
        .map_err(|_| invalid(format!("Task id '{}' is too large", input)))
}

/// A `YYYY-MM-DD` calendar date strictly later than `now`.
pub fn due_date(input: &str, now: NaiveDateTime) -> AppResult<NaiveDate> {
    if !DATE_PATTERN.is_match(input) {
        return Err(invalid(format!(
            "Invalid date format '{}'. Use the format shown in the prompt, e.g. 2024-11-30",
            input
        )));
    }
    let date = NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| invalid(format!("'{}' is not a calendar date", input)))?;
    if date.and_time(chrono::NaiveTime::MIN) <= now {
        return Err(invalid(format!(
            "Due date {} must be later than the current date",
            input
        )));
    }
    Ok(date)
}

pub fn priority(input: &str, locale: Locale) -> AppResult<Priority> {
    Priority::parse(input, locale).ok_or_else(|| {
        invalid(format!(
            "Unknown priority '{}'. Expected one of: {}",
            input,
            labels(Priority::ALL.iter().map(|p| p.label(locale)))
        ))
    })
}

pub fn status(input: &str, locale: Locale) -> AppResult<Status> {
    Status::parse(input, locale).ok_or_else(|| {
        invalid(format!(
            "Unknown status '{}'. Expected one of: {}",
            input,
            labels(Status::ALL.iter().map(|s| s.label(locale)))
        ))
    })
}

pub fn field_name(input: &str) -> AppResult<TaskField> {
    TaskField::from_name(input).ok_or_else(|| {
        invalid(format!(
            "Unknown field '{}'. Expected one of: {}",
            input,
            labels(TaskField::ALL.iter().map(|f| f.name()))
        ))
    })
}

/// Categories are free text, stored capitalized.
pub fn category(input: &str) -> String {
    capitalize(input)
}

fn labels<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(", ")
}
