//! Command interpreter.

use crate::command::{Command, Subcommand};
use crate::console::{LineReader, LineRenderer};
use crate::error::{AppError, AppResult};
use crate::table::Table;
use crate::validate;
use chrono::{Local, NaiveDateTime};
use task_store::{
    DeleteCriterion, Locale, NewTask, Priority, SearchCriterion, Status, Task, TaskEdit,
    TaskField, TaskStore,
};

const TASK_HEADERS: [&str; 7] = [
    "ID",
    "TITLE",
    "DESCRIPTION",
    "CATEGORY",
    "DUE_DATE",
    "PRIORITY",
    "STATUS",
];

/// What the read loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

type Handler<R, W> = fn(&mut App<R, W>) -> AppResult<Flow>;

/// Reads commands, validates their input and applies them to the store.
pub struct App<R, W> {
    store: TaskStore,
    reader: R,
    out: W,
    locale: Locale,
    clock: fn() -> NaiveDateTime,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl<R: LineReader, W: LineRenderer> App<R, W> {
    pub fn new(store: TaskStore, reader: R, out: W, locale: Locale) -> Self {
        Self {
            store,
            reader,
            out,
            locale,
            clock: local_now,
        }
    }

    /// Replace the source of "now" used for due-date checks.
    #[cfg(test)]
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    /// Print the banner and menu, then execute commands until `leave` or end of input.
    pub fn run(&mut self) -> AppResult<()> {
        self.out.line("TASK MANAGER STARTED");
        self.out.line("");
        self.help()?;

        loop {
            let Some(line) = self.reader.read_line("Enter a command: ")? else {
                tracing::debug!("input closed");
                return Ok(());
            };
            match self.dispatch(&line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => return Ok(()),
                Err(AppError::InputClosed) => return Ok(()),
                Err(e) if e.is_recoverable() => self.report(&e),
                Err(e) => return Err(e),
            }
        }
    }

    /// Parse and execute one top-level command line.
    pub fn dispatch(&mut self, line: &str) -> AppResult<Flow> {
        let command = Command::parse(line)?;
        tracing::debug!(?command, "dispatch");
        (Self::handler(command))(self)
    }

    fn handler(command: Command) -> Handler<R, W> {
        match command {
            Command::ShowTasks => Self::show_tasks,
            Command::AddTask => Self::add_task,
            Command::EditTask => Self::edit_task,
            Command::DeleteTask => Self::delete_task,
            Command::SearchTasks => Self::search_tasks,
            Command::DoneTask => Self::done_task,
            Command::Help => Self::help,
            Command::Quit => Self::quit,
        }
    }

    fn report(&mut self, error: &AppError) {
        match error {
            AppError::Store(e) if !e.is_not_found() => {
                tracing::error!(error = %e, "store operation failed");
            }
            other => tracing::debug!(error = %other, "command rejected"),
        }
        self.out.error(&error.to_string());
    }

    fn prompt(&mut self, prompt: &str) -> AppResult<String> {
        self.reader.read_line(prompt)?.ok_or(AppError::InputClosed)
    }

    fn prompt_subcommand(&mut self, parent: Command, prompt: &str) -> AppResult<Subcommand> {
        let input = self.prompt(&format!("{} {}: ", prompt, Subcommand::hint(parent)))?;
        Subcommand::parse(parent, &input)
    }

    fn prompt_id(&mut self) -> AppResult<u64> {
        let input = self.prompt("Task id: ")?;
        validate::task_id(&input)
    }

    fn priority_hint(&self) -> String {
        Priority::ALL
            .iter()
            .map(|p| p.label(self.locale))
            .collect::<Vec<_>>()
            .join("/")
    }

    fn status_hint(&self) -> String {
        Status::ALL
            .iter()
            .map(|s| s.label(self.locale))
            .collect::<Vec<_>>()
            .join("/")
    }

    fn render_tasks(&mut self, tasks: &[Task]) {
        let mut table = Table::new(TASK_HEADERS);
        for task in tasks {
            table.add_row([
                task.id.to_string(),
                task.title.clone(),
                task.description.clone(),
                task.category.clone(),
                task.due_date.format(validate::DATE_FORMAT).to_string(),
                task.priority.label(self.locale).to_string(),
                task.status.label(self.locale).to_string(),
            ]);
        }
        for line in table.lines() {
            self.out.line(&line);
        }
    }

    fn show_tasks(&mut self) -> AppResult<Flow> {
        let tasks = self.store.list_tasks()?.to_vec();
        self.render_tasks(&tasks);
        Ok(Flow::Continue)
    }

    fn add_task(&mut self) -> AppResult<Flow> {
        let title = self.prompt("Task title: ")?;
        let description = self.prompt("Task description: ")?;
        let category = validate::category(&self.prompt("Task category: ")?);
        let due_date = self.prompt("Due date, e.g. 2024-11-30: ")?;
        let due_date = validate::due_date(&due_date, (self.clock)())?;
        let priority_prompt = format!("Priority ({}): ", self.priority_hint());
        let priority = validate::priority(&self.prompt(&priority_prompt)?, self.locale)?;

        let task = self.store.add_task(
            NewTask::new(title, due_date)
                .with_description(description)
                .with_category(category)
                .with_priority(priority)
                .with_status(Status::NotDone),
        )?;
        self.out
            .line(&format!("New task '{}' added to the task manager.", task.title));
        Ok(Flow::Continue)
    }

    fn edit_task(&mut self) -> AppResult<Flow> {
        let id = self.prompt_id()?;
        let names = TaskField::ALL
            .iter()
            .map(|f| f.name())
            .collect::<Vec<_>>()
            .join(", ");
        let field = validate::field_name(&self.prompt(&format!("Field to change ({}): ", names))?)?;
        let value = self.prompt("New value: ")?;

        let edit = match field {
            TaskField::Title => TaskEdit::Title(value),
            TaskField::Description => TaskEdit::Description(value),
            TaskField::Category => TaskEdit::Category(validate::category(&value)),
            TaskField::DueDate => TaskEdit::DueDate(validate::due_date(&value, (self.clock)())?),
            TaskField::Priority => TaskEdit::Priority(validate::priority(&value, self.locale)?),
            TaskField::Status => TaskEdit::Status(validate::status(&value, self.locale)?),
        };
        self.store.edit_task(id, edit)?;
        self.out.line(&format!("Task {} updated.", id));
        Ok(Flow::Continue)
    }

    fn done_task(&mut self) -> AppResult<Flow> {
        let id = self.prompt_id()?;
        self.store.complete_task(id)?;
        self.out.line(&format!("Task {} marked as done.", id));
        Ok(Flow::Continue)
    }

    fn delete_task(&mut self) -> AppResult<Flow> {
        let (criterion, message) =
            match self.prompt_subcommand(Command::DeleteTask, "Delete tasks")? {
                Subcommand::ById => {
                    let id = self.prompt_id()?;
                    (DeleteCriterion::Id(id), format!("Task {} deleted.", id))
                }
                Subcommand::ByCategory => {
                    let category = validate::category(&self.prompt("Category: ")?);
                    let message = format!("Tasks in category '{}' deleted.", category);
                    (DeleteCriterion::Category(category), message)
                }
                other @ (Subcommand::ByKeywords | Subcommand::ByStatus) => {
                    return Err(AppError::InvalidCommand(other.token().to_string()));
                }
            };
        self.store.delete_tasks(&criterion)?;
        self.out.line(&message);
        Ok(Flow::Continue)
    }

    fn search_tasks(&mut self) -> AppResult<Flow> {
        let criterion = match self.prompt_subcommand(Command::SearchTasks, "Search tasks")? {
            Subcommand::ByCategory => {
                SearchCriterion::Category(validate::category(&self.prompt("Category: ")?))
            }
            Subcommand::ByStatus => {
                let prompt = format!("Status ({}): ", self.status_hint());
                SearchCriterion::Status(validate::status(&self.prompt(&prompt)?, self.locale)?)
            }
            Subcommand::ByKeywords => {
                let words = self.prompt("Keywords separated by spaces: ")?;
                SearchCriterion::Keywords(words.split(' ').map(str::to_string).collect())
            }
            Subcommand::ById => {
                return Err(AppError::InvalidCommand(Subcommand::ById.token().to_string()));
            }
        };
        let found = self.store.search_tasks(&criterion, None)?;
        self.render_tasks(&found);
        Ok(Flow::Continue)
    }

    fn help(&mut self) -> AppResult<Flow> {
        let mut table = Table::new(["COMMAND", "DESCRIPTION"]);
        for command in Command::ALL {
            let token = std::iter::once(command.token())
                .chain(command.aliases().iter().copied())
                .collect::<Vec<_>>()
                .join(" / ");
            let description = match Subcommand::hint(command) {
                hint if hint.is_empty() => command.description().to_string(),
                hint => format!("{} ({})", command.description(), hint),
            };
            table.add_row([token, description]);
        }
        for line in table.lines() {
            self.out.line(&line);
        }
        Ok(Flow::Continue)
    }

    fn quit(&mut self) -> AppResult<Flow> {
        self.out.line("TASK MANAGER STOPPED.");
        Ok(Flow::Quit)
    }
}
