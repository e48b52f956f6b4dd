//! Command grammar.

use crate::error::{AppError, AppResult};

/// Top-level commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    ShowTasks,
    AddTask,
    EditTask,
    DeleteTask,
    SearchTasks,
    DoneTask,
    Help,
    Quit,
}

impl Command {
    /// Menu order.
    pub const ALL: [Command; 8] = [
        Command::ShowTasks,
        Command::AddTask,
        Command::EditTask,
        Command::DeleteTask,
        Command::SearchTasks,
        Command::DoneTask,
        Command::Help,
        Command::Quit,
    ];

    /// The token shown in the menu.
    pub fn token(&self) -> &'static str {
        match self {
            Command::ShowTasks => "show tasks",
            Command::AddTask => "add task",
            Command::EditTask => "edit task",
            Command::DeleteTask => "delete task",
            Command::SearchTasks => "search tasks",
            Command::DoneTask => "done task",
            Command::Help => "cmd",
            Command::Quit => "leave",
        }
    }

    /// Extra accepted tokens.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Command::Help => &["help"],
            Command::Quit => &["quit"],
            _ => &[],
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Command::ShowTasks => "Show all tasks",
            Command::AddTask => "Add a new task",
            Command::EditTask => "Edit one field of a task",
            Command::DeleteTask => "Delete a task by id or every task in a category",
            Command::SearchTasks => "Search tasks by keywords, category or status",
            Command::DoneTask => "Mark a task as done",
            Command::Help => "Show this list of commands",
            Command::Quit => "Stop the task manager",
        }
    }

    /// Subcommands prompted for by this command, empty if it takes none.
    pub fn subcommands(&self) -> &'static [Subcommand] {
        match self {
            Command::DeleteTask => &[Subcommand::ById, Subcommand::ByCategory],
            Command::SearchTasks => &[
                Subcommand::ByKeywords,
                Subcommand::ByCategory,
                Subcommand::ByStatus,
            ],
            _ => &[],
        }
    }

    /// Parse a top-level command line, ignoring case.
    pub fn parse(input: &str) -> AppResult<Command> {
        let lowered = input.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|cmd| cmd.token() == lowered || cmd.aliases().contains(&lowered.as_str()))
            .ok_or_else(|| AppError::InvalidCommand(input.to_string()))
    }
}

/// Second-level choices for commands that take one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subcommand {
    ById,
    ByCategory,
    ByKeywords,
    ByStatus,
}

impl Subcommand {
    pub fn token(&self) -> &'static str {
        match self {
            Subcommand::ById => "by id",
            Subcommand::ByCategory => "by category",
            Subcommand::ByKeywords => "by keywords",
            Subcommand::ByStatus => "by status",
        }
    }

    /// Parse a subcommand of `parent`. The match is exact.
    pub fn parse(parent: Command, input: &str) -> AppResult<Subcommand> {
        parent
            .subcommands()
            .iter()
            .copied()
            .find(|sub| sub.token() == input)
            .ok_or_else(|| AppError::InvalidCommand(input.to_string()))
    }

    /// Menu hint listing the subcommands of `parent`, e.g. `'by id', 'by category'`.
    pub fn hint(parent: Command) -> String {
        parent
            .subcommands()
            .iter()
            .map(|sub| format!("'{}'", sub.token()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
