//! Interpreter error types.

use task_store::StoreError;
use thiserror::Error;

/// Errors raised while reading and executing a command.
#[derive(Debug, Error)]
pub enum AppError {
    /// Unknown command or subcommand token.
    #[error("Unknown command: '{0}'. Type 'cmd' to list the available commands.")]
    InvalidCommand(String),

    /// A prompted value failed validation.
    #[error("{0}")]
    InvalidInputData(String),

    /// Store error (including lookups that matched nothing).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Console IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input ended in the middle of a command.
    #[error("Input closed")]
    InputClosed,
}

impl AppError {
    /// Whether the interactive loop should report this error and keep going.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Io(_) | Self::InputClosed)
    }
}

/// Result type for interpreter operations.
pub type AppResult<T> = Result<T, AppError>;
