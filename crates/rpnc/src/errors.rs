//! Fatal run errors.
//!
//! Per-token problems are [`rpn_eval::EvalError`]s and only get reported.
//! A `RunError` ends the process.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// A referenced file could not be opened.
    #[error("cannot open `{}`: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    /// A referenced file failed partway through reading.
    #[error("cannot read `{}`: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    /// Interactive input failed.
    #[error("cannot read standard input: {source}")]
    Stdin { source: io::Error },

    /// Bad command-line flag or flag value.
    #[error("{message}")]
    Usage { message: String },
}

impl RunError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Usage { .. } => 2,
            RunError::Open { .. } | RunError::Read { .. } | RunError::Stdin { .. } => 1,
        }
    }
}

#[cold]
pub(crate) fn usage(message: impl Into<String>) -> RunError {
    RunError::Usage {
        message: message.into(),
    }
}
