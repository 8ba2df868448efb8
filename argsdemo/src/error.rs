use std::io;

use argsparser::ParseOutcome;

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// Command line rejected; the message is already formatted for the user.
    #[error("{message}")]
    Usage {
        outcome: ParseOutcome,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, DemoError>;

impl DemoError {
    pub fn exit_code(&self) -> i32 {
        match self {
            DemoError::Usage { .. } => 2,
            DemoError::Io(_) => 1,
        }
    }
}
