use std::io;

use thiserror::Error;

/// Errors raised while preparing or executing a run
#[derive(Error, Debug)]
pub enum MakeSumError {
    /// The run context was given an unusable working directory
    #[error("{0}")]
    InvalidArgument(String),

    /// The run asked to stop with the given exit status
    #[error("terminated with exit code {code}")]
    Exit { code: i32 },

    /// A message template references more placeholders than arguments supplied
    #[error("message expects more than the {given} argument(s) supplied")]
    MissingArgument { given: usize },

    #[error("invalid extension pattern for language `{language}`: {source}")]
    Pattern {
        language: String,
        source: regex::Error,
    },

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl MakeSumError {
    /// Exit status the process should end with for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Exit { code } => *code,
            _ => 1,
        }
    }
}

pub type Result<T, E = MakeSumError> = std::result::Result<T, E>;
