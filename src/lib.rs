//! Locate documentation files a summary could be generated for.
//!
//! A run resolves a target directory, walks it for documents of the chosen
//! language (matched by file name) and reports what it found.

pub mod cli;
pub mod config;
pub mod console;
pub mod context;
pub mod error;
pub mod scanner;
pub mod stats;

pub use cli::Options;
pub use config::{CONFIG, Config, Language, Palette};
pub use console::{Console, Level};
pub use context::RunContext;
pub use error::{MakeSumError, Result};
