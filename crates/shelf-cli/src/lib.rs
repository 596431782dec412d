#![forbid(unsafe_code)]

pub mod cli;
pub mod error;
pub mod input;
pub mod logging;
pub mod output;
pub mod preview;

pub use cli::{run, run_from_env};
pub use error::{CliError, Result};
