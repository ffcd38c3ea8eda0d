//! weerun - host runner for compiled WeeWasm modules
//!
//! Loads a module, instantiates it against the WeeWasm import table (output,
//! objects, boxing), converts command-line arguments for its `main` export
//! and prints the result or `!trap`. The reference model and object store
//! live in `weewasm-runtime`.

pub mod args;
pub mod cli;
pub mod config;
pub mod error;
pub mod imports;
pub mod logging;
pub mod output;
pub mod runner;

// Re-export commonly used items
pub use args::Argument;
pub use cli::{cli_main, print_outcome, TRAP_LINE};
pub use config::RunConfig;
pub use error::HarnessError;
pub use imports::{HostState, IMPORT_MODULE};
pub use logging::{init_logging, LogConfig, LogFormat, LogOutput};
pub use output::{format_results, ResultValue};
pub use runner::{Outcome, RunReport, Runner};
