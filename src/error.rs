//! Harness errors
//!
//! These are failures of the run itself (bad config, unloadable module,
//! unusable entry point). Traps raised while `main` executes are not errors
//! here: they are an ordinary `Outcome`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("{0}")]
    Usage(String),

    #[error("failed to read config {}: {source}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("failed to configure engine: {0}")]
    Engine(String),

    #[error("failed to load {path}: {message}")]
    Compile { path: String, message: String },

    #[error("failed to instantiate module: {0}")]
    Instantiate(String),

    #[error("module has no `{0}` export")]
    MissingEntry(String),

    #[error("unsupported {position} type `{ty}` on `{entry}`")]
    UnsupportedParam {
        entry: String,
        position: String,
        ty: String,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl HarnessError {
    pub(crate) fn compile(path: impl Into<String>, err: &anyhow::Error) -> Self {
        Self::Compile {
            path: path.into(),
            message: format!("{:#}", err),
        }
    }
}
