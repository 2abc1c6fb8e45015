//! CLI-specific error types
//!
//! All CLI errors are fatal: the process prints the error and exits non-zero.
//! The display form leads with a stable `CASA_CLI_*` code.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::http_server::ConfigError;
use crate::store::StoreError;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("CASA_CLI_CONFIG_ERROR: {0}")]
    Config(#[from] ConfigError),

    #[error("CASA_CLI_IO_ERROR: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CASA_CLI_IO_ERROR: {0}")]
    Output(#[from] io::Error),

    #[error("CASA_CLI_IO_ERROR: JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CASA_CLI_ALREADY_INITIALIZED: config file already exists: {}", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("CASA_CLI_STORE_ERROR: {0}")]
    Store(#[from] StoreError),

    #[error("CASA_CLI_BOOT_FAILED: {0}")]
    BootFailed(String),
}

impl CliError {
    /// Stable code leading the display form
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CASA_CLI_CONFIG_ERROR",
            Self::Io { .. } | Self::Output(_) | Self::Json(_) => "CASA_CLI_IO_ERROR",
            Self::AlreadyInitialized(_) => "CASA_CLI_ALREADY_INITIALIZED",
            Self::Store(_) => "CASA_CLI_STORE_ERROR",
            Self::BootFailed(_) => "CASA_CLI_BOOT_FAILED",
        }
    }

    /// Map an I/O failure on `path`, for use with `map_err`
    pub fn io_at(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
