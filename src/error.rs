//! Error types for pdfium_build.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for build orchestration.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Errors that can stop a build session.
#[derive(Error, Debug)]
pub enum BuildError {
    /// Generic I/O failure (stdin, stdout, current directory).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A filesystem operation on a specific path failed.
    #[error("failed to {action} {}: {source}", .path.display())]
    File {
        /// What was being attempted ("read", "write", "remove", ...).
        action: &'static str,
        /// The path involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The program could not be located or spawned.
    #[error("command not found: {program}")]
    CommandNotFound {
        /// Program name as it was requested.
        program: String,
    },

    /// The program ran but exited unsuccessfully.
    #[error("command `{command}` failed ({status})")]
    CommandFailed {
        /// Full command line.
        command: String,
        /// Exit status as reported by the OS.
        status: String,
    },

    /// A required external tool is not installed.
    #[error("{tool} is not installed or not on PATH")]
    MissingDependency {
        /// Tool name.
        tool: String,
        /// Installation instructions shown to the operator.
        hint: String,
    },

    /// The host operating system has no PDFium target.
    #[error("unsupported operating system: {0}")]
    UnsupportedOs(String),

    /// The PDFium static library expected at this path does not exist.
    #[error("PDFium static library not found: {}", .0.display())]
    LibraryMissing(PathBuf),

    /// Neither a Debug nor a Release library has been built yet.
    #[error("no PDFium static library found, build PDFium first")]
    NoExistingLibrary,

    /// depot_tools is required but its directory does not exist.
    #[error("depot_tools is not installed at {}", .0.display())]
    DepotToolsMissing(PathBuf),

    /// The user's home directory could not be resolved.
    #[error("could not determine the home directory")]
    NoHomeDir,

    /// The operator closed the input stream.
    #[error("operation cancelled by user")]
    Cancelled,
}

impl BuildError {
    pub(crate) fn file(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BuildError::File {
            action,
            path: path.into(),
            source,
        }
    }
}
