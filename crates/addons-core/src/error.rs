//! Error taxonomy for setup application and the project helpers

use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions that abort a run with a non-zero exit code.
///
/// Anything not listed here (I/O failures while merging, unreadable template
/// fragments) travels as `anyhow::Error` with context attached.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The working directory has no readable `package.json`
    #[error("package.json not found in {}. Make sure you are in the project directory.", .0.display())]
    NotAProject(PathBuf),

    /// `package.json` exists but is not a usable JSON object
    #[error("Error reading {}: {reason}", path.display())]
    MalformedManifest { path: PathBuf, reason: String },

    /// The catalog root holds no template directories
    #[error("No setup found in {}", .0.display())]
    EmptyCatalog(PathBuf),

    /// Neither the argument nor the interactive answer named a known template
    #[error("Invalid setup: '{0}'")]
    InvalidSelection(String),

    /// A template name passed the selector but its directory is gone
    #[error("Setup '{0}' not found")]
    TemplateNotFound(String),

    #[error("Empty commit message")]
    EmptyCommitMessage,

    /// An external command exited with a non-zero status
    #[error("`{command}` failed with exit code {code}\n{output}")]
    CommandFailed {
        command: String,
        code: i32,
        output: String,
    },
}
