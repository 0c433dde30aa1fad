//! Error types for closure resolution.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a whole resolution.
///
/// Per-path failures (the inspection tool ran but exited non-zero, or printed
/// nothing usable) are not represented here: they count as "no dependencies".
#[derive(Debug, Error)]
pub enum ClosureError {
    /// The seed path was empty.
    #[error("seed path cannot be empty")]
    EmptySeed,

    /// The inspection tool could not be started at all.
    #[error("failed to launch {}: {source}", program.display())]
    ToolLaunch {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ClosureError {
    /// Returns true if the error came from spawning the inspection tool.
    pub fn is_launch_failure(&self) -> bool {
        matches!(self, ClosureError::ToolLaunch { .. })
    }
}

/// Result type for closure operations.
pub type ClosureResult<T> = Result<T, ClosureError>;
