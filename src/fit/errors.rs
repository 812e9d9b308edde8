/// Errors from the collection and fitting pipeline.
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while collecting data files or fitting them.
#[derive(Debug, Error)]
pub enum FitError {
    /// The source directory could not be listed.
    #[error("Cannot read directory '{}': {source}", path.display())]
    DirectoryRead {
        /// The directory that was being listed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The directory was readable but no entry matched the naming pattern.
    #[error("No files in '{}' match the naming pattern {pattern}", path.display())]
    NoMatchingFiles {
        /// The directory that was listed.
        path: PathBuf,
        /// The expected file name pattern.
        pattern: String,
    },

    /// The file name pattern failed to compile.
    #[error("Invalid file name pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The fitting tool could not be run, or exited unsuccessfully.
    #[error("{program} failed on '{}': {reason}", path.display())]
    ExternalTool {
        /// Program name as invoked.
        program: String,
        /// The data file passed to the program.
        path: PathBuf,
        /// What went wrong (spawn error or exit status).
        reason: String,
        /// Captured standard output, possibly empty.
        stdout: String,
        /// Captured standard error, possibly empty.
        stderr: String,
    },

    /// The fitting tool ran but its output lacked a usable value.
    #[error("Cannot read '{key}' from fit output for '{}': {reason}", path.display())]
    OutputParse {
        /// The data file whose output was parsed.
        path: PathBuf,
        /// The key that was missing or malformed.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl FitError {
    /// Whether this error aborts the whole run.
    ///
    /// Collection-phase failures leave nothing to tabulate; per-record fit
    /// failures are reported and the run carries on.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::DirectoryRead { .. } | Self::NoMatchingFiles { .. } | Self::Pattern(_) => true,
            Self::ExternalTool { .. } | Self::OutputParse { .. } => false,
        }
    }

    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(self.is_fatal())
    }

    /// Captured tool output attached to this error, if any.
    #[must_use]
    pub fn captured_output(&self) -> Option<(&str, &str)> {
        match self {
            Self::ExternalTool { stdout, stderr, .. } => Some((stdout.as_str(), stderr.as_str())),
            _ => None,
        }
    }
}
