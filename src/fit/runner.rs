/// The OS process boundary, behind a trait so tests can substitute a fake.
use std::ffi::OsStr;
use std::fmt;
use std::process::Command;

/// Why a program run did not produce usable output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The program could not be started or waited on.
    Spawn(String),
    /// The program ran but exited unsuccessfully.
    Exit(String),
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(msg) => write!(f, "could not run: {msg}"),
            Self::Exit(status) => write!(f, "{status}"),
        }
    }
}

/// A failed program run, with whatever output was captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessFailure {
    pub kind: FailureKind,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessFailure {
    /// A failure before any output existed.
    #[must_use]
    pub fn spawn(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Spawn(message.into()),
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}

/// Runs a program to completion and returns its standard output.
pub trait ProcessRunner {
    /// Run `program` with `args`, blocking until it exits.
    ///
    /// # Errors
    ///
    /// Returns `ProcessFailure` if the program cannot be started or exits
    /// with a non-zero status.
    fn run(&self, program: &str, args: &[&OsStr]) -> Result<String, ProcessFailure>;
}

/// Spawns real subprocesses, inheriting the caller's working directory and
/// environment. `program` is resolved through `PATH`. No timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&OsStr]) -> Result<String, ProcessFailure> {
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| ProcessFailure::spawn(e.to_string()))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if output.status.success() {
            return Ok(stdout);
        }

        Err(ProcessFailure {
            kind: FailureKind::Exit(output.status.to_string()),
            stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
