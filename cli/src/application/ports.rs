//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`
//! or `crate::output`.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::domain::error::ToolError;
use crate::domain::invocation::CommandLine;

// ── Value Types ───────────────────────────────────────────────────────────────

/// Narrow result of an external tool invocation. Services decide on this
/// alone and never see process internals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// `true` when the process exited with status zero.
    pub succeeded: bool,
    /// Combined stdout and stderr. Empty for streamed invocations.
    pub output: String,
}

impl ToolOutput {
    #[must_use]
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            output: output.into(),
        }
    }

    #[must_use]
    pub fn failure(output: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            output: output.into(),
        }
    }

    /// Turn a non-zero exit into a [`ToolError`] naming `cmd`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tool did not succeed.
    pub fn ensure_success(self, cmd: &CommandLine) -> Result<Self> {
        if self.succeeded {
            return Ok(self);
        }
        let output = self.output.trim();
        let err = if output.is_empty() {
            ToolError::Failed {
                command: cmd.to_string(),
            }
        } else {
            ToolError::FailedWithOutput {
                command: cmd.to_string(),
                output: output.to_string(),
            }
        };
        Err(err.into())
    }
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or faked.
///
/// None of the methods apply a timeout: a hanging tool hangs the step.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a command and capture its combined output.
    ///
    /// # Errors
    ///
    /// Returns an error only if the process cannot be spawned or awaited;
    /// a non-zero exit is reported through [`ToolOutput::succeeded`].
    async fn run(&self, cmd: &CommandLine) -> Result<ToolOutput>;

    /// Run a command with inherited stdio so its output streams live.
    async fn run_streamed(&self, cmd: &CommandLine) -> Result<ToolOutput>;

    /// Run a command with stdin piped from `input`.
    async fn run_with_stdin(&self, cmd: &CommandLine, input: &[u8]) -> Result<ToolOutput>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit a section header for a new stage.
    fn step(&self, message: &str);
    /// Emit a secondary line under the current stage.
    fn detail(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
    /// Emit a problem that must reach the log even in quiet mode.
    fn error(&self, message: &str);
}

// ── Pipeline Status Port ──────────────────────────────────────────────────────

/// Exports key/value results to the enclosing CI pipeline.
#[allow(async_fn_in_trait)]
pub trait StatusExporter {
    /// Publish `value` under `key`.
    async fn export(&self, key: &str, value: &str) -> Result<()>;
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Abstracts the handful of filesystem queries the step makes.
pub trait LocalFs {
    /// `true` if `path` exists (file, directory, or anything else).
    fn exists(&self, path: &Path) -> bool;
    /// `true` if `path` is a regular file.
    fn is_file(&self, path: &Path) -> bool;
    /// `true` if `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;
    /// Read a UTF-8 file.
    fn read_to_string(&self, path: &Path) -> Result<String>;
    /// Names of the entries directly under `path`.
    fn list_dir(&self, path: &Path) -> Result<Vec<String>>;
    /// Create `path` and any missing parents.
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    /// The current user's home directory.
    fn home_dir(&self) -> Result<PathBuf>;
}
