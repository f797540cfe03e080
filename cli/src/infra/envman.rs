//! `envman`-backed implementation of the `StatusExporter` port.
//!
//! The value is passed on stdin (`envman add --key <KEY>`), never on argv.

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, StatusExporter};
use crate::domain::invocation::CommandLine;

/// Exports pipeline values with `envman add`.
pub struct EnvmanExporter<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> EnvmanExporter<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

/// `envman add --key <key>`.
#[must_use]
pub fn envman_add_command(key: &str) -> CommandLine {
    CommandLine::from_argv(&["envman", "add", "--key", key])
}

impl<R: CommandRunner> StatusExporter for EnvmanExporter<R> {
    async fn export(&self, key: &str, value: &str) -> Result<()> {
        let cmd = envman_add_command(key);
        self.runner
            .run_with_stdin(&cmd, value.as_bytes())
            .await
            .with_context(|| format!("exporting {key}"))?
            .ensure_success(&cmd)?;
        Ok(())
    }
}
