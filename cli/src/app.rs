//! Application context — the production wiring of every port.
//!
//! `AppContext` is constructed once in `Cli::run()`; tests build services
//! directly against fakes instead.

use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::envman::EnvmanExporter;
use crate::infra::fs::LocalFs;
use crate::output::{OutputContext, TerminalReporter};

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

/// Unified application context.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Process runner for every external tool.
    pub runner: TokioCommandRunner,
    /// Local filesystem probes.
    pub fs: LocalFs,
    /// Pipeline result exporter.
    pub exporter: EnvmanExporter<TokioCommandRunner>,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: &OutputFlags) -> Self {
        let runner = TokioCommandRunner::new();
        Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            runner,
            fs: LocalFs,
            exporter: EnvmanExporter::new(runner),
        }
    }

    /// Returns a `TerminalReporter` that implements `ProgressReporter`.
    #[must_use]
    pub fn terminal_reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }
}
