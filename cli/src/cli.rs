//! CLI argument parsing with clap derive
//!
//! Every input can come from a flag or from the environment variable the CI
//! pipeline sets for the step. Empty values count as unset.

use clap::Parser;

use crate::app::{AppContext, OutputFlags};
use crate::application::services::step::{StepSummary, report_outcome, run_step};
use crate::domain::config::StepConfig;
use crate::domain::invocation::CALABASH_GEM;
use crate::domain::status::TestResult;
use crate::output::OutputContext;

/// Resign an APK and run its calabash-android UI tests
#[derive(Parser, Debug)]
#[command(name = "calabash-android-uitest", version)]
pub struct Cli {
    /// APK to resign and test
    #[arg(long, env = "apk_path", value_name = "PATH")]
    pub apk_path: Option<String>,

    /// Gemfile that pins calabash-android (enables `bundle exec`)
    #[arg(long, env = "gem_file_path", value_name = "PATH")]
    pub gemfile_path: Option<String>,

    /// calabash-android version to install and use; overrides the Gemfile.lock pin
    #[arg(long, env = "calabash_android_version", value_name = "VERSION")]
    pub calabash_version: Option<String>,

    /// Directory to run `calabash-android resign` and `run` in
    #[arg(long, env = "work_dir", value_name = "DIR")]
    pub work_dir: Option<String>,

    /// Android SDK root; enables the INTERNET permission check
    #[arg(long, env = "ANDROID_HOME", value_name = "DIR")]
    pub android_home: Option<String>,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", value_parser = clap::builder::FalseyValueParser::new())]
    pub no_color: bool,
}

impl Cli {
    /// Normalized step configuration.
    #[must_use]
    pub fn step_config(&self) -> StepConfig {
        StepConfig::from_inputs(
            self.apk_path.clone(),
            self.gemfile_path.clone(),
            self.calabash_version.clone(),
            self.work_dir.clone(),
            self.android_home.clone(),
        )
    }

    /// Execute the step and export its result.
    ///
    /// Failures are printed here, before the result export, so the
    /// diagnostic is never hidden behind an export problem.
    pub async fn run(self) -> TestResult {
        let app = AppContext::new(&OutputFlags {
            no_color: self.no_color,
            quiet: self.quiet,
        });
        let config = self.step_config();
        print_config(&app.output, &config);

        let reporter = app.terminal_reporter();
        let outcome = run_step(&app.runner, &app.fs, &reporter, &config).await;

        match &outcome {
            Ok(summary) => print_summary(&app.output, summary),
            Err(e) => app.output.error(&format!("{e:#}")),
        }
        report_outcome(&app.exporter, &reporter, &outcome).await
    }
}

fn print_config(ctx: &OutputContext, config: &StepConfig) {
    ctx.header("Configs:");
    for (key, value) in config.entries() {
        ctx.kv(key, &value);
    }
}

fn print_summary(ctx: &OutputContext, summary: &StepSummary) {
    ctx.header("Summary:");
    ctx.kv(CALABASH_GEM, &summary.resolution.describe(CALABASH_GEM));
    ctx.kv("keystore", &summary.keystore.display().to_string());
    ctx.success(&format!("The result is: {}", TestResult::Succeeded.as_str()));
}
