//! Application service — the whole step, start to finish.
//!
//! Stages run strictly in order; the first error aborts the rest and is
//! handed to [`report_outcome`], the single failure path.

use std::path::PathBuf;

use anyhow::Result;

use crate::application::ports::{CommandRunner, LocalFs, ProgressReporter, StatusExporter};
use crate::application::services::environment::{resolve_environment, validate_config};
use crate::application::services::installer::{InstallOutcome, ensure_installed};
use crate::application::services::keystore::locate_or_generate;
use crate::application::services::permission::check_internet_permission;
use crate::application::services::ruby_env::detect_ruby_manager;
use crate::application::services::test_run::{RunTarget, resign_and_run};
use crate::domain::config::StepConfig;
use crate::domain::invocation::CALABASH_GEM;
use crate::domain::resolution::{Resolution, decide_mode};
use crate::domain::status::{RESULT_KEY, TestResult};

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSummary {
    pub resolution: Resolution,
    pub install: InstallOutcome,
    pub keystore: PathBuf,
}

/// Validate, resolve, install, sign and run.
///
/// # Errors
///
/// Returns the first fatal error from any stage.
pub async fn run_step(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    config: &StepConfig,
) -> Result<StepSummary> {
    let inputs = validate_config(config, fs)?;

    if let Some(android_home) = &config.android_home {
        reporter.step("Checking apk for android.permission.INTERNET...");
        check_internet_permission(runner, fs, reporter, android_home, &inputs.apk_path).await?;
        reporter.success("apk declares android.permission.INTERNET");
    } else {
        reporter.detail("android_home not set, skipping INTERNET permission check");
    }

    reporter.step(&format!("Determining {CALABASH_GEM} version..."));
    let ruby = detect_ruby_manager(runner).await?;
    reporter.detail(&format!("ruby installation: {ruby}"));
    let env = resolve_environment(config, fs, reporter)?;
    let resolution = decide_mode(
        env.explicit_version.as_deref(),
        env.gemfile.is_some(),
        env.lockfile_pin.as_deref(),
    );
    reporter.success(&format!("using {}", resolution.describe(CALABASH_GEM)));

    reporter.step(&format!("Installing {CALABASH_GEM} gem..."));
    let install = ensure_installed(runner, reporter, ruby, &resolution, env.gemfile.as_deref()).await?;

    reporter.step("Search for debug.keystore...");
    let keystore = locate_or_generate(runner, fs, reporter).await?;

    let target = RunTarget {
        resolution: &resolution,
        gemfile: env.gemfile.as_deref(),
        apk: &inputs.apk_path,
        work_dir: inputs.work_dir.as_deref(),
    };
    resign_and_run(runner, reporter, &target).await?;

    Ok(StepSummary {
        resolution,
        install,
        keystore,
    })
}

/// Export the run's result to the pipeline.
///
/// An export failure is reported on stderr, quiet or not, but never replaces
/// the original error or turns a passing run into a failing one.
pub async fn report_outcome<T>(
    exporter: &impl StatusExporter,
    reporter: &impl ProgressReporter,
    outcome: &Result<T>,
) -> TestResult {
    let result = if outcome.is_ok() {
        TestResult::Succeeded
    } else {
        TestResult::Failed
    };
    if let Err(e) = exporter.export(RESULT_KEY, result.as_str()).await {
        reporter.error(&format!("Failed to export environment: {RESULT_KEY}, error: {e:#}"));
    }
    result
}
