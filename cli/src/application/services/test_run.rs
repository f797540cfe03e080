//! Application service — resign the APK and run the calabash suite.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ProgressReporter};
use crate::domain::invocation::{CalabashAction, calabash_command};
use crate::domain::resolution::Resolution;

/// Where and how calabash-android runs.
pub struct RunTarget<'a> {
    pub resolution: &'a Resolution,
    pub gemfile: Option<&'a Path>,
    pub apk: &'a Path,
    pub work_dir: Option<&'a Path>,
}

/// Run one calabash-android action with live output.
///
/// # Errors
///
/// Returns an error if the command cannot be spawned or exits non-zero.
pub async fn run_action(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    target: &RunTarget<'_>,
    action: CalabashAction,
) -> Result<()> {
    let cmd = calabash_command(
        target.resolution,
        target.gemfile,
        action,
        target.apk,
        target.work_dir,
    );
    reporter.detail(&format!("$ {cmd}"));
    runner
        .run_streamed(&cmd)
        .await
        .with_context(|| format!("running calabash-android {}", action.as_str()))?
        .ensure_success(&cmd)?;
    Ok(())
}

/// `resign` then `run`. The suite never runs against an unsigned APK.
///
/// # Errors
///
/// Returns an error if either action fails.
pub async fn resign_and_run(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    target: &RunTarget<'_>,
) -> Result<()> {
    reporter.step("Resign apk with debug.keystore...");
    run_action(runner, reporter, target, CalabashAction::Resign).await?;

    reporter.step("Running calabash-android test...");
    run_action(runner, reporter, target, CalabashAction::Run).await
}
