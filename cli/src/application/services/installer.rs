//! Application service — make the resolved calabash-android available.

use std::path::Path;

use anyhow::Result;

use crate::application::ports::{CommandRunner, ProgressReporter};
use crate::application::services::gem_query::is_version_installed;
use crate::domain::invocation::{CALABASH_GEM, CommandLine};
use crate::domain::resolution::{InstallMode, Resolution};
use crate::domain::ruby::RubyManager;

/// What [`ensure_installed`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The pinned version was already installed; nothing ran.
    AlreadyInstalled,
    /// `gem install` (and any rehash) ran.
    GemInstalled,
    /// `bundle install` ran against the Gemfile.
    Bundled,
}

/// Run `commands` in order, echoing each one. Stops at the first failure.
///
/// # Errors
///
/// Returns an error if a command cannot be spawned or exits non-zero.
pub async fn run_commands(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    commands: &[CommandLine],
) -> Result<()> {
    for cmd in commands {
        reporter.detail(&format!("$ {cmd}"));
        runner.run(cmd).await?.ensure_success(cmd)?;
    }
    Ok(())
}

/// Install `gem` at `version` (empty = latest) through the manager's
/// install strategy.
///
/// # Errors
///
/// Returns an error if any install step fails.
pub async fn install(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    ruby: RubyManager,
    gem: &str,
    version: &str,
) -> Result<()> {
    run_commands(runner, reporter, &ruby.gem_install_commands(gem, version)).await
}

/// Reconcile the installed state with `resolution`. Installs at most once.
///
/// - explicit version: query `gem list` first, install only if missing
/// - bundler: always `bundle install`, which reconciles on its own
/// - latest: always install unpinned
///
/// # Errors
///
/// Returns an error if the query or any install step fails, or if bundler
/// mode is requested without a Gemfile.
pub async fn ensure_installed(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    ruby: RubyManager,
    resolution: &Resolution,
    gemfile: Option<&Path>,
) -> Result<InstallOutcome> {
    match resolution.mode {
        InstallMode::IsolatedEnvironment => {
            let gemfile = gemfile
                .ok_or_else(|| anyhow::anyhow!("bundler mode selected without a Gemfile"))?;
            run_commands(runner, reporter, &[ruby.bundle_install_command(gemfile)]).await?;
            Ok(InstallOutcome::Bundled)
        }
        InstallMode::ExplicitVersion => {
            let version = resolution.version.as_str();
            if is_version_installed(runner, ruby, CALABASH_GEM, version).await? {
                reporter.detail(&format!("{CALABASH_GEM} {version} installed"));
                return Ok(InstallOutcome::AlreadyInstalled);
            }
            install(runner, reporter, ruby, CALABASH_GEM, version).await?;
            Ok(InstallOutcome::GemInstalled)
        }
        InstallMode::LatestGlobal => {
            install(runner, reporter, ruby, CALABASH_GEM, "").await?;
            Ok(InstallOutcome::GemInstalled)
        }
    }
}
