//! Application service — detect how Ruby is installed.

use anyhow::{Context, Result};

use crate::application::ports::CommandRunner;
use crate::domain::error::RubyError;
use crate::domain::invocation::CommandLine;
use crate::domain::ruby::RubyManager;

/// Pick the [`RubyManager`] for this host.
///
/// `which ruby` decides system and Homebrew installs; otherwise the first of
/// `rvm -v` / `rbenv -v` that succeeds wins.
///
/// # Errors
///
/// Returns an error if `which ruby` cannot run or fails, or if no known
/// installation type matches.
pub async fn detect_ruby_manager(runner: &impl CommandRunner) -> Result<RubyManager> {
    let which = CommandLine::from_argv(&["which", "ruby"]);
    let out = runner
        .run(&which)
        .await
        .context("locating ruby")?
        .ensure_success(&which)?;
    let ruby_path = out.output.trim().to_string();

    if let Some(manager) = RubyManager::from_ruby_path(&ruby_path) {
        return Ok(manager);
    }
    for (argv, manager) in [
        (["rvm", "-v"], RubyManager::Rvm),
        (["rbenv", "-v"], RubyManager::Rbenv),
    ] {
        if probe(runner, &CommandLine::from_argv(&argv)).await {
            return Ok(manager);
        }
    }
    Err(RubyError::UnknownInstallType(ruby_path).into())
}

/// `true` if the command runs and exits zero. Spawn errors count as absent.
async fn probe(runner: &impl CommandRunner, cmd: &CommandLine) -> bool {
    matches!(runner.run(cmd).await, Ok(out) if out.succeeded)
}
