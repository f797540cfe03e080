//! Application service — is a gem version already installed?

use anyhow::{Context, Result};

use crate::application::ports::CommandRunner;
use crate::domain::ruby::{RubyManager, parse_installed_versions, version_listed};

/// Whether `version` of `gem` is installed locally.
///
/// Runs `gem list` and matches `<gem> (<v1>, <v2>, ...)` exactly; an empty
/// `version` accepts any installed release. "Not installed" is `Ok(false)`.
///
/// # Errors
///
/// Returns an error only if `gem list` cannot run or exits non-zero.
pub async fn is_version_installed(
    runner: &impl CommandRunner,
    ruby: RubyManager,
    gem: &str,
    version: &str,
) -> Result<bool> {
    let list = ruby.gem_list_command();
    let out = runner
        .run(&list)
        .await
        .with_context(|| format!("listing installed {gem} versions"))?
        .ensure_success(&list)?;
    let installed = parse_installed_versions(&out.output, gem);
    Ok(version_listed(installed.as_deref(), version))
}
