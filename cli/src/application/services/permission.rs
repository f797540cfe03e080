//! Application service — verify the APK can reach the calabash test server.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, LocalFs, ProgressReporter};
use crate::domain::error::PermissionError;
use crate::domain::permission::{
    aapt_permissions_command, build_tools_dir, declares_internet_permission, latest_build_tools,
};

/// Check that `apk` declares `android.permission.INTERNET`, using `aapt`
/// from the newest build-tools under `android_home`.
///
/// # Errors
///
/// Returns an error if no build-tools are installed, `aapt` fails, or the
/// permission is missing.
pub async fn check_internet_permission(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    android_home: &Path,
    apk: &Path,
) -> Result<()> {
    let tools_root = build_tools_dir(android_home);
    let entries = fs
        .list_dir(&tools_root)
        .with_context(|| format!("listing {}", tools_root.display()))?;
    let latest = latest_build_tools(entries.iter().map(String::as_str))
        .ok_or_else(|| PermissionError::NoBuildTools(tools_root.clone()))?;
    let build_tools = tools_root.join(latest);
    reporter.detail(&format!("using build-tools: {}", build_tools.display()));

    let aapt = aapt_permissions_command(&build_tools, apk);
    reporter.detail(&format!("$ {aapt}"));
    let out = runner
        .run(&aapt)
        .await
        .context("inspecting apk permissions")?
        .ensure_success(&aapt)?;

    if !declares_internet_permission(&out.output) {
        return Err(PermissionError::MissingInternet.into());
    }
    Ok(())
}
