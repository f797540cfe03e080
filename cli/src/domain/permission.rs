//! INTERNET permission check: build-tools selection and `aapt` output parsing.

use std::path::{Path, PathBuf};

use crate::domain::invocation::CommandLine;

pub const INTERNET_PERMISSION: &str = "android.permission.INTERNET";

/// `<android_home>/build-tools`.
#[must_use]
pub fn build_tools_dir(android_home: &Path) -> PathBuf {
    android_home.join("build-tools")
}

/// Parse a build-tools directory name (`25.0.2`, `30.0.0-rc1`, `23`) into a
/// comparable version. Missing minor/patch components count as zero.
#[must_use]
pub fn build_tools_version(name: &str) -> Option<semver::Version> {
    if let Ok(v) = semver::Version::parse(name) {
        return Some(v);
    }
    let (core, pre) = match name.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (name, None),
    };
    let mut parts = core.split('.').map(str::parse::<u64>);
    let major = parts.next()?.ok()?;
    let minor = parts.next().transpose().ok()?.unwrap_or(0);
    let patch = parts.next().transpose().ok()?.unwrap_or(0);
    if parts.next().is_some() {
        return None;
    }
    let mut version = semver::Version::new(major, minor, patch);
    if let Some(pre) = pre {
        version.pre = semver::Prerelease::new(pre).ok()?;
    }
    Some(version)
}

/// Highest version-numbered entry; names that are not versions are ignored.
#[must_use]
pub fn latest_build_tools<'a>(names: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    names
        .into_iter()
        .filter_map(|name| build_tools_version(name).map(|v| (v, name)))
        .max_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, name)| name)
}

/// `<build_tools>/aapt dump permissions <apk>`.
#[must_use]
pub fn aapt_permissions_command(build_tools: &Path, apk: &Path) -> CommandLine {
    CommandLine::new(build_tools.join("aapt").display().to_string()).args([
        "dump".to_string(),
        "permissions".to_string(),
        apk.display().to_string(),
    ])
}

/// Whether `aapt dump permissions` output lists the INTERNET permission.
///
/// Handles both `uses-permission: android.permission.INTERNET` and the newer
/// `uses-permission: name='android.permission.INTERNET'` forms.
#[must_use]
pub fn declares_internet_permission(aapt_output: &str) -> bool {
    aapt_output.lines().any(|line| {
        let line = line.trim();
        line.starts_with("uses-permission")
            && line
                .split(|c: char| c.is_whitespace() || c == '\'' || c == '=' || c == ':')
                .any(|token| token == INTERNET_PERMISSION)
    })
}
