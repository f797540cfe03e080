//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::application`,
//! `tokio`, `std::fs`, or `std::process`. All error types implement
//! `thiserror::Error` and convert to `anyhow::Error` via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors raised while validating step inputs. Always fatal, always raised
/// before any tool runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no apk_path parameter specified")]
    MissingApkPath,

    #[error("apk not exist at: {}", .0.display())]
    ApkNotFound(PathBuf),

    #[error("work_dir not exist at: {}", .0.display())]
    WorkDirNotFound(PathBuf),

    #[error("failed to read Gemfile.lock at {}: {reason}", .path.display())]
    LockfileUnreadable { path: PathBuf, reason: String },
}

// ── Tool errors ───────────────────────────────────────────────────────────────

/// Errors from external tool invocations.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("`{command}` failed")]
    Failed { command: String },

    #[error("`{command}` failed:\n{output}")]
    FailedWithOutput { command: String, output: String },
}

// ── Ruby errors ───────────────────────────────────────────────────────────────

/// Errors related to detecting the Ruby installation.
#[derive(Debug, Error)]
pub enum RubyError {
    #[error("unknown ruby installation type (ruby at: {0})")]
    UnknownInstallType(String),
}

// ── Permission errors ─────────────────────────────────────────────────────────

/// Errors raised by the APK permission check.
#[derive(Debug, Error)]
pub enum PermissionError {
    #[error("no build-tools found under {}", .0.display())]
    NoBuildTools(PathBuf),

    #[error(
        "apk does not declare android.permission.INTERNET.\n\n\
calabash-android talks to its test server over the network; add \
<uses-permission android:name=\"android.permission.INTERNET\" /> to AndroidManifest.xml."
    )]
    MissingInternet,
}
