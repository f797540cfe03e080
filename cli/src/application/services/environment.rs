//! Application service — input validation and Gemfile/lockfile discovery.

use std::path::PathBuf;

use anyhow::Result;

use crate::application::ports::{LocalFs, ProgressReporter};
use crate::domain::config::{StepConfig, gemfile_lock_path};
use crate::domain::error::ConfigError;
use crate::domain::invocation::CALABASH_GEM;
use crate::domain::lockfile::extract_pinned_version;

/// Paths that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInputs {
    pub apk_path: PathBuf,
    pub work_dir: Option<PathBuf>,
}

/// What the environment says about calabash-android version selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// Gemfile usable for bundler mode: it exists and so does its lockfile.
    pub gemfile: Option<PathBuf>,
    /// calabash-android version pinned in the Gemfile.lock, if any.
    pub lockfile_pin: Option<String>,
    /// Configured explicit version.
    pub explicit_version: Option<String>,
}

/// Check the required inputs before anything else runs.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the APK is missing or not a file, or if a
/// configured working directory does not exist.
pub fn validate_config(config: &StepConfig, fs: &impl LocalFs) -> Result<ValidatedInputs> {
    let apk_path = config.apk_path.clone().ok_or(ConfigError::MissingApkPath)?;
    if !fs.is_file(&apk_path) {
        return Err(ConfigError::ApkNotFound(apk_path).into());
    }
    if let Some(dir) = &config.work_dir
        && !fs.is_dir(dir)
    {
        return Err(ConfigError::WorkDirNotFound(dir.clone()).into());
    }
    Ok(ValidatedInputs {
        apk_path,
        work_dir: config.work_dir.clone(),
    })
}

/// Locate the Gemfile and its lockfile and read the calabash-android pin.
///
/// A missing Gemfile or Gemfile.lock is a warning, not an error: it only
/// rules out bundler mode.
///
/// # Errors
///
/// Returns [`ConfigError::LockfileUnreadable`] if the lockfile exists but
/// cannot be read.
pub fn resolve_environment(
    config: &StepConfig,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
) -> Result<Environment> {
    let mut env = Environment {
        explicit_version: config.calabash_version.clone(),
        ..Environment::default()
    };

    if let Some(gemfile) = &config.gemfile_path {
        if fs.is_file(gemfile) {
            reporter.detail(&format!("Gemfile exists at: {}", gemfile.display()));
            let lockfile = gemfile_lock_path(gemfile);
            if fs.is_file(&lockfile) {
                reporter.detail(&format!("Gemfile.lock exists at: {}", lockfile.display()));
                let content =
                    fs.read_to_string(&lockfile)
                        .map_err(|e| ConfigError::LockfileUnreadable {
                            path: lockfile.clone(),
                            reason: format!("{e:#}"),
                        })?;
                let pin = extract_pinned_version(&content, CALABASH_GEM);
                match &pin {
                    Some(v) => reporter.detail(&format!("{CALABASH_GEM} version in Gemfile.lock: {v}")),
                    None => reporter.warn(&format!("{CALABASH_GEM} is not pinned in {}", lockfile.display())),
                }
                env.gemfile = Some(gemfile.clone());
                env.lockfile_pin = pin;
            } else {
                reporter.warn(&format!(
                    "Gemfile.lock not found next to Gemfile at: {}",
                    lockfile.display()
                ));
            }
        } else {
            reporter.warn(&format!("Gemfile not found at: {}", gemfile.display()));
        }
    }

    if let Some(version) = &env.explicit_version {
        reporter.detail(&format!("{CALABASH_GEM} version in configs: {version}"));
    }

    Ok(env)
}
