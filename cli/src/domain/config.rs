//! Step input model.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::path::{Path, PathBuf};

// ── Constants ────────────────────────────────────────────────────────────────

/// Lockfile name bundler writes next to a Gemfile.
pub const GEMFILE_LOCK_NAME: &str = "Gemfile.lock";

// ── Config schema ────────────────────────────────────────────────────────────

/// Validated-once, immutable step configuration.
///
/// Every optional field is `None` when its input was missing or empty;
/// an empty string never reaches the rest of the step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepConfig {
    /// APK to resign and test. Required; `None` fails validation.
    pub apk_path: Option<PathBuf>,
    /// Gemfile that enables bundler mode when it pins calabash-android.
    pub gemfile_path: Option<PathBuf>,
    /// Explicit calabash-android version; overrides any Gemfile.lock pin.
    pub calabash_version: Option<String>,
    /// Directory `resign` and `run` execute in.
    pub work_dir: Option<PathBuf>,
    /// Android SDK root, used to find `aapt` for the permission check.
    pub android_home: Option<PathBuf>,
}

impl StepConfig {
    /// Build a config from raw string inputs, dropping empty values.
    #[must_use]
    pub fn from_inputs(
        apk_path: Option<String>,
        gemfile_path: Option<String>,
        calabash_version: Option<String>,
        work_dir: Option<String>,
        android_home: Option<String>,
    ) -> Self {
        Self {
            apk_path: non_empty(apk_path).map(PathBuf::from),
            gemfile_path: non_empty(gemfile_path).map(PathBuf::from),
            calabash_version: non_empty(calabash_version),
            work_dir: non_empty(work_dir).map(PathBuf::from),
            android_home: non_empty(android_home).map(PathBuf::from),
        }
    }

    /// Key/value pairs for the configuration banner printed at start.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        fn show(p: Option<&Path>) -> String {
            p.map(|p| p.display().to_string()).unwrap_or_default()
        }
        vec![
            ("apk_path", show(self.apk_path.as_deref())),
            ("gem_file_path", show(self.gemfile_path.as_deref())),
            (
                "calabash_android_version",
                self.calabash_version.clone().unwrap_or_default(),
            ),
            ("work_dir", show(self.work_dir.as_deref())),
            ("android_home", show(self.android_home.as_deref())),
        ]
    }
}

/// Trim and drop empty values. Whitespace-only counts as empty.
#[must_use]
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `Gemfile.lock` path next to the given Gemfile.
#[must_use]
pub fn gemfile_lock_path(gemfile: &Path) -> PathBuf {
    gemfile
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(GEMFILE_LOCK_NAME)
}
