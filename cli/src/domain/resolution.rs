//! Version / install-mode decision.
//!
//! Pure and total: every input combination maps to exactly one mode.

use std::fmt;

/// How calabash-android is installed and invoked for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMode {
    /// A global gem pinned to the configured version (`calabash-android _x.y.z_`).
    ExplicitVersion,
    /// `bundle install` + `bundle exec` against the configured Gemfile.
    IsolatedEnvironment,
    /// The latest global gem, invoked unqualified.
    LatestGlobal,
}

impl fmt::Display for InstallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ExplicitVersion => "explicit version",
            Self::IsolatedEnvironment => "bundler",
            Self::LatestGlobal => "latest",
        })
    }
}

/// Outcome of [`decide_mode`]. Computed once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Effective version. Empty means "latest".
    ///
    /// In [`InstallMode::IsolatedEnvironment`] this is the lockfile pin, kept
    /// for display; bundler resolves the exact version itself.
    pub version: String,
    pub mode: InstallMode,
}

impl Resolution {
    #[must_use]
    pub fn is_latest(&self) -> bool {
        self.version.is_empty()
    }

    /// Human summary, e.g. `calabash-android 0.9.0 (bundler)`.
    #[must_use]
    pub fn describe(&self, gem: &str) -> String {
        if self.is_latest() {
            format!("{gem} latest version")
        } else {
            format!("{gem} {} ({})", self.version, self.mode)
        }
    }
}

/// Pick the install mode.
///
/// Precedence, strictly in order:
/// 1. a non-empty explicit version always wins, even when a Gemfile pins one;
/// 2. a present manifest with a lockfile pin selects bundler;
/// 3. otherwise the latest global release.
#[must_use]
pub fn decide_mode(
    explicit_version: Option<&str>,
    manifest_present: bool,
    lockfile_pin: Option<&str>,
) -> Resolution {
    if let Some(version) = explicit_version.filter(|v| !v.is_empty()) {
        return Resolution {
            version: version.to_string(),
            mode: InstallMode::ExplicitVersion,
        };
    }
    if manifest_present && let Some(pin) = lockfile_pin.filter(|p| !p.is_empty()) {
        return Resolution {
            version: pin.to_string(),
            mode: InstallMode::IsolatedEnvironment,
        };
    }
    Resolution {
        version: String::new(),
        mode: InstallMode::LatestGlobal,
    }
}
