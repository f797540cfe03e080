//! Command lines as plain data, and the calabash-android invocations built
//! from a [`Resolution`].

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::resolution::{InstallMode, Resolution};

/// Gem this step installs and drives.
pub const CALABASH_GEM: &str = "calabash-android";

/// Environment variable bundler reads to locate the Gemfile.
pub const BUNDLE_GEMFILE_ENV: &str = "BUNDLE_GEMFILE";

/// A program invocation: argv, extra environment, optional working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
    pub cwd: Option<PathBuf>,
}

impl CommandLine {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            cwd: None,
        }
    }

    /// Build from an argv slice. An empty slice yields an empty program.
    #[must_use]
    pub fn from_argv<S: AsRef<str>>(argv: &[S]) -> Self {
        let mut parts = argv.iter().map(|s| s.as_ref().to_string());
        let program = parts.next().unwrap_or_default();
        Self {
            program,
            args: parts.collect(),
            envs: Vec::new(),
            cwd: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn current_dir(mut self, dir: Option<&Path>) -> Self {
        self.cwd = dir.map(Path::to_path_buf);
        self
    }

    /// Prepend `program` to argv: `a b` → `program a b`.
    #[must_use]
    pub fn prefixed(self, program: &str) -> Self {
        let mut args = Vec::with_capacity(self.args.len() + 1);
        args.push(self.program);
        args.extend(self.args);
        Self {
            program: program.to_string(),
            args,
            envs: self.envs,
            cwd: self.cwd,
        }
    }

    /// Full argv, program first.
    #[must_use]
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }

    /// Value of an extra environment variable, if set on this command.
    #[must_use]
    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.envs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Printable form: arguments containing whitespace or quotes are quoted.
impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.argv().into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if part.is_empty() || part.contains(|c: char| c.is_whitespace() || c == '"') {
                write!(f, "\"{}\"", part.replace('"', "\\\""))?;
            } else {
                f.write_str(part)?;
            }
        }
        Ok(())
    }
}

/// Subcommands of calabash-android this step runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalabashAction {
    Resign,
    Run,
}

impl CalabashAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Resign => "resign",
            Self::Run => "run",
        }
    }
}

/// RubyGems version qualifier: `0.9.0` → `_0.9.0_`.
#[must_use]
pub fn version_qualifier(version: &str) -> String {
    format!("_{version}_")
}

/// Build `calabash-android <action> <apk>` for the resolved mode.
///
/// - explicit version: `calabash-android _x.y.z_ <action> <apk>`
/// - bundler: `bundle exec calabash-android <action> <apk>` with
///   `BUNDLE_GEMFILE` set to `gemfile`
/// - latest: `calabash-android <action> <apk>`
#[must_use]
pub fn calabash_command(
    resolution: &Resolution,
    gemfile: Option<&Path>,
    action: CalabashAction,
    apk: &Path,
    work_dir: Option<&Path>,
) -> CommandLine {
    let mut cmd = CommandLine::new(CALABASH_GEM);
    if resolution.mode == InstallMode::ExplicitVersion {
        cmd = cmd.arg(version_qualifier(&resolution.version));
    }
    cmd = cmd
        .arg(action.as_str())
        .arg(apk.display().to_string())
        .current_dir(work_dir);

    if resolution.mode == InstallMode::IsolatedEnvironment {
        cmd = cmd.prefixed("exec").prefixed("bundle");
        if let Some(gemfile) = gemfile {
            cmd = cmd.env(BUNDLE_GEMFILE_ENV, gemfile.display().to_string());
        }
    }
    cmd
}
