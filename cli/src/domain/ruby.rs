//! Ruby installation kinds and the gem/bundler command shapes each one needs.
//!
//! The manager kind is picked once per run; everything here is pure command
//! construction and output parsing.

use std::path::Path;

use regex::Regex;

use crate::domain::invocation::{BUNDLE_GEMFILE_ENV, CommandLine};

/// `which ruby` result for the OS-provided Ruby.
pub const SYSTEM_RUBY_PATH: &str = "/usr/bin/ruby";
/// `which ruby` result for a Homebrew Ruby.
pub const BREW_RUBY_PATH: &str = "/usr/local/bin/ruby";

/// Bundler parallelism and retry flags used for `bundle install`.
pub const BUNDLE_INSTALL_FLAGS: &[&str] = &["--jobs", "20", "--retry", "5"];

/// How Ruby is installed on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RubyManager {
    /// `/usr/bin/ruby`; gem writes need `sudo`.
    System,
    /// Homebrew Ruby under `/usr/local`.
    Brew,
    Rvm,
    /// rbenv; new executables need `rbenv rehash` to show up on `PATH`.
    Rbenv,
}

impl RubyManager {
    /// Classify by the path `which ruby` printed. `None` when the path alone
    /// is not conclusive and version-manager probes are needed.
    #[must_use]
    pub fn from_ruby_path(path: &str) -> Option<Self> {
        match path.trim() {
            SYSTEM_RUBY_PATH => Some(Self::System),
            BREW_RUBY_PATH => Some(Self::Brew),
            _ => None,
        }
    }

    /// Whether `argv` writes to the system gem store and needs `sudo`.
    #[must_use]
    pub fn needs_sudo(self, argv: &[&str]) -> bool {
        if self != Self::System {
            return false;
        }
        let [tool, sub, ..] = argv else {
            return false;
        };
        matches!(*tool, "gem" | "bundle") && matches!(*sub, "install" | "uninstall")
    }

    /// Wrap `cmd` with `sudo` when this manager requires it.
    #[must_use]
    pub fn command(self, cmd: CommandLine) -> CommandLine {
        if self.needs_sudo(&cmd.argv()) {
            cmd.prefixed("sudo")
        } else {
            cmd
        }
    }

    /// Post-install step that makes new executables resolvable, if any.
    #[must_use]
    pub fn rehash_command(self) -> Option<CommandLine> {
        match self {
            Self::Rbenv => Some(CommandLine::from_argv(&["rbenv", "rehash"])),
            _ => None,
        }
    }

    /// `gem install <gem> [-v <version>] --no-document`, plus the rehash step.
    ///
    /// An empty `version` installs the latest release.
    #[must_use]
    pub fn gem_install_commands(self, gem: &str, version: &str) -> Vec<CommandLine> {
        let mut install = CommandLine::new("gem").args(["install", gem]);
        if !version.is_empty() {
            install = install.args(["-v", version]);
        }
        install = install.arg("--no-document");

        let mut commands = vec![self.command(install)];
        commands.extend(self.rehash_command());
        commands
    }

    /// `gem list`, used to query locally installed releases.
    #[must_use]
    pub fn gem_list_command(self) -> CommandLine {
        self.command(CommandLine::from_argv(&["gem", "list"]))
    }

    /// `bundle install` against `gemfile`.
    #[must_use]
    pub fn bundle_install_command(self, gemfile: &Path) -> CommandLine {
        self.command(
            CommandLine::from_argv(&["bundle", "install"])
                .args(BUNDLE_INSTALL_FLAGS.iter().copied())
                .env(BUNDLE_GEMFILE_ENV, gemfile.display().to_string()),
        )
    }
}

impl std::fmt::Display for RubyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::System => "system",
            Self::Brew => "brew",
            Self::Rvm => "rvm",
            Self::Rbenv => "rbenv",
        })
    }
}

/// Versions of `gem` listed in `gem list` output, e.g.
/// `calabash-android (0.9.0, 0.8.4)` → `["0.9.0", "0.8.4"]`.
///
/// `None` when the gem is not listed at all.
#[must_use]
pub fn parse_installed_versions(gem_list_output: &str, gem: &str) -> Option<Vec<String>> {
    let pattern = Regex::new(&format!(r"(?m)^{} \((.*)\)", regex::escape(gem))).ok()?;
    let caps = pattern.captures(gem_list_output)?;
    let versions = caps.get(1)?.as_str();
    Some(versions.split(", ").map(str::to_string).collect())
}

/// Whether `version` is present in the parsed list. Exact string equality;
/// an empty `version` is satisfied by any installed release.
#[must_use]
pub fn version_listed(installed: Option<&[String]>, version: &str) -> bool {
    match installed {
        None => false,
        Some(_) if version.is_empty() => true,
        Some(versions) => versions.iter().any(|v| v == version),
    }
}
