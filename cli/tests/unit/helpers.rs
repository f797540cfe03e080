//! Shared test doubles: a scripted `CommandRunner` backed by an in-memory gem
//! registry, an in-memory `LocalFs`, and recording reporter/exporter.

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;
use calabash_uitest::application::ports::{
    CommandRunner, LocalFs, ProgressReporter, StatusExporter, ToolOutput,
};
use calabash_uitest::domain::CommandLine;

/// Release `gem install` without `-v` resolves to in the fake registry.
pub const LATEST_RELEASE: &str = "0.9.8";

// ── Command runner ───────────────────────────────────────────────────────────

/// How a command was run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Captured,
    Streamed,
    Stdin,
}

/// One recorded invocation.
#[derive(Debug, Clone)]
pub struct Call {
    pub argv: Vec<String>,
    pub envs: Vec<(String, String)>,
    pub cwd: Option<PathBuf>,
    pub mode: Mode,
    pub stdin: Vec<u8>,
}

impl Call {
    pub fn line(&self) -> String {
        self.argv.join(" ")
    }

    pub fn env(&self, key: &str) -> Option<&str> {
        self.envs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Scripted runner. Understands `which ruby`, `rvm -v`, `rbenv -v`,
/// `gem list`, `gem install`, `aapt dump permissions` and treats everything
/// else as a successful no-op. `gem install` writes to the in-memory registry
/// that `gem list` reads.
pub struct FakeRunner {
    pub calls: Mutex<Vec<Call>>,
    ruby_path: String,
    version_manager: Option<&'static str>,
    registry: Mutex<BTreeMap<String, Vec<String>>>,
    aapt_output: String,
    failing: Vec<String>,
}

impl Default for FakeRunner {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            ruby_path: "/usr/local/bin/ruby".to_string(),
            version_manager: None,
            registry: Mutex::new(BTreeMap::new()),
            aapt_output: "package: com.example\nuses-permission: name='android.permission.INTERNET'\n"
                .to_string(),
            failing: Vec::new(),
        }
    }
}

impl FakeRunner {
    /// Brew Ruby, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ruby_path(mut self, path: &str) -> Self {
        self.ruby_path = path.to_string();
        self
    }

    /// `"rvm"` or `"rbenv"`: that probe succeeds, the other fails.
    pub fn with_version_manager(mut self, name: &'static str) -> Self {
        self.version_manager = Some(name);
        self
    }

    pub fn with_installed(self, gem: &str, versions: &[&str]) -> Self {
        self.registry.lock().expect("lock").insert(
            gem.to_string(),
            versions.iter().map(|v| (*v).to_string()).collect(),
        );
        self
    }

    pub fn with_aapt_output(mut self, output: &str) -> Self {
        self.aapt_output = output.to_string();
        self
    }

    /// Any command whose argv line contains `needle` exits non-zero.
    pub fn failing_on(mut self, needle: &str) -> Self {
        self.failing.push(needle.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.calls().iter().map(Call::line).collect()
    }

    pub fn count_containing(&self, needle: &str) -> usize {
        self.lines().iter().filter(|l| l.contains(needle)).count()
    }

    pub fn installed(&self, gem: &str) -> Vec<String> {
        self.registry
            .lock()
            .expect("lock")
            .get(gem)
            .cloned()
            .unwrap_or_default()
    }

    fn record(&self, cmd: &CommandLine, mode: Mode, stdin: &[u8]) -> Vec<String> {
        let argv: Vec<String> = cmd.argv().into_iter().map(String::from).collect();
        self.calls.lock().expect("lock").push(Call {
            argv: argv.clone(),
            envs: cmd.envs.clone(),
            cwd: cmd.cwd.clone(),
            mode,
            stdin: stdin.to_vec(),
        });
        argv
    }

    fn respond(&self, argv: &[String]) -> ToolOutput {
        let line = argv.join(" ");
        if self.failing.iter().any(|needle| line.contains(needle.as_str())) {
            return ToolOutput::failure(format!("{line}: simulated failure"));
        }

        // `sudo gem install ...` behaves like `gem install ...`.
        let args: Vec<&str> = argv
            .iter()
            .map(String::as_str)
            .skip_while(|a| *a == "sudo")
            .collect();

        match args.as_slice() {
            ["which", "ruby"] => ToolOutput::success(format!("{}\n", self.ruby_path)),
            [manager, "-v"] if *manager == "rvm" || *manager == "rbenv" => {
                if self.version_manager == Some(*manager) {
                    ToolOutput::success(format!("{manager} 1.0.0"))
                } else {
                    ToolOutput::failure(format!("{manager}: command not found"))
                }
            }
            ["gem", "list"] => ToolOutput::success(self.render_gem_list()),
            ["gem", "install", gem, rest @ ..] => {
                let version = match rest {
                    ["-v", v, ..] => (*v).to_string(),
                    _ => LATEST_RELEASE.to_string(),
                };
                let mut registry = self.registry.lock().expect("lock");
                let versions = registry.entry((*gem).to_string()).or_default();
                if !versions.contains(&version) {
                    versions.insert(0, version);
                }
                ToolOutput::success(format!("Successfully installed {gem}"))
            }
            [program, "dump", "permissions", _] if program.ends_with("/aapt") => {
                ToolOutput::success(self.aapt_output.clone())
            }
            _ => ToolOutput::success(""),
        }
    }

    fn render_gem_list(&self) -> String {
        let mut out = String::from("\n*** LOCAL GEMS ***\n\n");
        for (gem, versions) in self.registry.lock().expect("lock").iter() {
            out.push_str(&format!("{gem} ({})\n", versions.join(", ")));
        }
        out
    }
}

impl CommandRunner for FakeRunner {
    async fn run(&self, cmd: &CommandLine) -> Result<ToolOutput> {
        let argv = self.record(cmd, Mode::Captured, b"");
        Ok(self.respond(&argv))
    }

    async fn run_streamed(&self, cmd: &CommandLine) -> Result<ToolOutput> {
        let argv = self.record(cmd, Mode::Streamed, b"");
        let out = self.respond(&argv);
        Ok(ToolOutput {
            succeeded: out.succeeded,
            output: String::new(),
        })
    }

    async fn run_with_stdin(&self, cmd: &CommandLine, input: &[u8]) -> Result<ToolOutput> {
        let argv = self.record(cmd, Mode::Stdin, input);
        Ok(self.respond(&argv))
    }
}

/// Runner whose every spawn fails, as if no tool were on `PATH`.
pub struct UnspawnableRunner;

impl CommandRunner for UnspawnableRunner {
    async fn run(&self, cmd: &CommandLine) -> Result<ToolOutput> {
        anyhow::bail!("failed to spawn {}", cmd.program)
    }
    async fn run_streamed(&self, cmd: &CommandLine) -> Result<ToolOutput> {
        anyhow::bail!("failed to spawn {}", cmd.program)
    }
    async fn run_with_stdin(&self, cmd: &CommandLine, _: &[u8]) -> Result<ToolOutput> {
        anyhow::bail!("failed to spawn {}", cmd.program)
    }
}

// ── Filesystem ───────────────────────────────────────────────────────────────

/// In-memory filesystem. Directories are implied by file paths and can also
/// be added explicitly.
pub struct MemoryFs {
    files: BTreeMap<PathBuf, String>,
    dirs: Mutex<BTreeSet<PathBuf>>,
    unreadable: BTreeSet<PathBuf>,
    home: PathBuf,
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self {
            files: BTreeMap::new(),
            dirs: Mutex::new(BTreeSet::new()),
            unreadable: BTreeSet::new(),
            home: PathBuf::from("/home/ci"),
        }
    }
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl AsRef<Path>, content: &str) -> Self {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.files.insert(path, content.to_string());
        self
    }

    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.dirs.lock().expect("lock").insert(path);
        self
    }

    /// File exists but reading it fails.
    pub fn with_unreadable_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.files.insert(path.clone(), String::new());
        self.unreadable.insert(path);
        self
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn dir_created(&self, path: impl AsRef<Path>) -> bool {
        self.dirs.lock().expect("lock").contains(path.as_ref())
    }

    fn add_parents(&self, path: &Path) {
        let mut dirs = self.dirs.lock().expect("lock");
        for ancestor in path.ancestors().skip(1) {
            if !ancestor.as_os_str().is_empty() {
                dirs.insert(ancestor.to_path_buf());
            }
        }
    }
}

impl LocalFs for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        self.is_file(path) || self.is_dir(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.lock().expect("lock").contains(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        if self.unreadable.contains(path) {
            anyhow::bail!("permission denied: {}", path.display());
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no such file: {}", path.display()))
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>> {
        if !self.is_dir(path) {
            anyhow::bail!("no such directory: {}", path.display());
        }
        let dirs = self.dirs.lock().expect("lock");
        let names: BTreeSet<String> = dirs
            .iter()
            .chain(self.files.keys())
            .filter(|p| p.parent() == Some(path))
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        Ok(names.into_iter().collect())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.add_parents(path);
        self.dirs.lock().expect("lock").insert(path.to_path_buf());
        Ok(())
    }

    fn home_dir(&self) -> Result<PathBuf> {
        Ok(self.home.clone())
    }
}

// ── Reporter ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Step,
    Detail,
    Success,
    Warn,
    Error,
}

#[derive(Default)]
pub struct RecordingReporter {
    pub events: Mutex<Vec<(Level, String)>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.events
            .lock()
            .expect("lock")
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn warned_about(&self, needle: &str) -> bool {
        self.messages(Level::Warn).iter().any(|m| m.contains(needle))
    }

    fn push(&self, level: Level, message: &str) {
        self.events
            .lock()
            .expect("lock")
            .push((level, message.to_string()));
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.push(Level::Step, message);
    }
    fn detail(&self, message: &str) {
        self.push(Level::Detail, message);
    }
    fn success(&self, message: &str) {
        self.push(Level::Success, message);
    }
    fn warn(&self, message: &str) {
        self.push(Level::Warn, message);
    }
    fn error(&self, message: &str) {
        self.push(Level::Error, message);
    }
}

// ── Exporter ─────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingExporter {
    pub exports: Mutex<Vec<(String, String)>>,
    pub fail: bool,
}

impl RecordingExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn exported(&self) -> Vec<(String, String)> {
        self.exports.lock().expect("lock").clone()
    }
}

impl StatusExporter for RecordingExporter {
    async fn export(&self, key: &str, value: &str) -> Result<()> {
        self.exports
            .lock()
            .expect("lock")
            .push((key.to_string(), value.to_string()));
        if self.fail {
            anyhow::bail!("envman: command not found");
        }
        Ok(())
    }
}
