//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `TokioCommandRunner` is the production implementation that uses tokio
//! for process execution. No timeout is applied: the step waits for every
//! tool to exit on its own.

use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use crate::application::ports::{CommandRunner, ToolOutput};
use crate::domain::invocation::CommandLine;

/// Production `CommandRunner` backed by `tokio::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioCommandRunner;

impl TokioCommandRunner {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// `tokio::process::Command` for `cmd`, with its env and working directory.
fn command(cmd: &CommandLine) -> Command {
    let mut command = Command::new(&cmd.program);
    command.args(&cmd.args).kill_on_drop(true);
    for (key, value) in &cmd.envs {
        command.env(key, value);
    }
    if let Some(dir) = &cmd.cwd {
        command.current_dir(dir);
    }
    command
}

async fn drain<R: AsyncRead + Unpin>(handle: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut h) = handle {
        let _ = h.read_to_end(&mut buf).await;
    }
    buf
}

/// Wait for `child` while reading stdout/stderr concurrently. Reading after
/// `wait()` deadlocks once a pipe buffer fills.
async fn collect(mut child: tokio::process::Child, program: &str) -> Result<ToolOutput> {
    let stdout_handle = child.stdout.take();
    let stderr_handle = child.stderr.take();
    let (status, stdout, stderr) =
        tokio::join!(child.wait(), drain(stdout_handle), drain(stderr_handle));
    let status = status.with_context(|| format!("waiting for {program}"))?;

    let mut output = String::from_utf8_lossy(&stdout).into_owned();
    output.push_str(&String::from_utf8_lossy(&stderr));
    Ok(ToolOutput {
        succeeded: status.success(),
        output,
    })
}

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, cmd: &CommandLine) -> Result<ToolOutput> {
        let child = command(cmd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to spawn {}", cmd.program))?;
        collect(child, &cmd.program).await
    }

    async fn run_streamed(&self, cmd: &CommandLine) -> Result<ToolOutput> {
        let mut child = command(cmd)
            .spawn()
            .with_context(|| format!("failed to spawn {}", cmd.program))?;
        let status = child
            .wait()
            .await
            .with_context(|| format!("waiting for {}", cmd.program))?;
        Ok(ToolOutput {
            succeeded: status.success(),
            output: String::new(),
        })
    }

    async fn run_with_stdin(&self, cmd: &CommandLine, input: &[u8]) -> Result<ToolOutput> {
        let mut child = command(cmd)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to spawn {}", cmd.program))?;

        // Write stdin in a spawned task to avoid deadlock with stdout/stderr reads
        let stdin_handle = child.stdin.take();
        let input_owned = input.to_vec();
        let stdin_task = tokio::spawn(async move {
            if let Some(mut stdin) = stdin_handle {
                use tokio::io::AsyncWriteExt;
                let _ = stdin.write_all(&input_owned).await;
            }
        });

        let result = collect(child, &cmd.program).await;
        let _ = stdin_task.await;
        result
    }
}
