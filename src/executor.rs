//! executor - process invocation for catalog, probe, and generator calls
//!
//! Every external call the crate makes goes through [`Executor`], so the
//! transformation and the generators can be driven by canned output in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Mutex;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

use crate::config::SpecConfig;
use crate::error::{Result, SpecError};

/// A program plus its arguments. Never passed through a shell.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShellCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ShellCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// stdout followed by stderr, the way a terminal would show them
    pub fn combined(&self) -> String {
        match (self.stdout.is_empty(), self.stderr.is_empty()) {
            (_, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) => format!("{}\n{}", self.stdout.trim_end(), self.stderr),
        }
    }

    /// stdout of a successful run, or [`SpecError::NonZeroExit`]
    pub fn into_stdout(self, command: &ShellCommand) -> Result<String> {
        if self.is_success() {
            Ok(self.stdout)
        } else {
            Err(SpecError::NonZeroExit {
                program: command.program.clone(),
                code: self.code,
                stderr: self.stderr.trim().to_string(),
            })
        }
    }
}

#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, command: &ShellCommand) -> Result<CommandOutput>;
}

/// Runs commands as child processes with a timeout
#[derive(Clone, Debug)]
pub struct SystemExecutor {
    cwd: Option<PathBuf>,
    timeout: Duration,
}

impl SystemExecutor {
    pub fn new(cwd: Option<PathBuf>, timeout: Duration) -> Self {
        Self { cwd, timeout }
    }

    pub fn from_config(config: &SpecConfig) -> Self {
        Self::new(config.working_dir.clone(), Duration::from_millis(config.timeout_ms))
    }
}

impl Default for SystemExecutor {
    fn default() -> Self {
        Self::from_config(&SpecConfig::default())
    }
}

#[async_trait]
impl Executor for SystemExecutor {
    async fn execute(&self, command: &ShellCommand) -> Result<CommandOutput> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }

        let child = cmd.spawn().map_err(|source| SpecError::Spawn {
            program: command.program.clone(),
            source,
        })?;

        tracing::trace!(command = %command, "spawned");

        match timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(CommandOutput {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            }),
            Ok(Err(e)) => Err(SpecError::Io(e)),
            Err(_) => Err(SpecError::Timeout {
                program: command.program.clone(),
                timeout: self.timeout,
            }),
        }
    }
}

/// Replays canned output keyed by the command's display form and records
/// every call. Unknown commands fail to spawn.
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    responses: HashMap<String, CommandOutput>,
    calls: Mutex<Vec<ShellCommand>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, command: &str, output: CommandOutput) -> Self {
        self.responses.insert(command.to_string(), output);
        self
    }

    pub fn calls(&self) -> Vec<ShellCommand> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Executor for ScriptedExecutor {
    async fn execute(&self, command: &ShellCommand) -> Result<CommandOutput> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(command.clone());
        }
        self.responses
            .get(&command.to_string())
            .cloned()
            .ok_or_else(|| SpecError::Spawn {
                program: command.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no scripted response"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let cmd = ShellCommand::new("composer", ["list", "--format=json"]);
        assert_eq!(cmd.to_string(), "composer list --format=json");
    }

    #[test]
    fn test_combined_output() {
        let out = CommandOutput {
            code: Some(1),
            stdout: String::new(),
            stderr: "ls: symfony.lock: No such file or directory\n".into(),
        };
        assert_eq!(out.combined(), "ls: symfony.lock: No such file or directory\n");

        let both = CommandOutput {
            code: Some(0),
            stdout: "a\n".into(),
            stderr: "b".into(),
        };
        assert_eq!(both.combined(), "a\nb");
    }

    #[test]
    fn test_into_stdout_rejects_failure() {
        let cmd = ShellCommand::new("composer", ["list"]);
        let out = CommandOutput {
            code: Some(255),
            stdout: String::new(),
            stderr: "boom".into(),
        };
        match out.into_stdout(&cmd) {
            Err(SpecError::NonZeroExit { code, stderr, .. }) => {
                assert_eq!(code, Some(255));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_executor_runs_process() {
        let executor = SystemExecutor::default();
        let out = executor
            .execute(&ShellCommand::new("echo", ["hello"]))
            .await
            .unwrap();
        assert!(out.is_success());
        assert_eq!(out.stdout.trim(), "hello");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_executor_uses_cwd() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "x").unwrap();
        let executor = SystemExecutor::new(Some(dir.path().to_path_buf()), Duration::from_secs(5));
        let out = executor
            .execute(&ShellCommand::new("ls", ["marker.txt"]))
            .await
            .unwrap();
        assert_eq!(out.stdout.trim(), "marker.txt");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_executor_timeout() {
        let executor = SystemExecutor::new(None, Duration::from_millis(50));
        let result = executor.execute(&ShellCommand::new("sleep", ["5"])).await;
        assert!(matches!(result, Err(SpecError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let executor = SystemExecutor::default();
        let result = executor
            .execute(&ShellCommand::new("definitely-not-a-real-binary-xyz", Vec::<String>::new()))
            .await;
        assert!(matches!(result, Err(SpecError::Spawn { .. })));
    }

    #[tokio::test]
    async fn test_scripted_executor_records_calls() {
        let executor = ScriptedExecutor::new().respond("echo hi", CommandOutput::success("hi"));
        let out = executor.execute(&ShellCommand::new("echo", ["hi"])).await.unwrap();
        assert_eq!(out.stdout, "hi");
        assert!(executor.execute(&ShellCommand::new("echo", ["bye"])).await.is_err());
        assert_eq!(executor.calls().len(), 2);
    }
}
