use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::TaskError;

/// Read-only git queries a task needs before or instead of its command.
#[async_trait]
pub trait GitProbe: Send + Sync {
    /// Combined stdout/stderr of `git status --branch --porcelain`.
    async fn status_porcelain(&self, directory: &str) -> Result<String, TaskError>;

    /// Name printed by `git branch --show-current` (empty when detached).
    async fn current_branch(&self, directory: &str) -> Result<String, TaskError>;
}

/// `GitProbe` backed by the `git` binary.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn output(
        &self,
        directory: &str,
        args: &[&str],
    ) -> std::io::Result<std::process::Output> {
        Command::new(&self.program)
            .args(args)
            .current_dir(directory)
            .stdin(Stdio::null())
            .output()
            .await
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

#[async_trait]
impl GitProbe for GitCli {
    async fn status_porcelain(&self, directory: &str) -> Result<String, TaskError> {
        let out = self
            .output(directory, &["status", "--branch", "--porcelain"])
            .await
            .map_err(|e| TaskError::spawn(&self.program, &e))?;

        if !out.status.success() {
            tracing::debug!(
                directory,
                stderr = %String::from_utf8_lossy(&out.stderr).trim(),
                "git status failed"
            );
            return Err(TaskError::SubprocessNonZeroExit {
                code: out.status.code(),
            });
        }

        let mut combined = String::from_utf8_lossy(&out.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&out.stderr));
        Ok(combined)
    }

    async fn current_branch(&self, directory: &str) -> Result<String, TaskError> {
        let out = self
            .output(directory, &["branch", "--show-current"])
            .await
            .map_err(|e| TaskError::BranchLookupFailed(format!("{}: {e}", self.program)))?;

        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();
            let reason = if stderr.is_empty() {
                match out.status.code() {
                    Some(code) => format!("exit status {code}"),
                    None => "terminated by signal".to_string(),
                }
            } else {
                stderr
            };
            return Err(TaskError::BranchLookupFailed(reason));
        }

        Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
    }
}
