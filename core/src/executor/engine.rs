use std::sync::Arc;
use std::time::Instant;

use crate::error::TaskError;
use crate::git::{parse_status, render_status_line, GitCli, GitProbe};
use crate::output::{PrefixedWriter, SharedSink};
use crate::runner::{color_env, force_color, run_shell, ShellInvocation};

use super::output::report_failure;
use super::scheduler::run_pool;
use super::types::{RunSummary, Task, TaskResult};

/// Pseudo-command answered with a one-line git summary instead of a shell.
pub const STATUS_COMMAND: &str = "status";

pub const DEFAULT_SHELL: &str = "bash";
pub const DEFAULT_STATUS_DIR_WIDTH: usize = 25;

/// Runs a single task: branch gate, then `status` summary or shell command.
pub struct TaskExecutor {
    git: Arc<dyn GitProbe>,
    sink: SharedSink,
    shell: String,
    force_color: bool,
    status_dir_width: usize,
}

impl TaskExecutor {
    pub fn new(sink: SharedSink) -> Self {
        Self {
            git: Arc::new(GitCli::default()),
            sink,
            shell: DEFAULT_SHELL.to_string(),
            force_color: true,
            status_dir_width: DEFAULT_STATUS_DIR_WIDTH,
        }
    }

    pub fn with_git(mut self, git: Arc<dyn GitProbe>) -> Self {
        self.git = git;
        self
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn with_force_color(mut self, enabled: bool) -> Self {
        self.force_color = enabled;
        self
    }

    pub fn with_status_dir_width(mut self, width: usize) -> Self {
        self.status_dir_width = width;
        self
    }

    pub fn sink(&self) -> &SharedSink {
        &self.sink
    }

    /// Never fails: every error ends up in the returned result.
    #[tracing::instrument(name = "executor.task", skip(self, task), fields(dir = %task.directory))]
    pub async fn execute(&self, task: &Task) -> TaskResult {
        let started_at = Instant::now();
        let result = match self.try_execute(task).await {
            Ok(true) => TaskResult::ok(&task.directory, task.color),
            Ok(false) => TaskResult::skipped(&task.directory, task.color),
            Err(err) => {
                tracing::debug!(error = %err, "task failed");
                TaskResult::failed(&task.directory, task.color, err)
            }
        };
        let duration_ms = started_at.elapsed().as_millis() as u64;
        tracing::debug!(duration_ms, skipped = result.skipped, "task finished");
        result.with_duration_ms(duration_ms)
    }

    /// `Ok(false)` means the branch filter skipped the directory.
    async fn try_execute(&self, task: &Task) -> Result<bool, TaskError> {
        let command = task.command.trim();
        if command.is_empty() {
            return Err(TaskError::NoCommand);
        }

        if let Some(filter) = task.branch_filter.as_deref() {
            let branch = self.git.current_branch(&task.directory).await?;
            if !branch.contains(filter) {
                tracing::debug!(branch = %branch, filter, "branch filter did not match");
                return Ok(false);
            }
        }

        if command == STATUS_COMMAND {
            self.print_status(task).await?;
            return Ok(true);
        }

        let command = if self.force_color {
            force_color(command)
        } else {
            command.to_string()
        };
        let mut invocation = ShellInvocation::new(&self.shell, command, &task.directory);
        if self.force_color {
            invocation = invocation.with_envs(color_env());
        }

        let writer = PrefixedWriter::new(&task.directory, task.color, self.sink.clone());
        run_shell(&invocation, writer).await?;
        Ok(true)
    }

    async fn print_status(&self, task: &Task) -> Result<(), TaskError> {
        let raw = self.git.status_porcelain(&task.directory).await?;
        let summary = parse_status(&raw)?;
        let line = render_status_line(
            &task.directory,
            task.color,
            &summary,
            self.status_dir_width,
        );
        self.sink
            .write_line(line.as_bytes())
            .map_err(|e| TaskError::OutputFailed(e.to_string()))
    }
}

/// Run every task on a pool of `concurrency` workers.
///
/// Failed results are printed once, prefixed with their directory, as they
/// arrive. The returned summary is the authority for the exit code.
pub async fn run_tasks(
    executor: Arc<TaskExecutor>,
    tasks: Vec<Task>,
    concurrency: usize,
) -> RunSummary {
    let sink = executor.sink().clone();
    run_pool(
        tasks,
        concurrency,
        move |task: Task| {
            let executor = executor.clone();
            async move { executor.execute(&task).await }
        },
        move |result: &TaskResult| report_failure(&sink, result),
    )
    .await
}
