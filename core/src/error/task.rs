use thiserror::Error;

/// Failure of a single directory's task.
///
/// Every variant is captured at the executor boundary and carried in the
/// task's `TaskResult`; none of them stops the pool.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("no command provided")]
    NoCommand,

    #[error("failed to start {program}: {reason}")]
    SubprocessSpawnFailed { program: String, reason: String },

    #[error("{}", describe_exit(.code))]
    SubprocessNonZeroExit { code: Option<i32> },

    #[error("git status produced no output")]
    EmptyStatusOutput,

    #[error("branch lookup failed: {0}")]
    BranchLookupFailed(String),

    #[error("output stream error: {0}")]
    OutputFailed(String),

    #[error("worker panicked: {0}")]
    WorkerPanicked(String),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}

impl TaskError {
    pub(crate) fn spawn(program: &str, err: &std::io::Error) -> Self {
        Self::SubprocessSpawnFailed {
            program: program.to_string(),
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_zero_exit_reads_like_a_shell_status() {
        let err = TaskError::SubprocessNonZeroExit { code: Some(2) };
        assert_eq!(err.to_string(), "exit status 2");

        let err = TaskError::SubprocessNonZeroExit { code: None };
        assert_eq!(err.to_string(), "terminated by signal");
    }
}
