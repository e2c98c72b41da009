use crate::error::TaskError;
use crate::palette::ColorToken;

/// Outcome of one task. Output is streamed live, so only pass/fail travels back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResult {
    pub directory: String,
    pub color: ColorToken,

    /// Error (if any); the only field the run verdict looks at
    pub error: Option<TaskError>,

    /// True when the branch filter did not match and nothing ran
    pub skipped: bool,

    /// Execution duration in milliseconds
    pub duration_ms: u64,
}

impl TaskResult {
    pub fn ok(directory: impl Into<String>, color: ColorToken) -> Self {
        Self {
            directory: directory.into(),
            color,
            error: None,
            skipped: false,
            duration_ms: 0,
        }
    }

    pub fn skipped(directory: impl Into<String>, color: ColorToken) -> Self {
        Self {
            skipped: true,
            ..Self::ok(directory, color)
        }
    }

    pub fn failed(directory: impl Into<String>, color: ColorToken, error: TaskError) -> Self {
        Self {
            error: Some(error),
            ..Self::ok(directory, color)
        }
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate over every task of a run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of tasks submitted
    pub total: usize,

    /// Number of results carrying an error
    pub failed: usize,

    /// Number of results skipped by the branch filter
    pub skipped: usize,

    /// Total wall-clock duration in milliseconds
    pub duration_ms: u64,

    /// Results in completion order
    pub results: Vec<TaskResult>,
}

impl RunSummary {
    pub(crate) fn record(&mut self, result: TaskResult) {
        if result.error.is_some() {
            self.failed += 1;
        }
        if result.skipped {
            self.skipped += 1;
        }
        self.results.push(result);
    }

    /// Failure iff at least one result carries an error.
    pub fn success(&self) -> bool {
        self.failed == 0
    }

    pub fn exit_code(&self) -> i32 {
        if self.success() {
            0
        } else {
            1
        }
    }
}
