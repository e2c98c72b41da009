//! Task execution and the worker pool that drives a run.
//!
//! ```text
//! directories ─ assign_colors ─> build_tasks ─> Vec<Task>
//!   ↓
//! run_pool: pending queue → N workers → TaskExecutor::execute → results queue
//!   ↓
//! RunSummary (exit code: 0 iff no result carries an error)
//! ```

mod engine;
mod output;
mod scheduler;
pub mod types;

pub use engine::{
    run_tasks, TaskExecutor, DEFAULT_SHELL, DEFAULT_STATUS_DIR_WIDTH, STATUS_COMMAND,
};
pub use output::report_failure;
pub use scheduler::run_pool;
pub use types::{build_tasks, RunSummary, Task, TaskResult};
