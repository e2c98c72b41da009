//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `quickly_core::api` instead of reaching into internal modules.

pub use crate::config::{
    directories_file, load_default, load_directories, log_directory, AppConfig, DirectoryList,
    LoggingConfig, RunnerConfig,
};
pub use crate::error::{CliError, ConfigError, TaskError};
pub use crate::executor::{
    build_tasks, run_pool, run_tasks, RunSummary, Task, TaskExecutor, TaskResult, STATUS_COMMAND,
};
pub use crate::git::{parse_status, GitCli, GitProbe, GitStatusSummary};
pub use crate::output::{PrefixedWriter, SharedSink};
pub use crate::palette::{assign_colors, ColorToken, Palette, RESET};
pub use crate::runner::force_color;
