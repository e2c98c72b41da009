//! Subprocess side of a task: command rewriting, spawning, and output pumping.
mod command;
mod io_pump;
mod shell;
pub mod types;

pub use command::{color_env, force_color};
pub use shell::run_shell;
pub use types::ShellInvocation;
