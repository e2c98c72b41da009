#[allow(clippy::module_inception)]
pub mod error;
pub mod task;

pub use error::{CliError, ConfigError};
pub use task::TaskError;
