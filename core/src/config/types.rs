use serde::{Deserialize, Serialize};

use crate::executor::{DEFAULT_SHELL, DEFAULT_STATUS_DIR_WIDTH};
use crate::palette::Palette;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory list file; defaults to `~/.quicklyrc`.
    #[serde(default)]
    pub directories_file: Option<String>,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub runner: RunnerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a daily file under `directory` (`~/.quickly/logs` if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "warn" or "quickly_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

// stdout belongs to the subprocesses; keep diagnostics quiet unless asked.
fn default_logging_level() -> String {
    "warn".to_string()
}

impl LoggingConfig {
    /// Logging is on and has somewhere to go.
    pub fn is_active(&self) -> bool {
        self.enabled && (self.console || self.file)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Worker count; unset or 0 means one per CPU.
    #[serde(default)]
    pub concurrency: Option<usize>,

    #[serde(default = "default_shell")]
    pub shell: String,

    #[serde(default = "default_status_dir_width")]
    pub status_dir_width: usize,

    /// Rewrite `ls`/`grep`/`git` and set color env vars for subprocesses.
    #[serde(default = "default_force_color")]
    pub force_color: bool,

    /// Twelve colors instead of six.
    #[serde(default)]
    pub extended_palette: bool,
}

fn default_shell() -> String {
    DEFAULT_SHELL.to_string()
}

fn default_status_dir_width() -> usize {
    DEFAULT_STATUS_DIR_WIDTH
}

fn default_force_color() -> bool {
    true
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            concurrency: None,
            shell: default_shell(),
            status_dir_width: default_status_dir_width(),
            force_color: default_force_color(),
            extended_palette: false,
        }
    }
}

impl RunnerConfig {
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency
            .filter(|n| *n > 0)
            .unwrap_or_else(num_cpus::get)
    }

    pub fn palette(&self) -> Palette {
        if self.extended_palette {
            Palette::extended()
        } else {
            Palette::standard()
        }
    }
}
