use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::types::{AppConfig, LoggingConfig};

const RC_FILE: &str = ".quicklyrc";

/// Get the default quickly data directory: ~/.quickly
pub fn get_quickly_data_dir() -> Result<PathBuf, ConfigError> {
    home_dir().map(|home| home.join(".quickly"))
}

fn home_dir() -> Result<PathBuf, ConfigError> {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(PathBuf::from)
        .map_err(|_| ConfigError::HomeDir)
}

pub fn load_default() -> Result<AppConfig, ConfigError> {
    // Priority 1: ~/.quickly/config.toml
    let user_config = get_quickly_data_dir()?.join("config.toml");

    // Priority 2: ./quickly.toml
    let local_config = Path::new("quickly.toml");

    let mut cfg = if user_config.exists() {
        load_from_path(&user_config)?
    } else if local_config.exists() {
        load_from_path(local_config)?
    } else {
        AppConfig::default()
    };

    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok())?;
    Ok(cfg)
}

pub fn load_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    let s = std::fs::read_to_string(path).map_err(|e| ConfigError::io("read", path, e))?;
    toml::from_str::<AppConfig>(&s).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Environment variable overrides (highest priority). Blank values are ignored.
pub fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("QUICKLY_CONCURRENCY") {
        let n = v
            .trim()
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidValue {
                key: "QUICKLY_CONCURRENCY",
                value: v.clone(),
            })?;
        cfg.runner.concurrency = Some(n);
    }
    if let Some(v) = get("QUICKLY_SHELL") {
        cfg.runner.shell = v.trim().to_string();
    }
    if let Some(v) = get("QUICKLY_RC") {
        cfg.directories_file = Some(v);
    }
    Ok(())
}

/// Where the directory list lives: the configured file, else `~/.quicklyrc`.
pub fn directories_file(cfg: &AppConfig) -> Result<PathBuf, ConfigError> {
    match cfg
        .directories_file
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        Some(p) => Ok(PathBuf::from(shellexpand::tilde(p).into_owned())),
        None => home_dir().map(|home| home.join(RC_FILE)),
    }
}

/// Where file logs go: the configured directory, else `~/.quickly/logs`.
pub fn log_directory(logging: &LoggingConfig) -> Result<PathBuf, ConfigError> {
    match logging
        .directory
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        Some(d) => Ok(PathBuf::from(shellexpand::tilde(d).into_owned())),
        None => get_quickly_data_dir().map(|dir| dir.join("logs")),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryList {
    pub directories: Vec<String>,
    /// The file did not exist and was seeded with the working directory.
    pub created: bool,
}

/// Read the directory list, creating it with the current directory if missing.
pub fn load_directories(path: &Path) -> Result<DirectoryList, ConfigError> {
    let mut created = false;
    if !path.exists() {
        let cwd = std::env::current_dir().map_err(|e| ConfigError::io("resolve", ".", e))?;
        create_directory_list(path, &cwd)?;
        created = true;
        tracing::info!(path = %path.display(), "created directory list");
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io("read", path, e))?;
    Ok(DirectoryList {
        directories: parse_directory_list(&content),
        created,
    })
}

/// Seed a new directory list with one entry. Fails if the file already exists.
pub fn create_directory_list(path: &Path, initial: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::io("create", parent, e))?;
    }
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| ConfigError::io("create", path, e))?;
    writeln!(file, "{}", initial.display()).map_err(|e| ConfigError::io("write", path, e))
}

/// One directory per line; blank lines and `#` comments are skipped, `~` and
/// `$VAR` are expanded.
pub fn parse_directory_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| match shellexpand::full(line) {
            Ok(expanded) => expanded.into_owned(),
            Err(_) => shellexpand::tilde(line).into_owned(),
        })
        .collect()
}
