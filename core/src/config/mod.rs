mod load;
mod types;

pub use load::{
    apply_env_overrides, create_directory_list, directories_file, get_quickly_data_dir,
    load_default, load_directories, load_from_path, log_directory, parse_directory_list,
    DirectoryList,
};
pub use types::{AppConfig, LoggingConfig, RunnerConfig};
