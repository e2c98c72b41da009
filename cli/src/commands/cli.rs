use clap::Parser;
use quickly_core::api::AppConfig;

#[derive(Parser, Debug)]
#[command(
    name = "quickly",
    version,
    about = "Run one shell command in every configured directory at once"
)]
pub struct Args {
    /// Only run where the checked-out branch name contains this substring.
    #[arg(short = 'b', long = "if-branch", value_name = "SUBSTR")]
    pub if_branch: Option<String>,

    /// Number of directories processed in parallel (default: CPU count).
    #[arg(short = 'j', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Directory list file (default: ~/.quicklyrc).
    #[arg(long, value_name = "PATH")]
    pub rc: Option<String>,

    /// Command to run; `status` prints a one-line git summary per directory.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl Args {
    /// All command words joined into one shell command line.
    pub fn shell_command(&self) -> String {
        self.command.join(" ")
    }

    /// Flags win over config file and environment.
    pub fn apply_to(&self, cfg: &mut AppConfig) {
        if let Some(n) = self.concurrency {
            cfg.runner.concurrency = Some(n);
        }
        if let Some(rc) = &self.rc {
            cfg.directories_file = Some(rc.clone());
        }
    }
}
