//! CLI assembly: resolve the directory list, build one task per directory, run the pool.
use std::sync::Arc;

use quickly_core::api as core_api;

use crate::commands::cli::Args;

/// `sink` receives task output; `notices` receives the tool's own messages.
#[tracing::instrument(name = "cli.run_app", skip(args, cfg, sink, notices))]
pub async fn run_app(
    args: &Args,
    cfg: &core_api::AppConfig,
    sink: core_api::SharedSink,
    notices: core_api::SharedSink,
) -> Result<i32, core_api::CliError> {
    let rc_path = core_api::directories_file(cfg)?;
    let list = core_api::load_directories(&rc_path)?;
    if list.created {
        let notice = format!(
            "Created new config file at {} with current directory\n",
            rc_path.display()
        );
        notices.write_line(notice.as_bytes())?;
    }
    if list.directories.is_empty() {
        tracing::warn!("no directories listed in {}", rc_path.display());
        return Ok(0);
    }

    let command = args.shell_command();
    let palette = cfg.runner.palette();
    let tasks = core_api::build_tasks(
        &list.directories,
        &command,
        &palette,
        args.if_branch.as_deref(),
    );

    let executor = Arc::new(
        core_api::TaskExecutor::new(sink)
            .with_shell(cfg.runner.shell.clone())
            .with_force_color(cfg.runner.force_color)
            .with_status_dir_width(cfg.runner.status_dir_width),
    );
    let concurrency = cfg.runner.effective_concurrency();
    tracing::debug!(
        directories = list.directories.len(),
        concurrency,
        command = %command,
        "dispatching"
    );

    let summary = core_api::run_tasks(executor, tasks, concurrency).await;
    tracing::info!(
        total = summary.total,
        failed = summary.failed,
        skipped = summary.skipped,
        duration_ms = summary.duration_ms,
        "run finished"
    );
    Ok(summary.exit_code())
}
