use anyhow::Context;
use clap::Parser;
use quickly_cli::app;
use quickly_cli::commands::cli;
use quickly_core::api as core_api;
use quickly_core::error::CliError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

const USAGE: &str = "quickly [-b <branch>] <command> [args...]";

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e:#}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> anyhow::Result<i32> {
    let args = cli::Args::parse();
    if args.command.is_empty() {
        return Err(CliError::Usage(USAGE.to_string()).into());
    }

    let mut cfg = core_api::load_default().map_err(CliError::Config)?;
    args.apply_to(&mut cfg);
    init_tracing(&cfg.logging).context("failed to initialize logging")?;

    let exit = app::run_app(
        &args,
        &cfg,
        core_api::SharedSink::stdout(),
        core_api::SharedSink::new(std::io::stderr()),
    )
    .await?;
    Ok(exit)
}

fn exit_code_for_error(e: &anyhow::Error) -> i32 {
    // 1: usage (no command given)
    // 11: config error
    // 20: IO error
    // 50: internal/uncategorized
    match e.downcast_ref::<CliError>() {
        Some(CliError::Usage(_)) => 1,
        Some(CliError::Config(_)) => 11,
        Some(CliError::Io(_)) => 20,
        None => 50,
    }
}

fn init_tracing(logging: &core_api::LoggingConfig) -> anyhow::Result<()> {
    if !logging.is_active() {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(&logging.level)
            .with_context(|| format!("invalid log level {:?}", logging.level))?,
    };

    let file_writer = if logging.file {
        let dir = core_api::log_directory(logging).map_err(CliError::Config)?;
        std::fs::create_dir_all(&dir)
            .map_err(CliError::Io)
            .with_context(|| format!("create log dir {}", dir.display()))?;
        let appender = tracing_appender::rolling::daily(dir, "quickly.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        Some(non_blocking)
    } else {
        None
    };

    // stdout carries task output, so console logs always go to stderr
    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = file_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_kind() {
        let usage: anyhow::Error = CliError::Usage(USAGE.to_string()).into();
        let config: anyhow::Error = CliError::Config(core_api::ConfigError::HomeDir).into();
        let io: anyhow::Error =
            CliError::Io(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed")).into();
        let other = anyhow::anyhow!("unexpected");

        assert_eq!(exit_code_for_error(&usage), 1);
        assert_eq!(exit_code_for_error(&config), 11);
        assert_eq!(exit_code_for_error(&io), 20);
        assert_eq!(exit_code_for_error(&other), 50);
    }

    #[test]
    fn inactive_logging_installs_nothing() {
        let mut logging = core_api::LoggingConfig::default();
        logging.enabled = false;
        assert!(init_tracing(&logging).is_ok());
    }
}
