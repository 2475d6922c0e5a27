//! CLI entrypoint for mcp-chat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use mcp_chat_application::{NoSessionObserver, SessionObserver, SessionStore};
use mcp_chat_infrastructure::{ConfigLoader, FileConfig, HttpChatBackend};
use mcp_chat_presentation::{ChatRepl, Cli, ProgressReporter, ReplConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref());

    info!("Starting mcp-chat");

    let config = load_config(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources();
        println!();
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    // === Dependency Injection ===
    let base_url = config.backend.parse_base_url()?;
    info!("Using backend at {}", base_url);
    let backend = Arc::new(
        HttpChatBackend::new(base_url, config.backend.request_timeout())
            .context("Failed to create HTTP client")?,
    );

    let show_progress = config.repl.show_progress && !cli.quiet;
    let observer: Arc<dyn SessionObserver> = if show_progress {
        Arc::new(ProgressReporter::new())
    } else {
        Arc::new(NoSessionObserver)
    };

    let store = Arc::new(SessionStore::with_observer(
        backend,
        config.session.to_session_config(),
        observer,
    ));

    let report = store.bootstrap().await;

    let repl_config = ReplConfig {
        show_progress,
        color: config.repl.color,
        history_file: config.repl.history_file.as_ref().map(PathBuf::from),
    };
    ChatRepl::new(store).with_config(repl_config).run(&report).await?;

    Ok(())
}

/// Load configuration files, then apply command-line overrides.
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    if let Some(base_url) = &cli.base_url {
        config.backend.base_url = base_url.clone();
    }
    if let Some(model) = &cli.model {
        config.session.default_model = model.clone();
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Initialize logging based on verbosity level. `RUST_LOG` takes precedence.
///
/// With a log directory, output goes to a daily rolling file so it does not
/// interleave with the REPL.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "mcp-chat.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}
