//! mihomo-updater
//!
//! Keeps a mihomo daemon's configuration in sync with a remote subscription.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────┐   GET    ┌──────────┐
//!   │ subscription │◀─────────│ fetcher  │──┐
//!   └──────────────┘          └──────────┘  │   ┌────────┐   ┌────────┐   PUT /configs  ┌────────┐
//!                                           ├──▶│ merger │──▶│ writer │──▶ notifier ───▶│ mihomo │
//!   ┌──────────────┐          ┌──────────┐  │   └────────┘   └────────┘                 └────────┘
//!   │ base config  │─────────▶│  reader  │──┘
//!   └──────────────┘          └──────────┘
//!
//!   scheduler: one cycle at startup, then one per interval, never overlapping
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use mihomo_updater::config::loader::{load_settings, DEFAULT_SETTINGS_PATH};
use mihomo_updater::config::Settings;
use mihomo_updater::daemon::{CommandLauncher, ProcessLauncher};
use mihomo_updater::error::UpdateResult;
use mihomo_updater::lifecycle::{signals, startup, Shutdown};
use mihomo_updater::observability::{logging, metrics};

#[derive(Parser, Debug)]
#[command(name = "mihomo-updater", version, about = "Refresh mihomo config from a subscription")]
struct Args {
    /// Settings file (YAML, or TOML with a .toml extension)
    #[arg(short, long, default_value = DEFAULT_SETTINGS_PATH)]
    config: PathBuf,

    /// Run a single update cycle and exit with its status
    #[arg(long)]
    once: bool,

    /// Do not start the mihomo binary
    #[arg(long)]
    no_launch: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let settings = match load_settings(&args.config) {
        Ok(settings) => Arc::new(settings),
        Err(e) => {
            eprintln!("failed to load settings from {}: {}", args.config.display(), e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init_logging(settings.log_file.as_deref()) {
        eprintln!("failed to set up log output: {}", e);
        return ExitCode::FAILURE;
    }

    match run(args, settings).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(kind = e.kind(), error = %e, "Fatal startup error");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args, settings: Arc<Settings>) -> UpdateResult<ExitCode> {
    if let Some(addr) = settings.metrics_address.as_deref() {
        match addr.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(metrics_address = %addr, "Failed to parse metrics address"),
        }
    }

    startup::log_banner(&settings);

    let scheduler = startup::build_scheduler(settings.clone())?;

    if args.once {
        let ok = scheduler.run_cycle("once").await;
        return Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    if args.no_launch {
        tracing::info!("Daemon launch disabled");
    } else {
        let handle = CommandLauncher::new(&settings.mihomo_binary).launch()?;
        tokio::spawn(async move {
            match handle.wait().await {
                Ok(status) => tracing::warn!(%status, "Daemon exited"),
                Err(e) => tracing::error!(error = %e, "Failed to wait for daemon"),
            }
        });
    }

    let shutdown = Shutdown::new();
    let scheduler_task = tokio::spawn(scheduler.run(shutdown.subscribe()));

    signals::shutdown_signal().await;
    shutdown.trigger();

    if let Err(e) = scheduler_task.await {
        tracing::error!(error = %e, "Scheduler task ended abnormally");
    }

    tracing::info!("Shutdown complete");
    Ok(ExitCode::SUCCESS)
}
