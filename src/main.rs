use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use procwatch::config::{self, load_config, load_config_from_path};
use procwatch::system::{Collector, Snapshot};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "procwatch",
    about = "Print periodic JSON snapshots of a process and its host"
)]
struct Cli {
    /// Process to inspect (defaults to procwatch itself)
    #[arg(long)]
    pid: Option<u32>,

    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Delay between snapshots in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Stop after this many poll cycles
    #[arg(long)]
    count: Option<u64>,

    /// Pretty-print each snapshot instead of one JSON object per line
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Exit once the target process no longer exists
    #[arg(long, default_value_t = false)]
    exit_when_gone: bool,

    /// Log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config_for_cli(&cli);

    run(config, &cli).await
}

async fn run(config: config::Config, cli: &Cli) -> Result<()> {
    let target = cli.pid.unwrap_or_else(std::process::id);
    let interval = Duration::from_millis(config.general.interval_ms);
    let pretty = config.general.pretty;
    let mut collector = Collector::new(config.collector);

    tracing::info!(
        pid = target,
        interval_ms = config.general.interval_ms,
        "monitoring process"
    );

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut cycles: u64 = 0;
    loop {
        match collector.collect(target) {
            Ok(snapshot) => emit(&snapshot, pretty)?,
            Err(err) => {
                tracing::warn!(
                    pid = target,
                    error = %err,
                    transient = err.is_transient(),
                    "no snapshot this cycle"
                );
                if cli.exit_when_gone && !collector.is_alive(target) {
                    tracing::info!(pid = target, "target process is gone, exiting");
                    return Ok(());
                }
            }
        }

        cycles += 1;
        if cli.count.is_some_and(|limit| cycles >= limit) {
            return Ok(());
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = &mut ctrl_c => {
                tracing::info!("interrupted");
                return Ok(());
            }
        }
    }
}

fn emit(snapshot: &Snapshot, pretty: bool) -> Result<()> {
    let line = if pretty {
        serde_json::to_string_pretty(snapshot)?
    } else {
        serde_json::to_string(snapshot)?
    };
    let mut out = std::io::stdout().lock();
    writeln!(out, "{line}")?;
    out.flush()?;
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("procwatch={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(interval) = cli.interval_ms {
        config.general.interval_ms = interval;
    }
    if cli.pretty {
        config.general.pretty = true;
    }

    config
}
