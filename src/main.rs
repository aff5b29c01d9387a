//! rtf: live real-time-factor statistics for a running simulation.
//!
//! Run with:  `RUST_LOG=info rtf --socket /tmp/clock.sock -o rtf.csv`
//! Replay:    `rtf -i rtf.csv`
//! Reset:     `kill -USR1 <pid>`

use anyhow::Result;
use clap::Parser;
use rtf_app::RunOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/rtf/rtf.toml).
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Load a saved record and display it instead of listening to the clock.
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Save the accumulated record here on shutdown.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Unix socket streaming `sim,real` clock lines (default: stdin).
    #[arg(long, value_name = "PATH", conflicts_with = "input")]
    socket: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they don't tear the dashboard. RUST_LOG overrides info.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("rtf v{} starting", env!("CARGO_PKG_VERSION"));

    rtf_app::run(RunOptions {
        config: cli.config,
        input:  cli.input,
        output: cli.output,
        socket: cli.socket,
    })?;

    Ok(())
}
