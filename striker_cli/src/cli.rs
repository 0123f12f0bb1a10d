use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Keeps the non-blocking file appender alive for the whole process.
pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Whether `--json` was passed; switches log and report output to JSON lines.
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(
    name = "striker",
    about = "Soccer striker control loop on a simulated pitch",
    version
)]
pub struct Cli {
    /// Path to the TOML config (falls back to built-in defaults if absent)
    #[arg(long, default_value = "etc/striker.toml")]
    pub config: PathBuf,

    /// Emit logs and reports as JSON lines
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Log level filter when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a scripted match and print a tick summary at the end
    Run {
        /// Robot to control, by roster name (B1..B3, Y1..Y3)
        #[arg(long, default_value = "B1")]
        robot: String,

        /// Simulated match length in milliseconds
        #[arg(long, default_value_t = 10_000)]
        duration_ms: u64,

        /// Stop after this many ticks even if match time remains
        #[arg(long)]
        max_ticks: Option<u64>,
    },
    /// Assemble the full device stack and run a few ticks to prove the wiring
    SelfCheck,
}
