#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Binary entry point: argument parsing, config loading, tracing setup, and
//! dispatch to the match runner.

mod cli;
mod error_fmt;
mod run;
mod scenario;

use std::path::Path;

use clap::Parser;
use eyre::WrapErr;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands, FILE_GUARD, JSON_MODE};

fn main() {
    std::process::exit(real_main());
}

fn real_main() -> i32 {
    if let Err(e) = color_eyre::install() {
        eprintln!("failed to install error reporting: {e}");
        return 1;
    }

    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    match dispatch(&cli) {
        Ok(()) => 0,
        Err(e) => {
            if *JSON_MODE.get().unwrap_or(&false) {
                eprintln!("{}", error_fmt::format_error_json(&e));
            } else {
                eprintln!("{}", error_fmt::humanize(&e));
            }
            error_fmt::exit_code_for_error(&e)
        }
    }
}

fn dispatch(cli: &Cli) -> eyre::Result<()> {
    let (cfg, defaulted) = load_config(&cli.config)?;
    init_tracing(&cli.log_level, cli.json, &cfg.logging);
    if defaulted {
        tracing::info!(path = %cli.config.display(), "no config file; using built-in defaults");
    }

    match &cli.cmd {
        Commands::Run {
            robot,
            duration_ms,
            max_ticks,
        } => run::run_match(&cfg, robot, *duration_ms, *max_ticks),
        Commands::SelfCheck => run::self_check(&cfg),
    }
}

/// Load and validate the TOML config; a missing file falls back to defaults.
fn load_config(path: &Path) -> eyre::Result<(striker_config::Config, bool)> {
    let (cfg, defaulted) = match std::fs::read_to_string(path) {
        Ok(text) => {
            let cfg: striker_config::Config = toml::from_str(&text)
                .wrap_err_with(|| format!("parse config {}", path.display()))?;
            (cfg, false)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            (striker_config::Config::default(), true)
        }
        Err(e) => {
            return Err(eyre::Report::new(e))
                .wrap_err_with(|| format!("read config {}", path.display()));
        }
    };
    cfg.validate()
        .wrap_err_with(|| format!("validate config {}", path.display()))?;
    Ok((cfg, defaulted))
}

/// Console logging to stderr (JSON lines under `--json`) plus an optional
/// file appender from `[logging]`. `RUST_LOG` overrides everything; the
/// `--log-level` flag overrides the config level only when explicitly set.
fn init_tracing(flag_level: &str, json: bool, logging: &striker_config::Logging) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(spec) => EnvFilter::new(spec),
        Err(_) => {
            let level = if flag_level == "info" {
                logging.level.as_deref().unwrap_or(flag_level)
            } else {
                flag_level
            };
            EnvFilter::new(level)
        }
    };

    let file_layer = logging.file.as_deref().map(|raw| {
        let path = Path::new(raw);
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let name = path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("striker.log"));
        let appender = match logging.rotation.as_deref() {
            Some("daily") => tracing_appender::rolling::daily(dir, name),
            _ => tracing_appender::rolling::never(dir, name),
        };
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = FILE_GUARD.set(guard);
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
    });

    let console = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(console.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(console)
            .init();
    }
}
