//! Match execution: signal wiring, scenario assembly, and the final report.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use eyre::WrapErr;
use tracing::info;

use crate::cli::JSON_MODE;
use crate::scenario::{self, Scenario};
use striker_core::runner::{RunOptions, RunReport};

/// Play a scripted match with the given robot and print a tick summary.
pub fn run_match(
    cfg: &striker_config::Config,
    robot: &str,
    duration_ms: u64,
    max_ticks: Option<u64>,
) -> eyre::Result<()> {
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })
    .wrap_err("install ctrl-c handler")?;

    let Scenario {
        mut striker,
        mut pitch,
        team_out,
        left,
        right,
    } = scenario::build(robot, cfg, duration_ms)?;

    info!(robot, duration_ms, "match start");
    let report = striker.run(&mut pitch, RunOptions { max_ticks }, Some(&shutdown))?;
    info!(
        ticks = report.ticks,
        acted = report.acted,
        idle = report.idle,
        broadcast = team_out.len(),
        last_left = left.get(),
        last_right = right.get(),
        "match finished"
    );

    print_report(robot, &report, team_out.len());
    Ok(())
}

fn print_report(robot: &str, report: &RunReport, broadcast: usize) {
    if *JSON_MODE.get().unwrap_or(&false) {
        println!(
            "{}",
            serde_json::json!({
                "robot": robot,
                "ticks": report.ticks,
                "acted": report.acted,
                "idle": report.idle,
                "broadcast_frames": broadcast,
            })
        );
    } else {
        println!(
            "robot {robot}: {} ticks ({} acted, {} idle), {broadcast} frames broadcast",
            report.ticks, report.acted, report.idle
        );
    }
}

/// Assemble the full simulated stack and prove a few ticks go through it.
pub fn self_check(cfg: &striker_config::Config) -> eyre::Result<()> {
    let Scenario {
        mut striker,
        mut pitch,
        ..
    } = scenario::build("B1", cfg, 1_000)?;

    let report = striker.run(&mut pitch, RunOptions { max_ticks: Some(3) }, None)?;
    if report.acted == 0 {
        eyre::bail!("self-check ran {} ticks but none acted", report.ticks);
    }

    info!(ticks = report.ticks, acted = report.acted, "self-check passed");
    println!(
        "self-check ok: {} ticks ({} acted)",
        report.ticks, report.acted
    );
    Ok(())
}
