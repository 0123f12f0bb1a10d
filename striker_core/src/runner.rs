//! Drives the tick loop against a [`striker_traits::Runtime`].
//!
//! The runtime owns pacing: each iteration advances it by the configured
//! time step and then runs one fusion pass. The loop ends when the runtime
//! terminates, an optional tick budget is spent, or a shutdown flag is
//! raised from outside (signal handlers).

use std::sync::atomic::{AtomicBool, Ordering};

use eyre::WrapErr;

use crate::error::{Report, Result};
use crate::hw_error::map_hw_error;
use crate::{StrikerCore, TickStatus};
use striker_traits::{Compass, DistanceSensor, Emitter, Gps, IrReceiver, Motor, Receiver, Runtime};

/// Loop bounds. The default runs until the runtime terminates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Stop after this many ticks.
    pub max_ticks: Option<u64>,
}

/// Tally of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub ticks: u64,
    pub acted: u64,
    pub idle: u64,
}

/// Step the runtime and tick the engine until one of the stop conditions
/// hits. Tick failures abort the run and propagate.
pub fn run<RT, R, B, E, G, C, D, M>(
    runtime: &mut RT,
    striker: &mut StrikerCore<R, B, E, G, C, D, M>,
    opts: RunOptions,
    shutdown: Option<&AtomicBool>,
) -> Result<RunReport>
where
    RT: Runtime,
    R: Receiver,
    B: IrReceiver,
    E: Emitter,
    G: Gps,
    C: Compass,
    D: DistanceSensor,
    M: Motor,
{
    let step_ms = striker.time_step_ms();
    let mut report = RunReport {
        ticks: 0,
        acted: 0,
        idle: 0,
    };
    tracing::info!(
        robot = %striker.identity().name(),
        step_ms,
        "run loop started"
    );

    loop {
        if let Some(flag) = shutdown
            && flag.load(Ordering::SeqCst)
        {
            tracing::info!("shutdown requested; stopping run loop");
            break;
        }
        if let Some(max) = opts.max_ticks
            && report.ticks >= max
        {
            break;
        }

        let advancing = runtime
            .step(step_ms)
            .map_err(|e| Report::new(map_hw_error(&*e)))
            .wrap_err("runtime step")?;
        if !advancing {
            tracing::info!("runtime terminated");
            break;
        }

        match striker.tick() {
            Ok(TickStatus::Acted(summary)) => {
                report.acted += 1;
                tracing::trace!(
                    role = %summary.role,
                    direction = ?summary.direction,
                    teammates = summary.teammates_seen,
                    "tick acted"
                );
            }
            Ok(TickStatus::Idle) => report.idle += 1,
            Err(e) => {
                tracing::error!(error = %e, tick = report.ticks, "tick failed");
                return Err(e);
            }
        }
        report.ticks += 1;
    }

    tracing::info!(
        ticks = report.ticks,
        acted = report.acted,
        idle = report.idle,
        "run loop finished"
    );
    Ok(report)
}
