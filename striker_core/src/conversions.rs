//! `From` implementations bridging `striker_config` types to `striker_core` types,
//! so the CLI never maps fields by hand.

use crate::config::{ControlCfg, RuntimeCfg};

// ── ControlCfg ───────────────────────────────────────────────────────────────

impl From<&striker_config::ControlCfg> for ControlCfg {
    fn from(c: &striker_config::ControlCfg) -> Self {
        Self {
            deadband: c.deadband,
            cruise_speed: c.cruise_speed,
            turn_gain: c.turn_gain,
            pivot_speed: c.pivot_speed,
            heading_tolerance_deg: c.heading_tolerance_deg,
        }
    }
}

// ── RuntimeCfg ───────────────────────────────────────────────────────────────

impl From<&striker_config::RuntimeCfg> for RuntimeCfg {
    fn from(c: &striker_config::RuntimeCfg) -> Self {
        Self {
            time_step_ms: c.time_step_ms,
        }
    }
}
