#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for the robot controller.
//!
//! `Config` and sub-structs are deserialized from TOML and validated
//! before anything is built from them. Every section has defaults that
//! reproduce stock match behavior, so an empty file is a valid config.
use serde::Deserialize;

/// The six robot slots of a match: team character (`B`/`Y`) followed by
/// the player digit. Robot identity strings are drawn from this table.
pub const ROBOT_NAMES: [&str; 6] = ["B1", "B2", "B3", "Y1", "Y2", "Y3"];

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct RuntimeCfg {
    /// Simulation step duration handed to the runtime each tick (ms).
    pub time_step_ms: u32,
}

impl Default for RuntimeCfg {
    fn default() -> Self {
        Self { time_step_ms: 64 }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct ControlCfg {
    /// Lateral ball-offset window within which no turn correction is applied.
    pub deadband: f64,
    /// Symmetric wheel speed while driving at the ball (rad/s).
    pub cruise_speed: f64,
    /// Wheel speed magnitude while turning toward the ball (rad/s).
    pub turn_gain: f64,
    /// Differential wheel speed for waypoint pivots (rad/s).
    pub pivot_speed: f64,
    /// Bearing window around straight-ahead that counts as on-course (degrees).
    pub heading_tolerance_deg: f64,
}

impl Default for ControlCfg {
    fn default() -> Self {
        Self {
            deadband: 0.13,
            cruise_speed: 10.0,
            turn_gain: 8.0,
            pivot_speed: 5.0,
            heading_tolerance_deg: 15.0,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub runtime: RuntimeCfg,
    pub control: ControlCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Runtime
        if self.runtime.time_step_ms == 0 {
            eyre::bail!("runtime.time_step_ms must be >= 1");
        }
        if self.runtime.time_step_ms > 10_000 {
            eyre::bail!("runtime.time_step_ms is unreasonably large (>10s)");
        }

        // Control
        if !self.control.deadband.is_finite() || self.control.deadband <= 0.0 {
            eyre::bail!("control.deadband must be > 0");
        }
        if self.control.deadband >= 1.0 {
            eyre::bail!("control.deadband must be < 1.0 (ball offsets are unit-scale)");
        }
        if !self.control.cruise_speed.is_finite() || self.control.cruise_speed <= 0.0 {
            eyre::bail!("control.cruise_speed must be > 0");
        }
        if !self.control.turn_gain.is_finite() || self.control.turn_gain <= 0.0 {
            eyre::bail!("control.turn_gain must be > 0");
        }
        if !self.control.pivot_speed.is_finite() || self.control.pivot_speed <= 0.0 {
            eyre::bail!("control.pivot_speed must be > 0");
        }
        if !self.control.heading_tolerance_deg.is_finite()
            || self.control.heading_tolerance_deg <= 0.0
            || self.control.heading_tolerance_deg >= 180.0
        {
            eyre::bail!("control.heading_tolerance_deg must be in (0, 180)");
        }

        // Logging: `rotation`/`level` are matched leniently at init time
        Ok(())
    }
}
