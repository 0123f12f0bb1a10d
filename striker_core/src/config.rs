//! Runtime configuration structs for the decision loop.
//!
//! These are the engine-side types used by `StrikerCore`. They are
//! separate from the TOML-deserialized config in `striker_config`; see
//! `conversions` for the bridges.

/// Motion and classification constants, fixed for the process lifetime.
#[derive(Debug, Clone, Copy)]
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

/// Simulation pacing constants.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeCfg {
    /// Step duration handed to the runtime each tick (ms).
    pub time_step_ms: u32,
}

impl Default for RuntimeCfg {
    fn default() -> Self {
        Self { time_step_ms: 64 }
    }
}
