//! Differential-drive motion primitives.

use eyre::WrapErr;

use crate::classify::Direction;
use crate::config::ControlCfg;
use crate::error::{Report, Result};
use crate::hw_error::map_hw_error;
use crate::state::RobotState;
use crate::util::normalize_deg;
use striker_traits::Motor;

/// Owns the two wheel motors and the motion constants.
///
/// Commands are stateless: nothing is smoothed or debounced across ticks,
/// and a tick that issues no command leaves the previous wheel velocities
/// in effect.
pub struct Drivetrain<M: Motor> {
    left: M,
    right: M,
    control: ControlCfg,
}

impl<M: Motor> Drivetrain<M> {
    pub fn new(left: M, right: M, control: ControlCfg) -> Self {
        Self {
            left,
            right,
            control,
        }
    }

    /// Wheel primitive. The actuator interface's sign convention is
    /// inverted relative to the control plane, so both values are negated
    /// once more on the way out.
    pub fn drive(&mut self, left: f64, right: f64) -> Result<()> {
        self.left
            .set_velocity(-left)
            .map_err(|e| Report::new(map_hw_error(&*e)))
            .wrap_err("left wheel")?;
        self.right
            .set_velocity(-right)
            .map_err(|e| Report::new(map_hw_error(&*e)))
            .wrap_err("right wheel")?;
        Ok(())
    }

    /// Symmetric forward command at the cruise magnitude.
    pub fn cruise(&mut self) -> Result<()> {
        let v = self.control.cruise_speed;
        self.drive(v, v)
    }

    /// Rotate toward the classified side: one wheel driven positive, the
    /// other negative, scaled by the turn gain. `Forward` yields a zero
    /// differential.
    pub fn turn(&mut self, direction: Direction) -> Result<()> {
        let s = direction.steer() * self.control.turn_gain;
        self.drive(s, -s)
    }

    /// Head toward a waypoint using the bearing-band controller.
    ///
    /// The bearing is taken from the arctangent of the absolute axis
    /// differences, which discards quadrant information and is only valid
    /// in one quadrant. That is the platform's long-standing behavior and
    /// is kept as-is. Skips without commanding when there is no position
    /// fix yet.
    pub fn go_position(&mut self, state: &RobotState, x: f64, y: f64) -> Result<()> {
        let Some(pos) = state.position else {
            tracing::debug!("go_position skipped: no position fix");
            return Ok(());
        };

        let bearing = normalize_deg((y - pos.y).abs().atan2((x - pos.x).abs()).to_degrees());
        let heading_deg = normalize_deg(state.heading.to_degrees());
        let mut target = bearing + heading_deg;
        if target > 360.0 {
            target -= 360.0;
        }
        tracing::trace!(target, "waypoint bearing");

        let tolerance = self.control.heading_tolerance_deg;
        let cruise = self.control.cruise_speed;
        let pivot = self.control.pivot_speed;
        if target >= 360.0 - tolerance || target <= tolerance {
            self.drive(-cruise, -cruise)
        } else if target < 180.0 {
            self.drive(pivot, -pivot)
        } else {
            self.drive(-pivot, pivot)
        }
    }
}
