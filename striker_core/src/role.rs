//! Role selection and the per-role behavior policies.

use crate::error::Result;
use crate::motion::Drivetrain;
use crate::state::{RobotState, Team};
use crate::wire::TeamPositionRecord;
use striker_traits::Motor;

/// Per-tick behavior selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Attack,
    Defense,
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Role::Attack => "attack",
            Role::Defense => "defense",
        };
        f.write_str(name)
    }
}

/// Role the rearmost player resolves to. The rearmost player still
/// attacks; flip to `Role::Defense` to turn on role switching.
const REARMOST_ROLE: Role = Role::Attack;

/// Selects the role for this tick from team topology.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoleArbiter;

impl RoleArbiter {
    /// Resolve the role from own team color, own y-coordinate, and the
    /// teammate records collected this tick.
    pub fn select(&self, team: Team, own_y: f64, teammates: &[TeamPositionRecord]) -> Role {
        if Self::is_rearmost(team, own_y, teammates) {
            REARMOST_ROLE
        } else {
            Role::Attack
        }
    }

    /// Whether this robot sits deeper than every teammate reported this
    /// tick. Blue's rear is the +y end of the pitch, yellow's the -y end;
    /// with no reports the robot cannot claim the rearmost slot.
    pub fn is_rearmost(team: Team, own_y: f64, teammates: &[TeamPositionRecord]) -> bool {
        if teammates.is_empty() {
            return false;
        }
        match team {
            Team::Blue => teammates.iter().all(|t| f64::from(t.y) < own_y),
            Team::Yellow => teammates.iter().all(|t| f64::from(t.y) > own_y),
        }
    }
}

/// A stateless per-role behavior acting on the fused state through the
/// drivetrain.
pub trait Policy<M: Motor> {
    fn name(&self) -> &'static str;
    fn act(&self, state: &RobotState, drive: &mut Drivetrain<M>) -> Result<()>;
}

/// Chase the ball: cruise when it is ahead, spin toward it otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct AttackPolicy;

impl<M: Motor> Policy<M> for AttackPolicy {
    fn name(&self) -> &'static str {
        "attack"
    }

    /// Requires both a position fix and a detected ball; when either is
    /// missing this is a deliberate no-op, leaving the previous wheel
    /// velocities in effect.
    fn act(&self, state: &RobotState, drive: &mut Drivetrain<M>) -> Result<()> {
        if state.position.is_none() || state.ball_direction.is_none() {
            tracing::debug!(
                has_position = state.position.is_some(),
                has_ball = state.ball_direction.is_some(),
                "attack skipped: missing precondition"
            );
            return Ok(());
        }
        match state.direction {
            crate::classify::Direction::Forward => drive.cruise(),
            turning => drive.turn(turning),
        }
    }
}

/// Distance from the pitch center line to the held defensive post.
const DEFENSE_POST_Y: f64 = 0.5;

/// Fall back to a goal-side post and hold it.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefensePolicy;

impl<M: Motor> Policy<M> for DefensePolicy {
    fn name(&self) -> &'static str {
        "defense"
    }

    fn act(&self, state: &RobotState, drive: &mut Drivetrain<M>) -> Result<()> {
        let post_y = match state.identity.team {
            Team::Blue => DEFENSE_POST_Y,
            Team::Yellow => -DEFENSE_POST_Y,
        };
        drive.go_position(state, 0.0, post_y)
    }
}
