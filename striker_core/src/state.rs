//! Robot identity and the per-tick fused state.

use crate::ball::BallEstimate;
use crate::classify::Direction;
use crate::error::StrikerError;

/// Team color, encoded as the first character of the robot's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    Blue,
    Yellow,
}

impl Team {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'B' => Some(Team::Blue),
            'Y' => Some(Team::Yellow),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Team::Blue => 'B',
            Team::Yellow => 'Y',
        }
    }
}

impl core::fmt::Display for Team {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Team::Blue => "blue",
            Team::Yellow => "yellow",
        };
        f.write_str(name)
    }
}

/// Typed robot identity, parsed once at startup from the two-character
/// name: team color then player digit (`B1` .. `Y3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub team: Team,
    pub player_id: u8,
}

impl Identity {
    pub fn parse(name: &str) -> Result<Self, StrikerError> {
        let mut chars = name.chars();
        let (Some(team_ch), Some(digit_ch), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(StrikerError::Config(format!(
                "robot name must be exactly two characters, got {name:?}"
            )));
        };
        let team = Team::from_char(team_ch).ok_or_else(|| {
            StrikerError::Config(format!(
                "unknown team character {team_ch:?} in robot name {name:?}"
            ))
        })?;
        let player_id = match digit_ch.to_digit(10) {
            Some(d @ 1..=3) => d as u8,
            _ => {
                return Err(StrikerError::Config(format!(
                    "player digit in robot name {name:?} must be 1-3"
                )));
            }
        };
        Ok(Self { team, player_id })
    }

    /// The external identity string, e.g. `"B1"`.
    pub fn name(&self) -> String {
        format!("{}{}", self.team.as_char(), self.player_id)
    }
}

/// A coordinate on the pitch plane, simulation units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

/// The four sonar transducers, by mounting position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SonarReadings {
    pub left: f64,
    pub right: f64,
    pub front: f64,
    pub back: f64,
}

/// Everything the robot knows this tick. Owned exclusively by the tick
/// loop and overwritten in place every acting tick; nothing here survives
/// a tick except as the baseline the next tick overwrites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobotState {
    pub identity: Identity,
    /// `None` until the first acting tick delivers a GPS fix.
    pub position: Option<Point2>,
    /// Radians in `(-PI, PI]`, derived from the compass each acting tick.
    pub heading: f64,
    /// `None` means the ball is not currently detected.
    pub ball_direction: Option<[f64; 3]>,
    /// 0.0 whenever `ball_direction` is `None`.
    pub ball_strength: f64,
    pub sonar: SonarReadings,
    /// Always derived from this tick's `ball_direction`; `Forward` when
    /// the ball is absent.
    pub direction: Direction,
}

impl RobotState {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            position: None,
            heading: 0.0,
            ball_direction: None,
            ball_strength: 0.0,
            sonar: SonarReadings::default(),
            direction: Direction::Forward,
        }
    }

    /// Overwrite the ball fields from this tick's localizer estimate.
    pub fn apply_ball(&mut self, estimate: BallEstimate) {
        match estimate {
            BallEstimate::Detected(signal) => {
                self.ball_direction = Some(signal.direction);
                self.ball_strength = signal.strength;
            }
            BallEstimate::NotDetected => {
                self.ball_direction = None;
                self.ball_strength = 0.0;
            }
        }
    }
}
