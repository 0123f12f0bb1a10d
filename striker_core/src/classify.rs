//! Deadband classifier mapping a lateral ball offset to a turn direction.

/// Per-tick steering decision. `Forward` is also the default whenever no
/// ball is detected; that rule lives in the tick loop, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Left,
    Right,
}

impl Direction {
    /// Signed steering factor for the turn command: +1 rotates toward the
    /// ball's left side, -1 toward its right, 0 means no correction.
    pub fn steer(self) -> f64 {
        match self {
            Direction::Forward => 0.0,
            Direction::Left => 1.0,
            Direction::Right => -1.0,
        }
    }
}

/// Classify a lateral offset against a deadband window.
///
/// The window is inclusive on its lower bound and exclusive on its upper
/// bound: `-deadband <= v < deadband` is `Forward`, `v < -deadband` is
/// `Right`, `v >= deadband` is `Left`. The offset is component 1 of the
/// detected ball direction, expressed in the robot's local frame.
pub fn classify(lateral_offset: f64, deadband: f64) -> Direction {
    if -deadband <= lateral_offset && lateral_offset < deadband {
        Direction::Forward
    } else if lateral_offset < -deadband {
        Direction::Right
    } else {
        Direction::Left
    }
}
