//! Ball localization from the infra-red channel.
//!
//! One reading per tick at most; there is no smoothing and no memory of the
//! last detected position. A tick without a reading yields an explicit
//! `NotDetected` estimate rather than a sentinel vector.

use crate::wire::BallRecord;

/// One reading from the ball channel: the emitter direction in the robot's
/// local frame plus the received signal strength.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallSignal {
    pub direction: [f64; 3],
    pub strength: f64,
}

impl From<BallRecord> for BallSignal {
    fn from(record: BallRecord) -> Self {
        Self {
            direction: [
                f64::from(record.direction[0]),
                f64::from(record.direction[1]),
                f64::from(record.direction[2]),
            ],
            strength: f64::from(record.strength),
        }
    }
}

/// Outcome of the per-tick ball localization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BallEstimate {
    Detected(BallSignal),
    NotDetected,
}

impl BallEstimate {
    /// Lift an optional channel reading into an explicit estimate.
    pub fn from_reading(reading: Option<BallSignal>) -> Self {
        match reading {
            Some(signal) => Self::Detected(signal),
            None => Self::NotDetected,
        }
    }

    pub fn is_detected(&self) -> bool {
        matches!(self, Self::Detected(_))
    }
}
