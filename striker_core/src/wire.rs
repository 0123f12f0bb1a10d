//! Fixed-layout binary records crossing the radio boundary.
//!
//! Three record types exist, one per channel (see the table in the crate
//! docs). All multi-byte fields are little-endian and packed; every peer
//! in a match uses this module, so the layouts here are the single source
//! of truth for the wire format. `encode` and `decode` are exact inverses
//! for any field values; `decode` rejects buffers of the wrong length with
//! `StrikerError::MalformedPacket`, which is fatal for the tick that read
//! them.

use crate::error::StrikerError;

/// The three radio channels a robot listens on or talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Supervisor,
    Team,
    Ball,
}

impl core::fmt::Display for Channel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Channel::Supervisor => "supervisor",
            Channel::Team => "team",
            Channel::Ball => "ball",
        };
        f.write_str(name)
    }
}

/// A record with a fixed wire layout on a known channel.
pub trait WireRecord: Sized {
    const CHANNEL: Channel;
    const WIRE_SIZE: usize;

    fn encode(&self) -> Vec<u8>;
    fn decode(bytes: &[u8]) -> Result<Self, StrikerError>;
}

#[inline]
fn check_len(channel: Channel, expected: usize, bytes: &[u8]) -> Result<(), StrikerError> {
    if bytes.len() != expected {
        return Err(StrikerError::MalformedPacket {
            channel,
            expected,
            got: bytes.len(),
        });
    }
    Ok(())
}

/// Match-control state broadcast by the supervisor. One byte on the wire;
/// any non-zero byte decodes to `true`, matching the platform's bool
/// unpacking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SupervisorSignal {
    pub waiting_for_kickoff: bool,
}

impl WireRecord for SupervisorSignal {
    const CHANNEL: Channel = Channel::Supervisor;
    const WIRE_SIZE: usize = 1;

    fn encode(&self) -> Vec<u8> {
        vec![u8::from(self.waiting_for_kickoff)]
    }

    fn decode(bytes: &[u8]) -> Result<Self, StrikerError> {
        check_len(Self::CHANNEL, Self::WIRE_SIZE, bytes)?;
        Ok(Self {
            waiting_for_kickoff: bytes[0] != 0,
        })
    }
}

/// One teammate position broadcast: player id then the x/y plane
/// coordinates, `i32` + `f32` + `f32`, 12 bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamPositionRecord {
    pub player_id: i32,
    pub x: f32,
    pub y: f32,
}

impl WireRecord for TeamPositionRecord {
    const CHANNEL: Channel = Channel::Team;
    const WIRE_SIZE: usize = 12;

    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::WIRE_SIZE);
        out.extend_from_slice(&self.player_id.to_le_bytes());
        out.extend_from_slice(&self.x.to_le_bytes());
        out.extend_from_slice(&self.y.to_le_bytes());
        out
    }

    fn decode(bytes: &[u8]) -> Result<Self, StrikerError> {
        check_len(Self::CHANNEL, Self::WIRE_SIZE, bytes)?;
        Ok(Self {
            player_id: i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            x: f32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            y: f32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        })
    }
}

/// Ball beacon payload: direction vector then signal strength, four `f32`s,
/// 16 bytes. Receivers get this through the IR direction/strength query, so
/// only the emitting side serializes it; the layout is pinned here so both
/// sides agree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallRecord {
    pub direction: [f32; 3],
    pub strength: f32,
}

impl WireRecord for BallRecord {
    const CHANNEL: Channel = Channel::Ball;
    const WIRE_SIZE: usize = 16;

    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::WIRE_SIZE);
        for c in self.direction {
            out.extend_from_slice(&c.to_le_bytes());
        }
        out.extend_from_slice(&self.strength.to_le_bytes());
        out
    }

    fn decode(bytes: &[u8]) -> Result<Self, StrikerError> {
        check_len(Self::CHANNEL, Self::WIRE_SIZE, bytes)?;
        Ok(Self {
            direction: [
                f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
                f32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
                f32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            ],
            strength: f32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supervisor_round_trip() {
        for flag in [false, true] {
            let record = SupervisorSignal {
                waiting_for_kickoff: flag,
            };
            let decoded = SupervisorSignal::decode(&record.encode()).expect("decode");
            assert_eq!(decoded, record);
        }
    }

    #[test]
    fn supervisor_accepts_any_nonzero_byte_as_true() {
        let decoded = SupervisorSignal::decode(&[7]).expect("decode");
        assert!(decoded.waiting_for_kickoff);
    }

    #[test]
    fn team_record_layout_is_packed_little_endian() {
        let record = TeamPositionRecord {
            player_id: 2,
            x: 1.0,
            y: -0.5,
        };
        let bytes = record.encode();
        assert_eq!(bytes.len(), 12);
        assert_eq!(&bytes[0..4], &2i32.to_le_bytes());
        assert_eq!(&bytes[4..8], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[8..12], &(-0.5f32).to_le_bytes());
    }

    #[test]
    fn ball_record_round_trip() {
        let record = BallRecord {
            direction: [0.57, -0.21, 0.79],
            strength: 3.25,
        };
        let decoded = BallRecord::decode(&record.encode()).expect("decode");
        assert_eq!(decoded, record);
    }

    #[test]
    fn wrong_length_is_malformed() {
        let err = TeamPositionRecord::decode(&[0u8; 11]).expect_err("should fail");
        match err {
            StrikerError::MalformedPacket {
                channel,
                expected,
                got,
            } => {
                assert_eq!(channel, Channel::Team);
                assert_eq!(expected, 12);
                assert_eq!(got, 11);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(SupervisorSignal::decode(&[]).is_err());
        assert!(BallRecord::decode(&[0u8; 17]).is_err());
    }
}
