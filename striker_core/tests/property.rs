use std::f64::consts::PI;

use proptest::prelude::*;

use striker_core::util::{normalize_deg, wrap_pi};
use striker_core::wire::{BallRecord, SupervisorSignal, TeamPositionRecord, WireRecord};
use striker_core::{Direction, classify};

proptest! {
    // The inverse direction of the classifier contract: whatever comes out
    // must place the offset in the matching band.
    #[test]
    fn classify_outcome_implies_offset_band(v in -10.0f64..10.0, d in 0.001f64..0.999) {
        match classify(v, d) {
            Direction::Forward => prop_assert!(-d <= v && v < d),
            Direction::Right => prop_assert!(v < -d),
            Direction::Left => prop_assert!(v >= d),
        }
    }

    #[test]
    fn team_record_round_trips(id in any::<i32>(), x in -100.0f32..100.0, y in -100.0f32..100.0) {
        let record = TeamPositionRecord { player_id: id, x, y };
        let bytes = record.encode();
        prop_assert_eq!(bytes.len(), TeamPositionRecord::WIRE_SIZE);
        let decoded = TeamPositionRecord::decode(&bytes).unwrap();
        prop_assert_eq!(decoded, record);
    }

    #[test]
    fn ball_record_round_trips(
        dx in -1.0f32..1.0,
        dy in -1.0f32..1.0,
        dz in -1.0f32..1.0,
        s in 0.0f32..1000.0,
    ) {
        let record = BallRecord { direction: [dx, dy, dz], strength: s };
        let decoded = BallRecord::decode(&record.encode()).unwrap();
        prop_assert_eq!(decoded, record);
    }

    #[test]
    fn supervisor_decodes_any_single_byte(b in any::<u8>()) {
        let signal = SupervisorSignal::decode(&[b]).unwrap();
        prop_assert_eq!(signal.waiting_for_kickoff, b != 0);
    }

    #[test]
    fn decode_rejects_any_wrong_length(len in 0usize..64) {
        let bytes = vec![0u8; len];
        prop_assert_eq!(SupervisorSignal::decode(&bytes).is_ok(), len == 1);
        prop_assert_eq!(TeamPositionRecord::decode(&bytes).is_ok(), len == 12);
        prop_assert_eq!(BallRecord::decode(&bytes).is_ok(), len == 16);
    }

    #[test]
    fn wrapped_angles_stay_in_half_open_interval(rad in -1.0e6f64..1.0e6) {
        let a = wrap_pi(rad);
        prop_assert!(a > -PI && a <= PI, "wrap_pi({}) = {}", rad, a);
    }

    #[test]
    fn normalized_degrees_stay_in_full_turn(deg in -1.0e6f64..1.0e6) {
        let d = normalize_deg(deg);
        prop_assert!((0.0..360.0).contains(&d), "normalize_deg({}) = {}", deg, d);
    }
}
