use rstest::rstest;
use striker_core::{Direction, classify};

#[rstest]
#[case(0.0, Direction::Forward)]
#[case(-0.13, Direction::Forward)] // lower bound is inside the window
#[case(0.13, Direction::Left)] // upper bound is outside
#[case(0.1299, Direction::Forward)]
#[case(-0.1301, Direction::Right)]
#[case(-0.2, Direction::Right)]
#[case(0.2, Direction::Left)]
fn default_deadband_partition(#[case] offset: f64, #[case] expected: Direction) {
    assert_eq!(classify(offset, 0.13), expected);
}

#[rstest]
#[case(0.05)]
#[case(0.13)]
#[case(0.5)]
fn window_asymmetry_holds_for_any_deadband(#[case] d: f64) {
    // The window keeps its lower bound and gives up its upper bound.
    assert_eq!(classify(-d, d), Direction::Forward);
    assert_eq!(classify(d, d), Direction::Left);
}

#[test]
fn nan_offset_falls_to_left() {
    // Both window comparisons are false for NaN, so the final arm wins.
    assert_eq!(classify(f64::NAN, 0.13), Direction::Left);
}

#[test]
fn steer_signs_match_turn_convention() {
    assert_eq!(Direction::Forward.steer(), 0.0);
    assert_eq!(Direction::Left.steer(), 1.0);
    assert_eq!(Direction::Right.steer(), -1.0);
}
