use rstest::rstest;
use striker_config::load_toml;

#[test]
fn empty_config_is_valid_with_defaults() {
    let cfg = load_toml("").expect("parse TOML");
    cfg.validate().expect("defaults should pass validation");
    assert_eq!(cfg.runtime.time_step_ms, 64);
    assert!((cfg.control.deadband - 0.13).abs() < f64::EPSILON);
    assert!((cfg.control.cruise_speed - 10.0).abs() < f64::EPSILON);
    assert!((cfg.control.turn_gain - 8.0).abs() < f64::EPSILON);
    assert!((cfg.control.pivot_speed - 5.0).abs() < f64::EPSILON);
    assert!((cfg.control.heading_tolerance_deg - 15.0).abs() < f64::EPSILON);
}

#[test]
fn rejects_zero_time_step() {
    let toml = r#"
[runtime]
time_step_ms = 0
"#;

    let cfg = load_toml(toml).expect("parse TOML");
    let err = cfg.validate().expect_err("should reject time_step_ms=0");
    assert!(
        format!("{err}")
            .to_lowercase()
            .contains("time_step_ms must be >= 1")
    );
}

#[rstest]
#[case("deadband = 0.0", "deadband must be > 0")]
#[case("deadband = -0.13", "deadband must be > 0")]
#[case("deadband = nan", "deadband must be > 0")]
#[case("deadband = 1.0", "deadband must be < 1.0")]
#[case("cruise_speed = 0.0", "cruise_speed must be > 0")]
#[case("turn_gain = -8.0", "turn_gain must be > 0")]
#[case("pivot_speed = 0.0", "pivot_speed must be > 0")]
#[case("heading_tolerance_deg = 0.0", "heading_tolerance_deg must be in (0, 180)")]
#[case(
    "heading_tolerance_deg = 180.0",
    "heading_tolerance_deg must be in (0, 180)"
)]
fn rejects_bad_control_values(#[case] line: &str, #[case] expected: &str) {
    let toml = format!("[control]\n{line}\n");
    let cfg = load_toml(&toml).expect("parse TOML");
    let err = cfg.validate().expect_err("should reject bad control value");
    assert!(
        format!("{err}").contains(expected),
        "error {err:?} should mention {expected:?}"
    );
}

#[test]
fn accepts_full_config() {
    let toml = r#"
[runtime]
time_step_ms = 32

[control]
deadband = 0.2
cruise_speed = 9.0
turn_gain = 6.5
pivot_speed = 4.0
heading_tolerance_deg = 20.0

[logging]
file = "striker.log"
level = "debug"
rotation = "daily"
"#;

    let cfg = load_toml(toml).expect("parse TOML");
    cfg.validate().expect("valid config should pass");
    assert_eq!(cfg.runtime.time_step_ms, 32);
    assert!((cfg.control.deadband - 0.2).abs() < f64::EPSILON);
    assert_eq!(cfg.logging.file.as_deref(), Some("striker.log"));
    assert_eq!(cfg.logging.rotation.as_deref(), Some("daily"));
}

#[test]
fn roster_has_three_players_per_team() {
    let blue = striker_config::ROBOT_NAMES
        .iter()
        .filter(|n| n.starts_with('B'))
        .count();
    let yellow = striker_config::ROBOT_NAMES
        .iter()
        .filter(|n| n.starts_with('Y'))
        .count();
    assert_eq!((blue, yellow), (3, 3));
}
