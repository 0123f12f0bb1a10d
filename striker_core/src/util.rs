//! Small pure helpers for angle handling.

use std::f64::consts::{FRAC_PI_2, PI};

/// Wrap an angle in radians into `(-PI, PI]`.
#[inline]
pub fn wrap_pi(rad: f64) -> f64 {
    let two_pi = 2.0 * PI;
    let mut a = rad % two_pi;
    if a <= -PI {
        a += two_pi;
    } else if a > PI {
        a -= two_pi;
    }
    a
}

/// Wrap an angle in degrees into `[0, 360)`.
#[inline]
pub fn normalize_deg(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d < 0.0 {
        d += 360.0;
    }
    d
}

/// Heading in radians from a 3-axis compass reading.
///
/// The platform mounts the compass so that the robot's forward axis sits a
/// quarter turn off the north vector: heading = atan2(n_x, n_y) + PI/2,
/// wrapped into `(-PI, PI]`.
#[inline]
pub fn heading_from_north(north: [f64; 3]) -> f64 {
    wrap_pi(north[0].atan2(north[1]) + FRAC_PI_2)
}
