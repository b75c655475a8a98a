//! Tests for `arc_chart::timing`.
//!
//! Position and time values are compared with [`assert_close`], which allows an absolute
//! error of [`POSITION_EPSILON`].

mod beatline;
mod judge;

use arc_chart::prelude::*;

/// Allowed absolute error of floating-point positions and times.
pub(crate) const POSITION_EPSILON: f64 = 1e-6;

/// Asserts that two floating-point values are equal within [`POSITION_EPSILON`].
#[track_caller]
pub(crate) fn assert_close(expected: f64, actual: f64, msg: &str) {
    let diff = (expected - actual).abs();
    assert!(
        diff < POSITION_EPSILON,
        "{msg}: expected {expected:.6}, got {actual:.6}, diff {diff:.9} (allowed: {POSITION_EPSILON})",
    );
}

/// A timeline with a BPM change at 1000 and 3000.
pub(crate) fn changing_timeline() -> TimingTimeline {
    TimingTimeline::from_points([
        TimingPoint::new(0, 100.0, 4.0),
        TimingPoint::new(1000, 200.0, 4.0),
        TimingPoint::new(3000, 50.0, 2.0),
    ])
}
