//! Arcs, their arctaps and the curve geometry between arc endpoints.

use std::f64::consts::FRAC_PI_2;
use std::fmt;

use super::ChartError;
use crate::timing::{TimingTimeline, judge::JudgeTimingCalculator};

/// Shape of an arc between its start and end point.
///
/// The first half of the name describes the x axis, the second half the y axis. `Si` eases in
/// (sine), `So` eases out (sine), `S` is straight and `B` is a cubic bezier on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineType {
    /// Bezier, `b`.
    B,
    /// Straight, `s`. Also the fallback of unknown codes.
    #[default]
    S,
    /// `si`.
    Si,
    /// `so`.
    So,
    /// `sisi`.
    SiSi,
    /// `siso`.
    SiSo,
    /// `sosi`.
    SoSi,
    /// `soso`.
    SoSo,
}

/// One-dimensional easing used by an axis of an arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    /// Linear interpolation.
    Straight,
    /// Sine ease-in, reaching the end with zero slope.
    SineIn,
    /// Sine ease-out, leaving the start with zero slope.
    SineOut,
    /// Cubic bezier with both control points at the endpoints.
    Bezier,
}

impl Curve {
    /// Interpolates between `start` and `end` at `t` in `0..=1`.
    #[must_use]
    pub fn interpolate(self, start: f64, end: f64, t: f64) -> f64 {
        match self {
            Self::Straight => (1.0 - t) * start + end * t,
            Self::SineIn => start + (end - start) * (FRAC_PI_2 * t).sin(),
            Self::SineOut => start + (end - start) * (1.0 - (FRAC_PI_2 * t).cos()),
            Self::Bezier => {
                let o = 1.0 - t;
                o.powi(3) * start
                    + 3.0 * o.powi(2) * t * start
                    + 3.0 * o * t.powi(2) * end
                    + t.powi(3) * end
            }
        }
    }
}

impl LineType {
    /// Parses a record code. Returns `None` on unknown codes.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "b" => Self::B,
            "s" => Self::S,
            "si" => Self::Si,
            "so" => Self::So,
            "sisi" => Self::SiSi,
            "siso" => Self::SiSo,
            "sosi" => Self::SoSi,
            "soso" => Self::SoSo,
            _ => return None,
        })
    }

    /// The record code of this line type.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::B => "b",
            Self::S => "s",
            Self::Si => "si",
            Self::So => "so",
            Self::SiSi => "sisi",
            Self::SiSo => "siso",
            Self::SoSi => "sosi",
            Self::SoSo => "soso",
        }
    }

    /// Curve of the horizontal axis.
    #[must_use]
    pub const fn x_curve(self) -> Curve {
        match self {
            Self::B => Curve::Bezier,
            Self::S => Curve::Straight,
            Self::Si | Self::SiSi | Self::SiSo => Curve::SineIn,
            Self::So | Self::SoSi | Self::SoSo => Curve::SineOut,
        }
    }

    /// Curve of the vertical axis.
    #[must_use]
    pub const fn y_curve(self) -> Curve {
        match self {
            Self::B => Curve::Bezier,
            Self::S | Self::Si | Self::So => Curve::Straight,
            Self::SiSi | Self::SoSi => Curve::SineIn,
            Self::SiSo | Self::SoSo => Curve::SineOut,
        }
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A discrete tap placed on an arc.
///
/// The tap only stores its timing. Its position is derived from the owning [`Arc`], which the
/// caller supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcTap {
    /// Time in milliseconds.
    pub timing: i32,
}

impl ArcTap {
    /// Creates a new arctap.
    #[must_use]
    pub const fn new(timing: i32) -> Self {
        Self { timing }
    }

    /// Position of this tap along `arc` as normalized `(x, y)`.
    #[must_use]
    pub fn position(self, arc: &Arc) -> (f64, f64) {
        arc.position_at(self.timing)
    }
}

/// A continuous curved long note.
///
/// Arctaps are owned by the arc and addressed by index. Every arctap lies within
/// `timing..=end_timing`, which [`Arc::add_arc_tap`] enforces.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arc {
    /// Start time in milliseconds.
    pub timing: i32,
    /// End time in milliseconds, not less than `timing`.
    pub end_timing: i32,
    /// Normalized x at the start.
    pub x_start: f64,
    /// Normalized x at the end.
    pub x_end: f64,
    /// Normalized y at the start.
    pub y_start: f64,
    /// Normalized y at the end.
    pub y_end: f64,
    /// Shape between the endpoints.
    pub line_type: LineType,
    /// Color index.
    pub color: i32,
    /// Whether the arc is a trace without its own hit surface.
    pub is_void: bool,
    arc_taps: Vec<ArcTap>,
}

impl Arc {
    /// Creates a straight, non-void arc from `(0, 0)` to `(0, 0)` without arctaps.
    #[must_use]
    pub const fn new(timing: i32, end_timing: i32) -> Self {
        Self {
            timing,
            end_timing,
            x_start: 0.0,
            x_end: 0.0,
            y_start: 0.0,
            y_end: 0.0,
            line_type: LineType::S,
            color: 0,
            is_void: false,
            arc_taps: Vec::new(),
        }
    }

    /// Sets the start and end points.
    #[must_use]
    pub fn with_points(mut self, start: (f64, f64), end: (f64, f64)) -> Self {
        self.x_start = start.0;
        self.y_start = start.1;
        self.x_end = end.0;
        self.y_end = end.1;
        self
    }

    /// Sets the line type.
    #[must_use]
    pub fn with_line_type(mut self, line_type: LineType) -> Self {
        self.line_type = line_type;
        self
    }

    /// Sets the color index.
    #[must_use]
    pub fn with_color(mut self, color: i32) -> Self {
        self.color = color;
        self
    }

    /// Sets the void flag.
    #[must_use]
    pub fn with_void(mut self, is_void: bool) -> Self {
        self.is_void = is_void;
        self
    }

    /// Arctaps of this arc in insertion order.
    #[must_use]
    pub fn arc_taps(&self) -> &[ArcTap] {
        &self.arc_taps
    }

    /// Duration in milliseconds.
    #[must_use]
    pub const fn duration(&self) -> i64 {
        self.end_timing as i64 - self.timing as i64
    }

    /// Attaches an arctap and returns its index.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::ArcTapOutOfRange`] if the tap lies outside
    /// `timing..=end_timing`. The arc is left unchanged.
    pub fn add_arc_tap(&mut self, arc_tap: ArcTap) -> Result<usize, ChartError> {
        if !(self.timing..=self.end_timing).contains(&arc_tap.timing) {
            return Err(ChartError::ArcTapOutOfRange {
                arc_timing: self.timing,
                arc_end_timing: self.end_timing,
                arc_tap_timing: arc_tap.timing,
            });
        }
        self.arc_taps.push(arc_tap);
        Ok(self.arc_taps.len() - 1)
    }

    /// Detaches the arctap at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::ArcTapIndexOutOfBounds`] if there is no such arctap.
    pub fn remove_arc_tap(&mut self, index: usize) -> Result<ArcTap, ChartError> {
        if index >= self.arc_taps.len() {
            return Err(ChartError::ArcTapIndexOutOfBounds {
                index,
                len: self.arc_taps.len(),
            });
        }
        Ok(self.arc_taps.remove(index))
    }

    /// Normalized `(x, y)` of the arc at `timing`.
    ///
    /// `timing` is not clamped into the arc. A zero-length arc is evaluated at its start.
    #[must_use]
    pub fn position_at(&self, timing: i32) -> (f64, f64) {
        let t = if self.duration() == 0 {
            0.0
        } else {
            (f64::from(timing) - f64::from(self.timing)) / self.duration() as f64
        };
        (
            self.line_type
                .x_curve()
                .interpolate(self.x_start, self.x_end, t),
            self.line_type
                .y_curve()
                .interpolate(self.y_start, self.y_end, t),
        )
    }

    /// Judge timings of this arc.
    ///
    /// Void arcs and zero-length arcs are never judged. `head_rendered` tells whether the
    /// first instant of the arc is judged on its own (see [`JudgeTimingCalculator`]).
    #[must_use]
    pub fn judge_timings(&self, timeline: &TimingTimeline, head_rendered: bool) -> Vec<i32> {
        if self.is_void || self.end_timing == self.timing {
            return Vec::new();
        }
        JudgeTimingCalculator::new(timeline).judge_timings(
            self.timing,
            self.end_timing,
            head_rendered,
        )
    }
}
