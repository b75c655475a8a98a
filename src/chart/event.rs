//! Chart event types.
//!
//! Every event carries a `timing` in milliseconds of the chart time domain. [`Event`] is the
//! closed set of event kinds, and [`EventRef`] is its borrowed counterpart returned by lookups
//! into a [`ChartDocument`](super::ChartDocument).

use std::fmt;

use super::arc::Arc;
use crate::timing::{TimingTimeline, judge::JudgeTimingCalculator};

/// A change of BPM and beat-line density, effective from `timing` onward.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingPoint {
    /// Time in milliseconds.
    pub timing: i32,
    /// Beats per minute from this point. Zero or negative values are allowed and degrade
    /// dependent computations to neutral results.
    pub bpm: f64,
    /// Number of beats between two beat lines.
    pub beats_per_line: f64,
}

impl TimingPoint {
    /// Creates a new timing point.
    #[must_use]
    pub const fn new(timing: i32, bpm: f64, beats_per_line: f64) -> Self {
        Self {
            timing,
            bpm,
            beats_per_line,
        }
    }
}

/// A floor note hit at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tap {
    /// Time in milliseconds.
    pub timing: i32,
    /// Floor lane, starting from 1.
    pub track: i32,
}

/// A floor note held from `timing` until `end_timing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hold {
    /// Start time in milliseconds.
    pub timing: i32,
    /// End time in milliseconds, not less than `timing`.
    pub end_timing: i32,
    /// Floor lane, starting from 1.
    pub track: i32,
}

impl Hold {
    /// Judge timings of this hold. The head instant is judged by the hold's own head, so
    /// subdivision always starts one interval in.
    #[must_use]
    pub fn judge_timings(&self, timeline: &TimingTimeline) -> Vec<i32> {
        JudgeTimingCalculator::new(timeline).judge_timings(self.timing, self.end_timing, true)
    }
}

/// Plain 3-component vector used by camera events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// Creates a new vector.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Easing of a camera movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CameraEase {
    /// Linear, `l`.
    L,
    /// Quadratic ease-in, `qi`.
    Qi,
    /// Quadratic ease-out, `qo`.
    Qo,
    /// Resets the camera, `reset`. Also the fallback of unknown codes.
    #[default]
    Reset,
    /// Linear (legacy code `s`).
    S,
}

impl CameraEase {
    /// Parses a record code. Returns `None` on unknown codes.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "l" => Self::L,
            "qi" => Self::Qi,
            "qo" => Self::Qo,
            "reset" => Self::Reset,
            "s" => Self::S,
            _ => return None,
        })
    }

    /// The record code of this ease.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::L => "l",
            Self::Qi => "qi",
            Self::Qo => "qo",
            Self::Reset => "reset",
            Self::S => "s",
        }
    }

    /// Applies this easing to a linear progress in `0..=1`.
    #[must_use]
    pub fn apply(self, progress: f64) -> f64 {
        match self {
            Self::Qi => progress * progress,
            Self::Qo => 1.0 - (progress - 1.0) * (progress - 1.0),
            Self::L | Self::Reset | Self::S => progress,
        }
    }
}

impl fmt::Display for CameraEase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A camera movement starting at `timing` and lasting `duration` milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Camera {
    /// Start time in milliseconds.
    pub timing: i32,
    /// Translation at the end of the movement.
    pub movement: Vec3,
    /// Rotation at the end of the movement.
    pub rotation: Vec3,
    /// Easing of the movement.
    pub ease: CameraEase,
    /// Duration in milliseconds.
    pub duration: i32,
}

impl Camera {
    /// Eased progress of this movement at `timing`, in `0..=1`.
    ///
    /// The progress is `0` at or before the start and `1` after the end.
    #[must_use]
    pub fn progress_at(&self, timing: i32) -> f64 {
        if timing > self.timing.saturating_add(self.duration) {
            return 1.0;
        }
        if timing <= self.timing {
            return 0.0;
        }
        let linear = (f64::from(timing) - f64::from(self.timing)) / f64::from(self.duration);
        self.ease.apply(linear.clamp(0.0, 1.0))
    }
}

/// Kind of a scene control event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SceneControlKind {
    /// Hides the floor tracks, `trackhide`.
    TrackHide,
    /// Shows the floor tracks, `trackshow`.
    TrackShow,
    /// Anything else, exported as `unknown`.
    #[default]
    Unknown,
}

impl SceneControlKind {
    /// Resolves a record kind and its parameters. Recognized kinds take no parameters.
    #[must_use]
    pub fn from_record(kind: &str, params: &[String]) -> Option<Self> {
        match (kind, params.is_empty()) {
            ("trackhide", true) => Some(Self::TrackHide),
            ("trackshow", true) => Some(Self::TrackShow),
            ("unknown", true) => Some(Self::Unknown),
            _ => None,
        }
    }

    /// The record code of this kind.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::TrackHide => "trackhide",
            Self::TrackShow => "trackshow",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SceneControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A scene control event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneControl {
    /// Time in milliseconds.
    pub timing: i32,
    /// What this event controls.
    pub kind: SceneControlKind,
}

/// The kind of an [`Event`], without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// [`TimingPoint`].
    Timing,
    /// [`Tap`].
    Tap,
    /// [`Hold`].
    Hold,
    /// [`Arc`].
    Arc,
    /// [`Camera`].
    Camera,
    /// [`SceneControl`].
    SceneControl,
}

impl EventKind {
    /// Priority used to order coincident events on export: timing points first, then taps,
    /// holds, arcs, and everything else last.
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Timing => 1,
            Self::Tap => 2,
            Self::Hold => 3,
            Self::Arc => 4,
            Self::Camera | Self::SceneControl => 5,
        }
    }
}

/// One chart event of any kind.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// A timing point.
    Timing(TimingPoint),
    /// A floor tap.
    Tap(Tap),
    /// A floor hold.
    Hold(Hold),
    /// An arc with its arctaps.
    Arc(Arc),
    /// A camera movement.
    Camera(Camera),
    /// A scene control.
    SceneControl(SceneControl),
}

impl Event {
    /// Start time of the event.
    #[must_use]
    pub fn timing(&self) -> i32 {
        self.borrowed().timing()
    }

    /// The kind of the event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.borrowed().kind()
    }

    /// Borrows this event as an [`EventRef`].
    #[must_use]
    pub const fn borrowed(&self) -> EventRef<'_> {
        match self {
            Self::Timing(timing) => EventRef::Timing(timing),
            Self::Tap(tap) => EventRef::Tap(tap),
            Self::Hold(hold) => EventRef::Hold(hold),
            Self::Arc(arc) => EventRef::Arc(arc),
            Self::Camera(camera) => EventRef::Camera(camera),
            Self::SceneControl(scene_control) => EventRef::SceneControl(scene_control),
        }
    }
}

impl From<TimingPoint> for Event {
    fn from(value: TimingPoint) -> Self {
        Self::Timing(value)
    }
}

impl From<Tap> for Event {
    fn from(value: Tap) -> Self {
        Self::Tap(value)
    }
}

impl From<Hold> for Event {
    fn from(value: Hold) -> Self {
        Self::Hold(value)
    }
}

impl From<Arc> for Event {
    fn from(value: Arc) -> Self {
        Self::Arc(value)
    }
}

impl From<Camera> for Event {
    fn from(value: Camera) -> Self {
        Self::Camera(value)
    }
}

impl From<SceneControl> for Event {
    fn from(value: SceneControl) -> Self {
        Self::SceneControl(value)
    }
}

/// A borrowed chart event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventRef<'a> {
    /// A timing point.
    Timing(&'a TimingPoint),
    /// A floor tap.
    Tap(&'a Tap),
    /// A floor hold.
    Hold(&'a Hold),
    /// An arc with its arctaps.
    Arc(&'a Arc),
    /// A camera movement.
    Camera(&'a Camera),
    /// A scene control.
    SceneControl(&'a SceneControl),
}

impl EventRef<'_> {
    /// Start time of the event.
    #[must_use]
    pub const fn timing(self) -> i32 {
        match self {
            Self::Timing(timing) => timing.timing,
            Self::Tap(tap) => tap.timing,
            Self::Hold(hold) => hold.timing,
            Self::Arc(arc) => arc.timing,
            Self::Camera(camera) => camera.timing,
            Self::SceneControl(scene_control) => scene_control.timing,
        }
    }

    /// End time of the event, which equals [`Self::timing`] for instant events.
    #[must_use]
    pub const fn end_timing(self) -> i32 {
        match self {
            Self::Hold(hold) => hold.end_timing,
            Self::Arc(arc) => arc.end_timing,
            _ => self.timing(),
        }
    }

    /// The kind of the event.
    #[must_use]
    pub const fn kind(self) -> EventKind {
        match self {
            Self::Timing(_) => EventKind::Timing,
            Self::Tap(_) => EventKind::Tap,
            Self::Hold(_) => EventKind::Hold,
            Self::Arc(_) => EventKind::Arc,
            Self::Camera(_) => EventKind::Camera,
            Self::SceneControl(_) => EventKind::SceneControl,
        }
    }

    /// Clones the borrowed data into an owned [`Event`].
    #[must_use]
    pub fn to_owned_event(self) -> Event {
        match self {
            Self::Timing(timing) => Event::Timing(*timing),
            Self::Tap(tap) => Event::Tap(*tap),
            Self::Hold(hold) => Event::Hold(*hold),
            Self::Arc(arc) => Event::Arc(arc.clone()),
            Self::Camera(camera) => Event::Camera(*camera),
            Self::SceneControl(scene_control) => Event::SceneControl(*scene_control),
        }
    }
}
