//! The flat record layout a chart is imported from and exported to.
//!
//! Records keep enum-like fields (line type, camera ease, scene control kind) as raw string
//! codes, so a record list can carry codes this crate does not know. Resolving them into
//! typed values happens on [`ChartDocument::import`](super::ChartDocument::import).

use super::arc::{Arc, ArcTap};
use super::event::{Camera, EventRef, Hold, SceneControl, Tap, TimingPoint};

/// One arctap inside an [`Record::Arc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcTapRecord {
    /// Time in milliseconds.
    pub timing: i32,
}

/// One raw chart event.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")
)]
pub enum Record {
    /// `timing(t,bpm,beatsPerLine)`.
    Timing {
        /// Time in milliseconds.
        timing: i32,
        /// Beats per minute.
        bpm: f64,
        /// Beats between two beat lines.
        beats_per_line: f64,
    },
    /// `(t,track)`.
    Tap {
        /// Time in milliseconds.
        timing: i32,
        /// Floor lane.
        track: i32,
    },
    /// `hold(t,end,track)`.
    Hold {
        /// Start time in milliseconds.
        timing: i32,
        /// End time in milliseconds.
        end_timing: i32,
        /// Floor lane.
        track: i32,
    },
    /// `arc(...)[arctap(...),...]`.
    Arc {
        /// Start time in milliseconds.
        timing: i32,
        /// End time in milliseconds.
        end_timing: i32,
        /// Normalized x at the start.
        x_start: f64,
        /// Normalized x at the end.
        x_end: f64,
        /// Normalized y at the start.
        y_start: f64,
        /// Normalized y at the end.
        y_end: f64,
        /// Line type code, one of `b`, `s`, `si`, `so`, `sisi`, `siso`, `sosi`, `soso`.
        line_type: String,
        /// Color index.
        color: i32,
        /// Void flag.
        is_void: bool,
        /// Arctaps in order.
        #[cfg_attr(feature = "serde", serde(default))]
        arc_taps: Vec<ArcTapRecord>,
    },
    /// `camera(...)`.
    Camera {
        /// Start time in milliseconds.
        timing: i32,
        /// Translation x.
        move_x: f64,
        /// Translation y.
        move_y: f64,
        /// Translation z.
        move_z: f64,
        /// Rotation x.
        rotate_x: f64,
        /// Rotation y.
        rotate_y: f64,
        /// Rotation z.
        rotate_z: f64,
        /// Ease code, one of `l`, `reset`, `qi`, `qo`, `s`.
        ease_type: String,
        /// Duration in milliseconds.
        duration: i32,
    },
    /// `scenecontrol(t,kind,...)`.
    SceneControl {
        /// Time in milliseconds.
        timing: i32,
        /// Kind code.
        kind: String,
        /// Raw parameters after the kind.
        #[cfg_attr(feature = "serde", serde(default))]
        params: Vec<String>,
    },
}

impl Record {
    /// Start time of the record.
    #[must_use]
    pub const fn timing(&self) -> i32 {
        match self {
            Self::Timing { timing, .. }
            | Self::Tap { timing, .. }
            | Self::Hold { timing, .. }
            | Self::Arc { timing, .. }
            | Self::Camera { timing, .. }
            | Self::SceneControl { timing, .. } => *timing,
        }
    }
}

/// A whole chart as a flat ordered record list.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RecordList {
    /// Millisecond shift between the playback clock and the chart time domain.
    #[cfg_attr(feature = "serde", serde(default))]
    pub audio_offset: i32,
    /// Records in order.
    pub records: Vec<Record>,
}

impl From<&TimingPoint> for Record {
    fn from(value: &TimingPoint) -> Self {
        Self::Timing {
            timing: value.timing,
            bpm: value.bpm,
            beats_per_line: value.beats_per_line,
        }
    }
}

impl From<&Tap> for Record {
    fn from(value: &Tap) -> Self {
        Self::Tap {
            timing: value.timing,
            track: value.track,
        }
    }
}

impl From<&Hold> for Record {
    fn from(value: &Hold) -> Self {
        Self::Hold {
            timing: value.timing,
            end_timing: value.end_timing,
            track: value.track,
        }
    }
}

impl From<&Arc> for Record {
    fn from(value: &Arc) -> Self {
        Self::Arc {
            timing: value.timing,
            end_timing: value.end_timing,
            x_start: value.x_start,
            x_end: value.x_end,
            y_start: value.y_start,
            y_end: value.y_end,
            line_type: value.line_type.code().to_string(),
            color: value.color,
            is_void: value.is_void,
            arc_taps: value.arc_taps().iter().map(ArcTapRecord::from).collect(),
        }
    }
}

impl From<&ArcTap> for ArcTapRecord {
    fn from(value: &ArcTap) -> Self {
        Self {
            timing: value.timing,
        }
    }
}

impl From<&Camera> for Record {
    fn from(value: &Camera) -> Self {
        Self::Camera {
            timing: value.timing,
            move_x: value.movement.x,
            move_y: value.movement.y,
            move_z: value.movement.z,
            rotate_x: value.rotation.x,
            rotate_y: value.rotation.y,
            rotate_z: value.rotation.z,
            ease_type: value.ease.code().to_string(),
            duration: value.duration,
        }
    }
}

impl From<&SceneControl> for Record {
    fn from(value: &SceneControl) -> Self {
        Self::SceneControl {
            timing: value.timing,
            kind: value.kind.code().to_string(),
            params: Vec::new(),
        }
    }
}

impl From<EventRef<'_>> for Record {
    fn from(value: EventRef<'_>) -> Self {
        match value {
            EventRef::Timing(timing) => timing.into(),
            EventRef::Tap(tap) => tap.into(),
            EventRef::Hold(hold) => hold.into(),
            EventRef::Arc(arc) => arc.into(),
            EventRef::Camera(camera) => camera.into(),
            EventRef::SceneControl(scene_control) => scene_control.into(),
        }
    }
}
