//! Prelude module for the crate.
//!
//! `use arc_chart::prelude::*;` imports the chart model, the session and the timing engines.

pub use crate::aff::AffError;
pub use crate::chart::{
    ChartDocument, ChartError, EventId, EventIdGenerator, EventList, ImportOutput,
    ImportWarning, SortMode,
    arc::{Arc, ArcTap, Curve, LineType},
    event::{
        Camera, CameraEase, Event, EventKind, EventRef, Hold, SceneControl, SceneControlKind,
        Tap, TimingPoint, Vec3,
    },
    record::{ArcTapRecord, Record, RecordList},
};
pub use crate::config::TimingConfig;
#[cfg(feature = "json")]
pub use crate::json::JsonError;
pub use crate::session::{ChartSession, VisibleBeatLine};
pub use crate::timing::{
    TimingTimeline,
    beatline::BeatGridGenerator,
    judge::JudgeTimingCalculator,
    position::{PositionTransform, RenderWindow},
};
