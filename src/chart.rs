//! The chart document: typed event collections, import from and export to a record list.
//!
//! ```text
//! RecordList == ChartDocument::import ==> ChartDocument (in ImportOutput)
//! ChartDocument == ChartDocument::serialize(SortMode) ==> RecordList
//! ```
//!
//! Import is permissive about enum-like codes. An unknown line type becomes [`LineType::S`],
//! an unknown camera ease becomes [`CameraEase::Reset`] and an unknown scene control becomes
//! [`SceneControlKind::Unknown`], each reported as an [`ImportWarning`]. Structural violations
//! (an arctap outside its arc, a long note ending before it starts) fail fast with a
//! [`ChartError`].

pub mod arc;
pub mod event;
pub mod record;

use itertools::Itertools;
use thiserror::Error;

use crate::timing::TimingTimeline;

use self::{
    arc::{Arc, ArcTap, LineType},
    event::{
        Camera, CameraEase, Event, EventRef, Hold, SceneControl, SceneControlKind, Tap,
        TimingPoint, Vec3,
    },
    record::{Record, RecordList},
};

/// An error on mutating or importing a chart.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum ChartError {
    /// An arctap was placed outside of its arc.
    #[error(
        "arctap at {arc_tap_timing} is out of its arc range {arc_timing}..={arc_end_timing}"
    )]
    ArcTapOutOfRange {
        /// Start of the arc.
        arc_timing: i32,
        /// End of the arc.
        arc_end_timing: i32,
        /// Timing of the rejected arctap.
        arc_tap_timing: i32,
    },
    /// A long note ends before it starts.
    #[error("long note ends at {end_timing} before its start {timing}")]
    InvertedLongNote {
        /// Start time.
        timing: i32,
        /// End time.
        end_timing: i32,
    },
    /// No event has the id.
    #[error("event not found: {0}")]
    EventNotFound(EventId),
    /// The event with the id is not an arc.
    #[error("event is not an arc: {0}")]
    NotAnArc(EventId),
    /// The event with the id is neither a hold nor an arc.
    #[error("event is not a long note: {0}")]
    NotALongNote(EventId),
    /// The arc has no arctap at the index.
    #[error("arctap index {index} out of bounds for {len} arctaps")]
    ArcTapIndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Number of arctaps on the arc.
        len: usize,
    },
}

/// A recoverable oddity found on import, resolved to a default value.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImportWarning {
    /// The arc line type code was not recognized, used `s`.
    #[error("unknown arc line type `{0}`, using `s`")]
    UnknownLineType(String),
    /// The camera ease code was not recognized, used `reset`.
    #[error("unknown camera ease `{0}`, using `reset`")]
    UnknownEaseType(String),
    /// The scene control was not recognized, used `unknown`.
    #[error("unknown scene control `{kind}` with {} params, using `unknown`", params.len())]
    UnknownSceneControl {
        /// The kind code.
        kind: String,
        /// The parameters.
        params: Vec<String>,
    },
}

/// Output of [`ChartDocument::import`].
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct ImportOutput {
    /// The imported document.
    pub document: ChartDocument,
    /// Codes resolved to defaults during import.
    pub warnings: Vec<ImportWarning>,
}

/// Identifier of an event, unique within one [`ChartDocument`].
///
/// Presentation layers key their per-event resources by this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventId(pub usize);

impl AsRef<usize> for EventId {
    fn as_ref(&self) -> &usize {
        &self.0
    }
}

impl EventId {
    /// Create a new `EventId`
    #[must_use]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Returns the contained id value.
    #[must_use]
    pub const fn value(self) -> usize {
        self.0
    }
}

impl From<usize> for EventId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl From<EventId> for usize {
    fn from(id: EventId) -> Self {
        id.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Generator for sequential `EventId`s
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventIdGenerator {
    next: usize,
}

impl EventIdGenerator {
    /// Create a new generator starting from `start`
    #[must_use]
    pub const fn new(start: usize) -> Self {
        Self { next: start }
    }

    /// Allocate and return the next `EventId`
    #[must_use]
    pub const fn next_id(&mut self) -> EventId {
        let id = EventId(self.next);
        self.next += 1;
        id
    }
}

/// Events of one kind, in insertion order, each with its [`EventId`].
#[derive(Debug, Clone, PartialEq)]
pub struct EventList<T> {
    entries: Vec<(EventId, T)>,
}

impl<T> Default for EventList<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> EventList<T> {
    /// Number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there is no event.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the events in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, event)| event)
    }

    /// Iterates the events in order with their ids.
    pub fn iter_with_ids(&self) -> impl Iterator<Item = (EventId, &T)> {
        self.entries.iter().map(|(id, event)| (*id, event))
    }

    /// Looks an event up by id.
    #[must_use]
    pub fn get(&self, id: EventId) -> Option<&T> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, event)| event)
    }

    fn get_mut(&mut self, id: EventId) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, event)| event)
    }

    fn push(&mut self, id: EventId, event: T) {
        self.entries.push((id, event));
    }

    fn remove(&mut self, id: EventId) -> Option<T> {
        let index = self.entries.iter().position(|(entry_id, _)| *entry_id == id)?;
        Some(self.entries.remove(index).1)
    }
}

/// Ordering of [`ChartDocument::serialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortMode {
    /// By timing, then by [`EventKind::priority`](event::EventKind::priority).
    #[default]
    ByTime,
    /// By [`EventKind::priority`](event::EventKind::priority), then by timing.
    ByType,
}

/// A chart: the audio offset and one ordered collection per event kind.
///
/// Timing points live in a [`TimingTimeline`], which stays sorted by timing after every
/// insertion.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartDocument {
    /// Millisecond shift between the playback clock and the chart time domain.
    pub audio_offset: i32,
    timeline: TimingTimeline,
    taps: EventList<Tap>,
    holds: EventList<Hold>,
    arcs: EventList<Arc>,
    cameras: EventList<Camera>,
    scene_controls: EventList<SceneControl>,
    id_generator: EventIdGenerator,
}

impl ChartDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new(audio_offset: i32) -> Self {
        Self {
            audio_offset,
            ..Default::default()
        }
    }

    /// Builds a document from a record list.
    ///
    /// Unknown enum-like codes are resolved to their defaults and reported in
    /// [`ImportOutput::warnings`]. An arc record carrying arctaps is always imported as void.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::InvertedLongNote`] or [`ChartError::ArcTapOutOfRange`] on the
    /// first record violating the event invariants.
    pub fn import(records: &RecordList) -> Result<ImportOutput, ChartError> {
        let mut document = Self::new(records.audio_offset);
        let mut warnings = Vec::new();
        for record in &records.records {
            let event = event_from_record(record, &mut warnings)?;
            document.add_event(event)?;
        }
        for warning in &warnings {
            log::warn!("chart import: {warning}");
        }
        log::debug!(
            "imported {} events ({} timing points)",
            document.event_count(),
            document.timeline.len()
        );
        Ok(ImportOutput { document, warnings })
    }

    /// Flattens all collections into one ordered record list.
    ///
    /// Both orderings are stable, so coincident events of the same kind keep their
    /// collection order.
    #[must_use]
    pub fn serialize(&self, mode: SortMode) -> RecordList {
        let events = self.events();
        let sorted = match mode {
            SortMode::ByTime => events
                .sorted_by_key(|event| (event.timing(), event.kind().priority()))
                .collect_vec(),
            SortMode::ByType => events
                .sorted_by_key(|event| (event.kind().priority(), event.timing()))
                .collect_vec(),
        };
        RecordList {
            audio_offset: self.audio_offset,
            records: sorted.into_iter().map(Record::from).collect(),
        }
    }

    /// All events, collection by collection: timing points, taps, holds, arcs, cameras and
    /// scene controls.
    pub fn events(&self) -> impl Iterator<Item = EventRef<'_>> {
        self.timeline
            .points()
            .iter()
            .map(EventRef::Timing)
            .chain(self.taps.iter().map(EventRef::Tap))
            .chain(self.holds.iter().map(EventRef::Hold))
            .chain(self.arcs.iter().map(EventRef::Arc))
            .chain(self.cameras.iter().map(EventRef::Camera))
            .chain(self.scene_controls.iter().map(EventRef::SceneControl))
    }

    /// Total number of events, not counting arctaps.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.timeline.len()
            + self.taps.len()
            + self.holds.len()
            + self.arcs.len()
            + self.cameras.len()
            + self.scene_controls.len()
    }

    /// The latest `timing` or `end_timing` over all events, or `0` on an empty document.
    #[must_use]
    pub fn last_event_timing(&self) -> i32 {
        self.events()
            .map(|event| event.end_timing().max(event.timing()))
            .max()
            .unwrap_or(0)
    }

    /// The timing points.
    #[must_use]
    pub const fn timeline(&self) -> &TimingTimeline {
        &self.timeline
    }

    /// The floor taps.
    #[must_use]
    pub const fn taps(&self) -> &EventList<Tap> {
        &self.taps
    }

    /// The floor holds.
    #[must_use]
    pub const fn holds(&self) -> &EventList<Hold> {
        &self.holds
    }

    /// The arcs.
    #[must_use]
    pub const fn arcs(&self) -> &EventList<Arc> {
        &self.arcs
    }

    /// The camera movements.
    #[must_use]
    pub const fn cameras(&self) -> &EventList<Camera> {
        &self.cameras
    }

    /// The scene controls.
    #[must_use]
    pub const fn scene_controls(&self) -> &EventList<SceneControl> {
        &self.scene_controls
    }

    /// Looks an event up by id.
    #[must_use]
    pub fn event(&self, id: EventId) -> Option<EventRef<'_>> {
        if let Some(point) = self.timeline.get(id) {
            return Some(EventRef::Timing(point));
        }
        self.taps
            .get(id)
            .map(EventRef::Tap)
            .or_else(|| self.holds.get(id).map(EventRef::Hold))
            .or_else(|| self.arcs.get(id).map(EventRef::Arc))
            .or_else(|| self.cameras.get(id).map(EventRef::Camera))
            .or_else(|| self.scene_controls.get(id).map(EventRef::SceneControl))
    }

    /// Adds an event and returns its new id. Timing points are inserted into the timeline in
    /// timing order, after any point with the same timing.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::InvertedLongNote`] for a hold or arc ending before it starts and
    /// [`ChartError::ArcTapOutOfRange`] for an arc carrying a tap outside of it. The document
    /// is left unchanged.
    pub fn add_event(&mut self, event: impl Into<Event>) -> Result<EventId, ChartError> {
        let event = event.into();
        validate(&event)?;
        if let Event::Timing(point) = event {
            return Ok(self.add_timing_point(point));
        }
        let id = self.id_generator.next_id();
        match event {
            Event::Timing(_) => {}
            Event::Tap(tap) => self.taps.push(id, tap),
            Event::Hold(hold) => self.holds.push(id, hold),
            Event::Arc(arc) => self.arcs.push(id, arc),
            Event::Camera(camera) => self.cameras.push(id, camera),
            Event::SceneControl(scene_control) => self.scene_controls.push(id, scene_control),
        }
        Ok(id)
    }

    /// Inserts a timing point after every point with a timing not greater than its own, and
    /// returns its new id.
    pub fn add_timing_point(&mut self, point: TimingPoint) -> EventId {
        let id = self.id_generator.next_id();
        let index = self.timeline.insert(id, point);
        log::trace!("timing point {id} inserted at {index}: {point:?}");
        id
    }

    /// Removes an event by id and returns it.
    pub fn remove_event(&mut self, id: EventId) -> Option<Event> {
        if let Some(point) = self.timeline.remove(id) {
            log::trace!("timing point {id} removed: {point:?}");
            return Some(Event::Timing(point));
        }
        self.taps
            .remove(id)
            .map(Event::Tap)
            .or_else(|| self.holds.remove(id).map(Event::Hold))
            .or_else(|| self.arcs.remove(id).map(Event::Arc))
            .or_else(|| self.cameras.remove(id).map(Event::Camera))
            .or_else(|| self.scene_controls.remove(id).map(Event::SceneControl))
    }

    /// Removes every timing point and returns how many were removed.
    pub fn clear_timing_points(&mut self) -> usize {
        let removed = self.timeline.len();
        self.timeline.clear();
        removed
    }

    /// Attaches an arctap to the arc with `arc_id` and returns the arctap index.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::ArcTapOutOfRange`] if the tap lies outside the arc, and
    /// [`ChartError::EventNotFound`] or [`ChartError::NotAnArc`] for a bad id.
    pub fn add_arc_tap(&mut self, arc_id: EventId, arc_tap: ArcTap) -> Result<usize, ChartError> {
        self.arc_mut(arc_id)?.add_arc_tap(arc_tap)
    }

    /// Detaches the arctap at `index` from the arc with `arc_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::ArcTapIndexOutOfBounds`] if there is no such arctap, and
    /// [`ChartError::EventNotFound`] or [`ChartError::NotAnArc`] for a bad id.
    pub fn remove_arc_tap(&mut self, arc_id: EventId, index: usize) -> Result<ArcTap, ChartError> {
        self.arc_mut(arc_id)?.remove_arc_tap(index)
    }

    fn arc_mut(&mut self, id: EventId) -> Result<&mut Arc, ChartError> {
        if self.arcs.get(id).is_none() {
            return Err(if self.event(id).is_some() {
                ChartError::NotAnArc(id)
            } else {
                ChartError::EventNotFound(id)
            });
        }
        self.arcs.get_mut(id).ok_or(ChartError::EventNotFound(id))
    }

    /// Floor taps connected to `arc_tap`, that is within one millisecond of it.
    pub fn taps_linked_to(&self, arc_tap: ArcTap) -> impl Iterator<Item = &Tap> {
        let timing = arc_tap.timing;
        self.taps
            .iter()
            .filter(move |tap| (tap.timing - timing).abs() <= 1)
    }
}

fn validate(event: &Event) -> Result<(), ChartError> {
    let (timing, end_timing) = match event {
        Event::Hold(hold) => (hold.timing, hold.end_timing),
        Event::Arc(arc) => (arc.timing, arc.end_timing),
        _ => return Ok(()),
    };
    if end_timing < timing {
        return Err(ChartError::InvertedLongNote { timing, end_timing });
    }
    if let Event::Arc(arc) = event
        && let Some(arc_tap) = arc
            .arc_taps()
            .iter()
            .find(|arc_tap| !(timing..=end_timing).contains(&arc_tap.timing))
    {
        return Err(ChartError::ArcTapOutOfRange {
            arc_timing: timing,
            arc_end_timing: end_timing,
            arc_tap_timing: arc_tap.timing,
        });
    }
    Ok(())
}

fn event_from_record(record: &Record, warnings: &mut Vec<ImportWarning>) -> Result<Event, ChartError> {
    Ok(match record {
        &Record::Timing {
            timing,
            bpm,
            beats_per_line,
        } => TimingPoint::new(timing, bpm, beats_per_line).into(),
        &Record::Tap { timing, track } => Tap { timing, track }.into(),
        &Record::Hold {
            timing,
            end_timing,
            track,
        } => Hold {
            timing,
            end_timing,
            track,
        }
        .into(),
        Record::Arc {
            timing,
            end_timing,
            x_start,
            x_end,
            y_start,
            y_end,
            line_type,
            color,
            is_void,
            arc_taps,
        } => {
            if end_timing < timing {
                return Err(ChartError::InvertedLongNote {
                    timing: *timing,
                    end_timing: *end_timing,
                });
            }
            let line_type = LineType::from_code(line_type).unwrap_or_else(|| {
                warnings.push(ImportWarning::UnknownLineType(line_type.clone()));
                LineType::default()
            });
            let mut arc = Arc::new(*timing, *end_timing)
                .with_points((*x_start, *y_start), (*x_end, *y_end))
                .with_line_type(line_type)
                .with_color(*color)
                .with_void(*is_void || !arc_taps.is_empty());
            for arc_tap in arc_taps {
                arc.add_arc_tap(ArcTap::new(arc_tap.timing))?;
            }
            arc.into()
        }
        Record::Camera {
            timing,
            move_x,
            move_y,
            move_z,
            rotate_x,
            rotate_y,
            rotate_z,
            ease_type,
            duration,
        } => {
            let ease = CameraEase::from_code(ease_type).unwrap_or_else(|| {
                warnings.push(ImportWarning::UnknownEaseType(ease_type.clone()));
                CameraEase::default()
            });
            Camera {
                timing: *timing,
                movement: Vec3::new(*move_x, *move_y, *move_z),
                rotation: Vec3::new(*rotate_x, *rotate_y, *rotate_z),
                ease,
                duration: *duration,
            }
            .into()
        }
        Record::SceneControl {
            timing,
            kind,
            params,
        } => {
            let kind = SceneControlKind::from_record(kind, params).unwrap_or_else(|| {
                warnings.push(ImportWarning::UnknownSceneControl {
                    kind: kind.clone(),
                    params: params.clone(),
                });
                SceneControlKind::default()
            });
            SceneControl {
                timing: *timing,
                kind,
            }
            .into()
        }
    })
}
