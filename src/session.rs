//! The session-scoped service for one active chart.
//!
//! A [`ChartSession`] owns the [`ChartDocument`] together with the state derived from it: the
//! beat grid, the current speed and the render window. Mutations go through the session so
//! that every derived value is rebuilt before the next query is served. Consumers hold a
//! reference to the session and never keep derived values across a mutation.
//!
//! The host drives the session once per frame:
//!
//! ```
//! use arc_chart::prelude::*;
//!
//! let mut document = ChartDocument::new(0);
//! document.add_event(TimingPoint::new(0, 120.0, 4.0)).unwrap();
//! document.add_event(Tap { timing: 4000, track: 1 }).unwrap();
//!
//! let mut session = ChartSession::new(document, TimingConfig::default());
//! session.tick(1000);
//! assert_eq!(session.current_speed(), 1.2);
//! assert!(session.should_try_render(1500));
//! assert_eq!(session.position_from_current(2000), 36000.0);
//! ```

use crate::chart::{
    ChartDocument, ChartError, EventId, ImportOutput, ImportWarning, SortMode,
    arc::ArcTap,
    event::{Event, EventRef, TimingPoint},
    record::RecordList,
};
use crate::config::TimingConfig;
use crate::timing::{
    beatline::BeatGridGenerator,
    position::{PositionTransform, RenderWindow},
};

/// A beat line currently in the visible position range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleBeatLine {
    /// Time of the line in the chart domain.
    pub timing: f64,
    /// Position of the line seen from the playhead.
    pub position: f64,
}

/// One active chart with its timing configuration and playhead.
#[derive(Debug, Clone)]
pub struct ChartSession {
    document: ChartDocument,
    config: TimingConfig,
    length: i32,
    playhead: i32,
    current_speed: f64,
    render_window: RenderWindow,
    beat_lines: Vec<f64>,
}

impl ChartSession {
    /// Starts a session at playhead `0`. The chart length is the last event timing of the
    /// document.
    #[must_use]
    pub fn new(document: ChartDocument, config: TimingConfig) -> Self {
        let length = document.last_event_timing();
        let mut session = Self {
            document,
            config,
            length,
            playhead: 0,
            current_speed: 0.0,
            render_window: RenderWindow::default(),
            beat_lines: Vec::new(),
        };
        session.on_timing_change();
        session
    }

    /// The chart.
    #[must_use]
    pub const fn document(&self) -> &ChartDocument {
        &self.document
    }

    /// Ends the session and returns the chart.
    #[must_use]
    pub fn into_document(self) -> ChartDocument {
        self.document
    }

    /// The timing configuration.
    #[must_use]
    pub const fn config(&self) -> &TimingConfig {
        &self.config
    }

    /// Chart length in milliseconds of the playback domain.
    #[must_use]
    pub const fn length(&self) -> i32 {
        self.length
    }

    /// Playhead of the last [`Self::tick`].
    #[must_use]
    pub const fn playhead(&self) -> i32 {
        self.playhead
    }

    /// Scroll speed relative to the base BPM at the playhead, `0` without timing points.
    #[must_use]
    pub const fn current_speed(&self) -> f64 {
        self.current_speed
    }

    /// The render window at the playhead.
    #[must_use]
    pub const fn render_window(&self) -> RenderWindow {
        self.render_window
    }

    /// All beat-line timings in the chart domain.
    #[must_use]
    pub fn beat_lines(&self) -> &[f64] {
        &self.beat_lines
    }

    /// The position engine over the current timeline.
    #[must_use]
    pub fn transform(&self) -> PositionTransform<'_> {
        PositionTransform::new(self.document.timeline(), &self.config)
            .with_audio_offset(self.document.audio_offset)
            .with_length(self.length)
    }

    /// Moves the playhead to `now` and refreshes the speed and the render window.
    pub fn tick(&mut self, now: i32) {
        self.playhead = now;
        self.refresh();
    }

    fn refresh(&mut self) {
        let transform = self.transform();
        let current_speed = transform.speed_at(self.playhead);
        let render_window = transform.visible_window(
            self.playhead,
            self.config.near_position,
            self.config.far_position,
        );
        self.current_speed = current_speed;
        self.render_window = render_window;
    }

    fn on_timing_change(&mut self) {
        self.beat_lines = BeatGridGenerator::new(self.document.timeline())
            .with_audio_offset(self.document.audio_offset)
            .with_length(self.length)
            .generate();
        log::debug!(
            "timeline of {} points, {} beat lines",
            self.document.timeline().len(),
            self.beat_lines.len()
        );
        self.refresh();
    }

    /// Position of `target` seen from `pivot`.
    #[must_use]
    pub fn position_between(&self, pivot: i32, target: i32) -> f64 {
        self.transform().position_between(pivot, target)
    }

    /// Position of `target` seen from the playhead.
    #[must_use]
    pub fn position_from_current(&self, target: i32) -> f64 {
        self.position_between(self.playhead, target)
    }

    /// Time at which an object `position` units ahead of `current` reaches the playhead.
    #[must_use]
    pub fn timing_at_position(&self, current: i32, position: f64) -> i32 {
        self.transform().timing_at_position(current, position)
    }

    /// BPM in effect at `time` in the chart domain.
    #[must_use]
    pub fn bpm_at(&self, time: i32) -> f64 {
        self.transform().bpm_at(time)
    }

    /// Coarse visibility check of an object at `time` with the configured render slack.
    #[must_use]
    pub fn should_try_render(&self, time: i32) -> bool {
        self.should_try_render_with_delay(time, self.config.render_delay)
    }

    /// Coarse visibility check of an object at `time` allowing `delay` milliseconds of slack.
    #[must_use]
    pub fn should_try_render_with_delay(&self, time: i32, delay: i32) -> bool {
        self.render_window.should_try_render(time, delay)
    }

    /// Beat lines inside the render window and the configured position range.
    pub fn visible_beat_lines(&self) -> impl Iterator<Item = VisibleBeatLine> + '_ {
        let offset = f64::from(self.document.audio_offset);
        let range = self.config.beat_line_min_position..=self.config.beat_line_max_position;
        self.beat_lines.iter().filter_map(move |&timing| {
            let time = (timing + offset) as i32;
            if !self.should_try_render_with_delay(time, 0) {
                return None;
            }
            let position = self.position_from_current(time);
            range
                .contains(&position)
                .then_some(VisibleBeatLine { timing, position })
        })
    }

    /// Judge timings of the hold or arc with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::EventNotFound`] for an unknown id and [`ChartError::NotALongNote`]
    /// for an event that is neither a hold nor an arc.
    pub fn judge_timings(&self, id: EventId, head_rendered: bool) -> Result<Vec<i32>, ChartError> {
        let timeline = self.document.timeline();
        match self.document.event(id) {
            Some(EventRef::Hold(hold)) => Ok(hold.judge_timings(timeline)),
            Some(EventRef::Arc(arc)) => Ok(arc.judge_timings(timeline, head_rendered)),
            Some(_) => Err(ChartError::NotALongNote(id)),
            None => Err(ChartError::EventNotFound(id)),
        }
    }

    /// Adds a timing point and rebuilds the beat grid.
    pub fn add_timing_point(&mut self, point: TimingPoint) -> EventId {
        let id = self.document.add_timing_point(point);
        self.on_timing_change();
        id
    }

    /// Removes a timing point and rebuilds the beat grid.
    ///
    /// Returns `None` if `id` is not a timing point; nothing is removed then.
    pub fn remove_timing_point(&mut self, id: EventId) -> Option<TimingPoint> {
        self.document.timeline().get(id)?;
        let Some(Event::Timing(point)) = self.document.remove_event(id) else {
            return None;
        };
        self.on_timing_change();
        Some(point)
    }

    /// Adds an event of any kind.
    ///
    /// # Errors
    ///
    /// See [`ChartDocument::add_event`].
    pub fn add_event(&mut self, event: impl Into<Event>) -> Result<EventId, ChartError> {
        let event = event.into();
        let is_timing = matches!(event, Event::Timing(_));
        let id = self.document.add_event(event)?;
        if is_timing {
            self.on_timing_change();
        }
        Ok(id)
    }

    /// Removes an event of any kind.
    pub fn remove_event(&mut self, id: EventId) -> Option<Event> {
        let removed = self.document.remove_event(id)?;
        if matches!(removed, Event::Timing(_)) {
            self.on_timing_change();
        }
        Some(removed)
    }

    /// Attaches an arctap to an arc.
    ///
    /// # Errors
    ///
    /// See [`ChartDocument::add_arc_tap`].
    pub fn add_arc_tap(&mut self, arc_id: EventId, arc_tap: ArcTap) -> Result<usize, ChartError> {
        self.document.add_arc_tap(arc_id, arc_tap)
    }

    /// Detaches an arctap from an arc.
    ///
    /// # Errors
    ///
    /// See [`ChartDocument::remove_arc_tap`].
    pub fn remove_arc_tap(&mut self, arc_id: EventId, index: usize) -> Result<ArcTap, ChartError> {
        self.document.remove_arc_tap(arc_id, index)
    }

    /// Replaces the chart with one imported from `records`. The chart length becomes the
    /// last event timing of the new chart.
    ///
    /// # Errors
    ///
    /// See [`ChartDocument::import`]. The session is left unchanged on error.
    pub fn import(&mut self, records: &RecordList) -> Result<Vec<ImportWarning>, ChartError> {
        let ImportOutput { document, warnings } = ChartDocument::import(records)?;
        self.length = document.last_event_timing();
        self.document = document;
        self.on_timing_change();
        Ok(warnings)
    }

    /// Exports the chart.
    #[must_use]
    pub fn serialize(&self, mode: SortMode) -> RecordList {
        self.document.serialize(mode)
    }

    /// Changes the velocity.
    pub fn set_velocity(&mut self, velocity: i32) {
        self.config.velocity = velocity;
        self.refresh();
    }

    /// Changes the base BPM.
    pub fn set_base_bpm(&mut self, base_bpm: f64) {
        self.config.base_bpm = base_bpm;
        self.refresh();
    }

    /// Changes the audio offset of the chart.
    pub fn set_audio_offset(&mut self, audio_offset: i32) {
        self.document.audio_offset = audio_offset;
        self.on_timing_change();
    }

    /// Changes the chart length.
    pub fn set_length(&mut self, length: i32) {
        self.length = length;
        self.on_timing_change();
    }

    /// Removes every timing point. The speed drops to `0` and the render window becomes
    /// unbounded.
    pub fn clear(&mut self) {
        let removed = self.document.clear_timing_points();
        log::debug!("cleared {removed} timing points");
        self.on_timing_change();
    }
}
