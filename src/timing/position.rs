//! Conversion between time and scroll position.
//!
//! Position is the integral of `bpm / base_bpm * velocity` over time, taken piecewise across
//! the segments of a [`TimingTimeline`]. All public methods take and return times in the
//! playback domain; the audio offset is subtracted before the timeline is consulted.

use itertools::Itertools;
use std::iter;

use super::TimingTimeline;
use crate::config::TimingConfig;

/// Time range, in the playback domain, that may be on screen.
///
/// Used as a coarse pre-filter only: an object passing [`RenderWindow::should_try_render`]
/// still needs an exact position check.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderWindow {
    /// Earliest time that may be visible.
    pub earliest: f64,
    /// Latest time that may be visible.
    pub latest: f64,
}

impl Default for RenderWindow {
    /// The unbounded window.
    fn default() -> Self {
        Self {
            earliest: f64::NEG_INFINITY,
            latest: f64::INFINITY,
        }
    }
}

impl RenderWindow {
    /// Whether an object at `time` may be visible, allowing it to start `delay` milliseconds
    /// before the window.
    #[must_use]
    pub fn should_try_render(&self, time: i32, delay: i32) -> bool {
        let time = f64::from(time);
        time + f64::from(delay) >= self.earliest && time <= self.latest
    }
}

/// Position/time conversions over a borrowed timeline.
#[derive(Debug, Clone, Copy)]
pub struct PositionTransform<'a> {
    timeline: &'a TimingTimeline,
    base_bpm: f64,
    velocity: f64,
    audio_offset: i32,
    length: i32,
}

impl<'a> PositionTransform<'a> {
    /// Creates a transform with no audio offset and a zero chart length.
    #[must_use]
    pub fn new(timeline: &'a TimingTimeline, config: &TimingConfig) -> Self {
        Self {
            timeline,
            base_bpm: config.base_bpm,
            velocity: f64::from(config.velocity),
            audio_offset: 0,
            length: 0,
        }
    }

    /// Sets the audio offset.
    #[must_use]
    pub const fn with_audio_offset(mut self, audio_offset: i32) -> Self {
        self.audio_offset = audio_offset;
        self
    }

    /// Sets the chart length, the playback time at which the chart ends.
    #[must_use]
    pub const fn with_length(mut self, length: i32) -> Self {
        self.length = length;
        self
    }

    /// The timeline this transform reads.
    #[must_use]
    pub const fn timeline(&self) -> &'a TimingTimeline {
        self.timeline
    }

    fn segment_position(&self, start: f64, end: f64, bpm: f64) -> f64 {
        (end - start) * bpm / self.base_bpm * self.velocity
    }

    /// Position of `target` seen from `pivot`.
    ///
    /// Negative when `target` precedes `pivot`, and `0` on an empty timeline. Swapping the
    /// arguments negates the result exactly.
    #[must_use]
    pub fn position_between(&self, pivot: i32, target: i32) -> f64 {
        let points = self.timeline.points();
        if points.is_empty() {
            return 0.0;
        }
        let offset = f64::from(self.audio_offset);
        let reversed = pivot > target;
        let start = f64::from(pivot.min(target)) - offset;
        let end = f64::from(pivot.max(target)) - offset;
        let start_index = self.timeline.segment_index(start).unwrap_or(0);
        let end_index = self.timeline.segment_index(end).unwrap_or(0);

        let position: f64 = points
            .iter()
            .enumerate()
            .take(end_index + 1)
            .skip(start_index)
            .map(|(index, point)| {
                let segment_start = if index == start_index {
                    start
                } else {
                    f64::from(point.timing)
                };
                let segment_end = match points.get(index + 1) {
                    Some(next) if index != end_index => f64::from(next.timing),
                    _ => end,
                };
                self.segment_position(segment_start, segment_end, point.bpm)
            })
            .sum();
        if reversed { -position } else { position }
    }

    /// Time at which an object `position` units ahead of the playhead at `current` reaches
    /// the playhead.
    ///
    /// A negative `position` yields `current` shifted into the chart domain, and so does a
    /// segment that does not scroll at all: its start is returned in the chart domain. A
    /// position beyond the end of the chart yields the chart length.
    #[must_use]
    pub fn timing_at_position(&self, current: i32, position: f64) -> i32 {
        let points = self.timeline.points();
        let Some(first) = points.first() else {
            return 0;
        };
        let offset = f64::from(self.audio_offset);
        let current = f64::from(current) - offset;
        if position < 0.0 {
            return current as i32;
        }
        let chart_end = f64::from(self.length) - offset;
        let current_index = self.timeline.segment_index(current);

        // Before the first point, the time up to it scrolls at the first point's BPM.
        let lead_in = current_index
            .is_none()
            .then(|| (f64::from(first.timing), first.bpm));
        let segments = points
            .iter()
            .enumerate()
            .skip(current_index.unwrap_or(0))
            .map(|(index, point)| {
                let end = points
                    .get(index + 1)
                    .map_or(chart_end, |next| f64::from(next.timing));
                (end, point.bpm)
            });

        let mut remain = position;
        let mut segment_start = current;
        for (segment_end, bpm) in lead_in.into_iter().chain(segments) {
            let delta = self.segment_position(segment_start, segment_end, bpm);
            if delta < remain {
                remain -= delta;
                segment_start = segment_end;
                continue;
            }
            if delta <= 0.0 {
                return segment_start as i32;
            }
            let time = lerp(segment_start, segment_end, remain / delta);
            return time.round_ties_even() as i32 + self.audio_offset;
        }
        self.length
    }

    /// BPM in effect at `time` in the chart domain. `0` on an empty timeline.
    #[must_use]
    pub fn bpm_at(&self, time: i32) -> f64 {
        self.timeline.bpm_at(f64::from(time))
    }

    /// Scroll speed relative to the base BPM at the playback time `current`.
    #[must_use]
    pub fn speed_at(&self, current: i32) -> f64 {
        if self.timeline.is_empty() {
            return 0.0;
        }
        let time = f64::from(current) - f64::from(self.audio_offset);
        self.timeline.bpm_at(time) / self.base_bpm
    }

    /// Times whose position seen from `current` lies within `near..=far`.
    ///
    /// The chart is bounded by the virtual points at playback time `0` and at the chart
    /// length. An empty timeline gives the unbounded window.
    #[must_use]
    pub fn visible_window(&self, current: i32, near: f64, far: f64) -> RenderWindow {
        let points = self.timeline.points();
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return RenderWindow::default();
        };
        let offset = f64::from(self.audio_offset);
        let current = f64::from(current) - offset;
        let current_index = self.timeline.segment_index(current);

        let mut positions = vec![0.0; points.len()];
        let mut position = 0.0;
        let mut time = current;
        let mut bpm = current_index
            .and_then(|index| points.get(index))
            .map_or(first.bpm, |point| point.bpm);
        for (point, slot) in points
            .iter()
            .zip(positions.iter_mut())
            .skip(current_index.map_or(0, |index| index + 1))
        {
            position += self.segment_position(time, f64::from(point.timing), bpm);
            *slot = position;
            time = f64::from(point.timing);
            bpm = point.bpm;
        }
        if let Some(current_index) = current_index {
            let mut back_position = 0.0;
            let mut back_time = current;
            for (point, slot) in points
                .iter()
                .zip(positions.iter_mut())
                .take(current_index + 1)
                .rev()
            {
                back_position +=
                    self.segment_position(back_time, f64::from(point.timing), point.bpm);
                *slot = back_position;
                back_time = f64::from(point.timing);
            }
        }

        let begin_time = -offset;
        let begin_position = positions.first().copied().unwrap_or_default()
            + self.segment_position(f64::from(first.timing), begin_time, first.bpm);
        let end_time = f64::from(self.length) - offset;
        let end_position = positions.last().copied().unwrap_or_default()
            + self.segment_position(f64::from(last.timing), end_time, last.bpm);
        let boundaries = iter::once((begin_time, begin_position))
            .chain(
                points
                    .iter()
                    .zip(&positions)
                    .map(|(point, &position)| (f64::from(point.timing), position)),
            )
            .chain(iter::once((end_time, end_position)));

        let mut earliest = f64::INFINITY;
        let mut latest = f64::NEG_INFINITY;
        for ((start_time, start_position), (finish_time, finish_position)) in
            boundaries.tuple_windows()
        {
            if finish_time < start_time
                || (start_position > far && finish_position > far)
                || (start_position < near && finish_position < near)
            {
                continue;
            }
            let near_time = lerp(
                start_time,
                finish_time,
                inverse_lerp(start_position, finish_position, near),
            );
            let far_time = lerp(
                start_time,
                finish_time,
                inverse_lerp(start_position, finish_position, far),
            );
            earliest = earliest.min(near_time).min(far_time);
            latest = latest.max(near_time).max(far_time);
        }
        RenderWindow {
            earliest: earliest + offset,
            latest: latest + offset,
        }
    }
}

fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t.clamp(0.0, 1.0)
}

fn inverse_lerp(start: f64, end: f64, value: f64) -> f64 {
    let span = end - start;
    if span == 0.0 {
        return 0.0;
    }
    ((value - start) / span).clamp(0.0, 1.0)
}
