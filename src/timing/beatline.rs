//! Beat-line grid.
//!
//! Beat lines are visual markers only. Every timing point starts a run of lines spaced
//! `beats_per_line` beats apart, until the next point or the chart length. The run of the
//! first point is extended backward from time `0` into the pre-roll.

use super::TimingTimeline;

/// Builds the beat-line timings of a timeline.
#[derive(Debug, Clone, Copy)]
pub struct BeatGridGenerator<'a> {
    timeline: &'a TimingTimeline,
    audio_offset: i32,
    length: i32,
}

impl<'a> BeatGridGenerator<'a> {
    /// Creates a generator with no audio offset and a zero chart length.
    #[must_use]
    pub const fn new(timeline: &'a TimingTimeline) -> Self {
        Self {
            timeline,
            audio_offset: 0,
            length: 0,
        }
    }

    /// Sets the audio offset, which bounds the pre-roll back-fill at `-audio_offset`.
    #[must_use]
    pub const fn with_audio_offset(mut self, audio_offset: i32) -> Self {
        self.audio_offset = audio_offset;
        self
    }

    /// Sets the chart length, which ends the run of the last timing point.
    #[must_use]
    pub const fn with_length(mut self, length: i32) -> Self {
        self.length = length;
        self
    }

    /// Beat-line timings in the chart domain, ascending within each run.
    ///
    /// A point with zero BPM or zero `beats_per_line` contributes a single line at its own
    /// timing. A point whose line spacing is not a positive finite number contributes
    /// nothing. Each run, the back-fill included, holds at most [`MAX_LINES_PER_RUN`] lines.
    #[must_use]
    pub fn generate(&self) -> Vec<f64> {
        let points = self.timeline.points();
        let Some(first) = points.first() else {
            return Vec::new();
        };

        let mut lines = Vec::new();
        if let Some(segment) = line_spacing(first.bpm, first.beats_per_line) {
            let pre_roll = f64::from(self.audio_offset);
            let count = line_count(pre_roll / segment, f64::floor);
            lines.extend((1..=count).rev().map(|n| -(n as f64) * segment));
        }

        for (index, point) in points.iter().enumerate() {
            let start = f64::from(point.timing);
            if point.bpm == 0.0 || point.beats_per_line == 0.0 {
                lines.push(start);
                continue;
            }
            let Some(segment) = line_spacing(point.bpm, point.beats_per_line) else {
                log::debug!("beat lines skipped for timing point at {}", point.timing);
                continue;
            };
            let next = points
                .get(index + 1)
                .map_or(f64::from(self.length), |next| f64::from(next.timing));
            let count = line_count((next - start) / segment, f64::ceil);
            lines.extend(
                (0..count)
                    .map(|n| start + n as f64 * segment)
                    .take_while(|&timing| timing < next),
            );
        }
        log::trace!("built {} beat lines", lines.len());
        lines
    }
}

/// Most lines a single run may contribute.
pub const MAX_LINES_PER_RUN: u64 = 1 << 20;

/// Number of lines in a run spanning `segments` line spacings, `0` when negative or NaN and
/// at most [`MAX_LINES_PER_RUN`].
fn line_count(segments: f64, round: fn(f64) -> f64) -> u64 {
    let count = round(segments) as u64;
    if count > MAX_LINES_PER_RUN {
        log::debug!("beat-line run of {count} lines cut to {MAX_LINES_PER_RUN}");
    }
    count.min(MAX_LINES_PER_RUN)
}

fn line_spacing(bpm: f64, beats_per_line: f64) -> Option<f64> {
    let segment = 60000.0 / bpm.abs() * beats_per_line;
    (segment.is_finite() && segment > 0.0).then_some(segment)
}
