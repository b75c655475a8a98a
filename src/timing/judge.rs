//! Judge timings of long notes.
//!
//! A long note is judged at regular subdivisions of its duration. The interval is half a beat
//! below 255 BPM and a full beat from 255 BPM on, so the judge density stays in a similar
//! range on fast charts.

use super::TimingTimeline;

/// BPM from which a long note is subdivided by whole beats instead of half beats.
pub const FULL_BEAT_BPM: f64 = 255.0;

/// Computes judge timings against a borrowed timeline.
#[derive(Debug, Clone, Copy)]
pub struct JudgeTimingCalculator<'a> {
    timeline: &'a TimingTimeline,
}

impl<'a> JudgeTimingCalculator<'a> {
    /// Creates a calculator over `timeline`.
    #[must_use]
    pub const fn new(timeline: &'a TimingTimeline) -> Self {
        Self { timeline }
    }

    /// Subdivision interval in milliseconds at `timing`, or `None` if the BPM there is not
    /// positive.
    #[must_use]
    pub fn interval_at(&self, timing: i32) -> Option<f64> {
        let bpm = self.timeline.bpm_at(f64::from(timing));
        if bpm <= 0.0 {
            return None;
        }
        let per_beat = if bpm >= FULL_BEAT_BPM { 1.0 } else { 2.0 };
        Some(60000.0 / bpm / per_beat)
    }

    /// Judge timings of a long note spanning `timing..end_timing`, in ascending order.
    ///
    /// The BPM at `timing` decides the interval for the whole note. When `head_rendered` is
    /// set the first instant is judged elsewhere and subdivision starts one interval in;
    /// otherwise it starts at the head itself. A note too short for more than that yields its
    /// midpoint alone. A non-positive BPM yields nothing.
    #[must_use]
    pub fn judge_timings(&self, timing: i32, end_timing: i32, head_rendered: bool) -> Vec<i32> {
        let Some(interval) = self.interval_at(timing) else {
            return Vec::new();
        };
        let duration = f64::from(end_timing) - f64::from(timing);
        let total = (duration / interval) as i64;
        let first = i64::from(head_rendered);
        if first >= total {
            return vec![(f64::from(timing) + duration * 0.5) as i32];
        }
        (first..total)
            .map(|n| (f64::from(timing) + n as f64 * interval) as i32)
            .filter(|&judge| judge < end_timing)
            .collect()
    }
}
