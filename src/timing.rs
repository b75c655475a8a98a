//! The timing timeline and the engines computed over it.
//!
//! [`TimingTimeline`] is the single source of truth for every time/position computation. The
//! engines in the sub-modules borrow it for the duration of one query, so a value computed
//! before a mutation can never observe the mutated timeline.

pub mod beatline;
pub mod judge;
pub mod position;

use crate::chart::{EventId, event::TimingPoint};

/// Timing points sorted ascending by `timing`, each with its [`EventId`].
///
/// Points with the same timing keep their insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimingTimeline {
    points: Vec<TimingPoint>,
    ids: Vec<EventId>,
}

impl TimingTimeline {
    /// Creates an empty timeline.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            points: Vec::new(),
            ids: Vec::new(),
        }
    }

    /// Builds a standalone timeline from points in any order. The points get the ids `0..n` in
    /// the order given.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = TimingPoint>) -> Self {
        let mut timeline = Self::new();
        for (id, point) in points.into_iter().enumerate() {
            timeline.insert(EventId::new(id), point);
        }
        timeline
    }

    /// The sorted points.
    #[must_use]
    pub fn points(&self) -> &[TimingPoint] {
        &self.points
    }

    /// The sorted points with their ids.
    pub fn iter_with_ids(&self) -> impl Iterator<Item = (EventId, &TimingPoint)> {
        self.ids.iter().copied().zip(&self.points)
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether there is no point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The first point, if any.
    #[must_use]
    pub fn first(&self) -> Option<&TimingPoint> {
        self.points.first()
    }

    /// Looks a point up by id.
    #[must_use]
    pub fn get(&self, id: EventId) -> Option<&TimingPoint> {
        let index = self.ids.iter().position(|&point_id| point_id == id)?;
        self.points.get(index)
    }

    /// Inserts a point after every point with a timing not greater than its own, and returns
    /// the index it landed at.
    pub fn insert(&mut self, id: EventId, point: TimingPoint) -> usize {
        let index = self.points.partition_point(|p| p.timing <= point.timing);
        self.points.insert(index, point);
        self.ids.insert(index, id);
        index
    }

    /// Removes the point with `id`.
    pub fn remove(&mut self, id: EventId) -> Option<TimingPoint> {
        let index = self.ids.iter().position(|&point_id| point_id == id)?;
        self.ids.remove(index);
        Some(self.points.remove(index))
    }

    /// Removes all points.
    pub fn clear(&mut self) {
        self.points.clear();
        self.ids.clear();
    }

    /// Index of the last point with `timing <= time`, or `None` when `time` precedes every
    /// point (or the timeline is empty).
    #[must_use]
    pub fn segment_index(&self, time: f64) -> Option<usize> {
        self.points
            .partition_point(|p| f64::from(p.timing) <= time)
            .checked_sub(1)
    }

    /// BPM in effect at `time` in the chart domain.
    ///
    /// Before the first point the first point's BPM applies. An empty timeline yields `0`.
    #[must_use]
    pub fn bpm_at(&self, time: f64) -> f64 {
        self.segment_index(time)
            .or_else(|| (!self.is_empty()).then_some(0))
            .and_then(|index| self.points.get(index))
            .map_or(0.0, |point| point.bpm)
    }
}
