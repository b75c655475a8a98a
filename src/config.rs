//! Tunables of the position engine, fixed per session.

/// Scroll and visibility parameters of a [`ChartSession`](crate::session::ChartSession).
///
/// ```
/// use arc_chart::config::TimingConfig;
///
/// let config = TimingConfig::default().with_velocity(45).with_far_position(50000.0);
/// assert_eq!(config.base_bpm, 100.0);
/// assert_eq!(config.velocity, 45);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingConfig {
    /// BPM that scrolls at exactly `velocity` position units per millisecond.
    pub base_bpm: f64,
    /// Global scroll-speed multiplier.
    pub velocity: i32,
    /// Nearest visible position, usually the judge line.
    pub near_position: f64,
    /// Farthest visible position.
    pub far_position: f64,
    /// Slack in milliseconds given to objects before the visible window on the coarse
    /// render check.
    pub render_delay: i32,
    /// Lowest position at which beat lines are shown.
    pub beat_line_min_position: f64,
    /// Highest position at which beat lines are shown.
    pub beat_line_max_position: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            base_bpm: 100.0,
            velocity: 30,
            near_position: 0.0,
            far_position: 100000.0,
            render_delay: 120,
            beat_line_min_position: -10000.0,
            beat_line_max_position: 100000.0,
        }
    }
}

impl TimingConfig {
    /// Sets the base BPM.
    #[must_use]
    pub const fn with_base_bpm(mut self, base_bpm: f64) -> Self {
        self.base_bpm = base_bpm;
        self
    }

    /// Sets the velocity.
    #[must_use]
    pub const fn with_velocity(mut self, velocity: i32) -> Self {
        self.velocity = velocity;
        self
    }

    /// Sets the nearest visible position.
    #[must_use]
    pub const fn with_near_position(mut self, near_position: f64) -> Self {
        self.near_position = near_position;
        self
    }

    /// Sets the farthest visible position.
    #[must_use]
    pub const fn with_far_position(mut self, far_position: f64) -> Self {
        self.far_position = far_position;
        self
    }

    /// Sets the render slack.
    #[must_use]
    pub const fn with_render_delay(mut self, render_delay: i32) -> Self {
        self.render_delay = render_delay;
        self
    }

    /// Sets the position range in which beat lines are shown.
    #[must_use]
    pub const fn with_beat_line_range(mut self, min_position: f64, max_position: f64) -> Self {
        self.beat_line_min_position = min_position;
        self.beat_line_max_position = max_position;
        self
    }
}
