use crate::config::{DetectionMode, DetectorConfig, HistoryConfig, SmoothingMode};
use crate::error::Result;
use crate::tracking::history::{Hand, PositionHistory};

/// Vertical order of the hands after an accepted crossing
///
/// Image coordinates grow downward, so "below" means the larger y value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossingDirection {
    /// Left hand ended up below the right hand
    LeftBelowRight,
    /// Left hand ended up above the right hand
    LeftAboveRight,
}

impl CrossingDirection {
    /// Stable token for machine-readable output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LeftBelowRight => "left_below_right",
            Self::LeftAboveRight => "left_above_right",
        }
    }
}

impl std::fmt::Display for CrossingDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LeftBelowRight => write!(f, "left below right"),
            Self::LeftAboveRight => write!(f, "left above right"),
        }
    }
}

/// An accepted crossing
#[derive(Debug, Clone, Copy)]
pub struct CrossingEvent {
    /// Timestamp the crossing was accepted at (monotonic seconds)
    pub at: f64,
    /// Running count including this event
    pub count: u64,
    /// Resulting vertical order
    pub direction: CrossingDirection,
}

/// Debounced hand-crossing detector
///
/// Decides once per sample whether the two hands have just exchanged
/// vertical order in a way that should be counted. Three guards apply:
/// a minimum-separation threshold (readings closer than it are treated as
/// indistinguishable), an order comparison against the previous sample,
/// and a cooldown that suppresses re-triggering on consecutive frames.
///
/// Missing hands are data, not errors: a sample with either hand absent
/// produces no event and replaces the previous-position memory, so the
/// next full reading is compared against "no prior order" and the
/// per-mode bootstrap rules apply.
pub struct CrossingDetector {
    mode: DetectionMode,
    min_separation: f32,
    cooldown_seconds: f64,
    smoothing: SmoothingMode,
    history: PositionHistory,
    prev_left_y: Option<f32>,
    prev_right_y: Option<f32>,
    last_event_t: Option<f64>,
    count: u64,
}

fn order_sign(delta: f32) -> i8 {
    if delta > 0.0 {
        1
    } else if delta < 0.0 {
        -1
    } else {
        0
    }
}

impl CrossingDetector {
    /// Create a detector, validating thresholds
    ///
    /// A non-positive `min_separation`, a negative `cooldown_seconds`, or a
    /// zero history length is a configuration error.
    pub fn new(detector: &DetectorConfig, history: &HistoryConfig) -> Result<Self> {
        detector.validate()?;
        history.validate()?;

        Ok(Self {
            mode: detector.mode,
            min_separation: detector.min_separation,
            cooldown_seconds: detector.cooldown_seconds,
            smoothing: history.smoothing,
            history: PositionHistory::new(history.length),
            prev_left_y: None,
            prev_right_y: None,
            last_event_t: None,
            count: 0,
        })
    }

    /// Evaluate one sample
    ///
    /// Returns the accepted crossing, if any. Cooldown suppression is
    /// silent: a crossing inside the cooldown window reports `None`
    /// exactly like a frame with no crossing at all.
    ///
    /// # Arguments
    /// * `left_y`, `right_y` - vertical positions, `None` when not visible
    /// * `now` - monotonic timestamp in seconds
    pub fn observe(
        &mut self,
        left_y: Option<f32>,
        right_y: Option<f32>,
        now: f64,
    ) -> Option<CrossingEvent> {
        self.history.record(left_y, right_y);

        let (Some(left), Some(right)) = (left_y, right_y) else {
            // A hidden hand cannot cross; remember what was seen so the
            // next full reading starts from no prior order.
            self.prev_left_y = left_y;
            self.prev_right_y = right_y;
            return None;
        };

        let (left, right) = match self.smoothing {
            SmoothingMode::Latest => (left, right),
            SmoothingMode::Average => (
                self.history.mean(Hand::Left).unwrap_or(left),
                self.history.mean(Hand::Right).unwrap_or(right),
            ),
        };

        let decision = self.evaluate(left, right);

        // Previous positions advance to this frame's readings on every
        // branch, accepted or not.
        self.prev_left_y = Some(left);
        self.prev_right_y = Some(right);

        let direction = decision?;

        if !self.cooldown_elapsed(now) {
            log::trace!("crossing at {:.3}s suppressed by cooldown", now);
            return None;
        }

        self.count += 1;
        self.last_event_t = Some(now);
        log::debug!("crossing #{} at {:.3}s ({:?})", self.count, now, direction);

        Some(CrossingEvent {
            at: now,
            count: self.count,
            direction,
        })
    }

    fn evaluate(&self, left: f32, right: f32) -> Option<CrossingDirection> {
        let distance = (left - right).abs();
        if distance <= self.min_separation {
            return None;
        }

        // Past the separation guard the order is strictly +1 or -1.
        let order_now: i8 = if left > right { 1 } else { -1 };
        let order_prev = match (self.prev_left_y, self.prev_right_y) {
            (Some(l), Some(r)) => Some(order_sign(l - r)),
            _ => None,
        };

        let crossed = match self.mode {
            DetectionMode::Symmetric => {
                matches!(order_prev, Some(prev) if prev == -order_now)
            }
            DetectionMode::Asymmetric => match order_prev {
                Some(prev) => (prev <= 0 && order_now > 0) || (prev >= 0 && order_now < 0),
                // First visible pair since startup, reset, or a tracking
                // gap: count it from the current order alone.
                None => true,
            },
        };

        if !crossed {
            return None;
        }

        Some(if order_now > 0 {
            CrossingDirection::LeftBelowRight
        } else {
            CrossingDirection::LeftAboveRight
        })
    }

    fn cooldown_elapsed(&self, now: f64) -> bool {
        self.last_event_t
            .map_or(true, |last| now - last > self.cooldown_seconds)
    }

    /// Number of crossings accepted since construction or the last reset
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Timestamp of the most recently accepted crossing
    pub fn last_event_t(&self) -> Option<f64> {
        self.last_event_t
    }

    /// Clear the count, the cooldown clock, and all position memory
    pub fn reset(&mut self) {
        self.count = 0;
        self.last_event_t = None;
        self.prev_left_y = None;
        self.prev_right_y = None;
        self.history.clear();
    }
}
