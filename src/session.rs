use crate::config::CounterConfig;
use crate::error::Result;
use crate::tracking::{CrossingDetector, CrossingEvent, RateWindow};
use crate::trace::HandSample;

/// Outcome of feeding one sample to a session
pub struct Observation {
    /// The crossing this sample triggered, if any
    pub event: Option<CrossingEvent>,
    /// Cumulative crossings after this sample
    pub count: u64,
    /// Per-minute rate as of this sample's timestamp
    pub rate: f64,
}

/// Point-in-time view of a session, suitable for display or recording
pub struct SessionSnapshot {
    pub count: u64,
    pub rate: f64,
    pub elapsed_seconds: f64,
}

/// A counting session: detector plus rate window under one clock
///
/// `observe` is the only input path; the count and the trailing rate stay
/// consistent because every accepted crossing feeds both from the same
/// call.
pub struct CrossingSession {
    detector: CrossingDetector,
    rate: RateWindow,
    samples_seen: u64,
    samples_paired: u64,
}

impl CrossingSession {
    pub fn new(config: &CounterConfig, start_t: f64) -> Result<Self> {
        let detector = CrossingDetector::new(&config.detector, &config.history)?;

        Ok(Self {
            detector,
            rate: RateWindow::new(start_t),
            samples_seen: 0,
            samples_paired: 0,
        })
    }

    /// Feed one sample and report the resulting state
    pub fn observe(
        &mut self,
        left_y: Option<f32>,
        right_y: Option<f32>,
        now: f64,
    ) -> Observation {
        self.samples_seen += 1;
        if left_y.is_some() && right_y.is_some() {
            self.samples_paired += 1;
        }

        let event = self.detector.observe(left_y, right_y, now);
        if let Some(ref event) = event {
            self.rate.record_event(event.at);
        }

        Observation {
            event,
            count: self.detector.count(),
            rate: self.rate.rate(now),
        }
    }

    /// Feed an entire trace in timestamp order
    pub fn process_trace(&mut self, samples: &[HandSample]) -> Vec<Observation> {
        samples
            .iter()
            .map(|s| self.observe(s.left_y, s.right_y, s.t))
            .collect()
    }

    /// Current state without feeding a sample
    pub fn snapshot(&mut self, now: f64) -> SessionSnapshot {
        SessionSnapshot {
            count: self.detector.count(),
            rate: self.rate.rate(now),
            elapsed_seconds: self.rate.elapsed(now),
        }
    }

    /// Zero the count and rate and restart the session clock at `now`
    pub fn reset(&mut self, now: f64) {
        self.detector.reset();
        self.rate.restart(now);
        self.samples_seen = 0;
        self.samples_paired = 0;
        log::info!("session reset at {:.3}s", now);
    }

    pub fn count(&self) -> u64 {
        self.detector.count()
    }

    /// Samples fed since construction or the last reset
    pub fn samples_seen(&self) -> u64 {
        self.samples_seen
    }

    /// Samples where both hands were visible
    pub fn samples_paired(&self) -> u64 {
        self.samples_paired
    }
}
