use std::f64::consts::PI;

use crisscross::trace::HandSample;

const CENTER_Y: f32 = 0.5;
const SWING: f32 = 0.3;

/// Generate antiphase sinusoidal hand motion
///
/// The hands trade vertical order twice per oscillation cycle, so the
/// trace carries about `2 * crossing_hz * duration_secs` crossings.
pub fn alternating_trace(
    duration_secs: f64,
    sample_rate_hz: f64,
    crossing_hz: f64,
) -> Vec<HandSample> {
    let num_samples = (duration_secs * sample_rate_hz) as usize;
    let mut samples = Vec::with_capacity(num_samples);

    for i in 0..num_samples {
        let t = i as f64 / sample_rate_hz;
        let swing = (SWING as f64 * (2.0 * PI * crossing_hz * t).sin()) as f32;
        samples.push(HandSample::new(t, Some(CENTER_Y + swing), Some(CENTER_Y - swing)));
    }

    samples
}

/// Generate step motion: hold far-apart positions, swap instantly
///
/// The hands sit at y = 0.2 and y = 0.8 and exchange places at every
/// segment boundary. Each swap is one unambiguous order flip, so exact
/// counts can be asserted against `swaps`. Boundaries land at
/// `k * hold_secs` on the sample grid.
pub fn step_trace(swaps: usize, hold_secs: f64, sample_rate_hz: f64) -> Vec<HandSample> {
    let samples_per_hold = ((hold_secs * sample_rate_hz) as usize).max(1);
    let mut samples = Vec::with_capacity(samples_per_hold * (swaps + 1));

    for segment in 0..=swaps {
        let (left_y, right_y) = if segment % 2 == 0 {
            (0.2, 0.8)
        } else {
            (0.8, 0.2)
        };

        for j in 0..samples_per_hold {
            let i = segment * samples_per_hold + j;
            let t = i as f64 / sample_rate_hz;
            samples.push(HandSample::new(t, Some(left_y), Some(right_y)));
        }
    }

    samples
}

/// Generate motionless hands starting at `start_t`
///
/// Left stays at 0.3, right at 0.7. Appending this to another trace makes
/// a quiet tail with no further crossings.
pub fn still_trace(start_t: f64, duration_secs: f64, sample_rate_hz: f64) -> Vec<HandSample> {
    let num_samples = (duration_secs * sample_rate_hz) as usize;

    (0..num_samples)
        .map(|i| {
            let t = start_t + i as f64 / sample_rate_hz;
            HandSample::new(t, Some(0.3), Some(0.7))
        })
        .collect()
}
