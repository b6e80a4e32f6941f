use std::f64::consts::PI;

use crate::trace::HandSample;

pub const DEFAULT_CENTER_Y: f32 = 0.5;
pub const DEFAULT_SWING: f32 = 0.3;

/// Generate an ideal alternating-hands trace
///
/// The hands move as antiphase sinusoids around a shared center, so they
/// exchange vertical order twice per cycle: a trace of `duration_secs`
/// carries about `2 * crossing_hz * duration_secs` crossings. Every
/// sample has both hands visible.
pub fn generate_trace(
    duration_secs: f64,
    sample_rate_hz: f64,
    crossing_hz: f64,
) -> Vec<HandSample> {
    generate_trace_with_motion_fn(duration_secs, sample_rate_hz, |t| {
        let swing = (DEFAULT_SWING as f64 * (2.0 * PI * crossing_hz * t).sin()) as f32;
        (DEFAULT_CENTER_Y + swing, DEFAULT_CENTER_Y - swing)
    })
}

/// Generate a trace from an arbitrary motion function
///
/// The function maps time in seconds to `(left_y, right_y)`.
pub fn generate_trace_with_motion_fn<F>(
    duration_secs: f64,
    sample_rate_hz: f64,
    motion_fn: F,
) -> Vec<HandSample>
where
    F: Fn(f64) -> (f32, f32),
{
    let num_samples = (duration_secs * sample_rate_hz) as usize;
    let mut samples = Vec::with_capacity(num_samples);

    for i in 0..num_samples {
        let t = i as f64 / sample_rate_hz;
        let (left_y, right_y) = motion_fn(t);
        samples.push(HandSample::new(t, Some(left_y), Some(right_y)));
    }

    samples
}
