//! Numeric constants shared across the counter core
//!
//! These constants fix the detection defaults and the rate window length.
//! Detection defaults match the tuning of the original tracker deployment;
//! change them through `CounterConfig`, not here.

/// Length of the trailing rate window in seconds. A full window converts
/// directly to events-per-minute; shorter elapsed times are extrapolated.
pub const RATE_WINDOW_SECS: f64 = 60.0;

/// Default minimum vertical separation (normalized image coordinates)
/// below which the two hands are treated as indistinguishable.
pub const DEFAULT_MIN_SEPARATION: f32 = 0.02;

/// Default cooldown between accepted crossings in seconds. Prevents a
/// single physical crossing from counting on consecutive frames.
pub const DEFAULT_COOLDOWN_SECS: f64 = 0.1;

/// Default number of recent position readings retained per hand.
pub const DEFAULT_HISTORY_LENGTH: usize = 3;
