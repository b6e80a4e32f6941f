mod motion;
mod noise;

pub use motion::{
    DEFAULT_CENTER_Y, DEFAULT_SWING, generate_trace, generate_trace_with_motion_fn,
};
pub use noise::{
    DriftConfig, DropoutConfig, JitterConfig, TraceNoiseConfig, apply_noise, generate_noisy_trace,
};
