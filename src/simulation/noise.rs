use std::f64::consts::PI;

use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::trace::HandSample;

/// Tracker imperfections to layer onto an ideal trace
///
/// Every section is optional; an empty config is a no-op. A fixed `seed`
/// makes the corruption reproducible.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct TraceNoiseConfig {
    pub seed: Option<u64>,
    pub jitter: Option<JitterConfig>,
    pub dropout: Option<DropoutConfig>,
    pub drift: Option<DriftConfig>,
}

impl TraceNoiseConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_jitter(mut self, std_dev: f32) -> Self {
        self.jitter = Some(JitterConfig { std_dev });
        self
    }

    pub fn with_dropout(mut self, rate_hz: f64, duration_samples: usize) -> Self {
        self.dropout = Some(DropoutConfig {
            rate_hz,
            duration_samples,
        });
        self
    }

    pub fn with_drift(mut self, amplitude: f32, period_secs: f64) -> Self {
        self.drift = Some(DriftConfig {
            amplitude,
            period_secs,
        });
        self
    }
}

/// Per-sample Gaussian position noise, applied to each visible hand
#[derive(Clone, Debug, serde::Deserialize)]
pub struct JitterConfig {
    pub std_dev: f32,
}

/// Burst tracking loss: one hand disappears for a stretch of samples
#[derive(Clone, Debug, serde::Deserialize)]
pub struct DropoutConfig {
    pub rate_hz: f64,
    pub duration_samples: usize,
}

/// Slow whole-body sway added to both hands equally
#[derive(Clone, Debug, serde::Deserialize)]
pub struct DriftConfig {
    pub amplitude: f32,
    pub period_secs: f64,
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

fn apply_drift(samples: &mut [HandSample], config: &DriftConfig) {
    if config.period_secs <= 0.0 {
        return;
    }

    for sample in samples.iter_mut() {
        let offset = config.amplitude * (2.0 * PI * sample.t / config.period_secs).sin() as f32;
        if let Some(y) = sample.left_y.as_mut() {
            *y += offset;
        }
        if let Some(y) = sample.right_y.as_mut() {
            *y += offset;
        }
    }
}

fn apply_jitter(samples: &mut [HandSample], config: &JitterConfig, rng: &mut ChaCha8Rng) {
    let normal = Normal::new(0.0, config.std_dev as f64).unwrap();

    for sample in samples.iter_mut() {
        if let Some(y) = sample.left_y.as_mut() {
            *y += normal.sample(rng) as f32;
        }
        if let Some(y) = sample.right_y.as_mut() {
            *y += normal.sample(rng) as f32;
        }
    }
}

fn apply_dropout(
    samples: &mut [HandSample],
    config: &DropoutConfig,
    sample_rate_hz: f64,
    rng: &mut ChaCha8Rng,
) {
    let n = samples.len();
    if n == 0 || config.rate_hz <= 0.0 {
        return;
    }

    let avg_samples_between = sample_rate_hz / config.rate_hz;

    let mut pos = 0usize;
    loop {
        let interval = (rng.random::<f64>() * 2.0 * avg_samples_between) as usize;
        pos += interval.max(1);

        if pos >= n {
            break;
        }

        let drop_left = rng.random::<bool>();
        let end = (pos + config.duration_samples).min(n);

        for sample in samples[pos..end].iter_mut() {
            if drop_left {
                sample.left_y = None;
            } else {
                sample.right_y = None;
            }
        }

        // Bursts never overlap, so no sample loses both hands at once.
        pos = end;
    }
}

/// Corrupt a clean trace according to `config`
pub fn apply_noise(
    clean: &[HandSample],
    config: &TraceNoiseConfig,
    sample_rate_hz: f64,
) -> Vec<HandSample> {
    let mut samples = clean.to_vec();
    let mut rng = create_rng(config.seed);

    if let Some(ref drift_config) = config.drift {
        apply_drift(&mut samples, drift_config);
    }

    if let Some(ref jitter_config) = config.jitter {
        apply_jitter(&mut samples, jitter_config, &mut rng);
    }

    if let Some(ref dropout_config) = config.dropout {
        apply_dropout(&mut samples, dropout_config, sample_rate_hz, &mut rng);
    }

    samples
}

/// Generate an alternating-hands trace with tracker noise applied
pub fn generate_noisy_trace(
    duration_secs: f64,
    sample_rate_hz: f64,
    crossing_hz: f64,
    config: &TraceNoiseConfig,
) -> Vec<HandSample> {
    let clean = super::motion::generate_trace(duration_secs, sample_rate_hz, crossing_hz);
    apply_noise(&clean, config, sample_rate_hz)
}
