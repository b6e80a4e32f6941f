use anyhow::{Context, Result};
use clap::Parser;
use crisscross::simulation::{
    DriftConfig, DropoutConfig, JitterConfig, TraceNoiseConfig, generate_noisy_trace,
};
use crisscross::trace::write_trace;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "generate_trace")]
#[command(about = "Generate synthetic hand-position traces with configurable tracker noise")]
struct Args {
    /// TOML noise configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "data/synthetic")]
    output_dir: PathBuf,

    /// Crossing rates in Hz: comma-separated (e.g., "0.3,0.5") or range (e.g., "0.2-1.0:0.2")
    #[arg(short, long, default_value = "0.2-1.0:0.2")]
    rates: String,

    /// Number of trials per rate
    #[arg(short, long, default_value_t = 5)]
    trials: u32,

    /// Base seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Trace duration in seconds
    #[arg(short, long, default_value_t = 60.0)]
    duration: f64,

    /// Sample rate in Hz
    #[arg(long, default_value_t = 30.0)]
    sample_rate: f64,

    /// Output filename prefix
    #[arg(long, default_value = "trace")]
    prefix: String,

    /// Generate manifest.json
    #[arg(long)]
    manifest: bool,

    /// Position jitter standard deviation (CLI override)
    #[arg(long)]
    jitter: Option<f32>,

    /// Dropout rate in Hz (CLI override)
    #[arg(long)]
    dropout_rate: Option<f64>,

    /// Sway amplitude (CLI override)
    #[arg(long)]
    drift: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlConfig {
    jitter: Option<JitterSection>,
    dropout: Option<DropoutSection>,
    drift: Option<DriftSection>,
}

#[derive(Debug, Deserialize)]
struct JitterSection {
    std_dev: f32,
}

#[derive(Debug, Deserialize)]
struct DropoutSection {
    rate_hz: f64,
    duration_samples: usize,
}

#[derive(Debug, Deserialize)]
struct DriftSection {
    amplitude: f32,
    period_secs: f64,
}

#[derive(Debug, serde::Serialize)]
struct ManifestEntry {
    file: String,
    crossing_hz: f64,
    trial: u32,
    seed: u64,
}

#[derive(Debug, serde::Serialize)]
struct Manifest {
    sample_rate_hz: f64,
    duration: f64,
    files: Vec<ManifestEntry>,
}

fn parse_rates(s: &str) -> Result<Vec<f64>> {
    if s.contains(':') {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 2 {
            anyhow::bail!("Invalid range format. Use 'start-end:step'");
        }
        let step: f64 = parts[1].parse().context("Invalid step value")?;
        let range_parts: Vec<&str> = parts[0].split('-').collect();
        if range_parts.len() != 2 {
            anyhow::bail!("Invalid range format. Use 'start-end:step'");
        }
        let start: f64 = range_parts[0].parse().context("Invalid start value")?;
        let end: f64 = range_parts[1].parse().context("Invalid end value")?;

        let mut rates = Vec::new();
        let mut r = start;
        while r <= end + 1e-9 {
            rates.push(r);
            r += step;
        }
        Ok(rates)
    } else {
        s.split(',')
            .map(|p| p.trim().parse::<f64>().context("Invalid rate value"))
            .collect()
    }
}

fn load_toml_config(path: &PathBuf) -> Result<TomlConfig> {
    let content = fs::read_to_string(path).context("Failed to read config file")?;
    toml::from_str(&content).context("Failed to parse config file")
}

fn build_noise_config(toml: &TomlConfig, args: &Args, seed: u64) -> TraceNoiseConfig {
    let mut config = TraceNoiseConfig::default().with_seed(seed);

    if let Some(std_dev) = args.jitter {
        config.jitter = Some(JitterConfig { std_dev });
    } else if let Some(ref jitter) = toml.jitter {
        config.jitter = Some(JitterConfig {
            std_dev: jitter.std_dev,
        });
    }

    if let Some(rate_hz) = args.dropout_rate {
        config.dropout = Some(DropoutConfig {
            rate_hz,
            duration_samples: 4,
        });
    } else if let Some(ref dropout) = toml.dropout {
        config.dropout = Some(DropoutConfig {
            rate_hz: dropout.rate_hz,
            duration_samples: dropout.duration_samples,
        });
    }

    if let Some(amplitude) = args.drift {
        config.drift = Some(DriftConfig {
            amplitude,
            period_secs: 8.0,
        });
    } else if let Some(ref drift) = toml.drift {
        config.drift = Some(DriftConfig {
            amplitude: drift.amplitude,
            period_secs: drift.period_secs,
        });
    }

    config
}

fn main() -> Result<()> {
    let args = Args::parse();

    fs::create_dir_all(&args.output_dir).context("Failed to create output directory")?;

    let toml_config = if let Some(ref config_path) = args.config {
        load_toml_config(config_path)?
    } else {
        TomlConfig::default()
    };

    let rates = parse_rates(&args.rates)?;
    let base_seed = args.seed.unwrap_or(0);

    let mut manifest_entries = Vec::new();
    let total_files = rates.len() * args.trials as usize;
    let mut file_count = 0;

    for &rate in &rates {
        for trial in 0..args.trials {
            let seed = base_seed + trial as u64 * 1000 + (rate * 100.0) as u64;
            let noise_config = build_noise_config(&toml_config, &args, seed);

            let samples =
                generate_noisy_trace(args.duration, args.sample_rate, rate, &noise_config);

            let filename = format!(
                "{}_r{:03}_t{:02}.jsonl",
                args.prefix,
                (rate * 100.0).round() as i32,
                trial
            );
            let filepath = args.output_dir.join(&filename);

            write_trace(&filepath, &samples).context("Failed to write trace file")?;

            manifest_entries.push(ManifestEntry {
                file: filename,
                crossing_hz: rate,
                trial,
                seed,
            });

            file_count += 1;
            eprint!("\rGenerating: {}/{}", file_count, total_files);
        }
    }
    eprintln!();

    if args.manifest {
        let manifest = Manifest {
            sample_rate_hz: args.sample_rate,
            duration: args.duration,
            files: manifest_entries,
        };
        let manifest_path = args.output_dir.join("manifest.json");
        let manifest_json =
            serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest")?;
        fs::write(&manifest_path, manifest_json).context("Failed to write manifest")?;
        eprintln!("Manifest written to: {}", manifest_path.display());
    }

    eprintln!(
        "Generated {} files in {}",
        total_files,
        args.output_dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rates_comma_separated() {
        let rates = parse_rates("0.3,0.5,1.0").unwrap();
        assert_eq!(rates, vec![0.3, 0.5, 1.0]);
    }

    #[test]
    fn test_parse_rates_range() {
        let rates = parse_rates("0.2-0.8:0.2").unwrap();
        assert_eq!(rates.len(), 4);
        assert!((rates[0] - 0.2).abs() < 1e-9);
        assert!((rates[3] - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_parse_rates_rejects_garbage() {
        assert!(parse_rates("fast,slow").is_err());
        assert!(parse_rates("0.2-0.8:0.2:bogus").is_err());
    }
}
