use clap::Parser;
use rolling_stats::Stats;
use serde::Serialize;
use std::path::PathBuf;

use crisscross::config::{CooldownInterval, CounterConfig, DetectionMode, SmoothingMode};
use crisscross::session::CrossingSession;
use crisscross::trace::read_trace;

#[derive(Parser, Debug)]
#[command(name = "analyze_trace")]
#[command(about = "Analyze hand-position traces for crossing statistics", long_about = None)]
struct Args {
    /// Trace files to analyze
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Detection mode: symmetric, asymmetric
    #[arg(short = 'm', long, value_enum, default_value = "symmetric")]
    mode: DetectionMode,

    /// Cooldown between counted crossings (e.g. "0.1", "100ms")
    #[arg(long)]
    cooldown: Option<CooldownInterval>,

    /// Minimum vertical separation for an unambiguous reading
    #[arg(long)]
    min_separation: Option<f32>,

    /// Position history length in samples
    #[arg(long)]
    history: Option<usize>,

    /// Position smoothing: latest, average
    #[arg(long, value_enum)]
    smoothing: Option<SmoothingMode>,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Csv,
    Json,
}

#[derive(Debug, Clone, Serialize)]
struct StatsSummary {
    count: usize,
    mean: f32,
    std_dev: f32,
    min: f32,
    max: f32,
}

impl StatsSummary {
    fn from_stats(stats: &Stats<f32>) -> Option<Self> {
        if stats.count == 0 {
            return None;
        }
        Some(Self {
            count: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
struct TraceAnalysis {
    filename: String,
    sample_count: usize,
    duration_seconds: f64,
    paired_fraction: f64,
    crossings: u64,
    crossings_per_minute: f64,
    final_rate: f64,
    peak_rate: f64,
    inter_event_secs: Option<StatsSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = CounterConfig::default();
    config.detector.mode = args.mode;
    if let Some(cooldown) = args.cooldown {
        config.detector.cooldown_seconds = cooldown.as_secs_f64();
    }
    if let Some(min_separation) = args.min_separation {
        config.detector.min_separation = min_separation;
    }
    if let Some(history) = args.history {
        config.history.length = history;
    }
    if let Some(smoothing) = args.smoothing {
        config.history.smoothing = smoothing;
    }
    config.validate()?;

    let results: Vec<TraceAnalysis> = args
        .files
        .iter()
        .map(|path| analyze_file(path, &config))
        .collect();

    match args.format {
        OutputFormat::Text => print_text(&results, &config),
        OutputFormat::Csv => print_csv(&results),
        OutputFormat::Json => print_json(&results)?,
    }

    Ok(())
}

fn analyze_file(path: &PathBuf, config: &CounterConfig) -> TraceAnalysis {
    let filename = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    match analyze_file_impl(path, config) {
        Ok(analysis) => analysis,
        Err(e) => TraceAnalysis {
            filename,
            sample_count: 0,
            duration_seconds: 0.0,
            paired_fraction: 0.0,
            crossings: 0,
            crossings_per_minute: 0.0,
            final_rate: 0.0,
            peak_rate: 0.0,
            inter_event_secs: None,
            error: Some(e.to_string()),
        },
    }
}

fn analyze_file_impl(path: &PathBuf, config: &CounterConfig) -> anyhow::Result<TraceAnalysis> {
    let filename = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let samples = read_trace(path)?;

    let Some(&first) = samples.first() else {
        return Ok(TraceAnalysis {
            filename,
            sample_count: 0,
            duration_seconds: 0.0,
            paired_fraction: 0.0,
            crossings: 0,
            crossings_per_minute: 0.0,
            final_rate: 0.0,
            peak_rate: 0.0,
            inter_event_secs: None,
            error: None,
        });
    };

    let mut session = CrossingSession::new(config, first.t)?;
    let mut peak_rate = 0.0_f64;
    let mut gap_stats: Stats<f32> = Stats::new();
    let mut last_event_t: Option<f64> = None;

    for sample in &samples {
        let obs = session.observe(sample.left_y, sample.right_y, sample.t);

        if obs.rate > peak_rate {
            peak_rate = obs.rate;
        }
        if let Some(event) = obs.event {
            if let Some(last) = last_event_t {
                gap_stats.update((event.at - last) as f32);
            }
            last_event_t = Some(event.at);
        }
    }

    let last_t = samples[samples.len() - 1].t;
    let duration = last_t - first.t;
    let snapshot = session.snapshot(last_t);

    let crossings_per_minute = if duration > 0.0 {
        snapshot.count as f64 / duration * 60.0
    } else {
        0.0
    };

    Ok(TraceAnalysis {
        filename,
        sample_count: samples.len(),
        duration_seconds: duration,
        paired_fraction: session.samples_paired() as f64 / session.samples_seen() as f64,
        crossings: snapshot.count,
        crossings_per_minute,
        final_rate: snapshot.rate,
        peak_rate,
        inter_event_secs: StatsSummary::from_stats(&gap_stats),
        error: None,
    })
}

fn print_text(results: &[TraceAnalysis], config: &CounterConfig) {
    eprintln!(
        "Mode: {:?}, cooldown {:.3}s, min separation {}",
        config.detector.mode, config.detector.cooldown_seconds, config.detector.min_separation
    );
    eprintln!();

    println!(
        "{:<40} {:>8} {:>10} {:>8} {:>8} {:>9} {:>9} {:>9}",
        "File", "Samples", "Duration", "Paired", "Count", "Per-min", "Final", "Peak"
    );
    println!("{}", "-".repeat(108));

    for result in results {
        if let Some(ref err) = result.error {
            println!("{:<40} ERROR: {}", result.filename, err);
            continue;
        }

        println!(
            "{:<40} {:>8} {:>9.1}s {:>7.0}% {:>8} {:>9.1} {:>9.1} {:>9.1}",
            result.filename,
            result.sample_count,
            result.duration_seconds,
            result.paired_fraction * 100.0,
            result.crossings,
            result.crossings_per_minute,
            result.final_rate,
            result.peak_rate
        );
    }

    for result in results {
        if result.error.is_some() {
            continue;
        }

        if let Some(ref gaps) = result.inter_event_secs {
            eprintln!();
            eprintln!("Inter-crossing timing for {}:", result.filename);
            eprintln!("  Mean: {:.3} ± {:.3} s", gaps.mean, gaps.std_dev);
            eprintln!("  Min: {:.3} s", gaps.min);
            eprintln!("  Max: {:.3} s", gaps.max);
        }
    }
}

fn print_csv(results: &[TraceAnalysis]) {
    println!(
        "filename,sample_count,duration_seconds,paired_fraction,crossings,crossings_per_minute,final_rate,peak_rate,gap_mean_s,gap_std_s,error"
    );
    for result in results {
        let gap_mean = result
            .inter_event_secs
            .as_ref()
            .map(|s| format!("{:.4}", s.mean))
            .unwrap_or_default();
        let gap_std = result
            .inter_event_secs
            .as_ref()
            .map(|s| format!("{:.4}", s.std_dev))
            .unwrap_or_default();
        let error = result.error.as_deref().unwrap_or("");

        println!(
            "{},{},{:.3},{:.4},{},{:.2},{:.2},{:.2},{},{},{}",
            result.filename,
            result.sample_count,
            result.duration_seconds,
            result.paired_fraction,
            result.crossings,
            result.crossings_per_minute,
            result.final_rate,
            result.peak_rate,
            gap_mean,
            gap_std,
            error
        );
    }
}

fn print_json(results: &[TraceAnalysis]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    println!("{}", json);
    Ok(())
}
