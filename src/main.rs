use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use crisscross::config::{CooldownInterval, CounterConfig, DetectionMode, SmoothingMode};
use crisscross::output::{CountOutput, Formatter, OutputFormat, create_formatter};
use crisscross::record::{SessionRecord, append_record};
use crisscross::session::CrossingSession;
use crisscross::trace::{SampleSource, StdinSource, TraceFileSource};

#[derive(Parser, Debug)]
#[command(name = "crisscross")]
#[command(about = "Count hand crossings from a wrist-position trace", long_about = None)]
struct Args {
    /// Trace file to replay (one JSON sample per line); reads stdin when omitted
    trace: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Detection mode: symmetric, asymmetric
    #[arg(short = 'm', long, value_enum)]
    mode: Option<DetectionMode>,

    /// Cooldown between counted crossings (e.g. "0.1", "0.1s", "100ms")
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

    /// Output format: text, json, csv
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Print a status line every N seconds of trace time (0 disables)
    #[arg(long, default_value_t = 5.0)]
    status_interval: f64,

    /// Record the finished session under this name
    #[arg(short = 'u', long)]
    username: Option<String>,

    /// Results file for recorded sessions
    #[arg(long, default_value = "crossing_results.json")]
    results: PathBuf,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_config(args: &Args) -> anyhow::Result<CounterConfig> {
    let mut config = match args.config {
        Some(ref path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        }
        None => CounterConfig::default(),
    };

    if let Some(mode) = args.mode {
        config.detector.mode = mode;
    }
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
    Ok(config)
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

    let config = load_config(&args)?;

    if matches!(args.format, OutputFormat::Text) {
        println!("=== crisscross - hand crossing counter ===");
        println!("Mode: {:?}", config.detector.mode);
        println!("Cooldown: {:.3}s", config.detector.cooldown_seconds);
        println!("Min separation: {}", config.detector.min_separation);
        println!(
            "History: {} samples, {:?} smoothing",
            config.history.length, config.history.smoothing
        );
        println!();
    }

    let mut source: Box<dyn SampleSource> = match args.trace {
        Some(ref path) => {
            let source = TraceFileSource::new(path)?;
            log::info!("replaying {} samples from {}", source.len(), path.display());
            Box::new(source)
        }
        None => {
            log::info!("reading samples from stdin");
            Box::new(StdinSource::new())
        }
    };

    let formatter = create_formatter(args.format, args.verbose > 0);
    if let Some(header) = formatter.header() {
        println!("{header}");
    }

    run_counting_loop(source.as_mut(), &config, formatter.as_ref(), &args)
}

fn run_counting_loop(
    source: &mut dyn SampleSource,
    config: &CounterConfig,
    formatter: &dyn Formatter,
    args: &Args,
) -> anyhow::Result<()> {
    let Some(first) = source.next_sample()? else {
        println!("No samples.");
        return Ok(());
    };

    let mut session = CrossingSession::new(config, first.t)?;
    let mut last_status_t = first.t;
    let mut last_t = first.t;

    let mut next = Some(first);
    while let Some(sample) = next {
        last_t = sample.t;
        let obs = session.observe(sample.left_y, sample.right_y, sample.t);

        if let Some(event) = obs.event {
            println!(
                "{}",
                formatter.format(&CountOutput {
                    t: event.at,
                    count: obs.count,
                    rate: obs.rate,
                    direction: Some(event.direction),
                })
            );
            last_status_t = sample.t;
        } else if args.status_interval > 0.0 && sample.t - last_status_t >= args.status_interval {
            println!(
                "{}",
                formatter.format(&CountOutput {
                    t: sample.t,
                    count: obs.count,
                    rate: obs.rate,
                    direction: None,
                })
            );
            last_status_t = sample.t;
        }

        next = source.next_sample()?;
    }

    let snapshot = session.snapshot(last_t);
    if matches!(args.format, OutputFormat::Text) {
        println!();
        println!(
            "Session complete: {} crossings in {:.1}s ({:.1}/min)",
            snapshot.count, snapshot.elapsed_seconds, snapshot.rate
        );
        println!(
            "Samples: {} seen, {} with both hands visible",
            session.samples_seen(),
            session.samples_paired()
        );
    }

    if let Some(username) = args.username.as_ref().or(config.username.as_ref()) {
        let record = SessionRecord::from_snapshot(username, &snapshot);
        append_record(&args.results, &record)?;
        eprintln!(
            "Recorded session for {} in {}",
            username,
            args.results.display()
        );
    }

    Ok(())
}
