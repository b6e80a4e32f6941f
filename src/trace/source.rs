use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::thread;

use crossbeam_channel::Receiver;

use super::HandSample;
use crate::error::{CounterError, Result};

/// A stream of hand samples, pulled one at a time
///
/// `Ok(None)` means the stream is exhausted; errors are not recoverable.
pub trait SampleSource: Send {
    fn next_sample(&mut self) -> anyhow::Result<Option<HandSample>>;
}

/// Read an entire trace file into memory
///
/// The format is one JSON object per line; blank lines are ignored.
/// Malformed lines are hard errors and carry their line number.
pub fn read_trace<P: AsRef<Path>>(path: P) -> Result<Vec<HandSample>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CounterError::TraceRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut samples = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| CounterError::TraceRead {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let sample = serde_json::from_str(&line).map_err(|source| CounterError::TraceParse {
            path: path.to_path_buf(),
            line: index + 1,
            source,
        })?;
        samples.push(sample);
    }

    log::debug!("read {} samples from {}", samples.len(), path.display());
    Ok(samples)
}

/// Replays a recorded trace file
pub struct TraceFileSource {
    samples: Vec<HandSample>,
    position: usize,
}

impl TraceFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            samples: read_trace(path)?,
            position: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl SampleSource for TraceFileSource {
    fn next_sample(&mut self) -> anyhow::Result<Option<HandSample>> {
        if self.position >= self.samples.len() {
            return Ok(None);
        }

        let sample = self.samples[self.position];
        self.position += 1;

        Ok(Some(sample))
    }
}

/// Live samples piped in over standard input
///
/// A reader thread parses lines as they arrive and hands them over a
/// bounded channel, so a stalled consumer applies backpressure instead of
/// buffering without limit. Malformed lines are logged and skipped; a
/// closed stdin ends the stream.
pub struct StdinSource {
    rx: Receiver<HandSample>,
}

impl StdinSource {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::bounded(64);

        thread::spawn(move || {
            for (index, line) in io::stdin().lock().lines().enumerate() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        log::warn!("stdin read failed: {}", e);
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<HandSample>(&line) {
                    Ok(sample) => {
                        if tx.send(sample).is_err() {
                            // Consumer is gone.
                            break;
                        }
                    }
                    Err(e) => log::warn!("skipping malformed stdin line {}: {}", index + 1, e),
                }
            }
        });

        Self { rx }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleSource for StdinSource {
    fn next_sample(&mut self) -> anyhow::Result<Option<HandSample>> {
        match self.rx.recv() {
            Ok(sample) => Ok(Some(sample)),
            Err(_) => Ok(None),
        }
    }
}
