use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::HandSample;
use crate::error::{CounterError, Result};

/// Streaming trace writer, one JSON object per line
pub struct TraceWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    lines: usize,
}

impl TraceWriter {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|source| CounterError::TraceWrite {
            path: path.clone(),
            source,
        })?;

        Ok(Self {
            writer: BufWriter::new(file),
            path,
            lines: 0,
        })
    }

    pub fn append(&mut self, sample: &HandSample) -> Result<()> {
        let line = serde_json::to_string(sample).map_err(|e| CounterError::TraceWrite {
            path: self.path.clone(),
            source: e.into(),
        })?;
        writeln!(self.writer, "{line}").map_err(|source| CounterError::TraceWrite {
            path: self.path.clone(),
            source,
        })?;
        self.lines += 1;
        Ok(())
    }

    /// Flush and return the number of lines written
    pub fn finalize(mut self) -> Result<usize> {
        self.writer.flush().map_err(|source| CounterError::TraceWrite {
            path: self.path.clone(),
            source,
        })?;
        Ok(self.lines)
    }
}

/// Write a complete trace in one call
pub fn write_trace<P: AsRef<Path>>(path: P, samples: &[HandSample]) -> Result<()> {
    let mut writer = TraceWriter::create(path)?;
    for sample in samples {
        writer.append(sample)?;
    }
    writer.finalize()?;
    Ok(())
}
