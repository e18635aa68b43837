use crate::client::CompressionResult;
use crate::constants::BYTES_PER_KB;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Completed round-trips per file for the current run.
#[derive(Debug, Default, Clone)]
pub struct AttemptCounter {
    counts: HashMap<PathBuf, u32>,
}

impl AttemptCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed round-trip and returns the new count.
    pub fn increment(&mut self, path: &Path) -> u32 {
        let count = self.counts.entry(path.to_path_buf()).or_insert(0);
        *count += 1;
        *count
    }

    pub fn get(&self, path: &Path) -> u32 {
        self.counts.get(path).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Submit the freshly written bytes again as round-trip `attempt`.
    Repeat { attempt: u32 },
    Finalize,
}

/// Decides after every round-trip whether a file goes around again.
#[derive(Debug, Clone)]
pub struct RepeatController {
    target: u32,
    counter: AttemptCounter,
}

impl RepeatController {
    pub fn new(target: u32) -> Self {
        Self {
            target,
            counter: AttemptCounter::new(),
        }
    }

    pub fn attempts(&self, path: &Path) -> u32 {
        self.counter.get(path)
    }

    /// Counts a completed round-trip for `path` and decides what comes next.
    pub fn complete_round(&mut self, path: &Path) -> Decision {
        let completed = self.counter.increment(path);
        self.decide(completed)
    }

    pub fn decide(&self, completed: u32) -> Decision {
        if completed < self.target {
            Decision::Repeat {
                attempt: completed + 1,
            }
        } else {
            Decision::Finalize
        }
    }
}

/// Final record for a file. Sizes and ratio are those the service reported
/// for the last round-trip.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionSummary {
    pub path: PathBuf,
    pub original_size: u64,
    pub optimized_size: u64,
    /// Optimized over original, as computed by the service.
    pub ratio: f64,
    pub rounds: u32,
}

impl CompressionSummary {
    pub fn from_result(path: &Path, result: &CompressionResult, rounds: u32) -> Self {
        Self {
            path: path.to_path_buf(),
            original_size: result.input_size,
            optimized_size: result.output_size,
            ratio: result.ratio,
            rounds,
        }
    }

    pub fn savings_percent(&self) -> f64 {
        (1.0 - self.ratio) * 100.0
    }

    pub fn is_expanded(&self) -> bool {
        self.optimized_size > self.original_size
    }
}

pub fn format_kilobytes(bytes: u64) -> String {
    format!("{:.2}KB", bytes as f64 / BYTES_PER_KB)
}

impl fmt::Display for CompressionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Compressed successfully: ratio {:.2}%, original {}, compressed {}, file: {}",
            self.savings_percent(),
            format_kilobytes(self.original_size),
            format_kilobytes(self.optimized_size),
            self.path.display()
        )?;
        if self.is_expanded() {
            write!(f, " (warning: result is larger than the original)")?;
        }
        Ok(())
    }
}
