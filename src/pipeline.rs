use crate::client::{CompressionService, TinifyClient};
use crate::config::Config;
use crate::error::{CompressionError, Phase, Result};
use crate::filter::ImageFilter;
use crate::logger::LogSink;
use crate::repeat::{CompressionSummary, Decision, RepeatController};
use crate::scanner::{CandidateFile, PathScanner};
use std::fmt;
use std::path::Path;

/// Outcome counts for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub finalized: usize,
    pub failed: usize,
    pub rejected: usize,
    pub traversal_errors: usize,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Done: {} compressed, {} failed, {} skipped, {} unreadable entries",
            self.finalized, self.failed, self.rejected, self.traversal_errors
        )
    }
}

/// Runs every admitted file under the entry path through the compression
/// service, one file and one request at a time.
pub struct Compressor<S, L> {
    config: Config,
    scanner: PathScanner,
    filter: ImageFilter,
    repeat: RepeatController,
    service: S,
    sink: L,
}

impl<S: CompressionService, L: LogSink> Compressor<S, L> {
    pub fn new(config: Config, service: S, sink: L) -> Self {
        Self {
            scanner: PathScanner::new(config.recursive),
            filter: ImageFilter::from_config(&config),
            repeat: RepeatController::new(config.compress_count),
            config,
            service,
            sink,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn sink(&self) -> &L {
        &self.sink
    }

    /// Completed round-trips recorded for `path` so far.
    pub fn attempts(&self, path: &Path) -> u32 {
        self.repeat.attempts(path)
    }

    /// Walks the entry path and compresses every admitted file.
    ///
    /// Only a missing entry path is returned as an error; everything that
    /// goes wrong for a single entry is logged and the walk continues.
    pub async fn run(&mut self) -> Result<RunStats> {
        let candidates = self.scanner.scan(&self.config.entry_path)?;
        let mut stats = RunStats::default();

        for candidate in candidates {
            let candidate = match candidate {
                Ok(candidate) => candidate,
                Err(e) => {
                    self.sink.error(&e.to_string());
                    stats.traversal_errors += 1;
                    continue;
                }
            };

            if !self.filter.admits(&candidate) {
                if candidate.is_file {
                    self.sink
                        .debug(&format!("Skipping {}", candidate.path.display()));
                    stats.rejected += 1;
                }
                continue;
            }

            match self.compress_file(&candidate.path).await {
                Ok(summary) => {
                    self.sink.info(&summary.to_string());
                    stats.finalized += 1;
                }
                Err(e) => {
                    self.sink.error(&e.to_string());
                    stats.failed += 1;
                }
            }
        }

        self.sink.info(&stats.to_string());
        Ok(stats)
    }

    /// Runs round-trips for one file until the repeat target is reached.
    pub async fn compress_file(&mut self, path: &Path) -> Result<CompressionSummary> {
        let mut image = tokio::fs::read(path)
            .await
            .map_err(|source| CompressionError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let mut rounds = 0;

        loop {
            let result = self
                .service
                .submit(image)
                .await
                .map_err(|e| e.for_file(path, Phase::Submit))?;
            let optimized = self
                .service
                .fetch(&result.url)
                .await
                .map_err(|e| e.for_file(path, Phase::Fetch))?;

            let decision = self.repeat.complete_round(path);
            rounds += 1;
            tokio::fs::write(path, &optimized)
                .await
                .map_err(|source| CompressionError::Write {
                    path: path.to_path_buf(),
                    source,
                })?;

            match decision {
                Decision::Repeat { attempt } => {
                    self.sink.info(&format!(
                        "{}: compressed {} time(s), re-compressing (attempt {})",
                        path.display(),
                        rounds,
                        attempt
                    ));
                    image = optimized;
                }
                Decision::Finalize => {
                    return Ok(CompressionSummary::from_result(path, &result, rounds))
                }
            }
        }
    }
}

/// Lists the admitted files under the configured entry path without
/// contacting the service. Unreadable entries are returned separately.
pub fn collect_candidates(config: &Config) -> Result<(Vec<CandidateFile>, Vec<CompressionError>)> {
    let filter = ImageFilter::from_config(config);
    let mut admitted = Vec::new();
    let mut errors = Vec::new();

    for candidate in PathScanner::new(config.recursive).scan(&config.entry_path)? {
        match candidate {
            Ok(candidate) if filter.admits(&candidate) => admitted.push(candidate),
            Ok(_) => {}
            Err(e) => errors.push(e),
        }
    }

    Ok((admitted, errors))
}

pub async fn compress_path_async<L: LogSink>(config: Config, sink: L) -> Result<RunStats> {
    let client = TinifyClient::from_config(&config).map_err(CompressionError::Client)?;
    Compressor::new(config, client, sink).run().await
}

pub fn compress_path_sync<L: LogSink>(config: Config, sink: L) -> Result<RunStats> {
    let runtime = tokio::runtime::Runtime::new().map_err(CompressionError::Runtime)?;

    runtime.block_on(compress_path_async(config, sink))
}
