pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod filter;
pub mod logger;
pub mod pipeline;
pub mod repeat;
pub mod scanner;

pub use client::{forwarded_for, random_forwarded_for, CompressionResult, CompressionService, TinifyClient};
pub use config::Config;
pub use error::{CompressionError, Phase, Result, ServiceError};
pub use filter::ImageFilter;
pub use logger::{LogLevel, LogSink, RecordingSink, TracingSink};
pub use pipeline::{collect_candidates, compress_path_async, compress_path_sync, Compressor, RunStats};
pub use repeat::{format_kilobytes, AttemptCounter, CompressionSummary, Decision, RepeatController};
pub use scanner::{CandidateFile, PathScanner};
