use crate::constants::{
    DEFAULT_COMPRESS_COUNT, DEFAULT_EXTENSIONS, DEFAULT_MAX_FILE_SIZE,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SHRINK_ENDPOINT, MAX_COMPRESS_COUNT, MIN_COMPRESS_COUNT,
};
use crate::error::{CompressionError, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Settings for one run. Built once before the run starts and never changed.
#[derive(Debug, Clone)]
pub struct Config {
    pub entry_path: PathBuf,
    pub extensions: Vec<String>,
    pub max_file_size: u64,
    pub recursive: bool,
    pub compress_count: u32,
    pub timeout: Duration,
    pub endpoint: String,
}

impl Config {
    pub fn new(entry_path: PathBuf, compress_count: Option<u32>, recursive: bool) -> Result<Self> {
        let compress_count = compress_count.unwrap_or(DEFAULT_COMPRESS_COUNT);
        if !(MIN_COMPRESS_COUNT..=MAX_COMPRESS_COUNT).contains(&compress_count) {
            return Err(CompressionError::InvalidCompressCount(
                compress_count,
                MAX_COMPRESS_COUNT,
            ));
        }

        Ok(Self {
            entry_path,
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            recursive,
            compress_count,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            endpoint: DEFAULT_SHRINK_ENDPOINT.to_string(),
        })
    }

    /// Replaces the allow-list. Entries include the leading dot, e.g. `".png"`.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}
