use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which half of a round-trip a network failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Submit,
    Fetch,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Submit => write!(f, "submit"),
            Phase::Fetch => write!(f, "fetch"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Failed to read entry {path}: {source}")]
    TraversalRead {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Compression failed for {path}: {message}")]
    RemoteCompression { path: PathBuf, message: String },

    #[error("Request failed during {phase} for {path}: {source}")]
    Network {
        path: PathBuf,
        phase: Phase,
        #[source]
        source: ServiceError,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write optimized image to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid compress count: {0}. Must be between 1 and {1}")]
    InvalidCompressCount(u32, u32),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] ServiceError),

    #[error("Failed to create runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Failures reported by a compression service, before they are tied to a file.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The service answered with an error descriptor.
    #[error("{0}")]
    Remote(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ServiceError {
    /// Attaches the file and phase, turning remote error descriptors into
    /// `RemoteCompression` and everything else into `Network`.
    pub fn for_file(self, path: impl Into<PathBuf>, phase: Phase) -> CompressionError {
        match self {
            ServiceError::Remote(message) => CompressionError::RemoteCompression {
                path: path.into(),
                message,
            },
            source => CompressionError::Network {
                path: path.into(),
                phase,
                source,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, CompressionError>;
