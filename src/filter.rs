//! Admission rules for compression candidates.

use crate::config::Config;
use crate::scanner::CandidateFile;
use std::path::Path;

/// Decides whether a candidate is worth sending to the compression service.
#[derive(Debug, Clone)]
pub struct ImageFilter {
    /// Allowed suffixes, leading dot included. Matched case-sensitively.
    extensions: Vec<String>,
    max_file_size: u64,
}

impl ImageFilter {
    pub fn new(extensions: Vec<String>, max_file_size: u64) -> Self {
        Self {
            extensions,
            max_file_size,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.extensions.clone(), config.max_file_size)
    }

    pub fn admits(&self, candidate: &CandidateFile) -> bool {
        candidate.is_file
            && self.has_allowed_extension(&candidate.path)
            && candidate.size <= self.max_file_size
    }

    fn has_allowed_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let suffix = format!(".{ext}");
                self.extensions.iter().any(|allowed| *allowed == suffix)
            })
            .unwrap_or(false)
    }
}
