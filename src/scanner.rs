use crate::error::{CompressionError, Result};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A filesystem entry found while walking the entry path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub size: u64,
    pub is_file: bool,
}

impl CandidateFile {
    fn from_entry(entry: &DirEntry) -> Result<Self> {
        let metadata = entry
            .metadata()
            .map_err(|source| CompressionError::TraversalRead {
                path: entry.path().to_path_buf(),
                source,
            })?;

        Ok(Self {
            path: entry.path().to_path_buf(),
            size: metadata.len(),
            is_file: metadata.is_file(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PathScanner {
    recursive: bool,
}

impl PathScanner {
    pub fn new(recursive: bool) -> Self {
        Self { recursive }
    }

    /// Walks `entry`, yielding one candidate per discovered entry.
    ///
    /// A regular file yields itself. A directory yields its children (and,
    /// when recursive, every nested entry, parents before children). A missing
    /// `entry` fails with `PathNotFound` before anything is yielded; later read
    /// errors are yielded in place of the affected entry and the walk goes on.
    pub fn scan(
        &self,
        entry: &Path,
    ) -> Result<impl Iterator<Item = Result<CandidateFile>>> {
        if !entry.exists() {
            return Err(CompressionError::PathNotFound(entry.to_path_buf()));
        }
        let root = entry
            .canonicalize()
            .map_err(|_| CompressionError::PathNotFound(entry.to_path_buf()))?;

        let min_depth = if root.is_dir() { 1 } else { 0 };
        let mut walker = WalkDir::new(&root)
            .follow_links(true)
            .min_depth(min_depth)
            .sort_by_file_name();
        if !self.recursive {
            walker = walker.max_depth(1);
        }

        Ok(walker.into_iter().map(move |entry| match entry {
            Ok(entry) => CandidateFile::from_entry(&entry),
            Err(source) => Err(CompressionError::TraversalRead {
                path: source.path().map_or_else(|| root.clone(), Path::to_path_buf),
                source,
            }),
        }))
    }
}
