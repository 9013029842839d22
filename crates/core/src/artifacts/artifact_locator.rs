//! Finds the newest file for an artifact category in the data directory.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use super::{Artifact, ArtifactCategory};
use crate::errors::{Error, Result};

/// A compiled glob-style file name pattern.
///
/// `*` matches any run of characters, `?` matches exactly one, everything
/// else is literal. Patterns match whole file names, case-sensitively.
#[derive(Debug, Clone)]
pub struct FilePattern {
    raw: String,
    regex: Regex,
}

impl FilePattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let mut source = String::with_capacity(pattern.len() + 8);
        source.push_str("(?s)^");
        for ch in pattern.chars() {
            match ch {
                '*' => source.push_str(".*"),
                '?' => source.push('.'),
                other => source.push_str(&regex::escape(other.encode_utf8(&mut [0u8; 4]))),
            }
        }
        source.push('$');

        let regex = Regex::new(&source).map_err(|e| Error::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            raw: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.regex.is_match(file_name)
    }
}

/// A regular file that matched at least one pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    path: PathBuf,
    file_name: String,
    modified_at: DateTime<Utc>,
}

/// Resolves artifacts against one data directory.
///
/// Nothing is cached: every call lists the directory again, so results always
/// reflect the filesystem at call time.
#[derive(Debug, Clone)]
pub struct ArtifactLocator {
    directory: PathBuf,
}

impl ArtifactLocator {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Locates the newest file for `category` using its standard patterns.
    pub fn locate(&self, category: ArtifactCategory) -> Option<Artifact> {
        self.locate_latest(category, category.patterns())
    }

    /// Locates the newest file matching any of `patterns`.
    ///
    /// All matches are pooled before selection, so a newer `chart_*.png` beats
    /// an older `equity_*.png` regardless of pattern order. When modification
    /// times are equal the lexicographically greatest file name wins.
    /// A missing directory or an empty match set yields `None`.
    pub fn locate_latest(&self, category: ArtifactCategory, patterns: &[&str]) -> Option<Artifact> {
        let compiled: Vec<FilePattern> = patterns
            .iter()
            .filter_map(|p| match FilePattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!("Skipping pattern for {}: {}", category, e);
                    None
                }
            })
            .collect();

        let candidates = match self.scan(&compiled) {
            Ok(candidates) => candidates,
            Err(e) if e.is_not_found() => {
                debug!("Data directory {:?} does not exist yet", self.directory);
                return None;
            }
            Err(e) => {
                warn!("Failed to list data directory {:?}: {}", self.directory, e);
                return None;
            }
        };

        let latest = candidates
            .into_iter()
            .max_by(|a, b| {
                a.modified_at
                    .cmp(&b.modified_at)
                    .then_with(|| a.file_name.cmp(&b.file_name))
            })?;

        debug!("Resolved {} to {}", category, latest.file_name);
        Some(Artifact::new(
            category,
            latest.path,
            latest.file_name,
            latest.modified_at,
        ))
    }

    fn scan(&self, patterns: &[FilePattern]) -> Result<Vec<Candidate>> {
        let mut candidates = Vec::new();
        if patterns.is_empty() {
            return Ok(candidates);
        }

        for entry in fs::read_dir(&self.directory)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable directory entry: {}", e);
                    continue;
                }
            };

            let file_name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => continue,
            };
            if !patterns.iter().any(|p| p.matches(&file_name)) {
                continue;
            }

            let path = entry.path();
            // Follows symlinks so a linked "latest" file still counts.
            let metadata = match fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(e) => {
                    debug!("File {:?} vanished during scan: {}", path, e);
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }
            let modified_at = match metadata.modified() {
                Ok(modified) => DateTime::<Utc>::from(modified),
                Err(e) => {
                    warn!("No modification time for {:?}: {}", path, e);
                    continue;
                }
            };

            candidates.push(Candidate {
                path,
                file_name,
                modified_at,
            });
        }

        Ok(candidates)
    }
}
