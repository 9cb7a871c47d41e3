//! In-place file cleaning
//!
//! Read the source, copy it to the backup path untouched, clean it, and
//! overwrite the source. The two writes are not transactional: nothing is
//! rolled back if the overwrite fails after the backup was written.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::{SanitizeReport, Sanitizer, rules};

/// File workflow errors
#[derive(Debug, thiserror::Error)]
pub enum CleanError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write backup {}", path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write cleaned HTML to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What to clean and where the backup goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanOptions {
    pub path: PathBuf,
    pub heading: Option<String>,
    pub backup_path: PathBuf,
}

impl CleanOptions {
    /// Clean `path` with no heading, backing up to [`rules::BACKUP_FILE`]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            heading: None,
            backup_path: PathBuf::from(rules::BACKUP_FILE),
        }
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    pub fn with_backup_path(mut self, backup_path: impl Into<PathBuf>) -> Self {
        self.backup_path = backup_path.into();
        self
    }

    fn sanitizer(&self) -> Sanitizer {
        match &self.heading {
            Some(heading) => Sanitizer::new().with_heading(heading.as_str()),
            None => Sanitizer::new(),
        }
    }
}

/// Result of a successful [`clean_file`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanOutcome {
    pub path: PathBuf,
    pub backup_path: PathBuf,
    pub report: SanitizeReport,
    pub bytes_before: usize,
    pub bytes_after: usize,
}

/// Clean an HTML file in place
pub fn clean_file(options: &CleanOptions) -> Result<CleanOutcome, CleanError> {
    let path = options.path.as_path();
    let backup_path = options.backup_path.as_path();

    let original = fs::read_to_string(path).map_err(|source| CleanError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = original.len(), "read source");

    fs::write(backup_path, &original).map_err(|source| CleanError::Backup {
        path: backup_path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %backup_path.display(), "wrote backup");

    let mut doc = noscript_html::parse(&original);
    let report = options.sanitizer().sanitize(&mut doc);
    let cleaned = noscript_html::serialize(&doc);
    tracing::info!(%report, "sanitized document");

    fs::write(path, &cleaned).map_err(|source| CleanError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(CleanOutcome {
        path: path.to_path_buf(),
        backup_path: backup_path.to_path_buf(),
        report,
        bytes_before: original.len(),
        bytes_after: cleaned.len(),
    })
}
