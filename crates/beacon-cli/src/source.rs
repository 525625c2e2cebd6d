//! Updater that reads a text file on every refresh.

use async_trait::async_trait;
use beacon_core::{RefreshAttempt, Updater};
use std::path::{Path, PathBuf};
use tracing::trace;

/// Reads `path` on each cycle, trimming trailing whitespace.
///
/// A read failure is reported as the attempt's error with no result.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Updater<String> for FileSource {
    async fn update(&self) -> RefreshAttempt<String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                trace!(path = %self.path.display(), bytes = content.len(), "Source read");
                RefreshAttempt::ok(content.trim_end().to_string())
            }
            Err(e) => RefreshAttempt::err(format!("{}: {e}", self.path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hello there").unwrap();

        let attempt = FileSource::new(file.path()).update().await;

        assert!(!attempt.is_error());
        assert_eq!(attempt.result.as_deref(), Some("hello there"));
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let source = FileSource::new("/nonexistent/beacon.txt");

        let attempt = source.update().await;

        assert!(attempt.result.is_none());
        let message = attempt.error.unwrap().to_string();
        assert!(message.starts_with("/nonexistent/beacon.txt"));
    }
}
