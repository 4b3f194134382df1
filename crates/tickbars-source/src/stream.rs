//! Sequential tick loading across source files.

use std::path::PathBuf;

use futures::stream::{self, Stream, StreamExt};
use tickbars_types::Tick;
use tracing::{debug, error};

use crate::read_ticks;

/// The ticks loaded from a single source file.
#[derive(Debug, Clone)]
pub struct SourceBatch {
    /// The source file.
    pub path: PathBuf,
    /// The ticks in this batch.
    pub ticks: Vec<Tick>,
    /// Whether this file failed to load and was skipped.
    pub had_error: bool,
}

impl SourceBatch {
    /// Creates a new batch.
    #[must_use]
    pub const fn new(path: PathBuf, ticks: Vec<Tick>) -> Self {
        Self {
            path,
            ticks,
            had_error: false,
        }
    }

    /// Creates a batch that represents a skipped file.
    #[must_use]
    pub const fn skipped_error(path: PathBuf) -> Self {
        Self {
            path,
            ticks: Vec::new(),
            had_error: true,
        }
    }

    /// Returns the number of ticks in the batch.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.ticks.len()
    }

    /// Returns true if the batch is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Returns true if this file was skipped.
    #[must_use]
    pub const fn had_error(&self) -> bool {
        self.had_error
    }
}

/// Creates a stream of batches, one per file, in the given order.
///
/// Each file is read to completion before the next is opened. A file that
/// fails is logged and yielded as an empty batch with `had_error` set; the
/// stream continues with the next file.
pub fn source_stream(files: Vec<PathBuf>) -> impl Stream<Item = SourceBatch> {
    stream::iter(files).then(|path| async move {
        match read_ticks(&path).await {
            Ok(ticks) => {
                debug!(path = %path.display(), ticks = ticks.len(), "Loaded source file");
                SourceBatch::new(path, ticks)
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Could not read source file, skipping");
                SourceBatch::skipped_error(path)
            }
        }
    })
}

/// Loads every file and collects the batches.
pub async fn load_files(files: Vec<PathBuf>) -> Vec<SourceBatch> {
    source_stream(files).collect().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_source_batch_new() {
        let batch = SourceBatch::new(PathBuf::from("a.csv"), vec![]);
        assert!(batch.is_empty());
        assert_eq!(batch.len(), 0);
        assert!(!batch.had_error());
    }

    #[test]
    fn test_source_batch_skipped_error() {
        let batch = SourceBatch::skipped_error(PathBuf::from("a.csv"));
        assert!(batch.is_empty());
        assert!(batch.had_error());
    }

    #[tokio::test]
    async fn test_bad_file_skipped_others_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let good_a = dir.path().join("a.csv");
        let bad = dir.path().join("b.csv");
        let good_c = dir.path().join("c.csv");
        fs::write(
            &good_a,
            "timestamp,price,size\n2024-09-16 09:30:00.000000,500,1\n",
        )
        .unwrap();
        fs::write(
            &bad,
            "timestamp,price,size\n2024-09-16 09:31:00.000000,500,1\nnot-a-time,500,1\n",
        )
        .unwrap();
        fs::write(
            &good_c,
            "timestamp,price,size\n2024-09-16 09:32:00.000000,501,2\n",
        )
        .unwrap();

        let batches = load_files(vec![good_a.clone(), bad.clone(), good_c.clone()]).await;

        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].path, good_a);
        assert_eq!(batches[0].len(), 1);
        assert_eq!(batches[1].path, bad);
        assert!(batches[1].had_error());
        assert!(batches[1].is_empty());
        assert_eq!(batches[2].path, good_c);
        assert_eq!(batches[2].len(), 1);
    }
}
