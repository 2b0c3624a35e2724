use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::loader::{normalize, DataFormatError};
use super::model::ExposureDataset;

// ---------------------------------------------------------------------------
// Source fingerprint
// ---------------------------------------------------------------------------

/// Identity of a raw source: blake3 hash of its bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceFingerprint(blake3::Hash);

impl SourceFingerprint {
    pub fn of_bytes(data: &[u8]) -> Self {
        SourceFingerprint(blake3::hash(data))
    }
}

impl std::fmt::Display for SourceFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "blake3:{}", self.0.to_hex())
    }
}

// ---------------------------------------------------------------------------
// DatasetCache – load-once-per-source memoization
// ---------------------------------------------------------------------------

/// Memoizes normalized datasets by source content, so reopening an
/// unchanged file skips parsing and hands back the same `Arc`. Only the
/// latest content seen at each path is retained.
#[derive(Debug)]
pub struct DatasetCache {
    delimiter: u8,
    entries: HashMap<SourceFingerprint, Arc<ExposureDataset>>,
    paths: HashMap<PathBuf, SourceFingerprint>,
}

impl DatasetCache {
    pub fn new(delimiter: u8) -> Self {
        DatasetCache {
            delimiter,
            entries: HashMap::new(),
            paths: HashMap::new(),
        }
    }

    /// Read `path` and return its normalized dataset, parsing only when the
    /// content has not been seen before. A failed load leaves the cache as
    /// it was.
    pub fn load(&mut self, path: &Path) -> Result<Arc<ExposureDataset>, DataFormatError> {
        let bytes = std::fs::read(path)?;
        let fingerprint = SourceFingerprint::of_bytes(&bytes);
        let dataset = self.get_or_parse(fingerprint, &bytes)?;

        if let Some(previous) = self.paths.insert(path.to_path_buf(), fingerprint) {
            if previous != fingerprint && !self.paths.values().any(|f| *f == previous) {
                log::debug!("Evicting {previous}, superseded by {fingerprint}");
                self.entries.remove(&previous);
            }
        }
        Ok(dataset)
    }

    fn get_or_parse(
        &mut self,
        fingerprint: SourceFingerprint,
        bytes: &[u8],
    ) -> Result<Arc<ExposureDataset>, DataFormatError> {
        if let Some(dataset) = self.entries.get(&fingerprint) {
            log::debug!("Dataset cache hit for {fingerprint}");
            return Ok(Arc::clone(dataset));
        }

        let dataset = Arc::new(normalize(bytes, self.delimiter)?);
        log::debug!("Dataset cache miss for {fingerprint}, {} records", dataset.len());
        self.entries.insert(fingerprint, Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Number of distinct sources held.
    pub fn source_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SOURCE: &str = "Major groups,Job title,mean_exposure_level,Average score,Standard deviation\n\
                          Clerical,Clerk,gradient 4,0.9,0.05\n";

    #[test]
    fn test_same_content_returns_same_dataset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("jobs.csv");
        fs::write(&path, SOURCE).unwrap();

        let mut cache = DatasetCache::new(b',');
        let first = cache.load(&path).unwrap();
        let second = cache.load(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.source_count(), 1);
    }

    #[test]
    fn test_identical_content_at_another_path_is_a_hit() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        fs::write(&a, SOURCE).unwrap();
        fs::write(&b, SOURCE).unwrap();

        let mut cache = DatasetCache::new(b',');
        let first = cache.load(&a).unwrap();
        let second = cache.load(&b).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_changed_content_is_reparsed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("jobs.csv");
        fs::write(&path, SOURCE).unwrap();

        let mut cache = DatasetCache::new(b',');
        let first = cache.load(&path).unwrap();

        fs::write(&path, format!("{SOURCE}Professionals,Analyst,gradient 1,0.3,0.1\n")).unwrap();
        let second = cache.load(&path).unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
        // The superseded version is evicted.
        assert_eq!(cache.source_count(), 1);

        fs::write(&path, SOURCE).unwrap();
        let third = cache.load(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(cache.source_count(), 1);
    }

    #[test]
    fn test_content_still_open_elsewhere_is_not_evicted() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        fs::write(&a, SOURCE).unwrap();
        fs::write(&b, SOURCE).unwrap();

        let mut cache = DatasetCache::new(b',');
        let shared = cache.load(&a).unwrap();
        cache.load(&b).unwrap();

        fs::write(&a, format!("{SOURCE}Professionals,Analyst,gradient 1,0.3,0.1\n")).unwrap();
        cache.load(&a).unwrap();
        assert_eq!(cache.source_count(), 2);

        assert!(Arc::ptr_eq(&shared, &cache.load(&b).unwrap()));
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("jobs.csv");
        fs::write(&path, SOURCE).unwrap();

        let mut cache = DatasetCache::new(b',');
        let good = cache.load(&path).unwrap();

        fs::write(&path, "Job title\nClerk\n").unwrap();
        assert!(cache.load(&path).is_err());
        assert_eq!(cache.source_count(), 1);

        fs::write(&path, SOURCE).unwrap();
        assert!(Arc::ptr_eq(&good, &cache.load(&path).unwrap()));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let mut cache = DatasetCache::new(b',');
        let err = cache.load(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, DataFormatError::Io(_)));
    }
}
