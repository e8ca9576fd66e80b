use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::loader::load_file;
use super::model::Dataset;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Source identity
// ---------------------------------------------------------------------------

/// Identifies one version of a source file.
/// A rewrite of the file changes `modified` and usually `len`, so it misses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceKey {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl SourceKey {
    pub fn for_path(path: &Path) -> Result<Self, LoadError> {
        let path = std::fs::canonicalize(path)?;
        let meta = std::fs::metadata(&path)?;
        Ok(SourceKey {
            modified: meta.modified().ok(),
            len: meta.len(),
            path,
        })
    }
}

// ---------------------------------------------------------------------------
// DatasetCache
// ---------------------------------------------------------------------------

/// Memoizes loaded datasets by [`SourceKey`].
///
/// At most one entry is kept per path: loading a newer version of a file
/// replaces the stale one.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, (SourceKey, Arc<Dataset>)>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, loading it if absent or stale.
    /// Failed loads are not cached.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<Dataset>, LoadError> {
        let key = SourceKey::for_path(path)?;

        if let Some((cached_key, dataset)) = self.entries.get(&key.path) {
            if *cached_key == key {
                log::info!("Cache hit for {}", key.path.display());
                return Ok(Arc::clone(dataset));
            }
            log::info!("Source changed on disk, reloading {}", key.path.display());
        }

        let dataset = Arc::new(load_file(&key.path)?);
        log::info!(
            "Loaded {} rows with columns {:?}",
            dataset.len(),
            dataset.table.columns
        );
        self.entries
            .insert(key.path.clone(), (key, Arc::clone(&dataset)));
        Ok(dataset)
    }

    /// Drop the entry for `path`. Returns whether one was cached.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let removed = self.entries.remove(&canonical).is_some();
        if removed {
            log::info!("Evicted {} from cache", canonical.display());
        }
        removed
    }

    pub fn clear(&mut self) {
        log::info!("Clearing dataset cache ({} entries)", self.entries.len());
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "VNO,Month,Week,Branch,Bill Amount,BILL TYPE,Act. Weight(Main),Load Type,Consignment Freight Amount\n";

    fn write(path: &Path, body: &str) {
        std::fs::write(path, format!("{HEADER}{body}")).unwrap();
    }

    #[test]
    fn repeated_loads_share_one_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ops.csv");
        write(&path, "V1,Jan,1,X,10,Freight,1,Bag,0\n");

        let mut cache = DatasetCache::new();
        let first = cache.get_or_load(&path).unwrap();
        let second = cache.get_or_load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn changed_source_is_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ops.csv");
        write(&path, "V1,Jan,1,X,10,Freight,1,Bag,0\n");

        let mut cache = DatasetCache::new();
        let first = cache.get_or_load(&path).unwrap();
        assert_eq!(first.len(), 1);

        write(
            &path,
            "V1,Jan,1,X,10,Freight,1,Bag,0\nV2,Feb,2,Y,20,Other,2,Bulk,0\n",
        );
        let second = cache.get_or_load(&path).unwrap();
        assert_eq!(second.len(), 2);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn invalidate_and_clear_force_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ops.csv");
        write(&path, "V1,Jan,1,X,10,Freight,1,Bag,0\n");

        let mut cache = DatasetCache::new();
        let first = cache.get_or_load(&path).unwrap();
        assert!(cache.invalidate(&path));
        assert!(!cache.invalidate(&path));
        assert!(cache.is_empty());

        let second = cache.get_or_load(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn failed_loads_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ops.csv");
        std::fs::write(&path, "VNO,Month\nV1,Jan\n").unwrap();

        let mut cache = DatasetCache::new();
        let err = cache.get_or_load(&path).unwrap_err();
        assert!(err.schema().is_some());
        assert!(cache.is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = DatasetCache::new();
        let err = cache.get_or_load(&dir.path().join("absent.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
