//! In-memory dataset cache
//!
//! Holds the generated dataset behind a `parking_lot::RwLock` and hands out
//! `Arc` snapshots, so clearing the cache never invalidates data a reader is
//! already holding. The record source is injected; the application owns the
//! cache instance.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::core::generator::{GenerateError, Generator};
use crate::entities::record::MarketRecord;

/// Anything that can produce a full dataset
pub trait RecordSource: Send + Sync {
    fn produce(&self) -> Result<Vec<MarketRecord>, GenerateError>;
}

impl RecordSource for Generator {
    fn produce(&self) -> Result<Vec<MarketRecord>, GenerateError> {
        self.generate()
    }
}

impl<F> RecordSource for F
where
    F: Fn() -> Result<Vec<MarketRecord>, GenerateError> + Send + Sync,
{
    fn produce(&self) -> Result<Vec<MarketRecord>, GenerateError> {
        self()
    }
}

/// Lazily generated, explicitly invalidated dataset
pub struct DataCache<S> {
    source: S,
    slot: RwLock<Option<Arc<[MarketRecord]>>>,
    generations: AtomicUsize,
}

impl<S: RecordSource> DataCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            slot: RwLock::new(None),
            generations: AtomicUsize::new(0),
        }
    }

    /// Get the cached dataset, generating it on a cold cache
    ///
    /// A failed generation is logged and cached as an empty dataset; callers
    /// treat "no data" as a normal state.
    pub fn get_data(&self) -> Arc<[MarketRecord]> {
        if let Some(data) = self.slot.read().as_ref() {
            return Arc::clone(data);
        }

        let mut slot = self.slot.write();
        // another caller may have filled the slot while we waited
        if let Some(data) = slot.as_ref() {
            return Arc::clone(data);
        }

        let records = match self.source.produce() {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "dataset generation failed, serving an empty dataset");
                Vec::new()
            }
        };
        let generation = self.generations.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(records = records.len(), generation, "dataset cached");

        let data: Arc<[MarketRecord]> = records.into();
        *slot = Some(Arc::clone(&data));
        data
    }

    /// Drop the cached dataset; the next `get_data` regenerates
    pub fn clear(&self) {
        if self.slot.write().take().is_some() {
            debug!("dataset cache cleared");
        }
    }

    pub fn is_cached(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Number of generations run so far
    pub fn generation_count(&self) -> usize {
        self.generations.load(Ordering::Relaxed)
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

/// SHA-256 over the JSON encoding of every record, hex encoded
pub fn dataset_digest(records: &[MarketRecord]) -> String {
    let mut hasher = Sha256::new();
    for record in records {
        // MarketRecord has no map keys or non-finite floats in practice
        if let Ok(bytes) = serde_json::to_vec(record) {
            hasher.update(&bytes);
        }
        hasher.update(b"\n");
    }
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::record::fixtures::record;

    fn two_records() -> Result<Vec<MarketRecord>, GenerateError> {
        Ok(vec![
            record(2024, "Europe", "Germany"),
            record(2025, "Europe", "France"),
        ])
    }

    #[test]
    fn test_cold_cache_generates_once() {
        let cache = DataCache::new(two_records);
        assert!(!cache.is_cached());

        let first = cache.get_data();
        let second = cache.get_data();
        assert_eq!(first.len(), 2);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.generation_count(), 1);
        assert!(cache.is_cached());
    }

    #[test]
    fn test_clear_forces_regeneration() {
        let cache = DataCache::new(two_records);
        let before = cache.get_data();
        cache.clear();
        assert!(!cache.is_cached());

        let after = cache.get_data();
        assert_eq!(cache.generation_count(), 2);
        assert!(!Arc::ptr_eq(&before, &after));
        // the old snapshot is still readable
        assert_eq!(before[1].country, "France");
    }

    #[test]
    fn test_failed_generation_serves_empty() {
        let cache = DataCache::new(|| Err(GenerateError::EmptyDimension("brands")));
        assert!(cache.get_data().is_empty());
        assert!(cache.is_cached());
        assert_eq!(cache.generation_count(), 1);
    }

    #[test]
    fn test_concurrent_readers_share_snapshot() {
        let cache = Arc::new(DataCache::new(two_records));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get_data().len())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 2);
        }
        assert_eq!(cache.generation_count(), 1);
    }

    #[test]
    fn test_digest_stable_and_sensitive() {
        let records = two_records().unwrap();
        let digest = dataset_digest(&records);
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, dataset_digest(&records));
        assert_ne!(digest, dataset_digest(&records[..1]));
    }
}
