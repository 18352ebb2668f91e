use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;

use crate::models::{CaregiverProfile, ChildContext, FamilyContext, JobOpportunity, MatchResult};

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// In-process cache of computed match results
///
/// Results are keyed by the snapshots and the evaluation date, the only
/// inputs the engine reads, so a hit is always identical to recomputing.
pub struct MatchCache {
    results: moka::future::Cache<String, MatchResult>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MatchCache {
    /// Create a new cache holding at most `capacity` results for `ttl_secs`
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let results = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            results,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Get a cached result
    pub async fn get(&self, key: &str) -> Option<MatchResult> {
        match self.results.get(key).await {
            Some(result) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::trace!("Cache hit: {}", key);
                Some(result)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::trace!("Cache miss: {}", key);
                None
            }
        }
    }

    /// Store a result
    pub async fn set(&self, key: String, result: MatchResult) {
        self.results.insert(key, result).await;
    }

    /// Return the cached result for `key`, computing and storing it on a miss
    pub async fn get_or_compute<F>(&self, key: String, compute: F) -> MatchResult
    where
        F: FnOnce() -> MatchResult,
    {
        if let Some(result) = self.get(&key).await {
            return result;
        }

        let result = compute();
        self.set(key, result.clone()).await;
        result
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let hit_count = self.hits.load(Ordering::Relaxed);
        let miss_count = self.misses.load(Ordering::Relaxed);
        let lookups = hit_count + miss_count;

        CacheStats {
            size: self.results.entry_count(),
            hit_count,
            miss_count,
            hit_rate: if lookups > 0 {
                hit_count as f64 / lookups as f64
            } else {
                0.0
            },
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub size: u64,
    pub hit_count: u64,
    pub miss_count: u64,
    pub hit_rate: f64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for one evaluation
    ///
    /// The readable prefix carries the ids; the hash covers every snapshot
    /// field so an edited profile never reuses a stale result.
    pub fn evaluation(
        job: &JobOpportunity,
        family: &FamilyContext,
        children: &[ChildContext],
        caregiver: &CaregiverProfile,
        today: NaiveDate,
    ) -> Result<String, CacheError> {
        let payload = serde_json::to_vec(&(job, family, children, caregiver))?;

        let mut hasher = DefaultHasher::new();
        payload.hash(&mut hasher);

        Ok(format!(
            "match:{}:{}:{}:{:016x}",
            job.id,
            caregiver.id,
            today,
            hasher.finish()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compute_match;
    use chrono::{TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn job() -> JobOpportunity {
        JobOpportunity {
            id: "job-1".to_string(),
            ..Default::default()
        }
    }

    fn caregiver() -> CaregiverProfile {
        CaregiverProfile {
            id: "cg-1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_cache_key_builder() {
        let key = CacheKey::evaluation(&job(), &FamilyContext::default(), &[], &caregiver(), today())
            .unwrap();

        assert!(key.starts_with("match:job-1:cg-1:2024-06-15:"));
    }

    #[test]
    fn test_cache_key_changes_with_snapshot() {
        let family = FamilyContext::default();
        let before = CacheKey::evaluation(&job(), &family, &[], &caregiver(), today()).unwrap();

        let mut edited = caregiver();
        edited.is_smoker = true;
        let after = CacheKey::evaluation(&job(), &family, &[], &edited, today()).unwrap();

        assert_ne!(before, after);
        assert_eq!(
            before,
            CacheKey::evaluation(&job(), &family, &[], &caregiver(), today()).unwrap()
        );
    }

    #[tokio::test]
    async fn test_get_or_compute_memoises() {
        let cache = MatchCache::new(100, 60);
        let evaluated_at = Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap();
        let family = FamilyContext::default();
        let key = CacheKey::evaluation(&job(), &family, &[], &caregiver(), today()).unwrap();

        let first = cache
            .get_or_compute(key.clone(), || {
                compute_match(&job(), &family, &[], &caregiver(), evaluated_at)
            })
            .await;
        let second = cache
            .get_or_compute(key, || panic!("result should come from the cache"))
            .await;

        assert_eq!(first, second);

        let stats = cache.stats();
        assert_eq!(stats.hit_count, 1);
        assert_eq!(stats.miss_count, 1);
        assert_eq!(stats.hit_rate, 0.5);
    }
}
