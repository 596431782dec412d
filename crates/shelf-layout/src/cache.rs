//! Plan cache for memoizing planner results across render passes.
//!
//! The rendering layer replans on every change to the theme list, but most
//! changes (a renamed theme, a refreshed image) leave the item counts alone.
//! [`PlanCache`] keys decisions on the exact `(item counts, threshold)` pair so
//! those passes skip planning entirely.
//!
//! # Usage
//!
//! ```
//! use shelf_layout::{LayoutPlanner, PlanCache, ThemeDescriptor};
//!
//! let mut cache = PlanCache::new(16);
//! let planner = LayoutPlanner::default();
//! let themes = [ThemeDescriptor::new(1, 3), ThemeDescriptor::new(2, 9)];
//!
//! let first = planner.plan_cached(&themes, &mut cache).unwrap();
//! let second = planner.plan_cached(&themes, &mut cache).unwrap();
//! assert_eq!(first, second);
//! assert_eq!(cache.stats().hits, 1);
//! ```
//!
//! # Invalidation
//!
//! Results depend only on the key, so invalidation is never needed for
//! correctness. [`PlanCache::invalidate_all`] exists for callers that want to
//! drop memory held by stale lists after a large data refresh.
//!
//! # Eviction
//!
//! When at capacity a stale entry is evicted first; otherwise the entry with
//! the fewest hits goes, regardless of how recently it was used.

use rustc_hash::FxHashMap;

use crate::planner::LayoutDecision;

/// Key for plan cache lookups: the full count sequence plus threshold.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct PlanKey {
    counts: Box<[i64]>,
    threshold: i64,
}

impl PlanKey {
    pub fn new(counts: Vec<i64>, threshold: i64) -> Self {
        Self {
            counts: counts.into_boxed_slice(),
            threshold,
        }
    }

    #[inline]
    pub fn counts(&self) -> &[i64] {
        &self.counts
    }

    #[inline]
    pub fn threshold(&self) -> i64 {
        self.threshold
    }
}

#[derive(Clone, Debug)]
struct CachedPlanEntry {
    decisions: Vec<LayoutDecision>,
    /// Generation when this entry was created/updated.
    generation: u64,
    access_count: u32,
}

/// Statistics about plan cache performance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanCacheStats {
    /// Number of entries currently in the cache.
    pub entries: usize,
    /// Total cache hits since creation or last reset.
    pub hits: u64,
    /// Total cache misses since creation or last reset.
    pub misses: u64,
    /// Hit rate as a fraction (0.0 to 1.0).
    pub hit_rate: f64,
}

/// Capacity-bounded memo of planner results.
#[derive(Debug)]
pub struct PlanCache {
    entries: FxHashMap<PlanKey, CachedPlanEntry>,
    generation: u64,
    max_entries: usize,
    hits: u64,
    misses: u64,
}

impl PlanCache {
    /// Create a cache holding at most `max_entries` plans (minimum 1).
    #[inline]
    pub fn new(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: FxHashMap::with_capacity_and_hasher(max_entries, Default::default()),
            generation: 0,
            max_entries,
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached plan for `key`, or compute, store, and return it.
    ///
    /// A failed computation leaves the cache untouched apart from the miss
    /// counter.
    pub fn get_or_try_compute<F, E>(
        &mut self,
        key: PlanKey,
        compute: F,
    ) -> Result<Vec<LayoutDecision>, E>
    where
        F: FnOnce(&PlanKey) -> Result<Vec<LayoutDecision>, E>,
    {
        if let Some(entry) = self.entries.get_mut(&key)
            && entry.generation == self.generation
        {
            self.hits += 1;
            entry.access_count = entry.access_count.saturating_add(1);
            tracing::trace!(target: "shelf.layout.cache", themes = key.counts.len(), "plan cache hit");
            return Ok(entry.decisions.clone());
        }

        self.misses += 1;
        tracing::trace!(target: "shelf.layout.cache", themes = key.counts.len(), "plan cache miss");
        let decisions = compute(&key)?;

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.evict_least_used();
        }

        self.entries.insert(
            key,
            CachedPlanEntry {
                decisions: decisions.clone(),
                generation: self.generation,
                access_count: 1,
            },
        );

        Ok(decisions)
    }

    /// Make every entry stale by bumping the generation. O(1).
    #[inline]
    pub fn invalidate_all(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn stats(&self) -> PlanCacheStats {
        let total = self.hits + self.misses;
        PlanCacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
            hit_rate: if total > 0 {
                self.hits as f64 / total as f64
            } else {
                0.0
            },
        }
    }

    #[inline]
    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }

    /// Drop all entries immediately.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    fn evict_least_used(&mut self) {
        // Stale generations go first, then the least accessed entry.
        let generation = self.generation;
        if let Some(key) = self
            .entries
            .iter()
            .min_by_key(|(_, e)| (e.generation == generation, e.access_count))
            .map(|(k, _)| k.clone())
        {
            self.entries.remove(&key);
        }
    }
}

impl Default for PlanCache {
    /// Creates a cache with default capacity of 64 entries.
    fn default() -> Self {
        Self::new(64)
    }
}
