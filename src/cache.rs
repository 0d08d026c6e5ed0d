//! Process-scoped memoization of analysis results
//!
//! Pure memo layer keyed by conversation fingerprints: no eviction, no TTL,
//! no size bound within a process lifetime. Entries are created on first
//! successful resolution and never mutated in place; readers share them via
//! `Arc`. Unbounded growth is a documented resource-management gap of the
//! modeled system; hosts that need bounds must make that an explicit
//! decision, since eviction changes observable behavior (cache misses).
//!
//! Thread-safe: reads and writes go through `parking_lot::RwLock`, with
//! atomic hit/miss counters.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::fingerprint::Fingerprint;
use crate::types::Profile;

/// Snapshot of cache counters
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits (profiles + questions)
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Cached profile count
    pub profiles: usize,
    /// Cached question count
    pub questions: usize,
    /// Hit rate as percentage (0.0 - 100.0)
    pub hit_rate: f64,
}

/// Shared memo of computed profiles and generated questions
#[derive(Default)]
pub struct AnalysisCache {
    profiles: RwLock<HashMap<Fingerprint, Arc<Profile>>>,
    questions: RwLock<HashMap<Fingerprint, String>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a previously computed profile
    pub fn get_profile(&self, key: &Fingerprint) -> Option<Arc<Profile>> {
        let found = self.profiles.read().get(key).cloned();
        self.count(found.is_some());
        found
    }

    /// Store a validated profile for a fingerprint
    pub fn put_profile(&self, key: Fingerprint, profile: Profile) {
        self.profiles.write().insert(key, Arc::new(profile));
    }

    /// Look up a previously generated question
    pub fn get_question(&self, key: &Fingerprint) -> Option<String> {
        let found = self.questions.read().get(key).cloned();
        self.count(found.is_some());
        found
    }

    /// Store a generated question for a context fingerprint
    pub fn put_question(&self, key: Fingerprint, question: String) {
        self.questions.write().insert(key, question);
    }

    fn count(&self, hit: bool) {
        if hit {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        CacheStats {
            hits,
            misses,
            profiles: self.profiles.read().len(),
            questions: self.questions.read().len(),
            hit_rate: if total > 0 {
                (hits as f64 / total as f64) * 100.0
            } else {
                0.0
            },
        }
    }

    /// Total number of cached entries
    pub fn len(&self) -> usize {
        self.profiles.read().len() + self.questions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry. Counters are cumulative and survive a clear.
    pub fn clear(&self) {
        self.profiles.write().clear();
        self.questions.write().clear();
    }
}
