//! Single-slot cache for the resolved interpreter list
//!
//! The slot holds an immutable, shared list. A new list is always computed
//! off to the side and published whole, so readers see either the previous
//! list or the new one. The cache never invalidates itself.
//!
//! Every invalidation bumps a generation. A list computed before an
//! invalidation is returned to its caller but never published, so a change
//! followed by `invalidate()` is always visible to the next lookup.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::model::InterpreterDefinition;

/// A published, immutable resolved list
pub type ResolvedInterpreterList = Arc<Vec<InterpreterDefinition>>;

/// Hit/miss counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// How a lookup was served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// The published list was returned without computing
    Hit,
    /// The caller's list was computed and published
    Published,
    /// Another caller published first for the same generation; its list was returned
    Joined,
    /// The cache was invalidated while computing; the list was not published
    Discarded,
}

#[derive(Debug, Default)]
struct Slot {
    list: Option<ResolvedInterpreterList>,
    generation: u64,
}

/// Process-wide slot for the resolved interpreter list
#[derive(Debug, Default)]
pub struct InterpreterCache {
    slot: RwLock<Slot>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl InterpreterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached list, if any
    pub fn get(&self) -> Option<ResolvedInterpreterList> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .list
            .clone()
    }

    /// Return the cached list, computing it on a miss
    ///
    /// `compute` runs without holding the lock. Its result is published
    /// only if no invalidation happened meanwhile; when two callers miss
    /// within the same generation, the first list published wins and both
    /// return it.
    pub fn get_or_compute<F>(&self, compute: F) -> (ResolvedInterpreterList, CacheOutcome)
    where
        F: FnOnce() -> Vec<InterpreterDefinition>,
    {
        let generation = {
            let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = &slot.list {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return (Arc::clone(cached), CacheOutcome::Hit);
            }
            slot.generation
        };

        self.misses.fetch_add(1, Ordering::Relaxed);
        let computed = Arc::new(compute());

        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if slot.generation != generation {
            return (computed, CacheOutcome::Discarded);
        }
        match &slot.list {
            Some(published) => (Arc::clone(published), CacheOutcome::Joined),
            None => {
                slot.list = Some(Arc::clone(&computed));
                (computed, CacheOutcome::Published)
            }
        }
    }

    /// Clear the slot and start a new generation; returns whether a list was cached
    pub fn invalidate(&self) -> bool {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        slot.generation = slot.generation.wrapping_add(1);
        slot.list.take().is_some()
    }

    pub fn is_populated(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .list
            .is_some()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
