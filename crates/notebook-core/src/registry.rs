//! Interpreter registry
//!
//! Composition root for interpreter resolution. Owns the catalog, reads the
//! enabled modules and settings through injected providers, and keeps the
//! resolved list in a single-slot cache.
//!
//! The registry never invalidates its cache on its own. Whoever changes the
//! explicit interpreters, the blacklist, the enabled modules or the
//! all-interpreters flag must call [`InterpreterRegistry::invalidate`];
//! until then the previous list keeps being served.

use std::sync::Arc;

use notebook_core_types::schema::{OP_INVALIDATE_INTERPRETERS, OP_RESOLVE_INTERPRETERS};

use crate::apps::AppRegistry;
use crate::cache::{CacheOutcome, CacheStats, InterpreterCache, ResolvedInterpreterList};
use crate::catalog::Catalog;
use crate::config::ConfigProvider;
use crate::errors::{NotebookError, Result};
use crate::model::InterpreterDefinition;
use crate::resolver::{compute_ordered_interpreters, ResolverInputs};
use crate::wheel;
use crate::{log_op_end, log_op_start};

pub struct InterpreterRegistry {
    catalog: Catalog,
    apps: Arc<dyn AppRegistry>,
    config: Arc<dyn ConfigProvider>,
    cache: InterpreterCache,
}

impl InterpreterRegistry {
    pub fn new(catalog: Catalog, apps: Arc<dyn AppRegistry>, config: Arc<dyn ConfigProvider>) -> Self {
        Self {
            catalog,
            apps,
            config,
            cache: InterpreterCache::new(),
        }
    }

    /// The full ordered interpreter list
    ///
    /// Served from the cache when populated; otherwise computed from the
    /// current catalog, modules and settings and published.
    pub fn resolve(&self) -> ResolvedInterpreterList {
        let (resolved, outcome) = self.cache.get_or_compute(|| self.compute());
        match outcome {
            CacheOutcome::Hit => tracing::debug!(
                op = OP_RESOLVE_INTERPRETERS,
                resolved_len = resolved.len(),
                "interpreter cache hit"
            ),
            CacheOutcome::Discarded => tracing::debug!(
                op = OP_RESOLVE_INTERPRETERS,
                resolved_len = resolved.len(),
                "interpreter list invalidated while resolving, not cached"
            ),
            CacheOutcome::Published | CacheOutcome::Joined => {}
        }
        resolved
    }

    /// Same as [`Self::resolve`]
    pub fn ordered_interpreters(&self) -> ResolvedInterpreterList {
        self.resolve()
    }

    /// Interpreters shown on the wheel, in allow-list order
    pub fn wheel_interpreters(&self) -> Vec<InterpreterDefinition> {
        let resolved = self.resolve();
        wheel::select_for_display(&resolved, &self.config.get().wheel_keys())
    }

    /// Full list with the wheel interpreters pinned first
    pub fn wheel_first_interpreters(&self) -> Vec<InterpreterDefinition> {
        let resolved = self.ordered_interpreters();
        wheel::order_for_wheel(&resolved, &self.config.get().wheel_keys())
    }

    /// Interpreters of the `editor` category, in resolved order
    pub fn editor_interpreters(&self) -> Vec<InterpreterDefinition> {
        self.ordered_interpreters()
            .iter()
            .filter(|d| d.is_editor())
            .cloned()
            .collect()
    }

    /// Interpreter selected by default in the editor
    pub fn default_interpreter(&self) -> Option<InterpreterDefinition> {
        let resolved = self.ordered_interpreters();
        wheel::default_interpreter(&resolved, &self.config.get().wheel_keys()).cloned()
    }

    /// A resolved interpreter by key
    ///
    /// # Errors
    ///
    /// Returns `InterpreterNotFound` when no resolved interpreter has the key.
    pub fn find(&self, key: &str) -> Result<InterpreterDefinition> {
        self.ordered_interpreters()
            .iter()
            .find(|d| d.key == key)
            .cloned()
            .ok_or_else(|| NotebookError::InterpreterNotFound {
                key: key.to_string(),
            })
    }

    /// Drop the cached list; the next read recomputes it
    pub fn invalidate(&self) {
        let was_populated = self.cache.invalidate();
        tracing::info!(
            op = OP_INVALIDATE_INTERPRETERS,
            was_populated,
            "interpreter cache invalidated"
        );
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &Arc<dyn ConfigProvider> {
        &self.config
    }

    pub fn apps(&self) -> &Arc<dyn AppRegistry> {
        &self.apps
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_populated()
    }

    fn compute(&self) -> Vec<InterpreterDefinition> {
        let settings = self.config.get();
        let enabled_modules = self.apps.enabled_apps();
        let blacklist = settings.blacklist();

        log_op_start!(
            OP_RESOLVE_INTERPRETERS,
            explicit_len = settings.interpreters.len(),
            enabled_modules_len = enabled_modules.len(),
            show_all = settings.enable_all_interpreters
        );
        let start = std::time::Instant::now();

        let resolved = compute_ordered_interpreters(ResolverInputs {
            catalog: &self.catalog,
            enabled_modules: &enabled_modules,
            explicit: &settings.interpreters,
            show_all: settings.enable_all_interpreters,
            blacklist: &blacklist,
        });

        log_op_end!(
            OP_RESOLVE_INTERPRETERS,
            duration_ms = start.elapsed().as_millis() as u64,
            resolved_len = resolved.len()
        );
        resolved
    }
}
