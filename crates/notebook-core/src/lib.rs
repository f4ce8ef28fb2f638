//! Notebook Core - interpreter registry and resolver
//!
//! This crate computes which interpreters (query engine connectors) the
//! notebook exposes, and in what order:
//! - Interpreter definitions and an insertion-ordered interpreter map
//! - A static catalog with module ownership and multi-dialect families
//! - Configuration providers (in-memory and TOML file backed)
//! - The merge/ordering algorithm and its single-slot cache
//! - Wheel selection over the resolved list
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use notebook_core::{Catalog, InMemoryConfig, InterpreterRegistry, StaticAppRegistry};
//!
//! let registry = InterpreterRegistry::new(
//!     Catalog::notebook_default(),
//!     Arc::new(StaticAppRegistry::new(["hive", "impala"])),
//!     Arc::new(InMemoryConfig::default()),
//! );
//! let names: Vec<_> = registry.ordered_interpreters().iter().map(|d| d.name.clone()).collect();
//! assert_eq!(names, vec!["Hive", "Impala"]);
//! ```

pub mod apps;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod registry;
pub mod resolver;
pub mod wheel;

// Re-export commonly used types
pub use apps::{AppRegistry, StaticAppRegistry};
pub use cache::{CacheOutcome, CacheStats, InterpreterCache, ResolvedInterpreterList};
pub use catalog::{Catalog, CatalogEntry, CatalogSlot, FamilyTable, InterpreterFamily, ModuleOwnership};
pub use config::{
    set_for_testing, ConfigFile, ConfigProvider, InMemoryConfig, NotebookSettings, SettingsReset,
    TomlFileConfig,
};
pub use errors::{ExError, ExErrorKind, NotebookError, Result};
pub use model::{InterpreterDefinition, InterpreterMap};
pub use registry::InterpreterRegistry;
pub use resolver::{compute_ordered_interpreters, ResolverInputs};

#[doc(hidden)]
pub mod __private {
    pub use notebook_core_types::schema;
    pub use tracing;
}
