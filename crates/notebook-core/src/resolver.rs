//! Interpreter ordering and merge
//!
//! Pure computation of the ordered interpreter list from its four inputs.
//! Caching lives in [`crate::cache`]; this module never touches shared state.

use std::collections::BTreeSet;

use crate::catalog::Catalog;
use crate::model::{InterpreterDefinition, InterpreterMap};

/// Everything the resolver reads
#[derive(Debug, Clone, Copy)]
pub struct ResolverInputs<'a> {
    /// Statically known interpreters, in UI order
    pub catalog: &'a Catalog,
    /// Application modules currently enabled
    pub enabled_modules: &'a BTreeSet<String>,
    /// Explicitly configured interpreters, in configuration order
    pub explicit: &'a InterpreterMap,
    /// Expand multi-dialect families
    pub show_all: bool,
    /// Keys or module names never exposed
    pub blacklist: &'a BTreeSet<String>,
}

/// Compute the ordered, deduplicated interpreter list
///
/// 1. Catalog entries whose owning modules are all enabled, in catalog
///    order; families are expanded only with `show_all`.
/// 2. Explicit entries replace a present key in place or are appended in
///    configuration order.
/// 3. Entries whose key or owning module is blacklisted, or whose owning
///    module is known but not enabled, are dropped.
///
/// Never fails; empty inputs produce an empty list.
pub fn compute_ordered_interpreters(inputs: ResolverInputs<'_>) -> Vec<InterpreterDefinition> {
    let mut merged: InterpreterMap = inputs
        .catalog
        .expand(inputs.show_all)
        .into_iter()
        .filter(|entry| modules_enabled(&entry.requires, inputs.enabled_modules))
        .map(|entry| entry.definition)
        .collect();

    for definition in inputs.explicit {
        if let Some(replaced) = merged.insert(definition.clone()) {
            tracing::debug!(
                interpreter_key = %replaced.key,
                "explicit interpreter overrides catalog definition"
            );
        }
    }

    merged.retain(|definition| is_exposed(definition, &inputs));
    merged.into_vec()
}

fn modules_enabled(owners: &[String], enabled: &BTreeSet<String>) -> bool {
    owners.iter().all(|module| enabled.contains(module))
}

fn is_exposed(definition: &InterpreterDefinition, inputs: &ResolverInputs<'_>) -> bool {
    if inputs.blacklist.contains(&definition.key) {
        return false;
    }
    let owners = inputs.catalog.owners_of(&definition.key);
    owners
        .iter()
        .all(|module| !inputs.blacklist.contains(module) && inputs.enabled_modules.contains(module))
}
