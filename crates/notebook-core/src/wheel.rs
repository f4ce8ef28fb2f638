//! Wheel display selection
//!
//! The wheel offers a curated, ordered subset of the resolved interpreters.
//! Everything here is request-scoped and works on an already resolved list;
//! the allow-list is read per call, so changing it needs no cache
//! invalidation.

use std::collections::HashSet;

use crate::model::InterpreterDefinition;

/// Parse a comma-separated allow-list
///
/// Surrounding commas are stripped, items trimmed, empty items dropped, and
/// duplicates removed keeping the first occurrence.
pub fn parse_wheel_list(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.trim()
        .trim_matches(',')
        .split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .filter(|key| seen.insert(*key))
        .map(str::to_string)
        .collect()
}

/// Subset of `resolved` shown on the wheel, in allow-list order
///
/// An empty allow-list returns `resolved` unchanged. Allow-listed keys that
/// were not resolved are skipped.
pub fn select_for_display(
    resolved: &[InterpreterDefinition],
    allow_list: &[String],
) -> Vec<InterpreterDefinition> {
    if allow_list.is_empty() {
        return resolved.to_vec();
    }
    allow_list
        .iter()
        .filter_map(|key| resolved.iter().find(|d| &d.key == key))
        .cloned()
        .collect()
}

/// Full resolved list with the allow-listed interpreters pinned first
///
/// Pinned interpreters come in allow-list order, the rest keep resolved order.
pub fn order_for_wheel(
    resolved: &[InterpreterDefinition],
    allow_list: &[String],
) -> Vec<InterpreterDefinition> {
    let mut ordered = select_for_display(resolved, allow_list);
    if allow_list.is_empty() {
        return ordered;
    }
    ordered.extend(
        resolved
            .iter()
            .filter(|d| !allow_list.contains(&d.key))
            .cloned(),
    );
    ordered
}

/// Interpreter selected by default in the editor
///
/// The first allow-listed interpreter that was resolved, else the first
/// resolved one.
pub fn default_interpreter<'a>(
    resolved: &'a [InterpreterDefinition],
    allow_list: &[String],
) -> Option<&'a InterpreterDefinition> {
    allow_list
        .iter()
        .find_map(|key| resolved.iter().find(|d| &d.key == key))
        .or_else(|| resolved.first())
}
