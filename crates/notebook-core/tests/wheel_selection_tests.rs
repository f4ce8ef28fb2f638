#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{default_interpreters, harness, keys, ALL_DEFAULT_MODULES};
use notebook_core::wheel::{order_for_wheel, parse_wheel_list};
use notebook_core::{set_for_testing, Catalog};

fn wheel_harness(shown_on_wheel: &str) -> common::Harness {
    let h = harness(
        Catalog::from_definitions(default_interpreters()),
        ALL_DEFAULT_MODULES,
    );
    let mut settings = h.config.get();
    settings.interpreters_shown_on_wheel = shown_on_wheel.to_string();
    h.config.set(settings).unwrap();
    h
}

#[test]
fn test_no_allow_list_keeps_resolved_order() {
    let h = wheel_harness("");

    assert_eq!(*h.registry.ordered_interpreters(), default_interpreters());
    assert_eq!(h.registry.wheel_interpreters(), default_interpreters());
    assert_eq!(h.registry.wheel_first_interpreters(), default_interpreters());
}

#[test]
fn test_wheel_filter_follows_allow_list_order() {
    let h = wheel_harness("java,pig");

    let names: Vec<String> = h
        .registry
        .wheel_interpreters()
        .into_iter()
        .map(|d| d.name)
        .collect();

    assert_eq!(names, vec!["Java", "Pig"]);
}

#[test]
fn test_pinned_interpreters_come_first() {
    let h = wheel_harness("java,pig");

    let ordered = h.registry.wheel_first_interpreters();

    assert_eq!(keys(&ordered), vec!["java", "pig", "hive", "impala", "spark"]);
    // Full definitions travel unchanged
    let by_key = |key: &str| default_interpreters().into_iter().find(|d| d.key == key).unwrap();
    assert_eq!(ordered[0], by_key("java"));
    assert_eq!(ordered[4], by_key("spark"));
}

#[test]
fn test_wheel_shows_allow_listed_subset_in_allow_list_order() {
    let h = wheel_harness("pig,hive");
    assert_eq!(keys(&h.registry.wheel_interpreters()), vec!["pig", "hive"]);
}

#[test]
fn test_unresolved_allow_list_keys_are_ignored() {
    let h = wheel_harness("phoenix,impala");

    assert_eq!(keys(&h.registry.wheel_interpreters()), vec!["impala"]);
    assert_eq!(
        keys(&h.registry.wheel_first_interpreters()),
        vec!["impala", "hive", "spark", "pig", "java"]
    );
    assert_eq!(h.registry.default_interpreter().unwrap().key, "impala");
}

#[test]
fn test_default_interpreter_falls_back_to_first_resolved() {
    let h = wheel_harness("");
    assert_eq!(h.registry.default_interpreter().unwrap().key, "hive");

    // Nothing enabled, nothing resolved
    let empty = harness(Catalog::from_definitions(default_interpreters()), &[]);
    assert!(empty.registry.default_interpreter().is_none());
}

#[test]
fn test_allow_list_change_needs_no_invalidation() {
    let h = wheel_harness("java");
    assert_eq!(keys(&h.registry.wheel_interpreters()), vec!["java"]);

    {
        let _reset = set_for_testing(&h.config, |s| {
            s.interpreters_shown_on_wheel = "spark,java".to_string();
        })
        .unwrap();
        assert_eq!(keys(&h.registry.wheel_interpreters()), vec!["spark", "java"]);
    }

    // Guard dropped, original allow-list back
    assert_eq!(keys(&h.registry.wheel_interpreters()), vec!["java"]);
    assert_eq!(h.registry.cache_stats().misses, 1);
}

#[test]
fn test_messy_allow_list_is_normalized() {
    assert_eq!(parse_wheel_list(",java, pig,,java ,"), vec!["java", "pig"]);

    let resolved = default_interpreters();
    let ordered = order_for_wheel(&resolved, &parse_wheel_list(" pig , pig,hive"));
    assert_eq!(keys(&ordered), vec!["pig", "hive", "impala", "spark", "java"]);
}
