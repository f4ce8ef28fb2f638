use std::sync::Arc;

use notebook_core::{
    Catalog, ConfigProvider, InMemoryConfig, InterpreterDefinition, InterpreterRegistry,
    NotebookSettings, StaticAppRegistry,
};

/// A registry plus handles on the providers it reads
#[allow(dead_code)]
pub struct Harness {
    pub registry: InterpreterRegistry,
    pub apps: Arc<StaticAppRegistry>,
    pub config: Arc<dyn ConfigProvider>,
}

/// Build a registry over `catalog` with the given installed modules and default settings
#[allow(dead_code)]
pub fn harness(catalog: Catalog, installed: &[&str]) -> Harness {
    let apps = Arc::new(StaticAppRegistry::new(installed.iter().copied()));
    let config: Arc<dyn ConfigProvider> = Arc::new(InMemoryConfig::new(NotebookSettings::default()));
    let registry = InterpreterRegistry::new(catalog, apps.clone(), config.clone());
    Harness {
        registry,
        apps,
        config,
    }
}

/// Hive, Impala, Scala, Pig, Java in the order the wheel tests expect
#[allow(dead_code)]
pub fn default_interpreters() -> Vec<InterpreterDefinition> {
    vec![
        InterpreterDefinition::new("hive", "Hive", "hiveserver2"),
        InterpreterDefinition::new("impala", "Impala", "hiveserver2"),
        InterpreterDefinition::new("spark", "Scala", "livy"),
        InterpreterDefinition::new("pig", "Pig", "pig"),
        InterpreterDefinition::new("java", "Java", "oozie"),
    ]
}

/// Every module owning one of `default_interpreters`
#[allow(dead_code)]
pub const ALL_DEFAULT_MODULES: &[&str] = &["hive", "impala", "spark", "pig", "oozie"];

#[allow(dead_code)]
pub fn phoenix() -> InterpreterDefinition {
    InterpreterDefinition::new("phoenix", "Phoenix", "sqlalchemy").with_dialect("phoenix")
}

#[allow(dead_code)]
pub fn pyspark() -> InterpreterDefinition {
    InterpreterDefinition::new("pyspark", "PySpark", "livy").with_dialect("pyspark")
}

/// Replace the explicit interpreters
#[allow(dead_code)]
pub fn set_explicit(config: &Arc<dyn ConfigProvider>, interpreters: Vec<InterpreterDefinition>) {
    let mut settings = config.get();
    settings.interpreters = interpreters.into_iter().collect();
    config.set(settings).expect("in-memory config accepts settings");
}

/// Toggle the all-interpreters flag
#[allow(dead_code)]
pub fn set_show_all(config: &Arc<dyn ConfigProvider>, enabled: bool) {
    let mut settings = config.get();
    settings.enable_all_interpreters = enabled;
    config.set(settings).expect("in-memory config accepts settings");
}

#[allow(dead_code)]
pub fn names(interpreters: &[InterpreterDefinition]) -> Vec<&str> {
    interpreters.iter().map(|d| d.name.as_str()).collect()
}

#[allow(dead_code)]
pub fn keys(interpreters: &[InterpreterDefinition]) -> Vec<&str> {
    interpreters.iter().map(|d| d.key.as_str()).collect()
}
