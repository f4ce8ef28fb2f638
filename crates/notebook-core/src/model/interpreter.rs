use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Interfaces whose interpreters speak SQL unless told otherwise
pub const SQL_INTERFACES: &[&str] = &[
    "hiveserver2",
    "rdbms",
    "jdbc",
    "solr",
    "sqlalchemy",
    "ksql",
    "flink",
    "sql_alchemy",
];

/// Default category for editor interpreters
pub const EDITOR_CATEGORY: &str = "editor";

/// InterpreterDefinition - one query/compute engine connector
///
/// The serialized shape matches what the notebook UI consumes: the key is
/// emitted as `type` and the display label as `displayName`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpreterDefinition {
    /// Unique short identifier (`hive`, `pyspark`), stable across catalog and config
    #[serde(rename = "type")]
    pub key: String,

    /// Human-readable name
    pub name: String,

    /// Label shown in selection controls
    #[serde(rename = "displayName")]
    pub display_name: String,

    /// Backend protocol family (`hiveserver2`, `livy`, `oozie`, `sqlalchemy`, ...)
    pub interface: String,

    /// SQL dialect or engine-specific tag
    pub dialect: String,

    /// Whether the connector is a SQL query engine
    pub is_sql: bool,

    /// Whether this is a metadata browser rather than an executable engine
    #[serde(default)]
    pub is_catalog: bool,

    /// Grouping tag (`editor`)
    pub category: String,

    /// Opaque connector options, passed through unmodified
    #[serde(default)]
    pub options: Map<String, Value>,

    /// Opaque dialect properties, passed through unmodified
    #[serde(default)]
    pub dialect_properties: Map<String, Value>,
}

impl InterpreterDefinition {
    /// Create a definition with the notebook defaults
    ///
    /// `displayName` is the name, the dialect is the key, the category is
    /// `editor`, and `is_sql` is derived from the interface.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        interface: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let name = name.into();
        let interface = interface.into();
        Self {
            is_sql: is_sql_interface(&interface),
            display_name: name.clone(),
            dialect: key.clone(),
            key,
            name,
            interface,
            options: Map::new(),
            dialect_properties: Map::new(),
            is_catalog: false,
            category: EDITOR_CATEGORY.to_string(),
        }
    }

    /// Override the display label
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Override the dialect
    pub fn with_dialect(mut self, dialect: impl Into<String>) -> Self {
        self.dialect = dialect.into();
        self
    }

    /// Override the SQL flag
    pub fn with_sql(mut self, is_sql: bool) -> Self {
        self.is_sql = is_sql;
        self
    }

    /// Override the catalog flag
    pub fn with_catalog(mut self, is_catalog: bool) -> Self {
        self.is_catalog = is_catalog;
        self
    }

    /// Override the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set one connector option
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    /// Replace the dialect properties
    pub fn with_dialect_properties(mut self, properties: Map<String, Value>) -> Self {
        self.dialect_properties = properties;
        self
    }

    /// Whether this interpreter belongs in the editor dropdown
    pub fn is_editor(&self) -> bool {
        self.category == EDITOR_CATEGORY
    }
}

/// Whether an interface family is SQL by default
pub fn is_sql_interface(interface: &str) -> bool {
    SQL_INTERFACES.contains(&interface)
}
