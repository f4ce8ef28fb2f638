//! Notebook configuration
//!
//! Settings that drive interpreter resolution, the provider abstraction the
//! registry reads them through, and the TOML file format.
//!
//! Changing a setting never touches the interpreter cache. Callers that
//! change `interpreters`, `app_blacklist` or `enable_all_interpreters` must
//! invalidate the registry themselves.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use notebook_core_types::schema::{OP_LOAD_CONFIG, OP_STORE_CONFIG};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{NotebookError, Result};
use crate::model::{is_sql_interface, InterpreterDefinition, InterpreterMap, EDITOR_CATEGORY};
use crate::wheel::parse_wheel_list;
use crate::{log_op_end, log_op_error, log_op_start};

/// Interface assumed when a configured interpreter does not name one
pub const DEFAULT_INTERFACE: &str = "hiveserver2";

/// One interpreter as written in configuration
///
/// Every field except the key is optional; missing ones get the notebook
/// defaults when converted into a definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InterpreterConfig {
    #[serde(alias = "type")]
    pub key: String,
    pub name: Option<String>,
    #[serde(alias = "displayName")]
    pub display_name: Option<String>,
    pub interface: Option<String>,
    pub dialect: Option<String>,
    pub is_sql: Option<bool>,
    #[serde(default)]
    pub options: Map<String, Value>,
    #[serde(default)]
    pub dialect_properties: Map<String, Value>,
    pub is_catalog: Option<bool>,
    pub category: Option<String>,
}

impl InterpreterConfig {
    /// Build the definition, filling absent fields with the notebook defaults
    pub fn into_definition(self) -> InterpreterDefinition {
        let name = self.name.unwrap_or_else(|| self.key.clone());
        let interface = self
            .interface
            .unwrap_or_else(|| DEFAULT_INTERFACE.to_string());
        InterpreterDefinition {
            display_name: self.display_name.unwrap_or_else(|| name.clone()),
            dialect: self.dialect.unwrap_or_else(|| self.key.clone()),
            is_sql: self.is_sql.unwrap_or_else(|| is_sql_interface(&interface)),
            is_catalog: self.is_catalog.unwrap_or(false),
            category: self
                .category
                .unwrap_or_else(|| EDITOR_CATEGORY.to_string()),
            options: self.options,
            dialect_properties: self.dialect_properties,
            key: self.key,
            name,
            interface,
        }
    }
}

/// Settings read by the interpreter registry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotebookSettings {
    /// Keys or module names never exposed
    pub app_blacklist: Vec<String>,

    /// Expose every interpreter family, not only single interpreters
    pub enable_all_interpreters: bool,

    /// Comma-separated keys pinned on the wheel, in order (`"java,pig"`)
    pub interpreters_shown_on_wheel: String,

    /// Explicitly configured interpreters, in configuration order
    #[serde(with = "explicit_interpreters")]
    pub interpreters: InterpreterMap,
}

impl NotebookSettings {
    /// Blacklist as a set
    pub fn blacklist(&self) -> BTreeSet<String> {
        self.app_blacklist
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Parsed wheel allow-list
    pub fn wheel_keys(&self) -> Vec<String> {
        parse_wheel_list(&self.interpreters_shown_on_wheel)
    }
}

mod explicit_interpreters {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::InterpreterConfig;
    use crate::model::InterpreterMap;

    pub fn serialize<S: Serializer>(map: &InterpreterMap, serializer: S) -> Result<S::Ok, S::Error> {
        map.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<InterpreterMap, D::Error> {
        let entries = Vec::<InterpreterConfig>::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .map(InterpreterConfig::into_definition)
            .collect())
    }
}

/// The `[apps]` section: which engine plugins are installed
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppsConfig {
    pub installed: Vec<String>,
}

/// Whole configuration file
///
/// ```toml
/// [apps]
/// installed = ["hive", "spark"]
///
/// [notebook]
/// enable_all_interpreters = false
/// interpreters_shown_on_wheel = "java,pig"
///
/// [[notebook.interpreters]]
/// key = "phoenix"
/// name = "Phoenix"
/// interface = "sqlalchemy"
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub apps: AppsConfig,
    pub notebook: NotebookSettings,
}

impl ConfigFile {
    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` when the text is not valid for the schema.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a configuration file
    ///
    /// # Errors
    ///
    /// Returns `ConfigRead` when the file cannot be read and `ConfigParse`
    /// when its content is invalid.
    pub fn load(path: &Path) -> Result<Self> {
        log_op_start!(OP_LOAD_CONFIG, config_path = %path.display());
        let start = std::time::Instant::now();

        let result = std::fs::read_to_string(path)
            .map_err(|e| NotebookError::ConfigRead {
                path: path.display().to_string(),
                message: e.to_string(),
            })
            .and_then(|content| Self::parse(&content))
            .map_err(|e| {
                log_op_error!(
                    OP_LOAD_CONFIG,
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                e
            })?;

        log_op_end!(
            OP_LOAD_CONFIG,
            duration_ms = start.elapsed().as_millis() as u64,
            explicit_len = result.notebook.interpreters.len()
        );
        Ok(result)
    }

    /// Serialize back to TOML text
    ///
    /// # Errors
    ///
    /// Returns `Serialization` when a value has no TOML form (e.g. a null option).
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Write the configuration to a file
    ///
    /// # Errors
    ///
    /// Returns `Serialization` or `ConfigWrite`.
    pub fn store(&self, path: &Path) -> Result<()> {
        log_op_start!(OP_STORE_CONFIG, config_path = %path.display());
        let start = std::time::Instant::now();

        let result = self.to_toml().and_then(|content| {
            std::fs::write(path, content).map_err(|e| NotebookError::ConfigWrite {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        });

        match result {
            Ok(()) => {
                log_op_end!(
                    OP_STORE_CONFIG,
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Ok(())
            }
            Err(e) => {
                log_op_error!(
                    OP_STORE_CONFIG,
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(e)
            }
        }
    }
}

/// Configuration provider read by the registry
///
/// Production and test implementations differ only in their backing store.
pub trait ConfigProvider: Send + Sync {
    /// Current settings
    fn get(&self) -> NotebookSettings;

    /// Replace the settings
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store cannot be updated.
    fn set(&self, settings: NotebookSettings) -> Result<()>;
}

/// Settings held in memory
#[derive(Debug, Default)]
pub struct InMemoryConfig {
    settings: RwLock<NotebookSettings>,
}

impl InMemoryConfig {
    pub fn new(settings: NotebookSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }
}

impl ConfigProvider for InMemoryConfig {
    fn get(&self) -> NotebookSettings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, settings: NotebookSettings) -> Result<()> {
        *self
            .settings
            .write()
            .unwrap_or_else(PoisonError::into_inner) = settings;
        Ok(())
    }
}

/// Settings backed by a TOML file
///
/// The file is read once at open; `set` rewrites it, keeping the `[apps]`
/// section as it was.
#[derive(Debug)]
pub struct TomlFileConfig {
    path: PathBuf,
    file: RwLock<ConfigFile>,
}

impl TomlFileConfig {
    /// Open a configuration file
    ///
    /// # Errors
    ///
    /// Returns `ConfigRead` or `ConfigParse`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = ConfigFile::load(&path)?;
        Ok(Self {
            path,
            file: RwLock::new(file),
        })
    }

    /// Re-read the file, discarding in-memory state
    ///
    /// # Errors
    ///
    /// Returns `ConfigRead` or `ConfigParse`; the previous state is kept on error.
    pub fn reload(&self) -> Result<()> {
        let file = ConfigFile::load(&self.path)?;
        *self.file.write().unwrap_or_else(PoisonError::into_inner) = file;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `[apps]` section
    pub fn apps(&self) -> AppsConfig {
        self.file
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .apps
            .clone()
    }
}

impl ConfigProvider for TomlFileConfig {
    fn get(&self) -> NotebookSettings {
        self.file
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .notebook
            .clone()
    }

    fn set(&self, settings: NotebookSettings) -> Result<()> {
        let mut file = self.file.write().unwrap_or_else(PoisonError::into_inner);
        let updated = ConfigFile {
            apps: file.apps.clone(),
            notebook: settings,
        };
        updated.store(&self.path)?;
        *file = updated;
        Ok(())
    }
}

/// Restores the settings captured by `set_for_testing` when dropped
#[must_use = "settings are restored as soon as the guard is dropped"]
pub struct SettingsReset {
    provider: Arc<dyn ConfigProvider>,
    previous: Option<NotebookSettings>,
}

impl SettingsReset {
    /// Restore now and report failures instead of logging them
    ///
    /// # Errors
    ///
    /// Returns the provider's error when the previous settings cannot be written.
    pub fn reset(mut self) -> Result<()> {
        match self.previous.take() {
            Some(previous) => self.provider.set(previous),
            None => Ok(()),
        }
    }
}

impl Drop for SettingsReset {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            if let Err(e) = self.provider.set(previous) {
                tracing::warn!(error = %e, "failed to restore notebook settings");
            }
        }
    }
}

/// Apply a change to the settings and restore them when the guard drops
///
/// Does not invalidate the interpreter cache.
///
/// # Errors
///
/// Returns the provider's error when the change cannot be written.
pub fn set_for_testing<F>(provider: &Arc<dyn ConfigProvider>, change: F) -> Result<SettingsReset>
where
    F: FnOnce(&mut NotebookSettings),
{
    let previous = provider.get();
    let mut updated = previous.clone();
    change(&mut updated);
    provider.set(updated)?;
    Ok(SettingsReset {
        provider: Arc::clone(provider),
        previous: Some(previous),
    })
}
