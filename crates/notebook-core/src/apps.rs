//! Application module registry
//!
//! Answers which engine plugins are active in this process. Interpreters
//! owned by a module that is not enabled are never exposed.

use std::collections::BTreeSet;
use std::sync::{PoisonError, RwLock};

/// Source of the enabled application modules
pub trait AppRegistry: Send + Sync {
    /// Names of the application modules currently enabled
    fn enabled_apps(&self) -> BTreeSet<String>;
}

/// Registry over a fixed set of installed modules
///
/// `load_apps` applies an app blacklist the way the desktop app manager does
/// at startup: blacklisted modules stay installed but are not enabled.
#[derive(Debug, Default)]
pub struct StaticAppRegistry {
    installed: RwLock<BTreeSet<String>>,
    blacklist: RwLock<BTreeSet<String>>,
}

impl StaticAppRegistry {
    /// Create a registry with the given installed modules and no blacklist
    pub fn new<I, S>(installed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            installed: RwLock::new(installed.into_iter().map(Into::into).collect()),
            blacklist: RwLock::new(BTreeSet::new()),
        }
    }

    /// Replace the installed modules
    pub fn set_installed<I, S>(&self, installed: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut guard = self
            .installed
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = installed.into_iter().map(Into::into).collect();
    }

    /// Reload the enabled modules, excluding the blacklisted ones
    pub fn load_apps<I, S>(&self, blacklist: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut guard = self
            .blacklist
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = blacklist.into_iter().map(Into::into).collect();
    }

    /// Installed modules, blacklisted or not
    pub fn installed_apps(&self) -> BTreeSet<String> {
        self.installed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AppRegistry for StaticAppRegistry {
    fn enabled_apps(&self) -> BTreeSet<String> {
        let installed = self.installed.read().unwrap_or_else(PoisonError::into_inner);
        let blacklist = self.blacklist.read().unwrap_or_else(PoisonError::into_inner);
        installed.difference(&blacklist).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enabled_is_installed_minus_blacklist() {
        let apps = StaticAppRegistry::new(["hive", "impala", "spark"]);
        apps.load_apps(["impala"]);

        let enabled = apps.enabled_apps();
        assert!(enabled.contains("hive"));
        assert!(enabled.contains("spark"));
        assert!(!enabled.contains("impala"));
        assert!(apps.installed_apps().contains("impala"));
    }

    #[test]
    fn test_set_installed_replaces_modules() {
        let apps = StaticAppRegistry::new(["hive"]);
        apps.set_installed(["hive", "spark", "oozie"]);
        assert_eq!(apps.enabled_apps().len(), 3);
    }

    #[test]
    fn test_empty_blacklist_reload() {
        let apps = StaticAppRegistry::new(["hive", "impala"]);
        apps.load_apps(["impala"]);
        apps.load_apps(Vec::<String>::new());
        assert_eq!(apps.enabled_apps().len(), 2);
    }
}
