//! Static interpreter catalog
//!
//! The catalog lists every interpreter the system knows about, in the order
//! the UI should present them. Single interpreters are gated by the
//! application modules that own them. Multi-dialect families (Spark's
//! Scala/PySpark/R/batch variants, the Text/Markdown notes) occupy one slot
//! and are expanded into their variants only when all interpreters are
//! enabled.
//!
//! The family table and the module ownership table are both injectable so
//! that deployments can describe their own plugins.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::InterpreterDefinition;

/// One interpreter in the catalog plus the modules it needs
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub definition: InterpreterDefinition,
    /// Application modules that must all be enabled. Empty means the owners
    /// come from the module ownership table.
    pub requires: Vec<String>,
}

impl CatalogEntry {
    /// Entry whose owners come from the ownership table
    pub fn new(definition: InterpreterDefinition) -> Self {
        Self {
            definition,
            requires: Vec::new(),
        }
    }

    /// Entry owned by the given modules
    pub fn requiring<I, S>(definition: InterpreterDefinition, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            definition,
            requires: modules.into_iter().map(Into::into).collect(),
        }
    }

    pub fn key(&self) -> &str {
        &self.definition.key
    }
}

/// A position in the catalog
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogSlot {
    /// A single interpreter
    Interpreter(CatalogEntry),
    /// A multi-dialect family, looked up in the family table by name
    Family(String),
}

/// A multi-dialect interpreter group
#[derive(Debug, Clone, PartialEq)]
pub struct InterpreterFamily {
    pub name: String,
    /// Modules that must all be enabled for any variant to be exposed
    pub requires: Vec<String>,
    /// Variants in canonical order
    pub variants: Vec<InterpreterDefinition>,
}

/// Family expansion table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FamilyTable {
    families: Vec<InterpreterFamily>,
}

impl FamilyTable {
    pub fn new(families: Vec<InterpreterFamily>) -> Self {
        Self { families }
    }

    /// Empty table: every family slot is skipped
    pub fn empty() -> Self {
        Self::default()
    }

    /// The families shipped with the notebook app
    pub fn notebook_default() -> Self {
        Self::new(vec![
            InterpreterFamily {
                name: "spark".to_string(),
                requires: vec!["spark".to_string()],
                variants: vec![
                    InterpreterDefinition::new("spark", "Scala", "livy"),
                    InterpreterDefinition::new("pyspark", "PySpark", "livy"),
                    InterpreterDefinition::new("r", "R", "livy"),
                    InterpreterDefinition::new("jar", "Spark Submit Jar", "livy-batch"),
                    InterpreterDefinition::new("py", "Spark Submit Python", "livy-batch"),
                ],
            },
            InterpreterFamily {
                name: "notes".to_string(),
                requires: Vec::new(),
                variants: vec![
                    InterpreterDefinition::new("text", "Text", "text"),
                    InterpreterDefinition::new("markdown", "Markdown", "text"),
                ],
            },
        ])
    }

    pub fn get(&self, name: &str) -> Option<&InterpreterFamily> {
        self.families.iter().find(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InterpreterFamily> {
        self.families.iter()
    }
}

/// Interpreter key to owning application modules
///
/// Used for interpreters that the catalog does not describe itself, most
/// importantly explicitly configured ones: an explicit `pyspark` is only
/// exposed when the `spark` module is enabled.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModuleOwnership {
    owners: BTreeMap<String, Vec<String>>,
}

impl ModuleOwnership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare that `modules` own each of `keys`
    pub fn with_owner(mut self, keys: &[&str], modules: &[&str]) -> Self {
        for key in keys {
            self.owners.insert(
                (*key).to_string(),
                modules.iter().map(|m| (*m).to_string()).collect(),
            );
        }
        self
    }

    /// The ownership rules of the notebook app
    pub fn notebook_default() -> Self {
        Self::new()
            .with_owner(&["hive"], &["hive"])
            .with_owner(&["impala"], &["impala"])
            .with_owner(&["pig"], &["pig"])
            .with_owner(&["solr"], &["search"])
            .with_owner(&["spark", "pyspark", "r", "jar", "py", "sparksql"], &["spark"])
            .with_owner(
                &["java", "spark2", "mapreduce", "shell", "sqoop1", "distcp"],
                &["oozie"],
            )
    }

    /// Owners of a key; empty when the key has no known owner
    pub fn owners_of(&self, key: &str) -> &[String] {
        self.owners.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// The statically known interpreters, in UI order
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    slots: Vec<CatalogSlot>,
    families: FamilyTable,
    ownership: ModuleOwnership,
}

impl Catalog {
    /// Catalog over the given slots with the notebook family and ownership tables
    pub fn new(slots: Vec<CatalogSlot>) -> Self {
        Self {
            slots,
            families: FamilyTable::notebook_default(),
            ownership: ModuleOwnership::notebook_default(),
        }
    }

    /// Catalog of plain interpreters, owners taken from the ownership table
    pub fn from_definitions<I>(definitions: I) -> Self
    where
        I: IntoIterator<Item = InterpreterDefinition>,
    {
        Self::new(
            definitions
                .into_iter()
                .map(|d| CatalogSlot::Interpreter(CatalogEntry::new(d)))
                .collect(),
        )
    }

    /// Replace the family expansion table
    pub fn with_families(mut self, families: FamilyTable) -> Self {
        self.families = families;
        self
    }

    /// Replace the module ownership table
    pub fn with_ownership(mut self, ownership: ModuleOwnership) -> Self {
        self.ownership = ownership;
        self
    }

    /// The catalog shipped with the notebook app
    pub fn notebook_default() -> Self {
        let oozie_jobs = [
            InterpreterDefinition::new("java", "Java", "oozie"),
            InterpreterDefinition::new("spark2", "Spark", "oozie"),
            InterpreterDefinition::new("mapreduce", "MapReduce", "oozie"),
            InterpreterDefinition::new("shell", "Shell", "oozie"),
            InterpreterDefinition::new("sqoop1", "Sqoop 1", "oozie"),
            InterpreterDefinition::new("distcp", "Distcp", "oozie"),
        ];

        let mut slots = vec![
            CatalogSlot::Interpreter(CatalogEntry::requiring(
                InterpreterDefinition::new("hive", "Hive", "hiveserver2"),
                ["hive"],
            )),
            CatalogSlot::Interpreter(CatalogEntry::requiring(
                InterpreterDefinition::new("impala", "Impala", "hiveserver2"),
                ["impala"],
            )),
            CatalogSlot::Interpreter(CatalogEntry::requiring(
                InterpreterDefinition::new("pig", "Pig", "pig"),
                ["pig"],
            )),
        ];
        slots.extend(oozie_jobs.into_iter().map(|d| {
            CatalogSlot::Interpreter(CatalogEntry::requiring(d, ["oozie", "jobsub"]))
        }));
        slots.push(CatalogSlot::Family("spark".to_string()));
        slots.push(CatalogSlot::Family("notes".to_string()));

        Self::new(slots)
    }

    pub fn slots(&self) -> &[CatalogSlot] {
        &self.slots
    }

    pub fn families(&self) -> &FamilyTable {
        &self.families
    }

    pub fn ownership(&self) -> &ModuleOwnership {
        &self.ownership
    }

    /// Flatten the catalog into entries, in catalog order
    ///
    /// Family slots contribute their variants only when `expand_families`
    /// is set. Every returned entry carries its effective owners. A family
    /// slot naming an unknown family is skipped.
    pub fn expand(&self, expand_families: bool) -> Vec<CatalogEntry> {
        let mut entries = Vec::new();
        for slot in &self.slots {
            match slot {
                CatalogSlot::Interpreter(entry) => entries.push(CatalogEntry {
                    definition: entry.definition.clone(),
                    requires: self.effective_owners(entry.key(), &entry.requires),
                }),
                CatalogSlot::Family(name) if expand_families => match self.families.get(name) {
                    Some(family) => {
                        entries.extend(family.variants.iter().map(|variant| CatalogEntry {
                            definition: variant.clone(),
                            requires: self.effective_owners(&variant.key, &family.requires),
                        }));
                    }
                    None => {
                        tracing::warn!(family = %name, "catalog references unknown interpreter family");
                    }
                },
                CatalogSlot::Family(_) => {}
            }
        }
        entries
    }

    /// Application modules owning `key`
    ///
    /// A key described by the catalog (directly or as a family variant) is
    /// owned by what the catalog says; any other key falls back to the
    /// ownership table.
    pub fn owners_of(&self, key: &str) -> Vec<String> {
        for slot in &self.slots {
            match slot {
                CatalogSlot::Interpreter(entry) if entry.key() == key => {
                    return self.effective_owners(key, &entry.requires);
                }
                CatalogSlot::Family(name) => {
                    if let Some(family) = self.families.get(name) {
                        if family.variants.iter().any(|v| v.key == key) {
                            return self.effective_owners(key, &family.requires);
                        }
                    }
                }
                CatalogSlot::Interpreter(_) => {}
            }
        }
        self.ownership.owners_of(key).to_vec()
    }

    /// All module names the catalog can require, useful for "enable everything"
    pub fn known_modules(&self) -> BTreeSet<String> {
        let mut modules: BTreeSet<String> = self
            .expand(true)
            .into_iter()
            .flat_map(|e| e.requires)
            .collect();
        modules.extend(self.ownership.owners.values().flatten().cloned());
        modules
    }

    fn effective_owners(&self, key: &str, declared: &[String]) -> Vec<String> {
        if declared.is_empty() {
            self.ownership.owners_of(key).to_vec()
        } else {
            declared.to_vec()
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::notebook_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(entries: &[CatalogEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.key()).collect()
    }

    #[test]
    fn test_families_hidden_without_expansion() {
        let catalog = Catalog::notebook_default();
        let entries = catalog.expand(false);
        assert_eq!(
            keys(&entries),
            vec!["hive", "impala", "pig", "java", "spark2", "mapreduce", "shell", "sqoop1", "distcp"]
        );
    }

    #[test]
    fn test_families_expand_in_canonical_order() {
        let catalog = Catalog::notebook_default();
        let entries = catalog.expand(true);
        let tail: Vec<&str> = keys(&entries).into_iter().skip(9).collect();
        assert_eq!(
            tail,
            vec!["spark", "pyspark", "r", "jar", "py", "text", "markdown"]
        );
    }

    #[test]
    fn test_owners_prefer_catalog_declaration() {
        let catalog = Catalog::notebook_default();
        assert_eq!(catalog.owners_of("java"), vec!["oozie", "jobsub"]);
        assert_eq!(catalog.owners_of("pyspark"), vec!["spark"]);
        assert!(catalog.owners_of("markdown").is_empty());
    }

    #[test]
    fn test_owners_fall_back_to_ownership_table() {
        let catalog = Catalog::from_definitions(vec![InterpreterDefinition::new(
            "hive",
            "Hive",
            "hiveserver2",
        )]);
        assert_eq!(catalog.owners_of("hive"), vec!["hive"]);
        assert_eq!(catalog.owners_of("pyspark"), vec!["spark"]);
        assert!(catalog.owners_of("phoenix").is_empty());
    }

    #[test]
    fn test_unknown_family_is_skipped() {
        let catalog = Catalog::new(vec![CatalogSlot::Family("flink".to_string())]);
        assert!(catalog.expand(true).is_empty());
    }

    #[test]
    fn test_injected_family_table() {
        let catalog = Catalog::new(vec![CatalogSlot::Family("spark".to_string())]).with_families(
            FamilyTable::new(vec![InterpreterFamily {
                name: "spark".to_string(),
                requires: vec!["spark".to_string()],
                variants: vec![InterpreterDefinition::new("pyspark", "PySpark", "livy")],
            }]),
        );
        assert_eq!(keys(&catalog.expand(true)), vec!["pyspark"]);
    }

    #[test]
    fn test_known_modules() {
        let modules = Catalog::notebook_default().known_modules();
        for module in ["hive", "impala", "pig", "oozie", "jobsub", "spark", "search"] {
            assert!(modules.contains(module), "missing {}", module);
        }
    }
}
