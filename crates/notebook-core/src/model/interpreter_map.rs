use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::interpreter::InterpreterDefinition;

/// Ordered association of interpreter key to definition
///
/// Keeps insertion order, which encodes the intended UI order. Inserting a
/// key that is already present replaces that entry in place; a new key is
/// appended. Keys are therefore always unique.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InterpreterMap {
    entries: Vec<InterpreterDefinition>,
}

impl InterpreterMap {
    /// Create a new empty map
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a definition under its key
    ///
    /// Returns the definition it replaced, if the key was already present.
    pub fn insert(&mut self, definition: InterpreterDefinition) -> Option<InterpreterDefinition> {
        match self.position(&definition.key) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx], definition)),
            None => {
                self.entries.push(definition);
                None
            }
        }
    }

    /// Get a definition by key
    pub fn get(&self, key: &str) -> Option<&InterpreterDefinition> {
        self.entries.iter().find(|d| d.key == key)
    }

    /// Whether the key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Position of a key in iteration order
    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|d| d.key == key)
    }

    /// Keep only the definitions matching the predicate, preserving order
    pub fn retain<F>(&mut self, predicate: F)
    where
        F: FnMut(&InterpreterDefinition) -> bool,
    {
        self.entries.retain(predicate);
    }

    /// Keys in iteration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|d| d.key.as_str())
    }

    /// Definitions in iteration order
    pub fn iter(&self) -> std::slice::Iter<'_, InterpreterDefinition> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the map into its ordered definitions
    pub fn into_vec(self) -> Vec<InterpreterDefinition> {
        self.entries
    }
}

impl FromIterator<InterpreterDefinition> for InterpreterMap {
    fn from_iter<I: IntoIterator<Item = InterpreterDefinition>>(iter: I) -> Self {
        let mut map = InterpreterMap::new();
        for definition in iter {
            map.insert(definition);
        }
        map
    }
}

impl Extend<InterpreterDefinition> for InterpreterMap {
    fn extend<I: IntoIterator<Item = InterpreterDefinition>>(&mut self, iter: I) {
        for definition in iter {
            self.insert(definition);
        }
    }
}

impl IntoIterator for InterpreterMap {
    type Item = InterpreterDefinition;
    type IntoIter = std::vec::IntoIter<InterpreterDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a InterpreterMap {
    type Item = &'a InterpreterDefinition;
    type IntoIter = std::slice::Iter<'a, InterpreterDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for InterpreterMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for InterpreterMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<InterpreterDefinition>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}
