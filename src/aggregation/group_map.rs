use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Group key -> accumulated value, iterated in first-insertion order.
///
/// Insertion order is what the ranker falls back on for ties, so it must
/// survive every operation.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMap<V> {
    entries: Vec<(String, V)>,
    positions: HashMap<String, usize>,
}

impl<V> Default for GroupMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<V> GroupMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The accumulator for `key`, created from `initial` on first sight.
    pub fn entry_or_insert_with(&mut self, key: &str, initial: impl FnOnce() -> V) -> &mut V {
        let index = match self.positions.get(key) {
            Some(&index) => index,
            None => {
                let index = self.entries.len();
                self.entries.push((key.to_string(), initial()));
                self.positions.insert(key.to_string(), index);
                index
            }
        };
        &mut self.entries[index].1
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.positions.get(key).map(|&index| &self.entries[index].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<V: Serialize> Serialize for GroupMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
