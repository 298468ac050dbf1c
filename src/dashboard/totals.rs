//! An accumulator map that remembers the order keys were first seen in.

use std::collections::HashMap;

use serde::{Serialize, Serializer, ser::SerializeMap};

/// Running totals keyed by group name, in first-seen order.
///
/// Groups only exist once something has been added to them, so a group that
/// never occurs in the input never appears in the output.
#[derive(Debug, Clone, PartialEq)]
pub struct Totals<V> {
    entries: Vec<(String, V)>,
    positions: HashMap<String, usize>,
}

impl<V> Default for Totals<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<V> Totals<V> {
    /// The accumulator for `key`, if the group has been seen.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.positions.get(key).map(|&position| &self.entries[position].1)
    }

    /// The number of groups.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no group has been seen.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The groups and their accumulators, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// The group names, in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// The accumulators, in first-seen order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }
}

impl<V: Default> Totals<V> {
    /// The accumulator for `key`, created with `V::default()` on first use.
    pub fn entry(&mut self, key: &str) -> &mut V {
        let position = match self.positions.get(key) {
            Some(&position) => position,
            None => {
                self.entries.push((key.to_owned(), V::default()));
                let position = self.entries.len() - 1;
                self.positions.insert(key.to_owned(), position);
                position
            }
        };

        &mut self.entries[position].1
    }
}

impl<V: Serialize> Serialize for Totals<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;

        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }

        map.end()
    }
}
