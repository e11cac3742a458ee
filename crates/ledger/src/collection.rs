//! Insertion-ordered collection keyed by identifier.
//!
//! Lookups go through a hash index; iteration follows insertion order via a
//! monotonically increasing sequence number, so removals never reorder the
//! remaining entries.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

#[derive(Debug, Clone)]
pub(crate) struct KeyedCollection<K, V> {
    entries: BTreeMap<u64, (K, V)>,
    index: HashMap<K, u64>,
    next_seq: u64,
}

impl<K, V> Default for KeyedCollection<K, V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            index: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<K: Eq + Hash + Clone, V> KeyedCollection<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let seq = self.index.get(key)?;
        self.entries.get(seq).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let seq = self.index.get(key)?;
        self.entries.get_mut(seq).map(|(_, v)| v)
    }

    /// Append at the end. Returns `false` and leaves the collection untouched
    /// if the key is already present.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.index.insert(key.clone(), seq);
        self.entries.insert(seq, (key, value));
        true
    }

    /// Swap the value in place, keeping its position.
    pub fn replace(&mut self, key: &K, value: V) -> Option<V> {
        let slot = self.get_mut(key)?;
        Some(std::mem::replace(slot, value))
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let seq = self.index.remove(key)?;
        self.entries.remove(&seq).map(|(_, v)| v)
    }

    /// Remove every entry matching the predicate, returning them in order.
    pub fn drain_where(&mut self, mut pred: impl FnMut(&V) -> bool) -> Vec<V> {
        let doomed: Vec<u64> = self
            .entries
            .iter()
            .filter(|(_, (_, v))| pred(v))
            .map(|(seq, _)| *seq)
            .collect();

        let mut removed = Vec::with_capacity(doomed.len());
        for seq in doomed {
            if let Some((key, value)) = self.entries.remove(&seq) {
                self.index.remove(&key);
                removed.push(value);
            }
        }
        removed
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + Clone + '_ {
        self.entries.values().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + Clone + '_ {
        self.entries.values().map(|(k, v)| (k, v))
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.entries.values_mut().map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_survives_removal() {
        let mut c = KeyedCollection::new();
        assert!(c.insert("a", 1));
        assert!(c.insert("b", 2));
        assert!(c.insert("c", 3));
        assert!(!c.insert("b", 20));

        assert_eq!(c.remove(&"b"), Some(2));
        assert!(c.insert("b", 4));

        let order: Vec<_> = c.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(order, vec![("a", 1), ("c", 3), ("b", 4)]);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut c = KeyedCollection::new();
        c.insert("a", 1);
        c.insert("b", 2);
        assert_eq!(c.replace(&"a", 10), Some(1));
        assert_eq!(c.replace(&"z", 0), None);
        let values: Vec<_> = c.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![10, 2]);
    }

    #[test]
    fn test_drain_where() {
        let mut c = KeyedCollection::new();
        for (k, v) in [("a", 1), ("b", 2), ("c", 3), ("d", 4)] {
            c.insert(k, v);
        }
        let removed = c.drain_where(|v| v % 2 == 0);
        assert_eq!(removed, vec![2, 4]);
        assert_eq!(c.len(), 2);
        assert!(!c.contains(&"b"));
        assert_eq!(c.get(&"c"), Some(&3));
    }
}
