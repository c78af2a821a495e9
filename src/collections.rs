//! Multi-value mapping.
//!
//! A key → ordered-list mapping implemented as a wrapper over `HashMap`
//! rather than by extending a container type. Used for the event-bus handler
//! registry and the per-target hint badge index.

use std::collections::HashMap;
use std::hash::Hash;

/// A map from `K` to an ordered list of `V`.
///
/// An empty list is never stored: removing the last value for a key removes
/// the key itself.
#[derive(Debug)]
pub struct ListMap<K, V> {
    inner: HashMap<K, Vec<V>>,
}

impl<K, V> Default for ListMap<K, V> {
    fn default() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V> ListMap<K, V> {
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    /// Append `value` to the list for `key`, creating the list if needed.
    pub fn add(&mut self, key: K, value: V) {
        self.inner.entry(key).or_default().push(value);
    }

    /// The values for `key`, in insertion order. Empty if the key is absent.
    pub fn get(&self, key: &K) -> &[V] {
        self.inner.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Mutable access to the list for `key`, if present.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut Vec<V>> {
        self.inner.get_mut(key)
    }

    /// Remove `key` and return its values.
    pub fn remove(&mut self, key: &K) -> Option<Vec<V>> {
        self.inner.remove(key)
    }

    /// Number of keys with at least one value.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.inner.keys()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl<K: Eq + Hash, V: PartialEq> ListMap<K, V> {
    /// Remove the first occurrence of `value` under `key`.
    ///
    /// Returns whether a value was removed. Dropping the last value for a
    /// key removes the key.
    pub fn remove_value(&mut self, key: &K, value: &V) -> bool {
        let Some(values) = self.inner.get_mut(key) else {
            return false;
        };
        let Some(idx) = values.iter().position(|v| v == value) else {
            return false;
        };
        values.remove(idx);
        if values.is_empty() {
            self.inner.remove(key);
        }
        true
    }
}
