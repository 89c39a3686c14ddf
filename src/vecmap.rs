//! A map stored as a vector of pairs kept sorted by key.
//!
//! It encodes like any other BARE map but always in key order, which makes
//! the output deterministic without paying for a tree.
//!
//! # Example
//!
//! ```
//! use bare::prelude::*;
//! use std::collections::HashMap;
//!
//! let mut hashmap = HashMap::new();
//! hashmap.insert(2u8, "b");
//! hashmap.insert(1u8, "a");
//!
//! let vmap = VecMap::from(hashmap);
//! let keys: Vec<u8> = vmap.keys().copied().collect();
//!
//! assert_eq!(keys, vec![1, 2]);
//! ```

use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
    iter::FromIterator,
    vec::IntoIter,
};

#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug)]
/// A map implemented as a sorted [`Vec`] of pairs with unique keys.
///
/// See also: [module level documentation](`crate::vecmap`).
pub struct VecMap<K: Ord, V>(Vec<(K, V)>);

impl<K: Ord, V> Default for VecMap<K, V> {
    fn default() -> Self { VecMap(Vec::new()) }
}

impl<K: Ord, V> VecMap<K, V> {
    /// Creates an empty [`VecMap`].
    pub fn new() -> Self { VecMap(Vec::new()) }

    /// Creates an empty [`VecMap`] with room for `cap` entries.
    pub fn with_capacity(cap: usize) -> Self { VecMap(Vec::with_capacity(cap)) }

    /// Inserts a pair, returning the value previously stored under `k`.
    ///
    /// # Example
    ///
    /// ```
    /// use bare::prelude::*;
    ///
    /// let mut vmap = VecMap::new();
    ///
    /// assert_eq!(vmap.insert("b", 1), None);
    /// assert_eq!(vmap.insert("a", 2), None);
    /// assert_eq!(vmap.insert("b", 3), Some(1));
    /// assert_eq!(vmap.len(), 2);
    /// ```
    pub fn insert(&mut self, k: K, v: V) -> Option<V> {
        match self.0.binary_search_by(|(key, _)| key.cmp(&k)) {
            Ok(ix) => Some(std::mem::replace(&mut self.0[ix].1, v)),
            Err(ix) => {
                self.0.insert(ix, (k, v));
                None
            }
        }
    }

    /// Looks up the value stored under `k`.
    pub fn get(&self, k: &K) -> Option<&V> {
        self.0
            .binary_search_by(|(key, _)| key.cmp(k))
            .ok()
            .map(|ix| &self.0[ix].1)
    }

    /// Indicates whether `k` is present.
    pub fn contains_key(&self, k: &K) -> bool { self.get(k).is_some() }

    /// Returns length.
    pub fn len(&self) -> usize { self.0.len() }

    /// Indicates whether the [`VecMap`] is empty.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Iterates over the entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> { self.0.iter().map(|(k, v)| (k, v)) }

    /// Iterates over the keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> { self.0.iter().map(|(k, _)| k) }
}

impl<K: Ord, V> From<Vec<(K, V)>> for VecMap<K, V> {
    /// Sorts `v` by key. When a key repeats, the last pair wins.
    fn from(v: Vec<(K, V)>) -> Self { v.into_iter().collect() }
}

impl<K: Ord, V, S: BuildHasher> From<HashMap<K, V, S>> for VecMap<K, V> {
    fn from(hm: HashMap<K, V, S>) -> Self {
        let mut v: Vec<(K, V)> = hm.into_iter().collect();
        v.sort_unstable_by(|(k1, _), (k2, _)| k1.cmp(k2));
        VecMap(v)
    }
}

impl<K: Ord, V> From<BTreeMap<K, V>> for VecMap<K, V> {
    fn from(bt: BTreeMap<K, V>) -> Self { VecMap(bt.into_iter().collect()) }
}

impl<K: Ord, V> IntoIterator for VecMap<K, V> {
    type IntoIter = IntoIter<(K, V)>;
    type Item = (K, V);

    fn into_iter(self) -> IntoIter<(K, V)> { self.0.into_iter() }
}

impl<K: Ord, V> FromIterator<(K, V)> for VecMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> VecMap<K, V> {
        let mut m = VecMap::new();
        for (k, v) in iter {
            m.insert(k, v);
        }
        m
    }
}
