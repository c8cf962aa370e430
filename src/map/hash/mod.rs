/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

mod arena;
mod iter;
mod node;

use crate::entry::Entry;
use crate::error::{CollectionError, Result};
use crate::utils::{hash_key, DefaultBuildHasher};
use archery::{ArcK, RcK, SharedPointer, SharedPointerKind};
use core::borrow::Borrow;
use core::fmt::Display;
use core::hash::{BuildHasher, Hash};
use core::iter::FromIterator;
use node::Node;

pub use iter::Iter;

/// A persistent map with structural sharing, backed by a
/// [hash array mapped trie](https://en.wikipedia.org/wiki/Hash_array_mapped_trie).
///
/// # Complexity
///
/// Let *n* be the number of entries. `get`, `assoc`, and `dissoc` are
/// `O(log₃₂ n)`; `size` and `clone` are `O(1)`.
///
/// # No defined iteration order
///
/// Iteration order is insertion-independent and unspecified; use
/// [`crate::map::sorted::SortedDict`] when ordered iteration matters.
pub struct HashDict<K, V, P = RcK, H = DefaultBuildHasher>
where
    P: SharedPointerKind,
{
    root: Option<SharedPointer<Node<K, V, P>, P>>,
    size: usize,
    hasher_builder: H,
}

/// [`HashDict`] with [`ArcK`] interior nodes, whose reference counts are
/// atomic — safe to publish across threads (spec §5).
pub type HashDictSync<K, V, H = DefaultBuildHasher> = HashDict<K, V, ArcK, H>;

/// Inserts `(key, value)` unconditionally, without the identity/value
/// no-op check (used by construction paths that already know the key is
/// new or that skipping the check is safe).
fn insert_root<K, V, P>(
    root: &mut Option<SharedPointer<Node<K, V, P>, P>>,
    key: K,
    value: V,
    hash: u32,
) -> bool
where
    K: Eq + Hash,
    P: SharedPointerKind,
{
    match root {
        None => {
            let entry = SharedPointer::new(Entry::new(key, value));
            *root = Some(SharedPointer::new(Node::singleton(entry, hash, 0)));
            true
        }
        Some(node) => {
            let entry = SharedPointer::new(Entry::new(key, value));
            SharedPointer::make_mut(node).assoc(entry, hash, 0)
        }
    }
}

impl<K, V> HashDict<K, V>
where
    K: Eq + Hash,
{
    #[must_use]
    pub fn new() -> HashDict<K, V> {
        HashDict::new_with_hasher(DefaultBuildHasher::default())
    }
}

impl<K, V> Default for HashDict<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        HashDict::new()
    }
}

impl<K, V, P, H> HashDict<K, V, P, H>
where
    K: Eq + Hash,
    H: BuildHasher + Clone,
    P: SharedPointerKind,
{
    #[must_use]
    pub fn new_with_hasher(hasher_builder: H) -> HashDict<K, V, P, H> {
        HashDict { root: None, size: 0, hasher_builder }
    }

    /// Builds a `HashDict` from an iterable of `(key, value)` pairs.
    /// Duplicate keys keep their last value, matching ordinary map
    /// construction. Bulk-builds bottom-up via an arena when the input has
    /// at least [`arena::BULK_THRESHOLD`] entries (spec §4.3); otherwise
    /// folds `assoc` over the pairs starting from empty.
    #[must_use]
    pub fn from_pairs<I>(pairs: I) -> HashDict<K, V, P, H>
    where
        I: IntoIterator<Item = (K, V)>,
        H: Default,
    {
        HashDict::from_pairs_with_hasher(pairs, H::default())
    }

    #[must_use]
    pub fn from_pairs_with_hasher<I>(pairs: I, hasher_builder: H) -> HashDict<K, V, P, H>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let deduped: std::collections::HashMap<K, V> = pairs.into_iter().collect();
        let size = deduped.len();

        if size == 0 {
            return HashDict { root: None, size: 0, hasher_builder };
        }

        if size >= arena::BULK_THRESHOLD {
            let triples: Vec<(u32, K, V)> = deduped
                .into_iter()
                .map(|(k, v)| {
                    let h = hash_key(&k, &hasher_builder);
                    (h, k, v)
                })
                .collect();

            let root = Some(SharedPointer::new(arena::build_bulk(triples)));

            HashDict { root, size, hasher_builder }
        } else {
            let mut root = None;

            for (k, v) in deduped {
                let h = hash_key(&k, &hasher_builder);
                insert_root(&mut root, k, v, h);
            }

            HashDict { root, size, hasher_builder }
        }
    }

    #[must_use]
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        let hash = hash_key(key, &self.hasher_builder);

        self.root.as_ref().and_then(|root| root.get(key, hash, 0))
    }

    #[must_use]
    pub fn get_or<'a, Q: ?Sized>(&'a self, key: &Q, default: &'a V) -> &'a V
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.get(key).unwrap_or(default)
    }

    /// Bracket-style lookup: [`CollectionError::KeyMissing`] if absent.
    pub fn get_checked<Q: ?Sized>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.get(key).ok_or(CollectionError::KeyMissing)
    }

    #[must_use]
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.get(key).is_some()
    }

    #[must_use]
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns a new map with `(key, value)` set, sharing everything but
    /// the path from the root to the modified slot. If `key` is already
    /// bound to a value equal to `value`, this is a genuine no-op: the
    /// very same instance is returned (spec §4.2, §8 "reference
    /// idempotence").
    #[must_use]
    pub fn assoc(&self, key: K, value: V) -> HashDict<K, V, P, H>
    where
        V: PartialEq,
    {
        if let Some(existing) = self.get(&key) {
            if *existing == value {
                return self.clone();
            }
        }

        let mut new_map = self.clone();
        new_map.assoc_mut(key, value);
        new_map
    }

    pub fn assoc_mut(&mut self, key: K, value: V)
    where
        V: PartialEq,
    {
        if let Some(existing) = self.get(&key) {
            if *existing == value {
                return;
            }
        }

        let hash = hash_key(&key, &self.hasher_builder);

        if insert_root(&mut self.root, key, value, hash) {
            self.size += 1;
        }
    }

    /// Returns a new map with `key` absent. Returns the receiver (cloned,
    /// for maximum sharing) unchanged if `key` was already absent.
    #[must_use]
    pub fn dissoc<Q: ?Sized>(&self, key: &Q) -> HashDict<K, V, P, H>
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        let mut new_map = self.clone();

        if new_map.dissoc_mut(key) {
            new_map
        } else {
            self.clone()
        }
    }

    pub fn dissoc_mut<Q: ?Sized>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        let hash = hash_key(key, &self.hasher_builder);

        let removed = match &mut self.root {
            None => false,
            Some(node) => {
                let node_mut = SharedPointer::make_mut(node);
                let removed = node_mut.remove(key, hash, 0);

                if removed && node_mut.is_empty() {
                    self.root = None;
                }

                removed
            }
        };

        if removed {
            self.size -= 1;
        }

        removed
    }

    /// Folds `assoc` over `pairs`. An alias kept for mapping-like update
    /// calls (spec §6: `update(mapping)`, `merge(mapping)` are aliases for
    /// one map merging a plain iterable of pairs into itself).
    #[must_use]
    pub fn update<I>(&self, pairs: I) -> HashDict<K, V, P, H>
    where
        I: IntoIterator<Item = (K, V)>,
        V: PartialEq,
    {
        let mut new_map = self.clone();

        for (k, v) in pairs {
            new_map.assoc_mut(k, v);
        }

        new_map
    }

    /// Structural merge of two HAMTs (spec §4.4). On a key present in
    /// both, `other`'s value wins.
    #[must_use]
    pub fn merge(&self, other: &HashDict<K, V, P, H>) -> HashDict<K, V, P, H>
    where
        K: Clone,
        V: Clone,
    {
        let mut overlap = 0usize;

        let root = match (&self.root, &other.root) {
            (None, None) => None,
            (Some(_), None) => self.root.clone(),
            (None, Some(_)) => other.root.clone(),
            (Some(l), Some(r)) => Some(SharedPointer::new(Node::merge(l, r, 0, &mut overlap))),
        };

        let size = self.size + other.size - overlap;

        HashDict { root, size, hasher_builder: self.hasher_builder.clone() }
    }

    #[must_use]
    pub fn clear(&self) -> HashDict<K, V, P, H> {
        HashDict { root: None, size: 0, hasher_builder: self.hasher_builder.clone() }
    }

    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, P> {
        Iter::new(self.root.as_deref(), self.size)
    }

    #[must_use]
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    #[must_use]
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    #[must_use]
    pub fn items_list(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    #[must_use]
    pub fn keys_list(&self) -> Vec<&K> {
        self.keys().collect()
    }

    #[must_use]
    pub fn values_list(&self) -> Vec<&V> {
        self.values().collect()
    }
}

impl<'a, K, Q: ?Sized, V, P, H> core::ops::Index<&'a Q> for HashDict<K, V, P, H>
where
    K: Eq + Hash + Borrow<Q>,
    Q: Hash + Eq,
    H: BuildHasher + Clone,
    P: SharedPointerKind,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V, P, H> Clone for HashDict<K, V, P, H>
where
    H: Clone,
    P: SharedPointerKind,
{
    fn clone(&self) -> HashDict<K, V, P, H> {
        HashDict {
            root: self.root.as_ref().map(SharedPointer::clone),
            size: self.size,
            hasher_builder: self.hasher_builder.clone(),
        }
    }
}

impl<K: Eq, V: PartialEq, P, PO, H> PartialEq<HashDict<K, V, PO, H>> for HashDict<K, V, P, H>
where
    K: Hash,
    H: BuildHasher + Clone,
    P: SharedPointerKind,
    PO: SharedPointerKind,
{
    fn eq(&self, other: &HashDict<K, V, PO, H>) -> bool {
        self.size() == other.size()
            && self.iter().all(|(k, v)| other.get(k).map_or(false, |ov| v == ov))
    }
}

impl<K: Eq, V: Eq, P, H> Eq for HashDict<K, V, P, H>
where
    K: Hash,
    H: BuildHasher + Clone,
    P: SharedPointerKind,
{
}

impl<K, V, P, H> Display for HashDict<K, V, P, H>
where
    K: Eq + Hash + Display,
    V: Display,
    H: BuildHasher + Clone,
    P: SharedPointerKind,
{
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        fmt.write_str("{")?;

        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                fmt.write_str(", ")?;
            }
            write!(fmt, "{}: {}", k, v)?;
        }

        fmt.write_str("}")
    }
}

impl<'a, K, V, P, H> IntoIterator for &'a HashDict<K, V, P, H>
where
    P: SharedPointerKind,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, P>;

    fn into_iter(self) -> Iter<'a, K, V, P> {
        Iter::new(self.root.as_deref(), self.size)
    }
}

impl<K, V, P, H> FromIterator<(K, V)> for HashDict<K, V, P, H>
where
    K: Eq + Hash,
    H: BuildHasher + Clone + Default,
    P: SharedPointerKind,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(into_iter: I) -> HashDict<K, V, P, H> {
        HashDict::from_pairs(into_iter)
    }
}

impl<K, V, P, H> core::fmt::Debug for HashDict<K, V, P, H>
where
    K: core::fmt::Debug + Eq + Hash,
    V: core::fmt::Debug,
    H: BuildHasher + Clone,
    P: SharedPointerKind,
{
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        fmt.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod test;
