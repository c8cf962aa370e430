/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! A persistent ordered map backed by a left-leaning red-black tree. Keys
//! are ordered by [`Ord`]; in-order traversal yields them ascending.

mod node;
mod iter;

use crate::entry::Entry;
use crate::error::{CollectionError, Result};
use archery::{ArcK, RcK, SharedPointer, SharedPointerKind};
use core::borrow::Borrow;
use core::fmt::Display;
use core::iter::FromIterator;
use node::Link;

pub use iter::{Iter, RevIter};

/// A persistent ordered map with structural sharing, backed by a
/// [left-leaning red-black tree](https://en.wikipedia.org/wiki/Left-leaning_red%E2%80%93black_tree).
///
/// `get`, `assoc`, and `dissoc` are `O(log₂ n)`.
pub struct SortedDict<K, V, P = RcK>
where
    P: SharedPointerKind,
{
    root: Link<K, V, P>,
    size: usize,
}

/// [`SortedDict`] with [`ArcK`] interior nodes, safe to publish across
/// threads.
pub type SortedDictSync<K, V> = SortedDict<K, V, ArcK>;

impl<K, V> SortedDict<K, V>
where
    K: Ord,
{
    #[must_use]
    pub fn new() -> SortedDict<K, V> {
        SortedDict { root: None, size: 0 }
    }
}

impl<K, V> Default for SortedDict<K, V>
where
    K: Ord,
{
    fn default() -> Self {
        SortedDict::new()
    }
}

impl<K, V, P> SortedDict<K, V, P>
where
    K: Ord,
    P: SharedPointerKind,
{
    #[must_use]
    pub fn new_with_ptr_kind() -> SortedDict<K, V, P> {
        SortedDict { root: None, size: 0 }
    }

    /// Builds a map from `pairs`; on a duplicate key, the last pair wins.
    #[must_use]
    pub fn from_pairs<I>(pairs: I) -> SortedDict<K, V, P>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = SortedDict::new_with_ptr_kind();

        for (k, v) in pairs {
            map.assoc_mut(k, v);
        }

        map
    }

    #[must_use]
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord,
    {
        node::get(&self.root, key)
    }

    #[must_use]
    pub fn get_or<'a, Q: ?Sized>(&'a self, key: &Q, default: &'a V) -> &'a V
    where
        K: Borrow<Q>,
        Q: Ord,
    {
        self.get(key).unwrap_or(default)
    }

    pub fn get_checked<Q: ?Sized>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord,
    {
        self.get(key).ok_or(CollectionError::KeyMissing)
    }

    #[must_use]
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord,
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

    /// The minimum-keyed entry. [`CollectionError::EmptyQuery`] if empty.
    pub fn first(&self) -> Result<(&K, &V)> {
        node::min(&self.root).map(Entry::as_pair).ok_or(CollectionError::EmptyQuery)
    }

    /// The maximum-keyed entry. [`CollectionError::EmptyQuery`] if empty.
    pub fn last(&self) -> Result<(&K, &V)> {
        node::max(&self.root).map(Entry::as_pair).ok_or(CollectionError::EmptyQuery)
    }

    #[must_use]
    pub fn assoc(&self, key: K, value: V) -> SortedDict<K, V, P> {
        let mut new_map = self.clone();
        new_map.assoc_mut(key, value);
        new_map
    }

    pub fn assoc_mut(&mut self, key: K, value: V) {
        let entry = SharedPointer::new(Entry::new(key, value));
        let (mut new_root, is_new) = node::insert(self.root.take(), entry);

        SharedPointer::make_mut(&mut new_root).color = node::Color::Black;
        self.root = Some(new_root);

        if is_new {
            self.size += 1;
        }
    }

    /// Returns a new map with `key` absent. Returns the receiver unchanged
    /// if `key` was already absent — no intermediate nodes are built on a
    /// miss (spec §9).
    #[must_use]
    pub fn dissoc<Q: ?Sized>(&self, key: &Q) -> SortedDict<K, V, P>
    where
        K: Borrow<Q>,
        Q: Ord,
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
        Q: Ord,
    {
        let (new_root, removed) = node::remove(self.root.take(), key);
        self.root = new_root;

        if removed {
            self.size -= 1;
        }

        removed
    }

    /// Folds `assoc` over `pairs`. An alias kept for mapping-like update
    /// calls (spec §6: `update(mapping)`, `merge(mapping)` are aliases for
    /// one map merging a plain iterable of pairs into itself).
    #[must_use]
    pub fn update<I>(&self, pairs: I) -> SortedDict<K, V, P>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut new_map = self.clone();

        for (k, v) in pairs {
            new_map.assoc_mut(k, v);
        }

        new_map
    }

    /// Merges `other` into `self`. On a key present in both, `other`'s
    /// value wins (spec §8: `a | b`'s shared keys take `b`'s value).
    #[must_use]
    pub fn merge(&self, other: &SortedDict<K, V, P>) -> SortedDict<K, V, P>
    where
        K: Clone,
        V: Clone,
    {
        let mut new_map = self.clone();

        for (k, v) in other.iter() {
            new_map.assoc_mut(k.clone(), v.clone());
        }

        new_map
    }

    #[must_use]
    pub fn clear(&self) -> SortedDict<K, V, P> {
        SortedDict { root: None, size: 0 }
    }

    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, P> {
        Iter::new(&self.root, self.size)
    }

    #[must_use]
    pub fn rev_iter(&self) -> RevIter<'_, K, V, P> {
        RevIter::new(&self.root, self.size)
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

    /// A new map holding the ascending entries with `start <= key < end`
    /// (spec §4.7: produced by re-inserting the collected entries).
    #[must_use]
    pub fn subseq(&self, start: &K, end: &K) -> SortedDict<K, V, P>
    where
        K: Clone,
        V: Clone,
    {
        self.subseq_view(start, end).into_iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// A new map holding the descending entries with `start <= key < end`.
    #[must_use]
    pub fn rsubseq(&self, start: &K, end: &K) -> SortedDict<K, V, P>
    where
        K: Clone,
        V: Clone,
    {
        self.rsubseq_view(start, end).into_iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Borrowing view of the ascending entries with `start <= key < end`,
    /// for callers who only need to inspect the range without allocating a
    /// new map.
    #[must_use]
    pub fn subseq_view(&self, start: &K, end: &K) -> Vec<(&K, &V)> {
        self.iter().filter(|(k, _)| *k >= start && *k < end).collect()
    }

    /// Borrowing view of the descending entries with `start <= key < end`.
    #[must_use]
    pub fn rsubseq_view(&self, start: &K, end: &K) -> Vec<(&K, &V)> {
        self.rev_iter().filter(|(k, _)| *k >= start && *k < end).collect()
    }
}

impl<'a, K, Q: ?Sized, V, P> core::ops::Index<&'a Q> for SortedDict<K, V, P>
where
    K: Ord + Borrow<Q>,
    Q: Ord,
    P: SharedPointerKind,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V, P> Clone for SortedDict<K, V, P>
where
    P: SharedPointerKind,
{
    fn clone(&self) -> SortedDict<K, V, P> {
        SortedDict { root: self.root.as_ref().map(SharedPointer::clone), size: self.size }
    }
}

impl<K: Ord, V: PartialEq, P, PO> PartialEq<SortedDict<K, V, PO>> for SortedDict<K, V, P>
where
    P: SharedPointerKind,
    PO: SharedPointerKind,
{
    fn eq(&self, other: &SortedDict<K, V, PO>) -> bool {
        self.size() == other.size() && self.iter().eq(other.iter())
    }
}

impl<K: Ord, V: Eq, P> Eq for SortedDict<K, V, P> where P: SharedPointerKind {}

impl<K, V, P> Display for SortedDict<K, V, P>
where
    K: Ord + Display,
    V: Display,
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

impl<K, V, P> core::fmt::Debug for SortedDict<K, V, P>
where
    K: Ord + core::fmt::Debug,
    V: core::fmt::Debug,
    P: SharedPointerKind,
{
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        fmt.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, P> FromIterator<(K, V)> for SortedDict<K, V, P>
where
    K: Ord,
    P: SharedPointerKind,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(into_iter: I) -> SortedDict<K, V, P> {
        SortedDict::from_pairs(into_iter)
    }
}

#[cfg(test)]
mod test;
