/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! A persistent map specialized for very small entry counts: a flat,
//! copy-on-write vector of entries scanned linearly. Same external
//! contract as [`crate::map::hash::HashDict`], traded for lower constant
//! factors below [`CAPACITY`] entries — and a hard capacity instead of
//! HashDict's unbounded growth.

use crate::entry::Entry;
use crate::error::{CollectionError, Result};
use archery::{ArcK, RcK, SharedPointer, SharedPointerKind};
use core::borrow::Borrow;
use core::fmt::Display;
use core::iter::FromIterator;

/// The hard upper bound on entry count. `assoc` past this raises
/// [`CollectionError::CapacityExceeded`] rather than silently promoting to
/// a `HashDict` — that promotion, if wanted, is the embedder's call.
pub const CAPACITY: usize = 8;

/// A persistent mapping with at most [`CAPACITY`] entries, backed by a
/// single copy-on-write vector (spec §4.5).
pub struct SmallArrayMap<K, V, P = RcK>
where
    P: SharedPointerKind,
{
    entries: SharedPointer<Vec<SharedPointer<Entry<K, V>, P>>, P>,
}

/// [`SmallArrayMap`] with [`ArcK`] interior storage, safe to publish
/// across threads.
pub type SmallArrayMapSync<K, V> = SmallArrayMap<K, V, ArcK>;

impl<K, V, P> SmallArrayMap<K, V, P>
where
    P: SharedPointerKind,
{
    #[must_use]
    pub fn new() -> SmallArrayMap<K, V, P> {
        SmallArrayMap { entries: SharedPointer::new(Vec::new()) }
    }

    #[must_use]
    #[inline]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V, P> Default for SmallArrayMap<K, V, P>
where
    P: SharedPointerKind,
{
    fn default() -> Self {
        SmallArrayMap::new()
    }
}

impl<K: Eq, V, P> SmallArrayMap<K, V, P>
where
    P: SharedPointerKind,
{
    /// Builds a map from `pairs`. Fails if more than [`CAPACITY`] distinct
    /// keys are given.
    pub fn from_pairs<I>(pairs: I) -> Result<SmallArrayMap<K, V, P>>
    where
        I: IntoIterator<Item = (K, V)>,
        V: PartialEq,
    {
        let mut map = SmallArrayMap::new();

        for (k, v) in pairs {
            map = map.assoc(k, v)?;
        }

        Ok(map)
    }

    #[must_use]
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq,
    {
        self.entries.iter().find(|e| e.key.borrow() == key).map(|e| &e.value)
    }

    pub fn get_checked<Q: ?Sized>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Eq,
    {
        self.get(key).ok_or(CollectionError::KeyMissing)
    }

    #[must_use]
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq,
    {
        self.get(key).is_some()
    }

    fn position<Q: ?Sized>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq,
    {
        self.entries.iter().position(|e| e.key.borrow() == key)
    }

    /// Returns a new map with `(key, value)` set. If `key` is already
    /// bound to an equal `value`, returns the receiver unchanged (spec §4.5
    /// identity fast path). Fails with [`CollectionError::CapacityExceeded`]
    /// if `key` is new and the map is already at [`CAPACITY`].
    pub fn assoc(&self, key: K, value: V) -> Result<SmallArrayMap<K, V, P>>
    where
        V: PartialEq,
    {
        if let Some(existing) = self.get(&key) {
            if *existing == value {
                return Ok(self.clone());
            }
        }

        match self.position(&key) {
            Some(idx) => {
                let mut entries = (*self.entries).clone();
                entries[idx] = SharedPointer::new(Entry::new(key, value));
                Ok(SmallArrayMap { entries: SharedPointer::new(entries) })
            }
            None => {
                if self.entries.len() >= CAPACITY {
                    return Err(CollectionError::CapacityExceeded { capacity: CAPACITY });
                }

                let mut entries = (*self.entries).clone();
                entries.push(SharedPointer::new(Entry::new(key, value)));
                Ok(SmallArrayMap { entries: SharedPointer::new(entries) })
            }
        }
    }

    /// Returns a new map with `key` absent. Returns the receiver unchanged
    /// if `key` was already absent.
    #[must_use]
    pub fn dissoc<Q: ?Sized>(&self, key: &Q) -> SmallArrayMap<K, V, P>
    where
        K: Borrow<Q>,
        Q: Eq,
    {
        match self.position(key) {
            None => self.clone(),
            Some(idx) => {
                let mut entries = (*self.entries).clone();
                entries.remove(idx);
                SmallArrayMap { entries: SharedPointer::new(entries) }
            }
        }
    }

    #[must_use]
    pub fn clear(&self) -> SmallArrayMap<K, V, P> {
        SmallArrayMap::new()
    }

    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.entries.iter().map(|e| (&e.key, &e.value))
    }

    #[must_use]
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    #[must_use]
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }
}

impl<'a, K, Q: ?Sized, V, P> core::ops::Index<&'a Q> for SmallArrayMap<K, V, P>
where
    K: Eq + Borrow<Q>,
    Q: Eq,
    P: SharedPointerKind,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V, P> Clone for SmallArrayMap<K, V, P>
where
    P: SharedPointerKind,
{
    fn clone(&self) -> SmallArrayMap<K, V, P> {
        SmallArrayMap { entries: SharedPointer::clone(&self.entries) }
    }
}

impl<K: Eq, V: PartialEq, P, PO> PartialEq<SmallArrayMap<K, V, PO>> for SmallArrayMap<K, V, P>
where
    P: SharedPointerKind,
    PO: SharedPointerKind,
{
    fn eq(&self, other: &SmallArrayMap<K, V, PO>) -> bool {
        self.size() == other.size()
            && self.iter().all(|(k, v)| other.get(k).map_or(false, |ov| v == ov))
    }
}

impl<K: Eq, V: Eq, P> Eq for SmallArrayMap<K, V, P> where P: SharedPointerKind {}

impl<K, V, P> Display for SmallArrayMap<K, V, P>
where
    K: Display + Eq,
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

impl<K, V, P> core::fmt::Debug for SmallArrayMap<K, V, P>
where
    K: core::fmt::Debug + Eq,
    V: core::fmt::Debug,
    P: SharedPointerKind,
{
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        fmt.debug_map().entries(self.iter()).finish()
    }
}

/// Builds from an iterator, panicking past [`CAPACITY`] distinct keys.
/// Use [`SmallArrayMap::from_pairs`] directly when capacity overflow must
/// be handled rather than treated as a programmer error.
impl<K: Eq, V, P> FromIterator<(K, V)> for SmallArrayMap<K, V, P>
where
    P: SharedPointerKind,
    V: PartialEq,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(into_iter: I) -> SmallArrayMap<K, V, P> {
        SmallArrayMap::from_pairs(into_iter).expect("too many distinct keys for a SmallArrayMap")
    }
}

#[cfg(test)]
mod test;
