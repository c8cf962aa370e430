/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! A persistent set, a thin façade over [`HashDict`] that stores every
//! element bound to the same unit sentinel (spec §4.6).

use crate::map::hash::HashDict;
use crate::utils::DefaultBuildHasher;
use archery::{ArcK, RcK, SharedPointerKind};
use core::borrow::Borrow;
use core::fmt::{Debug, Display};
use core::hash::{BuildHasher, Hash};
use core::iter::FromIterator;

/// A persistent set with structural sharing, backed by a [`HashDict`]
/// whose values are all the unit sentinel `()`.
pub struct HashSet<T, P = RcK, H = DefaultBuildHasher>
where
    P: SharedPointerKind,
{
    inner: HashDict<T, (), P, H>,
}

/// [`HashSet`] with [`ArcK`] interior nodes, safe to publish across
/// threads.
pub type HashSetSync<T, H = DefaultBuildHasher> = HashSet<T, ArcK, H>;

impl<T> HashSet<T>
where
    T: Eq + Hash,
{
    #[must_use]
    pub fn new() -> HashSet<T> {
        HashSet { inner: HashDict::new() }
    }
}

impl<T> Default for HashSet<T>
where
    T: Eq + Hash,
{
    fn default() -> Self {
        HashSet::new()
    }
}

impl<T, P, H> HashSet<T, P, H>
where
    T: Eq + Hash,
    H: BuildHasher + Clone,
    P: SharedPointerKind,
{
    #[must_use]
    pub fn new_with_hasher(hasher_builder: H) -> HashSet<T, P, H> {
        HashSet { inner: HashDict::new_with_hasher(hasher_builder) }
    }

    #[must_use]
    pub fn from_elements<I>(elements: I) -> HashSet<T, P, H>
    where
        I: IntoIterator<Item = T>,
        H: Default,
    {
        HashSet { inner: HashDict::from_pairs(elements.into_iter().map(|e| (e, ()))) }
    }

    #[must_use]
    pub fn contains<Q: ?Sized>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.inner.contains_key(value)
    }

    #[must_use]
    #[inline]
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Adds `value`. An alias of `conj` kept for host-facing parity (spec
    /// §6).
    #[must_use]
    pub fn conj(&self, value: T) -> HashSet<T, P, H> {
        HashSet { inner: self.inner.assoc(value, ()) }
    }

    pub fn conj_mut(&mut self, value: T) {
        self.inner.assoc_mut(value, ());
    }

    /// Removes `value` if present. An alias of `disj`.
    #[must_use]
    pub fn disj<Q: ?Sized>(&self, value: &Q) -> HashSet<T, P, H>
    where
        T: Borrow<Q>,
        Q: Hash + Eq,
    {
        HashSet { inner: self.inner.dissoc(value) }
    }

    pub fn disj_mut<Q: ?Sized>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.inner.dissoc_mut(value)
    }

    /// Adds every element of `elems`. Equivalent to `union` with a bare
    /// iterable rather than another `HashSet` (spec §6: `update(iterable)`).
    #[must_use]
    pub fn update<I>(&self, elems: I) -> HashSet<T, P, H>
    where
        I: IntoIterator<Item = T>,
    {
        let mut new_set = self.clone();

        for element in elems {
            new_set.conj_mut(element);
        }

        new_set
    }

    #[must_use]
    pub fn clear(&self) -> HashSet<T, P, H> {
        HashSet { inner: self.inner.clear() }
    }

    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.inner.keys()
    }

    #[must_use]
    pub fn to_list(&self) -> Vec<&T> {
        self.iter().collect()
    }

    /// The set of elements in either `self` or `other` (spec §4.6: iterates
    /// the smaller side, `assoc`s into the larger).
    #[must_use]
    pub fn union(&self, other: &HashSet<T, P, H>) -> HashSet<T, P, H>
    where
        T: Clone,
    {
        let (smaller, larger) = if self.size() <= other.size() { (self, other) } else { (other, self) };

        let mut result = larger.clone();

        for element in smaller.iter() {
            result.conj_mut(element.clone());
        }

        result
    }

    /// The set of elements present in both `self` and `other`.
    #[must_use]
    pub fn intersection(&self, other: &HashSet<T, P, H>) -> HashSet<T, P, H>
    where
        T: Clone,
        H: Default,
    {
        let (smaller, larger) = if self.size() <= other.size() { (self, other) } else { (other, self) };

        HashSet::from_elements(smaller.iter().filter(|e| larger.contains(*e)).cloned())
    }

    /// The set of elements in `self` but not in `other`.
    #[must_use]
    pub fn difference(&self, other: &HashSet<T, P, H>) -> HashSet<T, P, H>
    where
        T: Clone,
        H: Default,
    {
        HashSet::from_elements(self.iter().filter(|e| !other.contains(*e)).cloned())
    }

    /// The set of elements in exactly one of `self`, `other`.
    #[must_use]
    pub fn symmetric_difference(&self, other: &HashSet<T, P, H>) -> HashSet<T, P, H>
    where
        T: Clone,
        H: Default,
    {
        self.difference(other).union(&other.difference(self))
    }

    #[must_use]
    pub fn is_subset(&self, other: &HashSet<T, P, H>) -> bool {
        self.iter().all(|e| other.contains(e))
    }

    #[must_use]
    pub fn is_superset(&self, other: &HashSet<T, P, H>) -> bool {
        other.is_subset(self)
    }

    #[must_use]
    pub fn is_disjoint(&self, other: &HashSet<T, P, H>) -> bool {
        self.iter().all(|e| !other.contains(e))
    }
}

impl<T, P, H> Clone for HashSet<T, P, H>
where
    H: Clone,
    P: SharedPointerKind,
{
    fn clone(&self) -> HashSet<T, P, H> {
        HashSet { inner: self.inner.clone() }
    }
}

impl<T: Eq, P, PO, H> PartialEq<HashSet<T, PO, H>> for HashSet<T, P, H>
where
    T: Hash,
    H: BuildHasher + Clone,
    P: SharedPointerKind,
    PO: SharedPointerKind,
{
    fn eq(&self, other: &HashSet<T, PO, H>) -> bool {
        self.size() == other.size() && self.iter().all(|e| other.contains(e))
    }
}

impl<T: Eq + Hash, P, H> Eq for HashSet<T, P, H>
where
    H: BuildHasher + Clone,
    P: SharedPointerKind,
{
}

impl<T, P, H> Display for HashSet<T, P, H>
where
    T: Eq + Hash + Display,
    H: BuildHasher + Clone,
    P: SharedPointerKind,
{
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        fmt.write_str("{")?;

        for (i, e) in self.iter().enumerate() {
            if i > 0 {
                fmt.write_str(", ")?;
            }
            write!(fmt, "{}", e)?;
        }

        fmt.write_str("}")
    }
}

impl<T, P, H> Debug for HashSet<T, P, H>
where
    T: Eq + Hash + Debug,
    H: BuildHasher + Clone,
    P: SharedPointerKind,
{
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        fmt.debug_set().entries(self.iter()).finish()
    }
}

impl<T, P, H> FromIterator<T> for HashSet<T, P, H>
where
    T: Eq + Hash,
    H: BuildHasher + Clone + Default,
    P: SharedPointerKind,
{
    fn from_iter<I: IntoIterator<Item = T>>(into_iter: I) -> HashSet<T, P, H> {
        HashSet::from_elements(into_iter)
    }
}

#[cfg(test)]
mod test;
