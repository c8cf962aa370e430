/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! [`IndexedList`]: a persistent indexed sequence backed by a 32-way trie
//! with a mutable-safe tail buffer, giving `O(log₃₂ n)` random access and
//! amortized `O(1)` append (spec §4.8).

mod iter;
mod node;

use crate::error::{CollectionError, Result};
use archery::{ArcK, RcK, SharedPointer, SharedPointerKind};
use core::fmt::Display;
use core::iter::FromIterator;
use node::TrieNode;

pub use iter::Iter;

/// A persistent vector with structural sharing: `nth`/`assoc` are
/// `O(log₃₂ n)`, `conj` is amortized `O(1)`.
pub struct IndexedList<T, P = RcK>
where
    P: SharedPointerKind,
{
    root: Option<SharedPointer<TrieNode<T, P>, P>>,
    tail: SharedPointer<Vec<SharedPointer<T, P>>, P>,
    size: usize,
    shift: u32,
}

/// [`IndexedList`] with [`ArcK`] interior nodes, safe to publish across
/// threads.
pub type IndexedListSync<T> = IndexedList<T, ArcK>;

impl<T> IndexedList<T> {
    #[must_use]
    pub fn new() -> IndexedList<T> {
        IndexedList { root: None, tail: SharedPointer::new(Vec::new()), size: 0, shift: 0 }
    }
}

impl<T> Default for IndexedList<T> {
    fn default() -> Self {
        IndexedList::new()
    }
}

fn resolve_index(index: i64, length: usize) -> Result<usize> {
    let resolved = if index < 0 { index + length as i64 } else { index };

    if resolved < 0 || resolved as usize >= length {
        Err(CollectionError::IndexOutOfRange { index, length })
    } else {
        Ok(resolved as usize)
    }
}

impl<T, P> IndexedList<T, P>
where
    P: SharedPointerKind,
{
    #[must_use]
    pub fn new_with_ptr_kind() -> IndexedList<T, P> {
        IndexedList { root: None, tail: SharedPointer::new(Vec::new()), size: 0, shift: 0 }
    }

    #[must_use]
    pub fn from_elements<I>(elements: I) -> IndexedList<T, P>
    where
        I: IntoIterator<Item = T>,
    {
        let mut list = IndexedList::new_with_ptr_kind();

        for e in elements {
            list.conj_mut(e);
        }

        list
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

    #[inline]
    fn tail_offset(&self) -> usize {
        if self.size < crate::utils::TRIE_BRANCHING {
            0
        } else {
            ((self.size - 1) >> 5) << 5
        }
    }

    /// Plain, non-negative-index lookup.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.size {
            return None;
        }

        let tail_offset = self.tail_offset();

        if index >= tail_offset {
            Some(&self.tail[index - tail_offset])
        } else {
            let root = self.root.as_ref().expect("tail_offset > 0 implies a non-empty trie");
            Some(&node::leaf_for(root, self.shift, index)[index & 31])
        }
    }

    /// Looks up `index`, resolving a negative index by adding `size()`
    /// first (spec §4.8).
    pub fn nth(&self, index: i64) -> Result<&T> {
        let resolved = resolve_index(index, self.size)?;
        Ok(self.get(resolved).expect("resolve_index bounds-checked this"))
    }

    #[must_use]
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    /// Returns a new list with `index` set to `val`.
    pub fn assoc(&self, index: i64, val: T) -> Result<IndexedList<T, P>>
    where
        T: Clone,
    {
        let resolved = resolve_index(index, self.size)?;
        let tail_offset = self.tail_offset();

        if resolved >= tail_offset {
            let mut new_tail = (*self.tail).clone();
            new_tail[resolved - tail_offset] = SharedPointer::new(val);

            Ok(IndexedList {
                root: self.root.as_ref().map(SharedPointer::clone),
                tail: SharedPointer::new(new_tail),
                size: self.size,
                shift: self.shift,
            })
        } else {
            let root = self.root.as_ref().expect("tail_offset > 0 implies a non-empty trie");
            let new_root = node::assoc_leaf(root, self.shift, resolved, val);

            Ok(IndexedList {
                root: Some(SharedPointer::new(new_root)),
                tail: SharedPointer::clone(&self.tail),
                size: self.size,
                shift: self.shift,
            })
        }
    }

    /// Appends `val`.
    #[must_use]
    pub fn conj(&self, val: T) -> IndexedList<T, P> {
        let mut new_list = self.clone();
        new_list.conj_mut(val);
        new_list
    }

    pub fn conj_mut(&mut self, val: T) {
        let mut tail = (*self.tail).clone();

        if tail.len() < crate::utils::TRIE_BRANCHING {
            tail.push(SharedPointer::new(val));
            self.tail = SharedPointer::new(tail);
            self.size += 1;
            return;
        }

        let tail_leaf = SharedPointer::new(TrieNode::Leaf(tail));

        match &self.root {
            None => {
                self.root = Some(tail_leaf);
                self.shift = 0;
            }
            Some(root) => {
                if self.shift == 0 {
                    self.root = Some(SharedPointer::new(TrieNode::Branch(vec![
                        SharedPointer::clone(root),
                        node::new_path(0, tail_leaf),
                    ])));
                    self.shift = 5;
                } else {
                    let leaves_before = (self.size - crate::utils::TRIE_BRANCHING) / crate::utils::TRIE_BRANCHING;
                    let capacity_leaves = crate::utils::TRIE_BRANCHING.pow(self.shift / 5);

                    if leaves_before < capacity_leaves {
                        self.root = Some(node::push_tail(self.shift, root, tail_leaf, leaves_before));
                    } else {
                        self.root = Some(SharedPointer::new(TrieNode::Branch(vec![
                            SharedPointer::clone(root),
                            node::new_path(self.shift, tail_leaf),
                        ])));
                        self.shift += 5;
                    }
                }
            }
        }

        self.tail = SharedPointer::new(vec![SharedPointer::new(val)]);
        self.size += 1;
    }

    /// Removes the last element. [`CollectionError::EmptyQuery`] if empty.
    ///
    /// Rebuilds by iteration rather than trimming the trie in place — a
    /// simplification the design explicitly allows (spec §4.8): the only
    /// contract is that the result holds the correct, one-shorter
    /// sequence.
    pub fn pop(&self) -> Result<IndexedList<T, P>>
    where
        T: Clone,
    {
        if self.is_empty() {
            return Err(CollectionError::EmptyQuery);
        }

        let mut new_list = IndexedList::new_with_ptr_kind();

        for v in self.iter().take(self.size - 1) {
            new_list.conj_mut(v.clone());
        }

        Ok(new_list)
    }

    #[must_use]
    pub fn clear(&self) -> IndexedList<T, P> {
        IndexedList::new_with_ptr_kind()
    }

    #[must_use]
    pub fn iter(&self) -> Iter<'_, T, P> {
        Iter::new(self.root.as_deref(), &self.tail, self.size)
    }

    #[must_use]
    pub fn to_list(&self) -> Vec<&T> {
        self.iter().collect()
    }

    /// A new list holding elements `[start, stop)`, negative indices
    /// resolved by adding `size()` first (spec §4.8). Out-of-range bounds
    /// are clamped rather than rejected, matching Python-style slicing.
    #[must_use]
    pub fn slice(&self, start: i64, stop: i64) -> IndexedList<T, P>
    where
        T: Clone,
    {
        let start = resolve_slice_bound(start, self.size);
        let stop = resolve_slice_bound(stop, self.size);

        let mut result = IndexedList::new_with_ptr_kind();

        if start < stop {
            for v in self.iter().skip(start).take(stop - start) {
                result.conj_mut(v.clone());
            }
        }

        result
    }
}

fn resolve_slice_bound(index: i64, length: usize) -> usize {
    let resolved = if index < 0 { index + length as i64 } else { index };
    resolved.clamp(0, length as i64) as usize
}

impl<T, P> core::ops::Index<usize> for IndexedList<T, P>
where
    P: SharedPointerKind,
{
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.get(index).expect("index out of bounds")
    }
}

impl<T, P> Clone for IndexedList<T, P>
where
    P: SharedPointerKind,
{
    fn clone(&self) -> IndexedList<T, P> {
        IndexedList {
            root: self.root.as_ref().map(SharedPointer::clone),
            tail: SharedPointer::clone(&self.tail),
            size: self.size,
            shift: self.shift,
        }
    }
}

impl<T: PartialEq, P, PO> PartialEq<IndexedList<T, PO>> for IndexedList<T, P>
where
    P: SharedPointerKind,
    PO: SharedPointerKind,
{
    fn eq(&self, other: &IndexedList<T, PO>) -> bool {
        self.size() == other.size() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, P> Eq for IndexedList<T, P> where P: SharedPointerKind {}

impl<T, P> Display for IndexedList<T, P>
where
    T: Display,
    P: SharedPointerKind,
{
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        fmt.write_str("[")?;

        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                fmt.write_str(", ")?;
            }
            write!(fmt, "{}", v)?;
        }

        fmt.write_str("]")
    }
}

impl<T, P> core::fmt::Debug for IndexedList<T, P>
where
    T: core::fmt::Debug,
    P: SharedPointerKind,
{
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        fmt.debug_list().entries(self.iter()).finish()
    }
}

impl<T, P> FromIterator<T> for IndexedList<T, P>
where
    P: SharedPointerKind,
{
    fn from_iter<I: IntoIterator<Item = T>>(into_iter: I) -> IndexedList<T, P> {
        IndexedList::from_elements(into_iter)
    }
}

#[cfg(test)]
mod test;
