/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! `BitmapNode` and `CollisionNode`: the two interior node shapes of the HAMT, plus the
//! recursive `get`/`assoc`/`dissoc`/`createNode`/structural-merge algorithms over them.

use crate::entry::Entry;
use crate::utils::{dense_index, hamt_bit, hamt_index_at_depth};
use archery::{SharedPointer, SharedPointerKind};
use core::borrow::Borrow;
use core::hash::Hash;

/// A single occupied slot in a [`BitmapNode`]: either a leaf entry (with its
/// hash cached alongside it, since the collision node is the only place
/// that otherwise remembers a hash) or a pointer to a child node.
pub(crate) enum Slot<K, V, P: SharedPointerKind> {
    Leaf(SharedPointer<Entry<K, V>, P>, u32),
    Child(SharedPointer<Node<K, V, P>, P>),
}

impl<K, V, P: SharedPointerKind> Clone for Slot<K, V, P> {
    fn clone(&self) -> Self {
        match self {
            Slot::Leaf(e, h) => Slot::Leaf(SharedPointer::clone(e), *h),
            Slot::Child(c) => Slot::Child(SharedPointer::clone(c)),
        }
    }
}

/// A bitmap-compressed interior node: `bitmap` bit *b* set iff slot *b* is
/// occupied, `slots` the dense vector of length `popcount(bitmap)`.
pub(crate) struct BitmapNode<K, V, P: SharedPointerKind> {
    pub(crate) bitmap: u32,
    pub(crate) slots: Vec<Slot<K, V, P>>,
}

impl<K, V, P: SharedPointerKind> Clone for BitmapNode<K, V, P> {
    fn clone(&self) -> Self {
        BitmapNode { bitmap: self.bitmap, slots: self.slots.clone() }
    }
}

/// An interior node reached once a hash collision survives past the
/// maximum trie depth. All entries share `hash` and have pairwise distinct
/// keys. A collision node with a single remaining entry (after `dissoc`) is
/// not demoted back to a bare leaf — see `DESIGN.md`.
pub(crate) struct CollisionNode<K, V, P: SharedPointerKind> {
    pub(crate) hash: u32,
    pub(crate) entries: SharedPointer<Vec<SharedPointer<Entry<K, V>, P>>, P>,
}

impl<K, V, P: SharedPointerKind> Clone for CollisionNode<K, V, P> {
    fn clone(&self) -> Self {
        CollisionNode { hash: self.hash, entries: SharedPointer::clone(&self.entries) }
    }
}

pub(crate) enum Node<K, V, P: SharedPointerKind> {
    Bitmap(BitmapNode<K, V, P>),
    Collision(CollisionNode<K, V, P>),
}

impl<K, V, P: SharedPointerKind> Clone for Node<K, V, P> {
    fn clone(&self) -> Self {
        match self {
            Node::Bitmap(b) => Node::Bitmap(b.clone()),
            Node::Collision(c) => Node::Collision(c.clone()),
        }
    }
}

impl<K, V, P> Node<K, V, P>
where
    K: Eq + Hash,
    P: SharedPointerKind,
{
    #[must_use]
    pub(crate) fn get<Q: ?Sized>(&self, key: &Q, hash: u32, depth: usize) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        match self {
            Node::Bitmap(b) => {
                let idx = hamt_index_at_depth(hash, depth)
                    .expect("a BitmapNode cannot exist at a depth where the hash is exhausted");
                let bit = hamt_bit(idx);

                if b.bitmap & bit == 0 {
                    return None;
                }

                match &b.slots[dense_index(b.bitmap, bit)] {
                    Slot::Leaf(entry, h) if *h == hash && entry.key.borrow() == key => {
                        Some(&entry.value)
                    }
                    Slot::Leaf(_, _) => None,
                    Slot::Child(child) => child.get(key, hash, depth + 1),
                }
            }
            Node::Collision(c) => c
                .entries
                .iter()
                .find(|e| e.key.borrow() == key)
                .map(|e| &e.value),
        }
    }

    /// Builds the interior node holding exactly two entries, splitting on
    /// their hashes starting at `depth` (spec §4.2 `createNode`).
    pub(crate) fn create_node(
        depth: usize,
        e1: SharedPointer<Entry<K, V>, P>,
        h1: u32,
        e2: SharedPointer<Entry<K, V>, P>,
        h2: u32,
    ) -> Node<K, V, P> {
        match hamt_index_at_depth(h1, depth) {
            None => Node::Collision(CollisionNode { hash: h1, entries: SharedPointer::new(vec![e1, e2]) }),
            Some(i1) => {
                let i2 = hamt_index_at_depth(h2, depth)
                    .expect("exhaustion depends only on depth, identical for h1 and h2");

                if i1 == i2 {
                    let child = Node::create_node(depth + 1, e1, h1, e2, h2);

                    Node::Bitmap(BitmapNode {
                        bitmap: hamt_bit(i1),
                        slots: vec![Slot::Child(SharedPointer::new(child))],
                    })
                } else {
                    let slots = if i1 < i2 {
                        vec![Slot::Leaf(e1, h1), Slot::Leaf(e2, h2)]
                    } else {
                        vec![Slot::Leaf(e2, h2), Slot::Leaf(e1, h1)]
                    };

                    Node::Bitmap(BitmapNode { bitmap: hamt_bit(i1) | hamt_bit(i2), slots })
                }
            }
        }
    }

    #[must_use]
    pub(crate) fn singleton(entry: SharedPointer<Entry<K, V>, P>, hash: u32, depth: usize) -> Node<K, V, P> {
        match hamt_index_at_depth(hash, depth) {
            Some(idx) => {
                Node::Bitmap(BitmapNode { bitmap: hamt_bit(idx), slots: vec![Slot::Leaf(entry, hash)] })
            }
            None => Node::Collision(CollisionNode { hash, entries: SharedPointer::new(vec![entry]) }),
        }
    }

    /// Inserts `entry` into this node, cloning only the path that changes
    /// (via `SharedPointer::make_mut` on child slots). Returns `true` if the
    /// key was absent before this call.
    pub(crate) fn assoc(&mut self, entry: SharedPointer<Entry<K, V>, P>, hash: u32, depth: usize) -> bool {
        match self {
            Node::Bitmap(b) => {
                let idx = hamt_index_at_depth(hash, depth)
                    .expect("a BitmapNode cannot exist at a depth where the hash is exhausted");
                let bit = hamt_bit(idx);
                let dense = dense_index(b.bitmap, bit);

                if b.bitmap & bit == 0 {
                    b.slots.insert(dense, Slot::Leaf(entry, hash));
                    b.bitmap |= bit;
                    return true;
                }

                match &mut b.slots[dense] {
                    Slot::Leaf(existing, existing_hash) if *existing_hash == hash && existing.key == entry.key => {
                        *existing = entry;
                        false
                    }
                    Slot::Leaf(existing, existing_hash) => {
                        let new_node = Node::create_node(
                            depth + 1,
                            SharedPointer::clone(existing),
                            *existing_hash,
                            entry,
                            hash,
                        );

                        b.slots[dense] = Slot::Child(SharedPointer::new(new_node));
                        true
                    }
                    Slot::Child(child) => SharedPointer::make_mut(child).assoc(entry, hash, depth + 1),
                }
            }
            Node::Collision(c) => {
                debug_assert_eq!(
                    hash, c.hash,
                    "a collision node is only ever reached via a path that fixes the full hash"
                );

                let entries = SharedPointer::make_mut(&mut c.entries);

                match entries.iter().position(|e| e.key == entry.key) {
                    Some(pos) => {
                        entries[pos] = entry;
                        false
                    }
                    None => {
                        entries.push(entry);
                        true
                    }
                }
            }
        }
    }

    /// `true` once a node holds no entries at all (an empty `BitmapNode` or
    /// a `CollisionNode` whose last entry was just removed). A node in this
    /// state signals its parent to fold the corresponding slot away.
    #[must_use]
    pub(crate) fn is_empty(&self) -> bool {
        match self {
            Node::Bitmap(b) => b.slots.is_empty(),
            Node::Collision(c) => c.entries.is_empty(),
        }
    }

    /// Removes `key`, returning `true` if it was present. Callers must
    /// check `is_empty()` afterwards and fold the slot away if so.
    pub(crate) fn remove<Q: ?Sized>(&mut self, key: &Q, hash: u32, depth: usize) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        match self {
            Node::Bitmap(b) => {
                let idx = match hamt_index_at_depth(hash, depth) {
                    Some(idx) => idx,
                    None => return false,
                };
                let bit = hamt_bit(idx);

                if b.bitmap & bit == 0 {
                    return false;
                }

                let dense = dense_index(b.bitmap, bit);

                match &mut b.slots[dense] {
                    Slot::Leaf(existing, h) if *h == hash && existing.key.borrow() == key => {
                        b.slots.remove(dense);
                        b.bitmap &= !bit;
                        true
                    }
                    Slot::Leaf(_, _) => false,
                    Slot::Child(child) => {
                        let child_mut = SharedPointer::make_mut(child);
                        let removed = child_mut.remove(key, hash, depth + 1);

                        if removed && child_mut.is_empty() {
                            b.slots.remove(dense);
                            b.bitmap &= !bit;
                        }

                        removed
                    }
                }
            }
            Node::Collision(c) => {
                let entries = SharedPointer::make_mut(&mut c.entries);

                match entries.iter().position(|e| e.key.borrow() == key) {
                    Some(pos) => {
                        entries.remove(pos);
                        true
                    }
                    None => false,
                }
            }
        }
    }

    /// Appends every `(entry, hash)` reachable from this node, depth-first,
    /// to `out`. Used by structural merge's mixed-shape fallback.
    pub(crate) fn collect_entries(&self, out: &mut Vec<(SharedPointer<Entry<K, V>, P>, u32)>) {
        match self {
            Node::Bitmap(b) => {
                for slot in &b.slots {
                    match slot {
                        Slot::Leaf(e, h) => out.push((SharedPointer::clone(e), *h)),
                        Slot::Child(c) => c.collect_entries(out),
                    }
                }
            }
            Node::Collision(c) => {
                for e in c.entries.iter() {
                    out.push((SharedPointer::clone(e), c.hash));
                }
            }
        }
    }
}

impl<K, V, P> Node<K, V, P>
where
    K: Eq + Hash + Clone,
    V: Clone,
    P: SharedPointerKind,
{
    /// Merges `entry` into this (owned, already path-copied) node. If the
    /// key was already present, `entry_wins` decides whose value survives;
    /// either way `*overlap` is incremented on a genuine key collision.
    fn merge_one(&mut self, entry: SharedPointer<Entry<K, V>, P>, hash: u32, depth: usize, entry_wins: bool, overlap: &mut usize) {
        let existed = self.get(&entry.key, hash, depth).is_some();

        if existed {
            *overlap += 1;

            if entry_wins {
                self.assoc(entry, hash, depth);
            }
        } else {
            self.assoc(entry, hash, depth);
        }
    }

    /// Structural merge of two HAMT subtrees at `depth` (spec §4.4).
    /// Right-wins on key conflict; `*overlap` accumulates the exact count
    /// of keys present in both sides so the caller can derive an exact
    /// merged size without a second full traversal.
    pub(crate) fn merge(left: &Node<K, V, P>, right: &Node<K, V, P>, depth: usize, overlap: &mut usize) -> Node<K, V, P> {
        match (left, right) {
            (Node::Bitmap(lb), Node::Bitmap(rb)) => {
                let combined = lb.bitmap | rb.bitmap;
                let mut slots = Vec::with_capacity(combined.count_ones() as usize);

                for idx in 0..32usize {
                    let bit = hamt_bit(idx);

                    if combined & bit == 0 {
                        continue;
                    }

                    let in_left = lb.bitmap & bit != 0;
                    let in_right = rb.bitmap & bit != 0;

                    let slot = match (in_left, in_right) {
                        (true, false) => lb.slots[dense_index(lb.bitmap, bit)].clone(),
                        (false, true) => rb.slots[dense_index(rb.bitmap, bit)].clone(),
                        (true, true) => Node::merge_slot(
                            &lb.slots[dense_index(lb.bitmap, bit)],
                            &rb.slots[dense_index(rb.bitmap, bit)],
                            depth + 1,
                            overlap,
                        ),
                        (false, false) => unreachable!("bit set in combined implies set in left or right"),
                    };

                    slots.push(slot);
                }

                Node::Bitmap(BitmapNode { bitmap: combined, slots })
            }
            (Node::Collision(lc), Node::Collision(rc)) if lc.hash == rc.hash => {
                let mut merged: Vec<SharedPointer<Entry<K, V>, P>> = (*lc.entries).clone();

                for re in rc.entries.iter() {
                    match merged.iter().position(|e| e.key == re.key) {
                        Some(pos) => {
                            *overlap += 1;
                            merged[pos] = SharedPointer::clone(re);
                        }
                        None => merged.push(SharedPointer::clone(re)),
                    }
                }

                Node::Collision(CollisionNode { hash: lc.hash, entries: SharedPointer::new(merged) })
            }
            // Mixed shapes at the same trie position: one side happened to collide locally, the
            // other didn't. Fall back to folding the smaller side's entries into a clone of the
            // larger one, one at a time.
            (Node::Collision(lc), right_node) => {
                let mut result = right_node.clone();

                for e in lc.entries.iter() {
                    result.merge_one(SharedPointer::clone(e), lc.hash, depth, false, overlap);
                }

                result
            }
            (left_node, Node::Collision(rc)) => {
                let mut result = left_node.clone();

                for e in rc.entries.iter() {
                    result.merge_one(SharedPointer::clone(e), rc.hash, depth, true, overlap);
                }

                result
            }
        }
    }

    fn merge_slot(left: &Slot<K, V, P>, right: &Slot<K, V, P>, depth: usize, overlap: &mut usize) -> Slot<K, V, P> {
        match (left, right) {
            (Slot::Leaf(le, lh), Slot::Leaf(re, rh)) => {
                if *lh == *rh && le.key == re.key {
                    *overlap += 1;
                    Slot::Leaf(SharedPointer::clone(re), *rh)
                } else {
                    let node = Node::create_node(depth, SharedPointer::clone(le), *lh, SharedPointer::clone(re), *rh);
                    Slot::Child(SharedPointer::new(node))
                }
            }
            (Slot::Leaf(le, lh), Slot::Child(rc)) => {
                let mut result = (**rc).clone();
                result.merge_one(SharedPointer::clone(le), *lh, depth, false, overlap);
                Slot::Child(SharedPointer::new(result))
            }
            (Slot::Child(lc), Slot::Leaf(re, rh)) => {
                let mut result = (**lc).clone();
                result.merge_one(SharedPointer::clone(re), *rh, depth, true, overlap);
                Slot::Child(SharedPointer::new(result))
            }
            (Slot::Child(lc), Slot::Child(rc)) => {
                Slot::Child(SharedPointer::new(Node::merge(lc, rc, depth, overlap)))
            }
        }
    }
}
