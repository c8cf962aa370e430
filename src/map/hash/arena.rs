/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Bulk, bottom-up construction of a HAMT from a batch of entries.
//!
//! Below [`BULK_THRESHOLD`] entries, `HashDict::from_pairs` just folds
//! `assoc_mut` over the input starting from empty — the fixed per-insert
//! cost dominates and a bulk pass buys nothing. At or above the threshold,
//! entries are partitioned bucket-by-bucket into a plain owned tree (the
//! "arena": ordinary `Vec`/`Box` values that Rust already destructs
//! correctly, with no refcounting paid until the very end) and then
//! `materialize` walks it once, wrapping every node in the permanent,
//! `SharedPointer`-backed representation the rest of this crate uses.

use super::node::{BitmapNode, CollisionNode, Node, Slot};
use crate::entry::Entry;
use crate::utils::{hamt_bit, hamt_index_at_depth};
use archery::{SharedPointer, SharedPointerKind};
use core::hash::Hash;

/// Entry counts at or above which `from_pairs` builds bottom-up instead of
/// folding `assoc_mut` one key at a time.
pub(crate) const BULK_THRESHOLD: usize = 1000;

enum ArenaNode<K, V> {
    Bitmap { bitmap: u32, slots: Vec<ArenaSlot<K, V>> },
    Collision { hash: u32, entries: Vec<(K, V)> },
}

enum ArenaSlot<K, V> {
    Leaf(K, V, u32),
    Child(Box<ArenaNode<K, V>>),
}

/// Builds the arena tree for one bucket of `(hash, key, value)` triples
/// that all share the same path down to `depth`. `entries` must be
/// non-empty and must already have had duplicate keys removed.
fn build_node<K, V>(entries: Vec<(u32, K, V)>) -> ArenaNode<K, V> {
    build_node_at(entries, 0)
}

fn build_node_at<K, V>(entries: Vec<(u32, K, V)>, depth: usize) -> ArenaNode<K, V> {
    debug_assert!(!entries.is_empty());

    let first_hash = entries[0].0;

    match hamt_index_at_depth(first_hash, depth) {
        None => {
            // Hash exhausted: every entry here necessarily shares the same full hash, because
            // reaching a common depth-7 bucket requires matching on all 32 hash bits along the way.
            let pairs = entries.into_iter().map(|(_, k, v)| (k, v)).collect();

            ArenaNode::Collision { hash: first_hash, entries: pairs }
        }
        Some(_) => {
            let mut buckets: Vec<Vec<(u32, K, V)>> = (0..32).map(|_| Vec::new()).collect();

            for (hash, key, value) in entries {
                let idx = hamt_index_at_depth(hash, depth).expect("checked above");
                buckets[idx].push((hash, key, value));
            }

            let mut bitmap = 0u32;
            let mut slots = Vec::new();

            for (idx, bucket) in buckets.into_iter().enumerate() {
                if bucket.is_empty() {
                    continue;
                }

                bitmap |= hamt_bit(idx);

                if bucket.len() == 1 {
                    let (hash, key, value) = bucket.into_iter().next().expect("len == 1");
                    slots.push(ArenaSlot::Leaf(key, value, hash));
                } else {
                    slots.push(ArenaSlot::Child(Box::new(build_node_at(bucket, depth + 1))));
                }
            }

            ArenaNode::Bitmap { bitmap, slots }
        }
    }
}

/// Walks the arena tree once, allocating the permanent `SharedPointer`-backed nodes.
fn materialize<K, V, P: SharedPointerKind>(arena: ArenaNode<K, V>) -> Node<K, V, P> {
    match arena {
        ArenaNode::Collision { hash, entries } => {
            let entries =
                entries.into_iter().map(|(k, v)| SharedPointer::new(Entry::new(k, v))).collect();

            Node::Collision(CollisionNode { hash, entries: SharedPointer::new(entries) })
        }
        ArenaNode::Bitmap { bitmap, slots } => {
            let slots = slots
                .into_iter()
                .map(|slot| match slot {
                    ArenaSlot::Leaf(k, v, h) => Slot::Leaf(SharedPointer::new(Entry::new(k, v)), h),
                    ArenaSlot::Child(child) => Slot::Child(SharedPointer::new(materialize(*child))),
                })
                .collect();

            Node::Bitmap(BitmapNode { bitmap, slots })
        }
    }
}

/// Builds a HAMT root from a deduplicated batch of `(hash, key, value)`
/// triples (`triples.len() >= BULK_THRESHOLD` is the caller's
/// responsibility to check; this function works for any non-empty input).
pub(crate) fn build_bulk<K, V, P>(triples: Vec<(u32, K, V)>) -> Node<K, V, P>
where
    K: Eq + Hash,
    P: SharedPointerKind,
{
    debug_assert!(!triples.is_empty());

    materialize(build_node(triples))
}
