/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The 32-way trie behind [`super::IndexedList`]: fixed-capacity branch and
//! leaf nodes, path-copying descent for `nth`/`assoc`, and the `pushTail`
//! family of operations that grow the trie by exactly one leaf per full
//! tail (spec §4.8).

use crate::utils::TRIE_BRANCHING;
use archery::{SharedPointer, SharedPointerKind};

/// Either an internal fan-out node (up to [`TRIE_BRANCHING`] children) or a
/// leaf holding up to [`TRIE_BRANCHING`] values — every trie leaf reached
/// via `push_tail` is always full, since it only ever receives a
/// previously-full tail.
pub(crate) enum TrieNode<T, P: SharedPointerKind> {
    Branch(Vec<SharedPointer<TrieNode<T, P>, P>>),
    Leaf(Vec<SharedPointer<T, P>>),
}

impl<T, P: SharedPointerKind> Clone for TrieNode<T, P> {
    fn clone(&self) -> Self {
        match self {
            TrieNode::Branch(children) => TrieNode::Branch(children.clone()),
            TrieNode::Leaf(values) => TrieNode::Leaf(values.clone()),
        }
    }
}

/// Returns the leaf holding index `i`, descending from `node` which sits
/// at `level` (a multiple of 5; 0 once `node` is itself a leaf).
pub(crate) fn leaf_for<T, P: SharedPointerKind>(node: &TrieNode<T, P>, level: u32, i: usize) -> &Vec<SharedPointer<T, P>> {
    match node {
        TrieNode::Leaf(values) => values,
        TrieNode::Branch(children) => {
            let idx = (i >> level) & (TRIE_BRANCHING - 1);
            leaf_for(&children[idx], level - 5, i)
        }
    }
}

/// Path-copies the spine down to index `i`'s leaf, replacing that slot
/// with `val`. Siblings off the path are shared (retained, not cloned).
pub(crate) fn assoc_leaf<T, P: SharedPointerKind>(node: &TrieNode<T, P>, level: u32, i: usize, val: T) -> TrieNode<T, P> {
    match node {
        TrieNode::Leaf(values) => {
            let mut new_values = values.clone();
            new_values[i & (TRIE_BRANCHING - 1)] = SharedPointer::new(val);
            TrieNode::Leaf(new_values)
        }
        TrieNode::Branch(children) => {
            let idx = (i >> level) & (TRIE_BRANCHING - 1);
            let mut new_children = children.clone();
            new_children[idx] = SharedPointer::new(assoc_leaf(&children[idx], level - 5, i, val));
            TrieNode::Branch(new_children)
        }
    }
}

/// Wraps `tail_leaf` in `level / 5` freshly-built branch levels, each with
/// a single child, so it can be grafted onto an existing spine that has no
/// node yet at this position.
pub(crate) fn new_path<T, P: SharedPointerKind>(level: u32, tail_leaf: SharedPointer<TrieNode<T, P>, P>) -> SharedPointer<TrieNode<T, P>, P> {
    if level == 0 {
        tail_leaf
    } else {
        SharedPointer::new(TrieNode::Branch(vec![new_path(level - 5, tail_leaf)]))
    }
}

/// Grafts `tail_leaf` (the `leaf_index`-th leaf, 0-based, counting only
/// trie leaves) onto `node`, which sits at `level >= 5` and therefore must
/// be a `Branch`. Building a brand-new spine when the target child doesn't
/// exist yet.
pub(crate) fn push_tail<T, P: SharedPointerKind>(
    level: u32,
    node: &TrieNode<T, P>,
    tail_leaf: SharedPointer<TrieNode<T, P>, P>,
    leaf_index: usize,
) -> SharedPointer<TrieNode<T, P>, P> {
    let children = match node {
        TrieNode::Branch(children) => children,
        TrieNode::Leaf(_) => unreachable!("push_tail is only called at level >= 5, where nodes are branches"),
    };

    let subidx = (leaf_index >> (level - 5)) & (TRIE_BRANCHING - 1);
    let mut new_children = children.clone();

    if level == 5 {
        debug_assert_eq!(subidx, new_children.len(), "push_tail must append the next leaf in order");
        new_children.push(tail_leaf);
    } else if subidx < new_children.len() {
        new_children[subidx] = push_tail(level - 5, &new_children[subidx], tail_leaf, leaf_index);
    } else {
        debug_assert_eq!(subidx, new_children.len());
        new_children.push(new_path(level - 5, tail_leaf));
    }

    SharedPointer::new(TrieNode::Branch(new_children))
}
