/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The left-leaning red-black tree engine behind [`super::SortedDict`]: recursive
//! insert/remove under a purely functional update discipline, with the three
//! fix-up operations applied in the fixed order the invariants require.

use crate::entry::Entry;
use archery::{SharedPointer, SharedPointerKind};
use tracing::trace;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Color {
    Red,
    Black,
}

pub(crate) struct TreeNode<K, V, P: SharedPointerKind> {
    pub(crate) entry: SharedPointer<Entry<K, V>, P>,
    pub(crate) left: Option<SharedPointer<TreeNode<K, V, P>, P>>,
    pub(crate) right: Option<SharedPointer<TreeNode<K, V, P>, P>>,
    pub(crate) color: Color,
}

impl<K, V, P: SharedPointerKind> Clone for TreeNode<K, V, P> {
    fn clone(&self) -> Self {
        TreeNode {
            entry: SharedPointer::clone(&self.entry),
            left: self.left.as_ref().map(SharedPointer::clone),
            right: self.right.as_ref().map(SharedPointer::clone),
            color: self.color,
        }
    }
}

pub(crate) type Link<K, V, P> = Option<SharedPointer<TreeNode<K, V, P>, P>>;

fn is_red<K, V, P: SharedPointerKind>(node: &Link<K, V, P>) -> bool {
    matches!(node, Some(n) if n.color == Color::Red)
}

/// Left-rotates `node` around its right child, which must be present (and
/// is typically red — callers check `is_red` first). Touches only the two
/// rotated nodes; both subtrees shared by the original and the rotated
/// child are retained, never copied.
fn rotate_left<K, V, P: SharedPointerKind>(mut node: TreeNode<K, V, P>) -> TreeNode<K, V, P> {
    let mut x = (*node.right.take().expect("rotate_left requires a right child")).clone();

    node.right = x.left.take();
    x.color = node.color;
    node.color = Color::Red;
    x.left = Some(SharedPointer::new(node));

    x
}

fn rotate_right<K, V, P: SharedPointerKind>(mut node: TreeNode<K, V, P>) -> TreeNode<K, V, P> {
    let mut x = (*node.left.take().expect("rotate_right requires a left child")).clone();

    node.left = x.right.take();
    x.color = node.color;
    node.color = Color::Red;
    x.right = Some(SharedPointer::new(node));

    x
}

/// Flips `node`'s color and both children's colors. Children are reached
/// via `make_mut`, so a child whose top node is still shared with another
/// tree version is copy-on-written — only its color changes, its own
/// children stay shared.
fn flip_colors<K, V, P: SharedPointerKind>(node: &mut TreeNode<K, V, P>) {
    node.color = flip(node.color);

    if let Some(left) = &mut node.left {
        SharedPointer::make_mut(left).color = flip(SharedPointer::make_mut(left).color);
    }
    if let Some(right) = &mut node.right {
        SharedPointer::make_mut(right).color = flip(SharedPointer::make_mut(right).color);
    }
}

fn flip(color: Color) -> Color {
    match color {
        Color::Red => Color::Black,
        Color::Black => Color::Red,
    }
}

fn left_is_red<K, V, P: SharedPointerKind>(node: &TreeNode<K, V, P>) -> bool {
    is_red(&node.left)
}

fn left_left_is_red<K, V, P: SharedPointerKind>(node: &TreeNode<K, V, P>) -> bool {
    match &node.left {
        Some(l) => is_red(&l.left),
        None => false,
    }
}

/// Applies the three LLRB fix-ups in the order the invariants require:
/// rotate-left on a right-leaning red link, rotate-right on two
/// consecutive left reds, flip-colors once both children are red.
fn fixup<K, V, P: SharedPointerKind>(mut node: TreeNode<K, V, P>) -> TreeNode<K, V, P> {
    if is_red(&node.right) && !left_is_red(&node) {
        trace!("llrb: rotate-left");
        node = rotate_left(node);
    }
    if left_is_red(&node) && left_left_is_red(&node) {
        trace!("llrb: rotate-right");
        node = rotate_right(node);
    }
    if is_red(&node.left) && is_red(&node.right) {
        trace!("llrb: flip-colors");
        flip_colors(&mut node);
    }

    node
}

/// Recursively inserts `entry`, returning the new subtree root and whether
/// the key was previously absent.
pub(crate) fn insert<K, V, P>(node: Link<K, V, P>, entry: SharedPointer<Entry<K, V>, P>) -> (SharedPointer<TreeNode<K, V, P>, P>, bool)
where
    K: Ord,
    P: SharedPointerKind,
{
    match node {
        None => (
            SharedPointer::new(TreeNode { entry, left: None, right: None, color: Color::Red }),
            true,
        ),
        Some(n) => {
            let mut n = (*n).clone();
            let is_new;

            if entry.key < n.entry.key {
                let (new_left, new_is_new) = insert(n.left.take(), entry);
                n.left = Some(new_left);
                is_new = new_is_new;
            } else if entry.key > n.entry.key {
                let (new_right, new_is_new) = insert(n.right.take(), entry);
                n.right = Some(new_right);
                is_new = new_is_new;
            } else {
                n.entry = entry;
                is_new = false;
            }

            (SharedPointer::new(fixup(n)), is_new)
        }
    }
}

fn move_red_left<K, V, P: SharedPointerKind>(mut node: TreeNode<K, V, P>) -> TreeNode<K, V, P> {
    flip_colors(&mut node);

    if is_red(&node.right.as_ref().and_then(|r| r.left.clone())) {
        let right = (*node.right.take().expect("checked above")).clone();
        node.right = Some(SharedPointer::new(rotate_right(right)));
        node = rotate_left(node);
        flip_colors(&mut node);
    }

    node
}

fn move_red_right<K, V, P: SharedPointerKind>(mut node: TreeNode<K, V, P>) -> TreeNode<K, V, P> {
    flip_colors(&mut node);

    if is_red(&node.left.as_ref().and_then(|l| l.left.clone())) {
        node = rotate_right(node);
        flip_colors(&mut node);
    }

    node
}

fn min_entry<K, V, P: SharedPointerKind>(node: &TreeNode<K, V, P>) -> SharedPointer<Entry<K, V>, P> {
    match &node.left {
        None => SharedPointer::clone(&node.entry),
        Some(l) => min_entry(l),
    }
}

fn remove_min<K, V, P: SharedPointerKind>(mut node: TreeNode<K, V, P>) -> Link<K, V, P> {
    if node.left.is_none() {
        return None;
    }

    if !left_is_red(&node) && !left_left_is_red(&node) {
        node = move_red_left(node);
    }

    let left = (*node.left.take().expect("checked above")).clone();
    node.left = remove_min(left);

    Some(SharedPointer::new(fixup(node)))
}

pub(crate) fn get<'a, K, V, P, Q>(node: &'a Link<K, V, P>, key: &Q) -> Option<&'a V>
where
    K: core::borrow::Borrow<Q>,
    Q: Ord + ?Sized,
    P: SharedPointerKind,
{
    match node {
        None => None,
        Some(n) => {
            let nk = n.entry.key.borrow();

            if key < nk {
                get(&n.left, key)
            } else if key > nk {
                get(&n.right, key)
            } else {
                Some(&n.entry.value)
            }
        }
    }
}

pub(crate) fn min<K, V, P: SharedPointerKind>(node: &Link<K, V, P>) -> Option<&Entry<K, V>> {
    match node {
        None => None,
        Some(n) => match &n.left {
            None => Some(&n.entry),
            Some(_) => min(&n.left),
        },
    }
}

pub(crate) fn max<K, V, P: SharedPointerKind>(node: &Link<K, V, P>) -> Option<&Entry<K, V>> {
    match node {
        None => None,
        Some(n) => match &n.right {
            None => Some(&n.entry),
            Some(_) => max(&n.right),
        },
    }
}

fn contains<K, V, P, Q>(node: &Link<K, V, P>, key: &Q) -> bool
where
    K: core::borrow::Borrow<Q>,
    Q: Ord + ?Sized,
    P: SharedPointerKind,
{
    match node {
        None => false,
        Some(n) => {
            let nk = n.entry.key.borrow();

            if key < nk {
                contains(&n.left, key)
            } else if key > nk {
                contains(&n.right, key)
            } else {
                true
            }
        }
    }
}

/// Consumes a subtree known to contain `key` (checked by the caller) and
/// returns the subtree with it removed, rebalanced. Follows the standard
/// LLRB deletion shape: lean right before descending right, push a red
/// link down via `move_red_left`/`move_red_right` whenever about to
/// descend into a 2-node, splice out the in-order successor on an exact
/// match with two children.
fn delete<K, V, P, Q>(mut h: TreeNode<K, V, P>, key: &Q) -> Link<K, V, P>
where
    K: Ord + core::borrow::Borrow<Q>,
    Q: Ord + ?Sized,
    P: SharedPointerKind,
{
    if key < h.entry.key.borrow() {
        if !left_is_red(&h) && !left_left_is_red(&h) {
            h = move_red_left(h);
        }

        let left = (*h.left.take().expect("key present implies a left subtree")).clone();
        h.left = delete(left, key);
    } else {
        if left_is_red(&h) {
            h = rotate_right(h);
        }

        if key == h.entry.key.borrow() && h.right.is_none() {
            return None;
        }

        if !is_red(&h.right) && !matches!(&h.right, Some(r) if is_red(&r.left)) {
            h = move_red_right(h);
        }

        if key == h.entry.key.borrow() {
            let right = (*h.right.take().expect("checked above")).clone();
            h.entry = min_entry(&right);
            h.right = remove_min(right);
        } else {
            let right = (*h.right.take().expect("key present implies a right subtree")).clone();
            h.right = delete(right, key);
        }
    }

    Some(SharedPointer::new(fixup(h)))
}

/// Removes `key`, returning the new subtree root and whether a key was
/// actually removed. When nothing is removed, `node` is handed back
/// completely untouched — no intermediate node is ever published (spec
/// §9's "known small leak").
pub(crate) fn remove<K, V, P, Q>(node: Link<K, V, P>, key: &Q) -> (Link<K, V, P>, bool)
where
    K: Ord + core::borrow::Borrow<Q>,
    Q: Ord + ?Sized,
    P: SharedPointerKind,
{
    if !contains(&node, key) {
        return (node, false);
    }

    let root = (*node.expect("contains() returned true")).clone();
    let mut new_root = delete(root, key);

    if let Some(r) = &mut new_root {
        SharedPointer::make_mut(r).color = Color::Black;
    }

    (new_root, true)
}
