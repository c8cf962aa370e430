/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Small helpers shared by every collection: the default hasher, the hash
//! splitting/bitmap arithmetic used by the HAMT, and a `mem::replace` shim.

use core::hash::{BuildHasher, Hash, Hasher};
use core::mem;
use std::collections::hash_map::RandomState;

/// The hasher used when a collection is built without an explicit one.
pub type DefaultBuildHasher = RandomState;

/// Swaps `src` into `*dest`, returning the old value. A thin wrapper around
/// [`core::mem::replace`] kept as its own function so every call site that
/// overwrites a node mid-recursion reads the same way.
#[inline]
pub(crate) fn replace<T>(dest: &mut T, src: T) -> T {
    mem::replace(dest, src)
}

/// Bits of hash consumed per trie level (5 bits → 32-way branching).
pub(crate) const HAMT_BITS_PER_LEVEL: u32 = 5;

/// Branching factor of the HAMT (`1 << HAMT_BITS_PER_LEVEL`).
pub(crate) const HAMT_DEGREE: u32 = 1 << HAMT_BITS_PER_LEVEL;

/// Slot index at `depth`, consuming 5 bits of `hash` starting from the
/// least-significant end. Returns `None` once the shift reaches or exceeds
/// the hash's own width (32 bits) — the hash is exhausted and a collision
/// node is required (spec §4.1: depth 7 examines all 35 requested bits,
/// only 32 of which exist).
#[inline]
pub(crate) fn hamt_index_at_depth(hash: u32, depth: usize) -> Option<usize> {
    let shift = depth as u32 * HAMT_BITS_PER_LEVEL;

    if (shift as usize) < 32 {
        Some(((hash >> shift) & (HAMT_DEGREE - 1)) as usize)
    } else {
        None
    }
}

/// The bit in a HAMT occupancy bitmap corresponding to slot `idx`.
#[inline]
pub(crate) fn hamt_bit(idx: usize) -> u32 {
    1u32 << idx
}

/// Translates a set `bit` into its dense slot index within `bitmap`.
#[inline]
pub(crate) fn dense_index(bitmap: u32, bit: u32) -> usize {
    (bitmap & (bit - 1)).count_ones() as usize
}

/// Bits of index consumed per trie level in [`crate::vector::IndexedList`]'s
/// trie (independent of the HAMT's own 5-bit split, though numerically the
/// same).
pub(crate) const TRIE_BITS_PER_LEVEL: u32 = 5;

/// Branching factor of [`crate::vector::IndexedList`]'s trie.
pub(crate) const TRIE_BRANCHING: usize = 1 << TRIE_BITS_PER_LEVEL;

/// Computes the 32-bit hash the HAMT consumes 5 bits at a time, via the
/// host-supplied `BuildHasher`. `Hasher::finish` is 64-bit; the low 32 bits
/// are kept (spec §6: `hash(k) -> u32`).
#[inline]
pub(crate) fn hash_key<T: ?Sized + Hash, H: BuildHasher>(value: &T, hasher_builder: &H) -> u32 {
    let mut hasher = hasher_builder.build_hasher();
    value.hash(&mut hasher);
    hasher.finish() as u32
}
