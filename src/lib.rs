/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Persistent (immutable) collection data structures with structural sharing.
//!
//! Every derivation (`assoc`, `dissoc`, `conj`, …) returns a *new* instance
//! and leaves the receiver untouched; the new instance shares the bulk of
//! its internal representation with the old one, so deriving a variant of a
//! large collection is cheap in both time and memory. Update cost is
//! `O(log₃₂ n)` for the trie-based collections and `O(log₂ n)` for the
//! sorted map.
//!
//! # Families
//!
//! | Type                          | Shape                              |
//! |:------------------------------|:------------------------------------|
//! | [`HashDict`]                  | hash map, HAMT                      |
//! | [`SmallArrayMap`]             | hash map, tiny (≤ 8 entries) COW vec |
//! | [`HashSet`]                   | hash set, façade over `HashDict`     |
//! | [`IndexedList`]               | indexed sequence, 32-way trie + tail |
//! | [`SortedDict`]                | ordered map, left-leaning red-black  |
//!
//! # Shared pointers
//!
//! Every collection is generic over the pointer kind `P: SharedPointerKind`
//! used for its interior nodes, via the [`archery`] crate. The default,
//! [`RcK`], is a single-threaded, non-atomic reference count. The `*Sync`
//! type aliases (e.g. [`HashDictSync`]) use [`ArcK`] instead, whose atomic
//! strong count gives the published-instance sharing guarantees described
//! for node reference counts: once an instance is handed to another thread
//! with a proper release-acquire handoff, readers need no further
//! synchronization.
//!
//! [`RcK`]: archery::RcK
//! [`ArcK`]: archery::ArcK

pub mod entry;
pub mod error;
pub mod map;
pub mod set;
pub mod utils;
pub mod vector;

pub use entry::Entry;
pub use error::{CollectionError, Result};
pub use map::hash::{HashDict, HashDictSync};
pub use map::small_array::SmallArrayMap;
pub use map::sorted::{SortedDict, SortedDictSync};
pub use set::hash_set::{HashSet, HashSetSync};
pub use vector::{IndexedList, IndexedListSync};
