/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The fixed failure taxonomy shared by every collection in this crate.

use thiserror::Error;

/// A failure raised by a derivation or query.
///
/// Every variant has exactly one fixed kind; there are no sub-kinds. No
/// failure is ever recovered internally: a failed derivation produces no
/// new instance and the receiver — already unchangeable — is untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// Bracket-style lookup on a key that is not present. Not raised by the
    /// `_or`/default-taking form of `get`.
    #[error("key not found")]
    KeyMissing,

    /// `IndexedList::nth`/`assoc` with an index at or beyond `size`, or
    /// whose negative form still resolves below zero.
    #[error("index {index} out of range for a collection of length {length}")]
    IndexOutOfRange { index: i64, length: usize },

    /// `SmallArrayMap::assoc` would grow the map beyond its fixed capacity.
    #[error("small array map would exceed its capacity of {capacity} entries")]
    CapacityExceeded { capacity: usize },

    /// A host `hash`/`equal`/`less` callback failed. Rust's `Hash`, `Eq`,
    /// and `Ord` are infallible, so nothing in this crate constructs this
    /// variant; it exists so that a binding wrapping fallible host
    /// callbacks has somewhere to surface them. See `error.rs` docs.
    #[error("key comparison callback failed: {0}")]
    ComparisonFailure(String),

    /// `SortedDict::first`/`last` on an empty map, `IndexedList::pop` on an
    /// empty list.
    #[error("operation requires a non-empty collection")]
    EmptyQuery,
}

/// The `Result` alias used throughout this crate's public API.
pub type Result<T> = core::result::Result<T, CollectionError>;
