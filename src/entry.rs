/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The `(K, V)` pair shared across nodes of the map families.

use core::fmt::Display;

/// A single key/value pair, held behind a [`SharedPointer`](archery::SharedPointer) so that
/// several nodes — across several tree versions — can point at the very same entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    #[must_use]
    pub fn new(key: K, value: V) -> Entry<K, V> {
        Entry { key, value }
    }

    #[must_use]
    pub fn as_pair(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }
}

impl<K: Display, V: Display> Display for Entry<K, V> {
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(fmt, "{}: {}", self.key, self.value)
    }
}
