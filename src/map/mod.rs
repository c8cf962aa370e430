/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The three mapping families: [`hash::HashDict`] (HAMT), [`small_array::SmallArrayMap`]
//! (tiny fixed-capacity variant), and [`sorted::SortedDict`] (left-leaning red-black tree).

pub mod hash;
pub mod small_array;
pub mod sorted;
