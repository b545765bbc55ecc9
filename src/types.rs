/*
 * ItemKnn
 * Copyright (C) 2018 Sebastian Schelter
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */

use std::slice;

use fnv::FnvHashMap;

pub type ItemId = u64;
pub type UserId = u64;

/// Mutable user -> rating map for a single item, filled during transposition
pub type RatingAccumulator = FnvHashMap<UserId, f64>;

pub fn new_rating_accumulator(capacity: usize) -> RatingAccumulator {
    FnvHashMap::with_capacity_and_hasher(capacity, Default::default())
}

/// Sorted, duplicate-free set of ids backed by a single vector. Used for the item universe as
/// well as for the per-user item sets.
#[derive(Clone,PartialEq,Eq,Debug,Default)]
pub struct ItemSet {
    ids: Vec<ItemId>,
}

impl ItemSet {

    pub fn empty() -> Self {
        ItemSet { ids: Vec::new() }
    }

    /// Takes ownership of the buffer, sorts it and removes duplicates in place.
    pub fn from_vec(mut ids: Vec<ItemId>) -> Self {
        ids.sort_unstable();
        ids.dedup();
        ItemSet { ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.ids.binary_search(&id).is_ok()
    }

    /// Position of `id` in sorted order, used to index dense per-item structures
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.ids.binary_search(&id).ok()
    }

    pub fn iter(&self) -> slice::Iter<ItemId> {
        self.ids.iter()
    }

    pub fn as_slice(&self) -> &[ItemId] {
        &self.ids
    }
}

impl<'a> IntoIterator for &'a ItemSet {
    type Item = &'a ItemId;
    type IntoIter = slice::Iter<'a, ItemId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
