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

use fnv::FnvHashMap;

use crate::error::BuildError;
use crate::transpose::TransposedRatings;
use crate::types::{ItemId, ItemSet, UserId};
use crate::vector::SparseVector;

/// Frozen intermediate data of a model build, handed to the build strategies as a read-only view.
#[derive(Debug)]
pub struct BuildContext {
    items: ItemSet,
    item_vectors: FnvHashMap<ItemId, SparseVector>,
    user_item_sets: Option<FnvHashMap<UserId, ItemSet>>,
}

impl BuildContext {

    /// Freezes the transposed ratings. Every accumulator is moved into its vector, so its storage
    /// is released before the next item gets frozen.
    pub fn freeze(items: ItemSet, transposed: TransposedRatings) -> Self {

        let TransposedRatings { item_ratings, user_item_sets } = transposed;

        let num_items = item_ratings.len();
        let mut item_vectors: FnvHashMap<ItemId, SparseVector> =
            FnvHashMap::with_capacity_and_hasher(num_items, Default::default());

        for (item, ratings) in item_ratings.into_iter() {
            let num_ratings = ratings.len();
            let vector = SparseVector::from(ratings);
            debug_assert_eq!(vector.len(), num_ratings);
            item_vectors.insert(item, vector);
        }

        debug_assert_eq!(item_vectors.len(), num_items);

        BuildContext { items, item_vectors, user_item_sets }
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &ItemSet {
        &self.items
    }

    pub fn item_vector(&self, item: ItemId) -> Option<&SparseVector> {
        self.item_vectors.get(&item)
    }

    pub fn has_user_item_sets(&self) -> bool {
        self.user_item_sets.is_some()
    }

    /// Items rated by `user`. Only available if the selected strategy asked for user item sets.
    pub fn user_item_set(&self, user: UserId) -> Result<Option<&ItemSet>, BuildError> {
        match self.user_item_sets {
            Some(ref sets) => Ok(sets.get(&user)),
            None => Err(BuildError::InvalidState("user item sets were not collected")),
        }
    }
}
