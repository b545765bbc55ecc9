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

use log::debug;

use crate::context::BuildContext;
use crate::error::BuildError;
use crate::matrix::{SimilarityMatrix, SimilarityMatrixAccumulatorFactory};
use crate::similarity::ItemSimilarity;
use crate::types::{ItemId, ItemSet};
use super::{item_vector, ModelBuildStrategy};

/// Items which share at least one user with `item`, found via the item sets of its raters.
/// Only candidates accepted by `keep` are returned, `item` itself never is.
fn candidates<F>(
    context: &BuildContext,
    item: ItemId,
    keep: F,
) -> Result<ItemSet, BuildError> where F: Fn(ItemId) -> bool {

    let vector = item_vector(context, item)?;
    let mut candidates: Vec<ItemId> = Vec::new();

    for user in vector.keys().iter() {
        if let Some(user_items) = context.user_item_set(*user)? {
            candidates.extend(
                user_items.iter().filter(|other_item| **other_item != item && keep(**other_item)));
        }
    }

    Ok(ItemSet::from_vec(candidates))
}

/// Only scores item pairs with common users, the similarity of all other pairs is zero anyway.
pub struct SparseModelBuildStrategy<'a> {
    factory: &'a dyn SimilarityMatrixAccumulatorFactory,
    similarity: &'a dyn ItemSimilarity,
}

impl<'a> SparseModelBuildStrategy<'a> {

    pub fn new(
        factory: &'a dyn SimilarityMatrixAccumulatorFactory,
        similarity: &'a dyn ItemSimilarity,
    ) -> Self {
        SparseModelBuildStrategy { factory, similarity }
    }
}

impl<'a> ModelBuildStrategy for SparseModelBuildStrategy<'a> {

    fn needs_user_item_sets(&self) -> bool {
        true
    }

    fn build_matrix(&self, context: &BuildContext) -> Result<SimilarityMatrix, BuildError> {

        let items = context.items();
        let mut accumulator = self.factory.create(items);
        let mut num_scored_pairs: u64 = 0;

        for item in items.iter() {
            let vector = item_vector(context, *item)?;

            for other_item in candidates(context, *item, |_| true)?.iter() {
                let other_vector = item_vector(context, *other_item)?;
                let similarity = self.similarity.similarity(vector, other_vector);
                accumulator.put(*item, *other_item, similarity)?;
                num_scored_pairs += 1;
            }
        }

        debug!("Scored {} ordered item pairs with common users", num_scored_pairs);

        Ok(accumulator.build())
    }
}

/// Like `SparseModelBuildStrategy`, but scores each pair only once.
pub struct SparseSymmetricModelBuildStrategy<'a> {
    factory: &'a dyn SimilarityMatrixAccumulatorFactory,
    similarity: &'a dyn ItemSimilarity,
}

impl<'a> SparseSymmetricModelBuildStrategy<'a> {

    pub fn new(
        factory: &'a dyn SimilarityMatrixAccumulatorFactory,
        similarity: &'a dyn ItemSimilarity,
    ) -> Self {
        SparseSymmetricModelBuildStrategy { factory, similarity }
    }
}

impl<'a> ModelBuildStrategy for SparseSymmetricModelBuildStrategy<'a> {

    fn needs_user_item_sets(&self) -> bool {
        true
    }

    fn build_matrix(&self, context: &BuildContext) -> Result<SimilarityMatrix, BuildError> {

        let items = context.items();
        let mut accumulator = self.factory.create(items);
        let mut num_scored_pairs: u64 = 0;

        for item in items.iter() {
            let vector = item_vector(context, *item)?;

            // the pair gets scored when we reach the larger of both items
            for other_item in candidates(context, *item, |other_item| other_item < *item)?.iter() {
                let other_vector = item_vector(context, *other_item)?;
                let similarity = self.similarity.similarity(vector, other_vector);
                accumulator.put_symmetric(*item, *other_item, similarity)?;
                num_scored_pairs += 1;
            }
        }

        debug!("Scored {} unordered item pairs with common users", num_scored_pairs);

        Ok(accumulator.build())
    }
}
