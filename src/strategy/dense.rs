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
use super::{item_vector, ModelBuildStrategy};

/// Scores every ordered pair of distinct items.
pub struct SimpleModelBuildStrategy<'a> {
    factory: &'a dyn SimilarityMatrixAccumulatorFactory,
    similarity: &'a dyn ItemSimilarity,
}

impl<'a> SimpleModelBuildStrategy<'a> {

    pub fn new(
        factory: &'a dyn SimilarityMatrixAccumulatorFactory,
        similarity: &'a dyn ItemSimilarity,
    ) -> Self {
        SimpleModelBuildStrategy { factory, similarity }
    }
}

impl<'a> ModelBuildStrategy for SimpleModelBuildStrategy<'a> {

    fn needs_user_item_sets(&self) -> bool {
        false
    }

    fn build_matrix(&self, context: &BuildContext) -> Result<SimilarityMatrix, BuildError> {

        let items = context.items();
        let mut accumulator = self.factory.create(items);

        debug!("Scoring all {} ordered item pairs", items.len() * items.len().saturating_sub(1));

        for item in items.iter() {
            let vector = item_vector(context, *item)?;

            for other_item in items.iter() {
                if item != other_item {
                    let other_vector = item_vector(context, *other_item)?;
                    let similarity = self.similarity.similarity(vector, other_vector);
                    accumulator.put(*item, *other_item, similarity)?;
                }
            }
        }

        Ok(accumulator.build())
    }
}

/// Scores every unordered pair of distinct items once and stores the result in both directions.
pub struct SymmetricModelBuildStrategy<'a> {
    factory: &'a dyn SimilarityMatrixAccumulatorFactory,
    similarity: &'a dyn ItemSimilarity,
}

impl<'a> SymmetricModelBuildStrategy<'a> {

    pub fn new(
        factory: &'a dyn SimilarityMatrixAccumulatorFactory,
        similarity: &'a dyn ItemSimilarity,
    ) -> Self {
        SymmetricModelBuildStrategy { factory, similarity }
    }
}

impl<'a> ModelBuildStrategy for SymmetricModelBuildStrategy<'a> {

    fn needs_user_item_sets(&self) -> bool {
        false
    }

    fn build_matrix(&self, context: &BuildContext) -> Result<SimilarityMatrix, BuildError> {

        let items = context.items();
        let mut accumulator = self.factory.create(items);

        debug!("Scoring all {} unordered item pairs",
            items.len() * items.len().saturating_sub(1) / 2);

        for (index, item) in items.iter().enumerate() {
            let vector = item_vector(context, *item)?;

            for other_item in items.as_slice()[..index].iter() {
                let other_vector = item_vector(context, *other_item)?;
                let similarity = self.similarity.similarity(vector, other_vector);
                accumulator.put_symmetric(*item, *other_item, similarity)?;
            }
        }

        Ok(accumulator.build())
    }
}

#[cfg(test)]
mod tests {

    use super::{SimpleModelBuildStrategy, SymmetricModelBuildStrategy};
    use crate::matrix::TruncatingAccumulatorFactory;
    use crate::strategy::ModelBuildStrategy;
    use crate::strategy::testing::{context, CountingSimilarity};

    #[test]
    fn simple_scores_all_ordered_pairs() {
        let factory = TruncatingAccumulatorFactory::unbounded();
        let similarity = CountingSimilarity::new(false, false);

        let matrix = SimpleModelBuildStrategy::new(&factory, &similarity)
            .build_matrix(&context(false))
            .unwrap();

        assert_eq!(similarity.calls.get(), 4 * 3);
        // item 4 shares no users with anybody, so only the 3 x 2 pairs among 1..3 remain
        assert_eq!(matrix.nnz(), 6);
        assert!(matrix.neighbors(4).unwrap().is_empty());
        assert!(matrix.get(1, 2).unwrap() != matrix.get(2, 1).unwrap());
    }

    #[test]
    fn symmetric_scores_each_pair_once() {
        let factory = TruncatingAccumulatorFactory::unbounded();
        let similarity = CountingSimilarity::new(false, true);

        let matrix = SymmetricModelBuildStrategy::new(&factory, &similarity)
            .build_matrix(&context(false))
            .unwrap();

        assert_eq!(similarity.calls.get(), 4 * 3 / 2);
        assert_eq!(matrix.nnz(), 6);

        for (item, neighbors) in matrix.iter() {
            for neighbor in neighbors {
                assert_eq!(matrix.get(neighbor.item, *item), Some(neighbor.score));
            }
        }
    }
}
