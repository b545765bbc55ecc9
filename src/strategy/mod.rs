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

//! The four ways of populating the similarity matrix. Which one gets used only depends on the
//! capabilities of the configured item similarity:
//!
//! | sparse | symmetric | strategy                 |
//! |--------|-----------|--------------------------|
//! | yes    | yes       | SparseSymmetricOptimized |
//! | yes    | no        | SparseOptimized          |
//! | no     | yes       | Symmetric                |
//! | no     | no        | Simple                   |

mod dense;
mod sparse;

pub use self::dense::{SimpleModelBuildStrategy, SymmetricModelBuildStrategy};
pub use self::sparse::{SparseModelBuildStrategy, SparseSymmetricModelBuildStrategy};

use crate::context::BuildContext;
use crate::error::BuildError;
use crate::matrix::{SimilarityMatrix, SimilarityMatrixAccumulatorFactory};
use crate::similarity::ItemSimilarity;
use crate::types::ItemId;
use crate::vector::SparseVector;

pub trait ModelBuildStrategy {

    /// Whether the strategy reads `BuildContext::user_item_set`. Queried before transposition, the
    /// item sets are only collected if needed.
    fn needs_user_item_sets(&self) -> bool;

    fn build_matrix(&self, context: &BuildContext) -> Result<SimilarityMatrix, BuildError>;
}

#[derive(Clone,Copy,PartialEq,Eq,Debug)]
pub enum StrategyKind {
    Simple,
    Symmetric,
    SparseOptimized,
    SparseSymmetricOptimized,
}

impl StrategyKind {

    /// Sparse-optimizability is checked first, symmetry second.
    pub fn select(sparse: bool, symmetric: bool) -> Self {
        match (sparse, symmetric) {
            (true, true) => StrategyKind::SparseSymmetricOptimized,
            (true, false) => StrategyKind::SparseOptimized,
            (false, true) => StrategyKind::Symmetric,
            (false, false) => StrategyKind::Simple,
        }
    }
}

/// Closed set of build strategies, borrowing the similarity and the accumulator factory from the
/// builder for the duration of a single build.
pub enum BuildStrategy<'a> {
    Simple(SimpleModelBuildStrategy<'a>),
    Symmetric(SymmetricModelBuildStrategy<'a>),
    SparseOptimized(SparseModelBuildStrategy<'a>),
    SparseSymmetricOptimized(SparseSymmetricModelBuildStrategy<'a>),
}

impl<'a> BuildStrategy<'a> {

    pub fn select(
        factory: &'a dyn SimilarityMatrixAccumulatorFactory,
        similarity: &'a dyn ItemSimilarity,
    ) -> Self {

        match StrategyKind::select(similarity.is_sparse(), similarity.is_symmetric()) {
            StrategyKind::SparseSymmetricOptimized => BuildStrategy::SparseSymmetricOptimized(
                SparseSymmetricModelBuildStrategy::new(factory, similarity)),
            StrategyKind::SparseOptimized => BuildStrategy::SparseOptimized(
                SparseModelBuildStrategy::new(factory, similarity)),
            StrategyKind::Symmetric => BuildStrategy::Symmetric(
                SymmetricModelBuildStrategy::new(factory, similarity)),
            StrategyKind::Simple => BuildStrategy::Simple(
                SimpleModelBuildStrategy::new(factory, similarity)),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match *self {
            BuildStrategy::Simple(_) => StrategyKind::Simple,
            BuildStrategy::Symmetric(_) => StrategyKind::Symmetric,
            BuildStrategy::SparseOptimized(_) => StrategyKind::SparseOptimized,
            BuildStrategy::SparseSymmetricOptimized(_) => StrategyKind::SparseSymmetricOptimized,
        }
    }

    fn as_strategy(&self) -> &dyn ModelBuildStrategy {
        match *self {
            BuildStrategy::Simple(ref strategy) => strategy,
            BuildStrategy::Symmetric(ref strategy) => strategy,
            BuildStrategy::SparseOptimized(ref strategy) => strategy,
            BuildStrategy::SparseSymmetricOptimized(ref strategy) => strategy,
        }
    }
}

impl<'a> ModelBuildStrategy for BuildStrategy<'a> {

    fn needs_user_item_sets(&self) -> bool {
        self.as_strategy().needs_user_item_sets()
    }

    fn build_matrix(&self, context: &BuildContext) -> Result<SimilarityMatrix, BuildError> {
        self.as_strategy().build_matrix(context)
    }
}

fn item_vector(context: &BuildContext, item: ItemId) -> Result<&SparseVector, BuildError> {
    context.item_vector(item).ok_or(BuildError::ItemOutsideUniverse { item })
}
