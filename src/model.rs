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

use std::sync::Arc;

use crate::baseline::BaselinePredictor;
use crate::matrix::{ScoredItem, SimilarityMatrix};
use crate::norm::VectorNormalizer;
use crate::types::{ItemId, ItemSet};

/// The result of a model build. Immutable, and therefore safe to share between threads.
#[derive(Debug)]
pub struct ItemItemModel {
    matrix: SimilarityMatrix,
    normalizer: Arc<dyn VectorNormalizer>,
    baseline: Option<Arc<dyn BaselinePredictor>>,
    items: ItemSet,
}

impl ItemItemModel {

    pub fn new(
        matrix: SimilarityMatrix,
        normalizer: Arc<dyn VectorNormalizer>,
        baseline: Option<Arc<dyn BaselinePredictor>>,
        items: ItemSet,
    ) -> Self {
        ItemItemModel { matrix, normalizer, baseline, items }
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn normalizer(&self) -> &dyn VectorNormalizer {
        &*self.normalizer
    }

    pub fn baseline(&self) -> Option<&dyn BaselinePredictor> {
        self.baseline.as_ref().map(|baseline| &**baseline)
    }

    pub fn items(&self) -> &ItemSet {
        &self.items
    }

    /// Most similar items first, `None` for items outside the universe
    pub fn neighbors(&self, item: ItemId) -> Option<&[ScoredItem]> {
        self.matrix.neighbors(item)
    }
}
