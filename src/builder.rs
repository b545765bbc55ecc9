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
use std::time::Instant;

use log::{debug, info};

use crate::baseline::BaselinePredictor;
use crate::context::BuildContext;
use crate::error::BuildError;
use crate::matrix::{SimilarityMatrix, SimilarityMatrixAccumulatorFactory};
use crate::model::ItemItemModel;
use crate::norm::{IdentityVectorNormalizer, VectorNormalizer};
use crate::similarity::ItemSimilarity;
use crate::snapshot::RatingSnapshot;
use crate::strategy::{BuildStrategy, ModelBuildStrategy};
use crate::transpose;
use crate::types::{ItemId, ItemSet, UserId};
use crate::utils;
use crate::vector::SparseVector;

#[derive(Clone,Copy,PartialEq,Eq,Debug)]
pub enum BuildPhase {
    Unconfigured,
    Building,
    Built,
}

enum BuildState {
    Unconfigured,
    Building,
    Built(BuildContext),
}

/// Builds an `ItemItemModel` from a normalized rating snapshot.
///
/// A builder produces a single model. It is not meant to be shared between threads; use one
/// builder per model build and drop it afterwards. After a successful `build()`, the intermediate
/// data (item universe, item rating vectors and, if collected, user item sets) stays readable
/// through the accessors, before that every accessor fails with `BuildError::InvalidState`.
pub struct ItemItemModelBuilder<'a> {
    similarity: Option<&'a dyn ItemSimilarity>,
    factory: Option<&'a dyn SimilarityMatrixAccumulatorFactory>,
    snapshot: Option<&'a dyn RatingSnapshot>,
    baseline: Option<Arc<dyn BaselinePredictor>>,
    normalizer: Arc<dyn VectorNormalizer>,
    state: BuildState,
}

impl<'a> Default for ItemItemModelBuilder<'a> {
    fn default() -> Self {
        ItemItemModelBuilder {
            similarity: None,
            factory: None,
            snapshot: None,
            baseline: None,
            normalizer: Arc::new(IdentityVectorNormalizer),
            state: BuildState::Unconfigured,
        }
    }
}

impl<'a> ItemItemModelBuilder<'a> {

    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_similarity(self, similarity: &'a dyn ItemSimilarity) -> Self {
        ItemItemModelBuilder { similarity: Some(similarity), ..self }
    }

    pub fn with_accumulator_factory(
        self,
        factory: &'a dyn SimilarityMatrixAccumulatorFactory
    ) -> Self {
        ItemItemModelBuilder { factory: Some(factory), ..self }
    }

    /// The snapshot must already be normalized, the builder does not apply the normalizer itself.
    pub fn with_normalized_snapshot(self, snapshot: &'a dyn RatingSnapshot) -> Self {
        ItemItemModelBuilder { snapshot: Some(snapshot), ..self }
    }

    pub fn with_baseline(self, baseline: Arc<dyn BaselinePredictor>) -> Self {
        ItemItemModelBuilder { baseline: Some(baseline), ..self }
    }

    pub fn with_normalizer(self, normalizer: Arc<dyn VectorNormalizer>) -> Self {
        ItemItemModelBuilder { normalizer, ..self }
    }

    pub fn phase(&self) -> BuildPhase {
        match self.state {
            BuildState::Unconfigured => BuildPhase::Unconfigured,
            BuildState::Building => BuildPhase::Building,
            BuildState::Built(_) => BuildPhase::Built,
        }
    }

    fn context(&self) -> Result<&BuildContext, BuildError> {
        match self.state {
            BuildState::Built(ref context) => Ok(context),
            _ => Err(BuildError::InvalidState("no model has been built yet")),
        }
    }

    pub fn item_count(&self) -> Result<usize, BuildError> {
        Ok(self.context()?.item_count())
    }

    pub fn items(&self) -> Result<&ItemSet, BuildError> {
        Ok(self.context()?.items())
    }

    pub fn item_vector(&self, item: ItemId) -> Result<Option<&SparseVector>, BuildError> {
        Ok(self.context()?.item_vector(item))
    }

    pub fn user_item_set(&self, user: UserId) -> Result<Option<&ItemSet>, BuildError> {
        self.context()?.user_item_set(user)
    }

    /// Runs the build. Fails with `BuildError::AlreadyBuilt` if this builder already produced a
    /// model. A failed build leaves the builder unconfigured, without any build-phase data.
    pub fn build(&mut self) -> Result<ItemItemModel, BuildError> {

        match self.state {
            BuildState::Built(_) => return Err(BuildError::AlreadyBuilt),
            BuildState::Building => return Err(BuildError::InvalidState("build() is not reentrant")),
            BuildState::Unconfigured => {}
        }

        let similarity = self.similarity
            .ok_or(BuildError::MissingConfiguration("item similarity"))?;
        let factory = self.factory
            .ok_or(BuildError::MissingConfiguration("similarity matrix accumulator factory"))?;
        let snapshot = self.snapshot
            .ok_or(BuildError::MissingConfiguration("normalized rating snapshot"))?;

        self.state = BuildState::Building;

        match build_context_and_matrix(similarity, factory, snapshot) {
            Ok((context, matrix)) => {
                let items = context.items().clone();
                self.state = BuildState::Built(context);

                Ok(ItemItemModel::new(matrix, self.normalizer.clone(), self.baseline.clone(), items))
            },
            Err(error) => {
                self.state = BuildState::Unconfigured;
                Err(error)
            }
        }
    }
}

fn build_context_and_matrix(
    similarity: &dyn ItemSimilarity,
    factory: &dyn SimilarityMatrixAccumulatorFactory,
    snapshot: &dyn RatingSnapshot,
) -> Result<(BuildContext, SimilarityMatrix), BuildError> {

    let strategy = BuildStrategy::select(factory, similarity);
    debug!("Using the {:?} build strategy", strategy.kind());

    let items = ItemSet::from_vec(snapshot.item_ids().to_vec());
    let collect_item_sets = strategy.needs_user_item_sets();

    debug!("Building item data");
    let transpose_start = Instant::now();

    let transposed = transpose::transpose_ratings(&items, snapshot, collect_item_sets)?;
    let context = BuildContext::freeze(items, transposed);

    info!(
        "Transposed ratings of {} users into {} item vectors in {}ms",
        snapshot.user_ids().len(),
        context.item_count(),
        utils::to_millis(transpose_start.elapsed()),
    );

    let matrix_start = Instant::now();
    let matrix = strategy.build_matrix(&context)?;

    info!(
        "Computed {} item similarities in {}ms",
        matrix.nnz(),
        utils::to_millis(matrix_start.elapsed()),
    );

    Ok((context, matrix))
}
