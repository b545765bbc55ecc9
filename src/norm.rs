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

use std::fmt::Debug;

use crate::vector::SparseVector;

/// Normalizes a user rating vector relative to a reference vector (usually the same user's
/// ratings) and undoes that normalization again.
pub trait VectorNormalizer: Debug + Send + Sync {

    fn normalize(&self, reference: &SparseVector, target: &SparseVector) -> SparseVector;

    fn denormalize(&self, reference: &SparseVector, target: &SparseVector) -> SparseVector;
}

#[derive(Clone,Copy,Debug,Default)]
pub struct IdentityVectorNormalizer;

impl VectorNormalizer for IdentityVectorNormalizer {

    fn normalize(&self, _reference: &SparseVector, target: &SparseVector) -> SparseVector {
        target.clone()
    }

    fn denormalize(&self, _reference: &SparseVector, target: &SparseVector) -> SparseVector {
        target.clone()
    }
}

/// Subtracts the mean of the reference vector from every entry
#[derive(Clone,Copy,Debug,Default)]
pub struct MeanCenteringVectorNormalizer;

impl MeanCenteringVectorNormalizer {

    fn shift(offset: f64, target: &SparseVector) -> SparseVector {
        let values = target.values().iter().map(|value| value + offset).collect();
        target.with_values(values)
    }
}

impl VectorNormalizer for MeanCenteringVectorNormalizer {

    fn normalize(&self, reference: &SparseVector, target: &SparseVector) -> SparseVector {
        MeanCenteringVectorNormalizer::shift(-reference.mean(), target)
    }

    fn denormalize(&self, reference: &SparseVector, target: &SparseVector) -> SparseVector {
        MeanCenteringVectorNormalizer::shift(reference.mean(), target)
    }
}
