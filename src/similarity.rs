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

use crate::vector::SparseVector;

/// Similarity between two item rating vectors.
///
/// The two capability flags decide how the similarity matrix gets built. A *sparse* similarity
/// is zero for vectors without common keys, so only item pairs that share at least one user need
/// to be scored. A *symmetric* similarity satisfies `similarity(a, b) == similarity(b, a)`, so
/// every unordered pair is scored only once.
pub trait ItemSimilarity {

    fn similarity(&self, a: &SparseVector, b: &SparseVector) -> f64;

    fn is_sparse(&self) -> bool {
        false
    }

    fn is_symmetric(&self) -> bool {
        false
    }
}

/// Cosine of the angle between two rating vectors, optionally damped by adding a constant to
/// the denominator.
#[derive(Clone,Copy,Debug,Default)]
pub struct CosineSimilarity {
    pub damping: f64,
}

impl CosineSimilarity {

    pub fn new(damping: f64) -> Self {
        CosineSimilarity { damping }
    }
}

impl ItemSimilarity for CosineSimilarity {

    fn similarity(&self, a: &SparseVector, b: &SparseVector) -> f64 {

        let dot = a.dot(b);
        if dot == 0.0 {
            return 0.0;
        }

        let denominator = a.norm() * b.norm() + self.damping;
        if denominator == 0.0 {
            0.0
        } else {
            dot / denominator
        }
    }

    fn is_sparse(&self) -> bool {
        true
    }

    fn is_symmetric(&self) -> bool {
        true
    }
}

/// Pearson correlation over the users that rated both items, shrunk towards zero by adding
/// `shrinkage` to the denominator.
#[derive(Clone,Copy,Debug,Default)]
pub struct PearsonCorrelation {
    pub shrinkage: f64,
}

impl PearsonCorrelation {

    pub fn new(shrinkage: f64) -> Self {
        PearsonCorrelation { shrinkage }
    }
}

impl ItemSimilarity for PearsonCorrelation {

    fn similarity(&self, a: &SparseVector, b: &SparseVector) -> f64 {

        let common = a.co_entries(b);
        if common.len() < 2 {
            return 0.0;
        }

        let n = common.len() as f64;
        let mean_a = common.iter().map(|&(value_a, _)| value_a).sum::<f64>() / n;
        let mean_b = common.iter().map(|&(_, value_b)| value_b).sum::<f64>() / n;

        let mut covariance = 0.0;
        let mut variance_a = 0.0;
        let mut variance_b = 0.0;

        for &(value_a, value_b) in common.iter() {
            let deviation_a = value_a - mean_a;
            let deviation_b = value_b - mean_b;
            covariance += deviation_a * deviation_b;
            variance_a += deviation_a * deviation_a;
            variance_b += deviation_b * deviation_b;
        }

        let denominator = (variance_a * variance_b).sqrt() + self.shrinkage;
        if denominator == 0.0 {
            0.0
        } else {
            covariance / denominator
        }
    }

    fn is_symmetric(&self) -> bool {
        true
    }
}
