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

use std::cmp::Ordering;
use std::iter::Zip;
use std::slice;

use crate::types::RatingAccumulator;

/// Immutable sparse vector with keys in ascending order and values in parallel. Keys are user ids
/// for item rating vectors and item ids for user rating vectors.
#[derive(Clone,PartialEq,Debug,Default)]
pub struct SparseVector {
    keys: Vec<u64>,
    values: Vec<f64>,
}

impl SparseVector {

    pub fn empty() -> Self {
        SparseVector { keys: Vec::new(), values: Vec::new() }
    }

    /// Builds a vector from arbitrary (key, value) pairs, the last value wins for repeated keys.
    pub fn from_pairs<I>(pairs: I) -> Self where I: IntoIterator<Item=(u64, f64)> {
        let mut entries: Vec<(u64, f64)> = pairs.into_iter().collect();
        // stable sort keeps input order among equal keys, so the last occurrence is kept below
        entries.sort_by_key(|&(key, _)| key);

        let mut keys: Vec<u64> = Vec::with_capacity(entries.len());
        let mut values: Vec<f64> = Vec::with_capacity(entries.len());

        for (key, value) in entries {
            if keys.last() == Some(&key) {
                if let Some(last) = values.last_mut() {
                    *last = value;
                }
            } else {
                keys.push(key);
                values.push(value);
            }
        }

        SparseVector { keys, values }
    }

    /// Replaces the values of this vector while keeping its key domain
    pub(crate) fn with_values(&self, values: Vec<f64>) -> Self {
        assert_eq!(self.keys.len(), values.len());
        SparseVector { keys: self.keys.clone(), values }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, key: u64) -> Option<f64> {
        self.keys.binary_search(&key).ok().map(|index| self.values[index])
    }

    pub fn contains_key(&self, key: u64) -> bool {
        self.keys.binary_search(&key).is_ok()
    }

    pub fn keys(&self) -> &[u64] {
        &self.keys
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> Zip<slice::Iter<u64>, slice::Iter<f64>> {
        self.keys.iter().zip(self.values.iter())
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Mean over the stored entries, zero for an empty vector
    pub fn mean(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.sum() / self.len() as f64
        }
    }

    pub fn norm(&self) -> f64 {
        self.values.iter().map(|value| value * value).sum::<f64>().sqrt()
    }

    /// Inner product via a merge join over the sorted keys, O(|a| + |b|)
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let mut sum = 0.0;
        let mut a = 0;
        let mut b = 0;

        while a < self.keys.len() && b < other.keys.len() {
            match self.keys[a].cmp(&other.keys[b]) {
                Ordering::Less => a += 1,
                Ordering::Greater => b += 1,
                Ordering::Equal => {
                    sum += self.values[a] * other.values[b];
                    a += 1;
                    b += 1;
                }
            }
        }

        sum
    }

    /// Values of both vectors for the keys they have in common, in key order
    pub fn co_entries(&self, other: &SparseVector) -> Vec<(f64, f64)> {
        let mut common = Vec::new();
        let mut a = 0;
        let mut b = 0;

        while a < self.keys.len() && b < other.keys.len() {
            match self.keys[a].cmp(&other.keys[b]) {
                Ordering::Less => a += 1,
                Ordering::Greater => b += 1,
                Ordering::Equal => {
                    common.push((self.values[a], other.values[b]));
                    a += 1;
                    b += 1;
                }
            }
        }

        common
    }
}

/// Freezing consumes the accumulator, its storage is released once the vector has been built.
impl From<RatingAccumulator> for SparseVector {

    fn from(accumulator: RatingAccumulator) -> Self {

        let mut entries: Vec<(u64, f64)> = accumulator.into_iter().collect();
        entries.sort_unstable_by_key(|&(key, _)| key);

        let (keys, values) = entries.into_iter().unzip();

        SparseVector { keys, values }
    }
}
