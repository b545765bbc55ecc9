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
use std::collections::BinaryHeap;

use crate::error::BuildError;
use crate::types::{ItemId, ItemSet};

/// Neighbor of an item together with its similarity score. Also used to find the top-k most
/// similar items per item via a binary heap.
#[derive(Clone,Copy,PartialEq,Debug)]
pub struct ScoredItem {
    pub item: ItemId,
    pub score: f64,
}

/// Ordering for our max-heap, note that we must use a special implementation here as there is no
/// total order on floating point numbers. The order is reversed, so that the top of the heap holds
/// the item with the lowest score.
fn cmp_reverse(scored_item_a: &ScoredItem, scored_item_b: &ScoredItem) -> Ordering {
    match scored_item_a.score.partial_cmp(&scored_item_b.score) {
        Some(Ordering::Less) => Ordering::Greater,
        Some(Ordering::Greater) => Ordering::Less,
        Some(Ordering::Equal) => Ordering::Equal,
        None => Ordering::Equal
    }
}

impl Eq for ScoredItem {}

impl Ord for ScoredItem {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_reverse(self, other)
    }
}

impl PartialOrd for ScoredItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(cmp_reverse(self, other))
    }
}

/// Immutable item-item similarity matrix, stored as one neighbor row per item of the universe.
/// Rows are sorted by descending score.
#[derive(Clone,Debug)]
pub struct SimilarityMatrix {
    items: ItemSet,
    rows: Vec<Vec<ScoredItem>>,
}

impl SimilarityMatrix {

    pub(crate) fn new(items: ItemSet, rows: Vec<Vec<ScoredItem>>) -> Self {
        assert_eq!(items.len(), rows.len(), "Need exactly one row per item");
        SimilarityMatrix { items, rows }
    }

    pub fn items(&self) -> &ItemSet {
        &self.items
    }

    /// Number of rows, which equals the size of the item universe
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of stored similarities
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(|row| row.len()).sum()
    }

    pub fn neighbors(&self, item: ItemId) -> Option<&[ScoredItem]> {
        self.items.index_of(item).map(|index| self.rows[index].as_slice())
    }

    pub fn get(&self, item: ItemId, other_item: ItemId) -> Option<f64> {
        self.neighbors(item)?
            .iter()
            .find(|neighbor| neighbor.item == other_item)
            .map(|neighbor| neighbor.score)
    }

    pub fn iter(&self) -> impl Iterator<Item=(&ItemId, &[ScoredItem])> {
        self.items.iter().zip(self.rows.iter().map(|row| row.as_slice()))
    }
}

/// Collects similarities during a model build and turns them into a `SimilarityMatrix`.
pub trait SimilarityMatrixAccumulator {

    fn put(&mut self, item: ItemId, other_item: ItemId, similarity: f64) -> Result<(), BuildError>;

    /// Records the similarity in both directions
    fn put_symmetric(
        &mut self,
        item: ItemId,
        other_item: ItemId,
        similarity: f64
    ) -> Result<(), BuildError> {
        self.put(item, other_item, similarity)?;
        self.put(other_item, item, similarity)
    }

    fn build(self: Box<Self>) -> SimilarityMatrix;
}

pub trait SimilarityMatrixAccumulatorFactory {

    fn create(&self, items: &ItemSet) -> Box<dyn SimilarityMatrixAccumulator>;
}

/// Creates accumulators which only retain the `neighborhood_size` most similar items per item,
/// ignoring similarities at or below `threshold`.
#[derive(Clone,Copy,Debug)]
pub struct TruncatingAccumulatorFactory {
    pub neighborhood_size: usize,
    pub threshold: f64,
}

impl TruncatingAccumulatorFactory {

    pub fn new(neighborhood_size: usize) -> Self {
        TruncatingAccumulatorFactory { neighborhood_size, threshold: 0.0 }
    }

    /// Keeps every similarity above the threshold
    pub fn unbounded() -> Self {
        TruncatingAccumulatorFactory::new(usize::max_value())
    }

    pub fn with_threshold(self, threshold: f64) -> Self {
        TruncatingAccumulatorFactory { threshold, ..self }
    }
}

impl SimilarityMatrixAccumulatorFactory for TruncatingAccumulatorFactory {

    fn create(&self, items: &ItemSet) -> Box<dyn SimilarityMatrixAccumulator> {

        let rows: Vec<BinaryHeap<ScoredItem>> = (0..items.len())
            .map(|_| BinaryHeap::new())
            .collect();

        Box::new(TruncatingAccumulator {
            items: items.clone(),
            rows,
            k: self.neighborhood_size,
            threshold: self.threshold,
        })
    }
}

struct TruncatingAccumulator {
    items: ItemSet,
    rows: Vec<BinaryHeap<ScoredItem>>,
    k: usize,
    threshold: f64,
}

impl SimilarityMatrixAccumulator for TruncatingAccumulator {

    fn put(&mut self, item: ItemId, other_item: ItemId, similarity: f64) -> Result<(), BuildError> {

        let row_index = self.items.index_of(item)
            .ok_or(BuildError::ItemOutsideUniverse { item })?;

        if !self.items.contains(other_item) {
            return Err(BuildError::ItemOutsideUniverse { item: other_item });
        }

        if item == other_item || !(similarity > self.threshold) || self.k == 0 {
            return Ok(());
        }

        let scored_item = ScoredItem { item: other_item, score: similarity };
        let neighbors = &mut self.rows[row_index];

        if neighbors.len() < self.k {
            neighbors.push(scored_item);
        } else if let Some(mut top) = neighbors.peek_mut() {
            if scored_item < *top {
                *top = scored_item;
            }
        }

        Ok(())
    }

    fn build(self: Box<Self>) -> SimilarityMatrix {

        let accumulator = *self;

        // the reversed ordering makes into_sorted_vec() return the highest scores first
        let rows = accumulator.rows.into_iter()
            .map(|heap| heap.into_sorted_vec())
            .collect();

        SimilarityMatrix::new(accumulator.items, rows)
    }
}

#[cfg(test)]
mod tests {

    use std::f64::EPSILON;

    use super::{ScoredItem, SimilarityMatrixAccumulatorFactory, TruncatingAccumulatorFactory};
    use crate::error::BuildError;
    use crate::types::ItemSet;

    fn within_epsilon(value: f64, expected: f64) -> bool {
        (value - expected).abs() < EPSILON
    }

    #[test]
    fn scored_item_ordering_reversed() {
        let item_a = ScoredItem { item: 1, score: 0.5 };
        let item_b = ScoredItem { item: 2, score: 1.5 };
        let item_c = ScoredItem { item: 3, score: 0.3 };

        assert!(item_a > item_b);
        assert!(item_a < item_c);
        assert!(item_b < item_c);
    }

    #[test]
    fn topk() {

        const K: usize = 3;

        let items = ItemSet::from_vec(vec![1, 2, 3, 4, 5, 6]);
        let mut accumulator = TruncatingAccumulatorFactory::new(K).create(&items);

        accumulator.put(6, 1, 0.5).unwrap();
        accumulator.put(6, 2, 1.5).unwrap();
        accumulator.put(6, 3, 0.3).unwrap();
        accumulator.put(6, 4, 3.5).unwrap();
        accumulator.put(6, 5, 2.5).unwrap();

        let matrix = accumulator.build();
        let top_k = matrix.neighbors(6).unwrap();

        assert_eq!(top_k.len(), K);

        assert_eq!(top_k[0].item, 4);
        assert!(within_epsilon(top_k[0].score, 3.5));

        assert_eq!(top_k[1].item, 5);
        assert!(within_epsilon(top_k[1].score, 2.5));

        assert_eq!(top_k[2].item, 2);
        assert!(within_epsilon(top_k[2].score, 1.5));
    }

    #[test]
    fn truncates_rows_to_neighborhood_size() {
        let items = ItemSet::from_vec(vec![1, 2, 3, 4]);
        let mut accumulator = TruncatingAccumulatorFactory::new(2).create(&items);

        accumulator.put(1, 2, 0.2).unwrap();
        accumulator.put(1, 3, 0.9).unwrap();
        accumulator.put(1, 4, 0.5).unwrap();
        accumulator.put(2, 1, 0.2).unwrap();

        let matrix = accumulator.build();

        assert_eq!(matrix.len(), 4);
        assert_eq!(matrix.nnz(), 3);

        let neighbors: Vec<u64> = matrix.neighbors(1).unwrap().iter().map(|n| n.item).collect();
        assert_eq!(neighbors, vec![3, 4]);

        assert_eq!(matrix.get(2, 1), Some(0.2));
        assert_eq!(matrix.get(1, 2), None);
        assert!(matrix.neighbors(3).unwrap().is_empty());
        assert_eq!(matrix.neighbors(5), None);
    }

    #[test]
    fn ignores_self_similarities_and_scores_below_threshold() {
        let items = ItemSet::from_vec(vec![1, 2, 3]);
        let mut accumulator = TruncatingAccumulatorFactory::unbounded()
            .with_threshold(0.1)
            .create(&items);

        accumulator.put(1, 1, 1.0).unwrap();
        accumulator.put(1, 2, 0.05).unwrap();
        accumulator.put_symmetric(1, 3, 0.4).unwrap();

        let matrix = accumulator.build();

        assert_eq!(matrix.nnz(), 2);
        assert_eq!(matrix.get(1, 3), Some(0.4));
        assert_eq!(matrix.get(3, 1), Some(0.4));
    }

    #[test]
    fn rejects_items_outside_universe() {
        let items = ItemSet::from_vec(vec![1, 2]);
        let mut accumulator = TruncatingAccumulatorFactory::new(5).create(&items);

        assert_eq!(accumulator.put(7, 1, 0.5), Err(BuildError::ItemOutsideUniverse { item: 7 }));
        assert_eq!(accumulator.put(1, 8, 0.5), Err(BuildError::ItemOutsideUniverse { item: 8 }));
    }

    #[test]
    fn empty_accumulator_yields_one_empty_row_per_item() {
        let items = ItemSet::from_vec(vec![3, 1, 2]);

        let matrix = TruncatingAccumulatorFactory::new(5).create(&items).build();

        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix.nnz(), 0);
        assert_eq!(matrix.items().as_slice(), &[1, 2, 3]);
        assert!(matrix.iter().all(|(_, neighbors)| neighbors.is_empty()));
    }
}
