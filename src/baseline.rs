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

use fnv::FnvHashMap;

use crate::snapshot::RatingSnapshot;
use crate::types::{ItemId, UserId};
use crate::vector::SparseVector;

/// Predicts ratings in the absence of neighborhood information. The model builder only passes
/// the predictor through to the model.
pub trait BaselinePredictor: Debug + Send + Sync {

    fn predict(&self, user: UserId, user_ratings: &SparseVector, item: ItemId) -> f64;
}

#[derive(Clone,Copy,Debug)]
pub struct ConstantPredictor {
    pub value: f64,
}

impl ConstantPredictor {

    pub fn new(value: f64) -> Self {
        ConstantPredictor { value }
    }
}

impl BaselinePredictor for ConstantPredictor {

    fn predict(&self, _user: UserId, _user_ratings: &SparseVector, _item: ItemId) -> f64 {
        self.value
    }
}

/// Predicts the mean rating of the item, falling back to the global mean for unknown items. The
/// item means are damped towards the global mean by `damping` virtual ratings.
#[derive(Clone,Debug)]
pub struct ItemMeanPredictor {
    global_mean: f64,
    item_means: FnvHashMap<ItemId, f64>,
}

impl ItemMeanPredictor {

    pub fn train(snapshot: &dyn RatingSnapshot, damping: f64) -> Self {

        let mut sums: FnvHashMap<ItemId, (f64, u64)> =
            FnvHashMap::with_capacity_and_hasher(snapshot.item_ids().len(), Default::default());

        let mut total: f64 = 0.0;
        let mut num_ratings: u64 = 0;

        for user in snapshot.user_ids().iter() {
            for rating in snapshot.user_ratings(*user).iter() {
                let entry = sums.entry(rating.item).or_insert((0.0, 0));
                entry.0 += rating.value;
                entry.1 += 1;

                total += rating.value;
                num_ratings += 1;
            }
        }

        let global_mean = if num_ratings == 0 { 0.0 } else { total / num_ratings as f64 };

        let item_means = sums.into_iter()
            .map(|(item, (sum, count))| {
                let mean = (sum + damping * global_mean) / (count as f64 + damping);
                (item, mean)
            })
            .collect();

        ItemMeanPredictor { global_mean, item_means }
    }

    pub fn global_mean(&self) -> f64 {
        self.global_mean
    }
}

impl BaselinePredictor for ItemMeanPredictor {

    fn predict(&self, _user: UserId, _user_ratings: &SparseVector, item: ItemId) -> f64 {
        match self.item_means.get(&item) {
            Some(mean) => *mean,
            None => self.global_mean,
        }
    }
}
