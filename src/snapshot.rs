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

use fnv::{FnvHashMap, FnvHashSet};

use crate::norm::VectorNormalizer;
use crate::types::{ItemId, UserId};
use crate::vector::SparseVector;

/// A single (normalized) rating of a user for an item
#[derive(Clone,Copy,PartialEq,Debug)]
pub struct Preference {
    pub user: UserId,
    pub item: ItemId,
    pub value: f64,
}

/// Read-only view on a fully materialized collection of ratings. Implementations must return the
/// same data on every call, the model builder iterates the snapshot more than once.
pub trait RatingSnapshot {

    /// All users with ratings, in a stable order
    fn user_ids(&self) -> &[UserId];

    /// All items present in the data, not necessarily sorted
    fn item_ids(&self) -> &[ItemId];

    /// The ratings of `user`, empty for unknown users
    fn user_ratings(&self, user: UserId) -> &[Preference];
}

/// In-memory snapshot which keeps the ratings of each user together.
pub struct PackedRatingSnapshot {
    user_ids: Vec<UserId>,
    item_ids: Vec<ItemId>,
    ratings_by_user: FnvHashMap<UserId, Vec<Preference>>,
    num_ratings: u64,
}

impl PackedRatingSnapshot {

    /// Collects (user, item, rating) triples. Users and items keep the order of their first
    /// occurrence, repeated ratings are retained as given.
    pub fn from_ratings<I>(ratings: I) -> Self where I: IntoIterator<Item=(UserId, ItemId, f64)> {

        let mut user_ids: Vec<UserId> = Vec::new();
        let mut item_ids: Vec<ItemId> = Vec::new();
        let mut seen_items: FnvHashSet<ItemId> =
            FnvHashSet::with_capacity_and_hasher(100, Default::default());
        let mut ratings_by_user: FnvHashMap<UserId, Vec<Preference>> =
            FnvHashMap::with_capacity_and_hasher(100, Default::default());

        let mut num_ratings: u64 = 0;

        for (user, item, value) in ratings {

            if !ratings_by_user.contains_key(&user) {
                ratings_by_user.insert(user, Vec::with_capacity(10));
                user_ids.push(user);
            }

            if seen_items.insert(item) {
                item_ids.push(item);
            }

            if let Some(user_ratings) = ratings_by_user.get_mut(&user) {
                user_ratings.push(Preference { user, item, value });
            }

            num_ratings += 1;
        }

        PackedRatingSnapshot { user_ids, item_ids, ratings_by_user, num_ratings }
    }

    pub fn num_users(&self) -> usize {
        self.user_ids.len()
    }

    pub fn num_items(&self) -> usize {
        self.item_ids.len()
    }

    pub fn num_ratings(&self) -> u64 {
        self.num_ratings
    }

    /// The ratings of a user as a vector keyed by item, later ratings override earlier ones
    pub fn user_vector(&self, user: UserId) -> SparseVector {
        SparseVector::from_pairs(
            self.user_ratings(user).iter().map(|rating| (rating.item, rating.value)))
    }

    /// Applies `normalizer` to every user's rating vector, using the vector itself as reference.
    pub fn normalized(&self, normalizer: &dyn VectorNormalizer) -> PackedRatingSnapshot {

        let mut normalized: Vec<(UserId, ItemId, f64)> =
            Vec::with_capacity(self.num_ratings as usize);

        for user in self.user_ids.iter() {
            let ratings = self.user_vector(*user);
            let centered = normalizer.normalize(&ratings, &ratings);

            normalized.extend(centered.iter().map(|(item, value)| (*user, *item, *value)));
        }

        PackedRatingSnapshot::from_ratings(normalized)
    }
}

impl RatingSnapshot for PackedRatingSnapshot {

    fn user_ids(&self) -> &[UserId] {
        &self.user_ids
    }

    fn item_ids(&self) -> &[ItemId] {
        &self.item_ids
    }

    fn user_ratings(&self, user: UserId) -> &[Preference] {
        match self.ratings_by_user.get(&user) {
            Some(ratings) => ratings.as_slice(),
            None => &[],
        }
    }
}
