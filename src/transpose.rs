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

use fnv::FnvHashMap;

use crate::error::BuildError;
use crate::snapshot::RatingSnapshot;
use crate::types;
use crate::types::{ItemId, ItemSet, RatingAccumulator, UserId};

/// Item-major view of a rating snapshot, still in mutable form.
pub struct TransposedRatings {
    pub item_ratings: FnvHashMap<ItemId, RatingAccumulator>,
    pub user_item_sets: Option<FnvHashMap<UserId, ItemSet>>,
}

/// Transposes the user-major snapshot into one rating accumulator per item of `items`, in a
/// single pass over the snapshot. If `collect_item_sets` is set, we additionally record the sorted
/// set of rated items for every user.
pub fn transpose_ratings(
    items: &ItemSet,
    snapshot: &dyn RatingSnapshot,
    collect_item_sets: bool,
) -> Result<TransposedRatings, BuildError> {

    let mut item_ratings: FnvHashMap<ItemId, RatingAccumulator> =
        FnvHashMap::with_capacity_and_hasher(items.len(), Default::default());

    // Unrated items still get an (empty) entry
    for item in items.iter() {
        item_ratings.insert(*item, types::new_rating_accumulator(20));
    }

    let user_ids = snapshot.user_ids();

    let mut user_item_sets: Option<FnvHashMap<UserId, ItemSet>> = if collect_item_sets {
        Some(FnvHashMap::with_capacity_and_hasher(user_ids.len(), Default::default()))
    } else {
        None
    };

    for user in user_ids.iter() {

        let ratings = snapshot.user_ratings(*user);

        // sized exactly once per user, handed over to the item set without copying
        let mut user_items: Option<Vec<ItemId>> = if collect_item_sets {
            Some(Vec::with_capacity(ratings.len()))
        } else {
            None
        };

        for rating in ratings.iter() {

            let item_vector = item_ratings.get_mut(&rating.item)
                .ok_or(BuildError::UnknownRatedItem { user: *user, item: rating.item })?;

            item_vector.insert(*user, rating.value);

            if let Some(user_items) = user_items.as_mut() {
                user_items.push(rating.item);
            }
        }

        if let (Some(sets), Some(user_items)) = (user_item_sets.as_mut(), user_items) {
            sets.insert(*user, ItemSet::from_vec(user_items));
        }
    }

    Ok(TransposedRatings { item_ratings, user_item_sets })
}

#[cfg(test)]
mod tests {

    use rand::{Rng, XorShiftRng};
    use fnv::{FnvHashMap, FnvHashSet};

    use super::transpose_ratings;
    use crate::error::BuildError;
    use crate::snapshot::{PackedRatingSnapshot, Preference, RatingSnapshot};
    use crate::types::ItemSet;

    fn example_snapshot() -> PackedRatingSnapshot {
        PackedRatingSnapshot::from_ratings(vec![
            (1, 10, 5.0),
            (1, 20, 3.0),
            (2, 10, 4.0),
        ])
    }

    #[test]
    fn transposes_into_item_vectors() {
        let snapshot = example_snapshot();
        let items = ItemSet::from_vec(vec![10, 20, 30]);

        let transposed = transpose_ratings(&items, &snapshot, false).unwrap();

        assert_eq!(transposed.item_ratings.len(), 3);
        assert_eq!(transposed.item_ratings[&10].len(), 2);
        assert_eq!(transposed.item_ratings[&10][&1], 5.0);
        assert_eq!(transposed.item_ratings[&10][&2], 4.0);
        assert_eq!(transposed.item_ratings[&20][&1], 3.0);
        assert!(transposed.item_ratings[&30].is_empty());
        assert!(transposed.user_item_sets.is_none());
    }

    #[test]
    fn collects_user_item_sets_on_request() {
        let snapshot = example_snapshot();
        let items = ItemSet::from_vec(vec![10, 20]);

        let transposed = transpose_ratings(&items, &snapshot, true).unwrap();
        let user_item_sets = transposed.user_item_sets.unwrap();

        assert_eq!(user_item_sets[&1].as_slice(), &[10, 20]);
        assert_eq!(user_item_sets[&2].as_slice(), &[10]);
    }

    #[test]
    fn repeated_ratings_last_one_wins() {
        let snapshot = PackedRatingSnapshot::from_ratings(vec![
            (1, 20, 2.0),
            (1, 10, 1.0),
            (1, 20, 4.5),
        ]);
        let items = ItemSet::from_vec(vec![10, 20]);

        let transposed = transpose_ratings(&items, &snapshot, true).unwrap();

        assert_eq!(transposed.item_ratings[&20].len(), 1);
        assert_eq!(transposed.item_ratings[&20][&1], 4.5);
        assert_eq!(transposed.user_item_sets.unwrap()[&1].as_slice(), &[10, 20]);
    }

    struct SnapshotWithSilentUser;

    static NO_RATINGS: [Preference; 0] = [];
    static RATINGS: [Preference; 1] = [Preference { user: 1, item: 10, value: 2.0 }];

    impl RatingSnapshot for SnapshotWithSilentUser {

        fn user_ids(&self) -> &[u64] {
            &[1, 2]
        }

        fn item_ids(&self) -> &[u64] {
            &[10]
        }

        fn user_ratings(&self, user: u64) -> &[Preference] {
            if user == 1 { &RATINGS[..] } else { &NO_RATINGS[..] }
        }
    }

    #[test]
    fn users_without_ratings_get_empty_item_sets() {
        let items = ItemSet::from_vec(vec![10]);

        let transposed = transpose_ratings(&items, &SnapshotWithSilentUser, true).unwrap();
        let user_item_sets = transposed.user_item_sets.unwrap();

        assert_eq!(user_item_sets.len(), 2);
        assert!(user_item_sets[&2].is_empty());
        assert_eq!(transposed.item_ratings[&10].len(), 1);
    }

    #[test]
    fn fails_on_items_outside_universe() {
        let snapshot = example_snapshot();
        let items = ItemSet::from_vec(vec![10]);

        let result = transpose_ratings(&items, &snapshot, false);

        assert_eq!(result.err(), Some(BuildError::UnknownRatedItem { user: 1, item: 20 }));
    }

    #[test]
    fn random_snapshots_transpose_exactly() {

        let mut rng = XorShiftRng::new_unseeded();

        for _ in 0..20 {

            let num_ratings = rng.gen_range(0, 300);
            let ratings: Vec<(u64, u64, f64)> = (0..num_ratings)
                .map(|_| (rng.gen_range(0, 40), rng.gen_range(0, 60), rng.gen_range(1.0, 5.0)))
                .collect();

            let mut expected: FnvHashMap<(u64, u64), f64> = FnvHashMap::default();
            let mut expected_items_per_user: FnvHashMap<u64, FnvHashSet<u64>> =
                FnvHashMap::default();

            for &(user, item, value) in ratings.iter() {
                expected.insert((user, item), value);
                expected_items_per_user.entry(user).or_insert_with(FnvHashSet::default).insert(item);
            }

            let snapshot = PackedRatingSnapshot::from_ratings(ratings);
            let items = ItemSet::from_vec(snapshot.item_ids().to_vec());

            let transposed = transpose_ratings(&items, &snapshot, true).unwrap();

            assert_eq!(transposed.item_ratings.len(), items.len());

            let num_entries: usize = transposed.item_ratings.values().map(|v| v.len()).sum();
            assert_eq!(num_entries, expected.len());

            for (&(user, item), &value) in expected.iter() {
                assert_eq!(transposed.item_ratings[&item][&user], value);
            }

            let user_item_sets = transposed.user_item_sets.unwrap();
            for (user, expected_items) in expected_items_per_user.iter() {
                let item_set = &user_item_sets[user];
                assert_eq!(item_set.len(), expected_items.len());
                assert!(item_set.iter().all(|item| expected_items.contains(item)));
                assert!(item_set.as_slice().windows(2).all(|pair| pair[0] < pair[1]));
            }
        }
    }
}
