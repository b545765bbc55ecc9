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

#[cfg(test)]
mod tests {

    use std::sync::Arc;

    use crate::ItemItemModelBuilder;
    use crate::baseline::ItemMeanPredictor;
    use crate::matrix::TruncatingAccumulatorFactory;
    use crate::norm::MeanCenteringVectorNormalizer;
    use crate::similarity::{CosineSimilarity, PearsonCorrelation};
    use crate::snapshot::PackedRatingSnapshot;

    #[test]
    fn programmatic_usage() {

        /* Our input data comprises of ratings of users for items, given as
           (user, item, rating) triples with integer identifiers. */
        let ratings = vec![
            (1, 100, 5.0),
            (1, 200, 4.0),
            (1, 300, 1.0),
            (2, 100, 4.0),
            (2, 200, 5.0),
            (3, 200, 2.0),
            (3, 300, 5.0),
            (3, 400, 4.0),
            (4, 400, 3.0),
        ];

        let snapshot = PackedRatingSnapshot::from_ratings(ratings);

        println!(
            "Found {} ratings between {} users and {} items.",
            snapshot.num_ratings(),
            snapshot.num_users(),
            snapshot.num_items(),
        );

        /* The baseline is trained on the raw ratings, the similarities are computed on the
           mean-centered ratings of each user. */
        let baseline = ItemMeanPredictor::train(&snapshot, 5.0);
        let normalizer = MeanCenteringVectorNormalizer;
        let normalized = snapshot.normalized(&normalizer);

        /* We keep the 2 most similar items per item. Cosine similarity is sparse and symmetric,
           so the builder only scores item pairs with common users, and each of them only once. */
        let similarity = CosineSimilarity::new(0.0);
        let factory = TruncatingAccumulatorFactory::new(2);

        let mut builder = ItemItemModelBuilder::new()
            .with_similarity(&similarity)
            .with_accumulator_factory(&factory)
            .with_normalized_snapshot(&normalized)
            .with_baseline(Arc::new(baseline))
            .with_normalizer(Arc::new(normalizer));

        let model = builder.build().unwrap();

        assert_eq!(model.items().len(), 4);
        assert!(model.baseline().is_some());

        for (item, neighbors) in model.matrix().iter() {
            println!("Items most similar to {}:", item);

            assert!(neighbors.len() <= 2);
            for neighbor in neighbors.iter() {
                println!("\t{} ({:.3})", neighbor.item, neighbor.score);
                assert!(neighbor.score > 0.0);
            }
        }

        /* After centering, 200 is the only item positively correlated with 100. */
        assert_eq!(model.neighbors(100).unwrap()[0].item, 200);
    }

    #[test]
    fn all_strategies_agree_on_symmetric_similarities() {

        let snapshot = PackedRatingSnapshot::from_ratings(vec![
            (1, 10, 5.0),
            (1, 20, 3.0),
            (1, 30, 4.0),
            (2, 10, 4.0),
            (2, 20, 1.0),
            (2, 30, 5.0),
            (3, 20, 2.0),
            (3, 30, 3.0),
            (3, 40, 5.0),
        ]);
        let factory = TruncatingAccumulatorFactory::unbounded();

        /* Pearson is symmetric but not sparse, cosine is both. */
        let pearson = PearsonCorrelation::default();
        let cosine = CosineSimilarity::default();

        let pearson_model = ItemItemModelBuilder::new()
            .with_similarity(&pearson)
            .with_accumulator_factory(&factory)
            .with_normalized_snapshot(&snapshot)
            .build()
            .unwrap();

        let cosine_model = ItemItemModelBuilder::new()
            .with_similarity(&cosine)
            .with_accumulator_factory(&factory)
            .with_normalized_snapshot(&snapshot)
            .build()
            .unwrap();

        for model in [pearson_model, cosine_model].iter() {
            for (item, neighbors) in model.matrix().iter() {
                for neighbor in neighbors.iter() {
                    assert_eq!(model.matrix().get(neighbor.item, *item), Some(neighbor.score));
                }
            }
        }
    }
}
