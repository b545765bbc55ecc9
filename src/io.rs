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

use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::io::stdout;
use std::path::Path;

use serde_derive::{Deserialize, Serialize};

use crate::model::ItemItemModel;
use crate::snapshot::PackedRatingSnapshot;
use crate::types::{ItemId, UserId};

/// Reads a CSV input file. We expect NO headers, and a user-item-rating triple per line
/// with tab separation.
pub fn csv_reader(file: &str) -> Result<csv::Reader<File>, csv::Error> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .from_path(file)
}

#[derive(Deserialize)]
struct RatingRecord {
    user: UserId,
    item: ItemId,
    rating: f64,
}

/// Loads all ratings into memory. Malformed lines abort the loading.
pub fn read_ratings<R>(reader: &mut csv::Reader<R>) -> Result<PackedRatingSnapshot, csv::Error>
    where R: io::Read {

    let mut ratings: Vec<(UserId, ItemId, f64)> = Vec::new();

    for result in reader.deserialize() {
        let record: RatingRecord = result?;
        ratings.push((record.user, record.item, record.rating));
    }

    Ok(PackedRatingSnapshot::from_ratings(ratings))
}

/// Struct used for JSON serialization of the neighborhoods. Field names will be used in JSON.
#[derive(Serialize)]
struct Neighborhood {
    item: ItemId,
    neighbors: Vec<Neighbor>,
}

#[derive(Serialize)]
struct Neighbor {
    item: ItemId,
    score: f64,
}

/// Output the most similar items for every item as one JSON document per line. If a
/// `neighborhoods_path` is supplied, we write to a file at the specified path, otherwise, we
/// output to stdout.
pub fn write_neighborhoods(
    model: &ItemItemModel,
    neighborhoods_path: Option<String>,
) -> io::Result<()> {

    let mut out: Box<dyn Write> = match neighborhoods_path {
        Some(path) => Box::new(io::BufWriter::new(File::create(&Path::new(&path))?)),
        _ => Box::new(stdout())
    };

    write_neighborhoods_to(model, &mut out)?;
    out.flush()
}

pub fn write_neighborhoods_to<W>(model: &ItemItemModel, out: &mut W) -> io::Result<()>
    where W: Write {

    for (item, neighbors) in model.matrix().iter() {

        let neighborhood = Neighborhood {
            item: *item,
            neighbors: neighbors.iter()
                .map(|neighbor| Neighbor { item: neighbor.item, score: neighbor.score })
                .collect(),
        };

        serde_json::to_writer(&mut *out, &neighborhood)?;
        writeln!(out)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {

    use std::sync::Arc;

    use super::{read_ratings, write_neighborhoods_to};
    use crate::matrix::{ScoredItem, SimilarityMatrix};
    use crate::model::ItemItemModel;
    use crate::norm::IdentityVectorNormalizer;
    use crate::snapshot::RatingSnapshot;
    use crate::types::ItemSet;

    fn reader(data: &str) -> csv::Reader<&[u8]> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b'\t')
            .from_reader(data.as_bytes())
    }

    #[test]
    fn reads_tab_separated_ratings() {
        let mut ratings = reader("1\t10\t5.0\n1\t20\t3\n2\t10\t4.5\n");

        let snapshot = read_ratings(&mut ratings).unwrap();

        assert_eq!(snapshot.num_ratings(), 3);
        assert_eq!(snapshot.user_ids(), &[1, 2]);
        assert_eq!(snapshot.user_vector(2).get(10), Some(4.5));
    }

    #[test]
    fn rejects_malformed_lines() {
        let mut ratings = reader("1\t10\t5.0\nalice\t20\t3.0\n");

        assert!(read_ratings(&mut ratings).is_err());
    }

    #[test]
    fn writes_one_json_line_per_item() {
        let items = ItemSet::from_vec(vec![1, 2]);
        let rows = vec![vec![ScoredItem { item: 2, score: 0.5 }], Vec::new()];
        let model = ItemItemModel::new(
            SimilarityMatrix::new(items.clone(), rows),
            Arc::new(IdentityVectorNormalizer),
            None,
            items,
        );

        let mut out: Vec<u8> = Vec::new();
        write_neighborhoods_to(&model, &mut out).unwrap();

        let written = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = written.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"{"item":1,"neighbors":[{"item":2,"score":0.5}]}"#);
        assert_eq!(lines[1], r#"{"item":2,"neighbors":[]}"#);
    }
}
