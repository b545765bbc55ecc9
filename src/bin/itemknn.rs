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

use std::env;
use std::error::Error;
use std::process;
use std::sync::Arc;

use getopts::Options;
use log::info;

use itemknn::ItemItemModelBuilder;
use itemknn::baseline::ItemMeanPredictor;
use itemknn::io;
use itemknn::matrix::TruncatingAccumulatorFactory;
use itemknn::norm::{IdentityVectorNormalizer, MeanCenteringVectorNormalizer, VectorNormalizer};
use itemknn::similarity::{CosineSimilarity, ItemSimilarity, PearsonCorrelation};

struct Settings {
    ratings_path: String,
    neighborhoods_path: Option<String>,
    num_neighbors: usize,
    similarity: String,
    damping: f64,
    threshold: f64,
    center: bool,
}

fn main() {

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optopt("i", "inputfile", "Input file name (required). The input consists of ratings \
        of users for items. The input file must contain a user, item and rating triple per line, \
        separated by tabs. User and item identifiers must be integers.", "PATH");
    opts.optopt("o", "outputfile", "Output file name (optional, output will be written to stdout \
        by default).", "PATH");
    opts.optopt("n", "num-neighbors", "Number of similar items to keep per item (optional, \
        defaults to 20).", "NUMBER");
    opts.optopt("s", "similarity", "Item similarity to use, either 'cosine' or 'pearson' \
        (optional, defaults to 'cosine').", "NAME");
    opts.optopt("d", "damping", "Damping term added to the denominator of the similarity \
        (optional, defaults to 0).", "NUMBER");
    opts.optopt("t", "threshold", "Only keep similarities above this value (optional, defaults \
        to 0).", "NUMBER");
    opts.optflag("c", "center", "Subtract each user's mean rating before computing similarities");
    opts.optflag("h", "help", "Print this help menu");

    let matches = match opts.parse(&args[1..]) {
        Ok(matches) => matches,
        Err(failure) => {
            let hint = failure.to_string();
            print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    if matches.opt_present("h") {
        print_usage_and_exit(&program, opts, None);
    }

    let ratings_path = match matches.opt_str("i") {
        Some(path) => path,
        None => print_usage_and_exit(
            &program,
            opts,
            Some("Please specify an inputfile via --inputfile."),
        ),
    };

    let num_neighbors: usize = match matches.opt_get_default("n", 20) {
        Ok(num_neighbors) => num_neighbors,
        Err(failure) => {
            let hint = format!("Problem with option 'n': {}", failure.to_string());
            print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    let damping: f64 = match matches.opt_get_default("d", 0.0) {
        Ok(damping) => damping,
        Err(failure) => {
            let hint = format!("Problem with option 'd': {}", failure.to_string());
            print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    let threshold: f64 = match matches.opt_get_default("t", 0.0) {
        Ok(threshold) => threshold,
        Err(failure) => {
            let hint = format!("Problem with option 't': {}", failure.to_string());
            print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    let similarity = matches.opt_str("s").unwrap_or_else(|| String::from("cosine"));
    if similarity != "cosine" && similarity != "pearson" {
        let hint = format!("Unknown similarity '{}'.", similarity);
        print_usage_and_exit(&program, opts, Some(&hint));
    }

    let settings = Settings {
        ratings_path,
        neighborhoods_path: matches.opt_str("o"),
        num_neighbors,
        similarity,
        damping,
        threshold,
        center: matches.opt_present("c"),
    };

    if let Err(error) = compute_neighborhoods(settings) {
        eprintln!("{}", error);
        process::exit(1);
    }
}

fn print_usage_and_exit(
    program: &str,
    opts: Options,
    hint: Option<&str>
) -> ! {

    if let Some(hint) = hint {
        eprintln!("\n{}\n", hint);
    }

    let brief = format!("Usage: {} [options]", program);
    eprint!("{}", opts.usage(&brief));

    process::exit(usage_exit_code(hint))
}

/// Printing the usage on request succeeds, printing it because of a problem with the options fails
fn usage_exit_code(hint: Option<&str>) -> i32 {
    match hint {
        Some(_) => 1,
        None => 0,
    }
}

fn compute_neighborhoods(settings: Settings) -> Result<(), Box<dyn Error>> {

    info!("Reading ratings from {}", settings.ratings_path);

    let mut reader = io::csv_reader(&settings.ratings_path)?;
    let snapshot = io::read_ratings(&mut reader)?;

    info!(
        "Found {} ratings between {} users and {} items.",
        snapshot.num_ratings(),
        snapshot.num_users(),
        snapshot.num_items(),
    );

    let baseline = ItemMeanPredictor::train(&snapshot, 5.0);

    let normalizer: Arc<dyn VectorNormalizer> = if settings.center {
        Arc::new(MeanCenteringVectorNormalizer)
    } else {
        Arc::new(IdentityVectorNormalizer)
    };
    let normalized = snapshot.normalized(&*normalizer);

    let cosine = CosineSimilarity::new(settings.damping);
    let pearson = PearsonCorrelation::new(settings.damping);
    let similarity: &dyn ItemSimilarity = if settings.similarity == "pearson" {
        &pearson
    } else {
        &cosine
    };

    let factory = TruncatingAccumulatorFactory::new(settings.num_neighbors)
        .with_threshold(settings.threshold);

    info!("Computing the {} most similar items per item", settings.num_neighbors);

    let model = ItemItemModelBuilder::new()
        .with_similarity(similarity)
        .with_accumulator_factory(&factory)
        .with_normalized_snapshot(&normalized)
        .with_baseline(Arc::new(baseline))
        .with_normalizer(normalizer)
        .build()?;

    info!("Writing neighborhoods...");
    io::write_neighborhoods(&model, settings.neighborhoods_path)?;

    Ok(())
}
