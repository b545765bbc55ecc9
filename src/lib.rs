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

//! Builds static item-item similarity models from snapshots of user ratings.
//!
//! The `ItemItemModelBuilder` transposes the user-major ratings into one sparse rating vector per
//! item, picks a strategy for populating the similarity matrix based on the capabilities of the
//! configured `ItemSimilarity`, and bundles the matrix with the normalizer and baseline into an
//! immutable `ItemItemModel`.

mod context;
mod transpose;
mod usage_tests;
pub mod baseline;
pub mod builder;
pub mod error;
pub mod io;
pub mod matrix;
pub mod model;
pub mod norm;
pub mod similarity;
pub mod snapshot;
pub mod strategy;
pub mod types;
pub mod utils;
pub mod vector;

pub use crate::builder::{BuildPhase, ItemItemModelBuilder};
pub use crate::context::BuildContext;
pub use crate::error::BuildError;
pub use crate::model::ItemItemModel;
pub use crate::transpose::{transpose_ratings, TransposedRatings};
