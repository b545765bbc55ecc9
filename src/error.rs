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

use thiserror::Error;

use crate::types::{ItemId, UserId};

/// Errors raised while configuring or running a model build.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BuildError {
    /// Build-phase data was requested outside of the build phase.
    #[error("Not in build phase: {0}")]
    InvalidState(&'static str),

    /// A required collaborator was not set before calling `build()`.
    #[error("Missing configuration: {0}")]
    MissingConfiguration(&'static str),

    /// The snapshot contains a rating for an item it did not declare.
    #[error("User {user} rated item {item}, which is not part of the item universe")]
    UnknownRatedItem { user: UserId, item: ItemId },

    /// A similarity was recorded for an item the accumulator does not know about.
    #[error("Item {item} is outside the item universe of the similarity matrix")]
    ItemOutsideUniverse { item: ItemId },

    #[error("Builder has already produced a model")]
    AlreadyBuilt,
}

#[cfg(test)]
mod tests {

    use super::BuildError;

    #[test]
    fn messages_name_the_offending_ids() {
        let error = BuildError::UnknownRatedItem { user: 3, item: 99 };
        assert_eq!(
            error.to_string(),
            "User 3 rated item 99, which is not part of the item universe"
        );

        let error = BuildError::InvalidState("items");
        assert_eq!(error.to_string(), "Not in build phase: items");
    }
}
