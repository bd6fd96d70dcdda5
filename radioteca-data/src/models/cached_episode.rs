// cached_episode.rs
//
// Copyright 2026 Radioteca Developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//
// SPDX-License-Identifier: GPL-3.0-or-later

use diesel::prelude::*;

use crate::errors::DataError;
use crate::models::Episode;
use crate::schema::episodes;

/// Diesel model of the episodes table.
///
/// The flattened shape an [`Episode`] takes in the cache: one program
/// membership, one image uri. An episode belonging to several programs
/// keeps only its first membership across the round trip -- the cache
/// backs the offline-read path, nothing else.
#[derive(Queryable, Insertable, Identifiable, PartialEq)]
#[diesel(table_name = episodes)]
#[derive(Debug, Clone)]
pub(crate) struct CachedEpisode {
    pub(crate) id: i32,
    pub(crate) title: String,
    pub(crate) content: Option<String>,
    pub(crate) archive_uri: Option<String>,
    pub(crate) image_uri: Option<String>,
    pub(crate) published: String,
    pub(crate) duration: String,
    pub(crate) program_id: i32,
}

impl CachedEpisode {
    /// Flatten an episode for caching under its first membership.
    ///
    /// Fails when the episode declares no membership at all; callers
    /// persisting batches filter those out and log them.
    pub(crate) fn from_episode(ep: &Episode) -> Result<Self, DataError> {
        let program_id = ep
            .programs()
            .first()
            .copied()
            .ok_or(DataError::NoMembership { episode: ep.id() })?;

        Ok(Self::from_episode_in(ep, program_id))
    }

    /// Flatten an episode for caching under a known program.
    ///
    /// Used by the per-program refresh, where every row must land under
    /// the program that was queried regardless of what the episode
    /// itself declares first.
    pub(crate) fn from_episode_in(ep: &Episode, program_id: i32) -> Self {
        CachedEpisode {
            id: ep.id(),
            title: ep.title().to_owned(),
            content: ep.content().map(str::to_owned),
            archive_uri: ep.archive_uri().map(str::to_owned),
            image_uri: ep.media().first().map(|m| m.source_uri().to_owned()),
            published: ep.published().to_owned(),
            duration: ep.duration().to_owned(),
            program_id,
        }
    }
}
