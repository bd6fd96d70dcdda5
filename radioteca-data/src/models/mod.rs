// mod.rs
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

mod cached_episode;
mod episode;
mod new_program;
mod program;

pub(crate) use self::cached_episode::CachedEpisode;
pub(crate) use self::new_program::NewProgram;

#[cfg(test)]
pub(crate) use self::episode::EpisodeBuilder;
#[cfg(test)]
pub(crate) use self::new_program::NewProgramBuilder;

pub use self::episode::{Episode, FeaturedMedia};
pub use self::program::Program;

use diesel::prelude::*;

use crate::schema::key_value;

/// Row of the `key_value` table. Holds opaque configuration blobs.
#[derive(Queryable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = key_value)]
pub(crate) struct ConfigEntry {
    pub(crate) key: String,
    pub(crate) value: String,
}
