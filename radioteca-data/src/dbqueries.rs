// dbqueries.rs
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

//! The local store queries.

use diesel::prelude::*;
use log::info;

use crate::database::Database;
use crate::errors::DataError;
use crate::models::{CachedEpisode, ConfigEntry, NewProgram, Program};

impl Database {
    /// Replace the whole program table with `rows`.
    ///
    /// The program listing is cached wholesale; there is no per-row
    /// merge.
    pub(crate) fn replace_all_programs(&self, rows: &[NewProgram]) -> Result<(), DataError> {
        use crate::schema::programs::dsl::*;
        let mut con = self.get()?;

        con.transaction::<_, DataError, _>(|con| {
            diesel::delete(programs).execute(con)?;
            if !rows.is_empty() {
                diesel::insert_into(programs).values(rows).execute(con)?;
            }
            Ok(())
        })?;
        info!("cached {} programs", rows.len());
        Ok(())
    }

    /// Every cached program, ordered by name.
    pub(crate) fn get_programs(&self) -> Result<Vec<Program>, DataError> {
        use crate::schema::programs::dsl::*;
        let mut con = self.get()?;

        programs
            .order(name.asc())
            .load::<Program>(&mut con)
            .map_err(From::from)
    }

    pub(crate) fn get_program(&self, program_id: i32) -> Result<Option<Program>, DataError> {
        use crate::schema::programs::dsl::*;
        let mut con = self.get()?;

        programs
            .filter(id.eq(program_id))
            .first::<Program>(&mut con)
            .optional()
            .map_err(From::from)
    }

    /// Swap a program's cached episode set for `rows`.
    ///
    /// Delete and insert run in one transaction so a concurrent reader
    /// sees the full old set or the full new set, never a partial one.
    pub(crate) fn replace_program_episodes(
        &self,
        parent_id: i32,
        rows: &[CachedEpisode],
    ) -> Result<(), DataError> {
        use crate::schema::episodes::dsl::*;
        let mut con = self.get()?;

        con.transaction::<_, DataError, _>(|con| {
            diesel::delete(episodes.filter(program_id.eq(parent_id))).execute(con)?;
            if !rows.is_empty() {
                diesel::replace_into(episodes).values(rows).execute(con)?;
            }
            Ok(())
        })?;
        info!("cached {} episodes for program {}", rows.len(), parent_id);
        Ok(())
    }

    /// Insert-or-replace episodes by primary key.
    ///
    /// A row with an existing id is overwritten whole, not merged.
    pub(crate) fn upsert_episodes(&self, rows: &[CachedEpisode]) -> Result<(), DataError> {
        use crate::schema::episodes::dsl::*;
        let mut con = self.get()?;

        if rows.is_empty() {
            return Ok(());
        }
        diesel::replace_into(episodes)
            .values(rows)
            .execute(&mut con)
            .map(|_| ())
            .map_err(From::from)
    }

    /// A program's cached episodes, newest first.
    pub(crate) fn get_program_episodes(
        &self,
        parent_id: i32,
    ) -> Result<Vec<CachedEpisode>, DataError> {
        use crate::schema::episodes::dsl::*;
        let mut con = self.get()?;

        episodes
            .filter(program_id.eq(parent_id))
            .order(published.desc())
            .load::<CachedEpisode>(&mut con)
            .map_err(From::from)
    }

    /// Every cached episode, newest first.
    pub(crate) fn get_episodes(&self) -> Result<Vec<CachedEpisode>, DataError> {
        use crate::schema::episodes::dsl::*;
        let mut con = self.get()?;

        episodes
            .order(published.desc())
            .load::<CachedEpisode>(&mut con)
            .map_err(From::from)
    }

    pub(crate) fn get_episode(&self, episode_id: i32) -> Result<Option<CachedEpisode>, DataError> {
        use crate::schema::episodes::dsl::*;
        let mut con = self.get()?;

        episodes
            .filter(id.eq(episode_id))
            .first::<CachedEpisode>(&mut con)
            .optional()
            .map_err(From::from)
    }

    #[allow(dead_code)]
    pub(crate) fn delete_program_episodes(&self, parent_id: i32) -> Result<usize, DataError> {
        use crate::schema::episodes::dsl::*;
        let mut con = self.get()?;

        diesel::delete(episodes.filter(program_id.eq(parent_id)))
            .execute(&mut con)
            .map_err(From::from)
    }

    /// Substring match over title or content, newest first.
    ///
    /// Case sensitivity is whatever SQLite's LIKE does (ASCII-folding
    /// only).
    pub(crate) fn search_episodes(&self, term: &str) -> Result<Vec<CachedEpisode>, DataError> {
        use crate::schema::episodes::dsl::*;
        let mut con = self.get()?;

        let pattern = format!("%{}%", term.trim());
        episodes
            .filter(title.like(pattern.clone()))
            .or_filter(content.like(pattern))
            .order(published.desc())
            .load::<CachedEpisode>(&mut con)
            .map_err(From::from)
    }

    pub(crate) fn get_value(&self, entry_key: &str) -> Result<Option<String>, DataError> {
        use crate::schema::key_value::dsl::*;
        let mut con = self.get()?;

        key_value
            .filter(key.eq(entry_key))
            .select(value)
            .first::<String>(&mut con)
            .optional()
            .map_err(From::from)
    }

    pub(crate) fn set_value(&self, entry_key: &str, entry_value: &str) -> Result<(), DataError> {
        use crate::schema::key_value::dsl::*;
        let mut con = self.get()?;

        let entry = ConfigEntry {
            key: entry_key.to_owned(),
            value: entry_value.to_owned(),
        };
        diesel::replace_into(key_value)
            .values(&entry)
            .execute(&mut con)
            .map(|_| ())
            .map_err(From::from)
    }
}
