// database.rs
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

//! Database setup.

use diesel::prelude::*;
use diesel::r2d2;
use diesel::r2d2::{ConnectionManager, PooledConnection};

use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use std::fs;
use std::path::Path;

use log::info;

use crate::errors::DataError;

type Pool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub(crate) type Connection = PooledConnection<ConnectionManager<SqliteConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Handle to the local store.
///
/// Wraps an r2d2 pool over a SQLite file and is cheap to clone; every
/// component holding one was handed it by the composition root. The
/// schema is created on open and fixed at v1.
#[derive(Debug, Clone)]
pub struct Database {
    pool: Pool,
}

impl Database {
    /// Open (creating if needed) the database at `path` and run the
    /// embedded migrations.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let manager =
            ConnectionManager::<SqliteConnection>::new(path.as_ref().to_string_lossy().as_ref());
        let pool = r2d2::Pool::builder().build(manager)?;

        let db = Database { pool };
        db.run_migrations()?;
        info!("database pool initialized");
        Ok(db)
    }

    fn run_migrations(&self) -> Result<(), DataError> {
        let mut con = self.get()?;
        con.run_pending_migrations(MIGRATIONS)
            .map_err(|err| DataError::Migration(err.to_string()))?;
        Ok(())
    }

    pub(crate) fn get(&self) -> Result<Connection, DataError> {
        self.pool.get().map_err(From::from)
    }
}

#[cfg(test)]
pub(crate) fn test_db() -> (Database, tempfile::NamedTempFile) {
    let file = tempfile::Builder::new()
        .suffix("-radioteca.db")
        .tempfile()
        .unwrap();
    let db = Database::open(file.path()).unwrap();
    (db, file)
}
