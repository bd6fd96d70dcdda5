// sdk.rs
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

//! Entry point for the host UI layer.

use tokio::task::JoinHandle;

use std::path::PathBuf;

use crate::api::{ApiClient, ALL_EPISODES_PER_PAGE, EPISODES_PER_PAGE};
use crate::config::{ConfigService, RemoteConfig};
use crate::database::Database;
use crate::errors::Error;
use crate::models::{Episode, Program};
use crate::repository::Repository;

const DB_FILENAME: &str = "radioteca.db";

/// Options for [`Sdk::new`].
#[derive(Debug, Clone)]
pub struct SdkConfig {
    /// Directory the database file lives in; the host passes its
    /// platform data directory across the boundary.
    pub data_dir: PathBuf,
    /// Override for the remote configuration document location.
    pub config_url: Option<String>,
}

impl SdkConfig {
    /// Options with every override left at its default.
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        SdkConfig {
            data_dir: data_dir.into(),
            config_url: None,
        }
    }
}

/// The composition root.
///
/// Wires store, config service, API client and repository together
/// once; the host constructs a single `Sdk` at process start and calls
/// into it. No component is reachable through ambient globals.
#[derive(Debug)]
pub struct Sdk {
    repository: Repository<ApiClient>,
    config: ConfigService,
}

impl Sdk {
    /// Open the local store under `options.data_dir` and wire every
    /// component up.
    pub fn new(options: SdkConfig) -> Result<Self, Error> {
        let db = Database::open(options.data_dir.join(DB_FILENAME))?;
        let config = ConfigService::new(db.clone(), options.config_url.as_deref())?;
        // Seeded from the last-known-good configuration before any
        // network call has a chance to complete.
        let api = ApiClient::new(&config.get().api_base)?;
        let repository = Repository::new(api, db);
        Ok(Sdk { repository, config })
    }

    /// The configuration the SDK was wired with.
    pub fn remote_config(&self) -> RemoteConfig {
        self.config.get()
    }

    /// Refresh the remote configuration in the background.
    ///
    /// Best effort: failures are logged inside the task and never
    /// reach the startup path. Takes effect on the next construction.
    pub fn spawn_config_refresh(&self) -> JoinHandle<()> {
        self.config.spawn_refresh()
    }

    /// All programs, newest data when reachable, cache otherwise.
    pub async fn programs(&self) -> Result<Vec<Program>, Error> {
        self.repository.programs().await
    }

    /// A single program by id.
    pub async fn program(&self, id: i32) -> Result<Option<Program>, Error> {
        self.repository.program(id).await
    }

    /// One page of a program's episodes. Page counting is the
    /// caller's: a page shorter than the default page size means there
    /// is no further page.
    pub async fn episodes_for_program(
        &self,
        program_id: i32,
        page: u32,
    ) -> Result<Vec<Episode>, Error> {
        self.repository
            .episodes_for_program(program_id, page, EPISODES_PER_PAGE)
            .await
    }

    /// One page of the cross-program episode listing.
    pub async fn all_episodes(&self, page: u32) -> Result<Vec<Episode>, Error> {
        self.repository
            .all_episodes(page, ALL_EPISODES_PER_PAGE)
            .await
    }

    /// A single episode, `None` when the remote end does not know the
    /// id.
    pub async fn episode(&self, id: i32) -> Result<Option<Episode>, Error> {
        self.repository.episode(id).await
    }

    /// Search episodes. Blank or shorter-than-three-character terms
    /// come back empty without network traffic.
    pub async fn search_episodes(&self, term: &str) -> Result<Vec<Episode>, Error> {
        self.repository.search_episodes(term).await
    }
}
