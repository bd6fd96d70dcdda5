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

//! Remote data source for the WordPress REST API.

pub(crate) mod client;
pub(crate) mod data;

pub use self::client::ApiClient;

use async_trait::async_trait;

use crate::errors::FetchError;
use crate::models::{Episode, Program};

/// Default page size for the program listing.
pub const PROGRAMS_PER_PAGE: u32 = 100;
/// Default page size when paging a single program's episodes.
pub const EPISODES_PER_PAGE: u32 = 100;
/// Default page size for the cross-program episode listing.
pub const ALL_EPISODES_PER_PAGE: u32 = 20;

/// The seam between the repository and the HTTP transport.
///
/// One implementation per platform, chosen by the composition root;
/// [`ApiClient`] is the reqwest one. The server returns list results
/// ordered descending by date and implementations keep that order.
#[async_trait]
pub trait RemoteSource {
    /// Fetch every program.
    async fn programs(&self) -> Result<Vec<Program>, FetchError>;

    /// Fetch one page of a program's episodes.
    async fn episodes_for_program(
        &self,
        program_id: i32,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Episode>, FetchError>;

    /// Fetch one page of episodes across all programs.
    async fn episodes(&self, page: u32, per_page: u32) -> Result<Vec<Episode>, FetchError>;

    /// Fetch a single episode. A missing id is `None`, not an error.
    async fn episode(&self, id: i32) -> Result<Option<Episode>, FetchError>;

    /// Full-text search. Terms of two characters or fewer come back
    /// empty without a request being issued.
    async fn search_episodes(&self, term: &str) -> Result<Vec<Episode>, FetchError>;
}
