// lib.rs
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

#![warn(nonstandard_style, unused)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    elided_lifetime_in_paths,
    unconditional_recursion,
    while_true
)]

//! Data layer for the Radioteca podcast apps.
//!
//! Fetches programs and episodes from a WordPress REST API, caches
//! them in a local SQLite database and serves reads through a
//! try-remote, fall-back-to-cache policy. The host UI constructs one
//! [`Sdk`] at process start and calls into it.

mod api;
pub mod config;
pub mod database;
mod dbqueries;
#[allow(missing_docs)]
pub mod errors;
pub(crate) mod models;
pub mod repository;
mod schema;
pub mod sdk;
mod utils;

pub use api::{ApiClient, RemoteSource};
pub use api::{ALL_EPISODES_PER_PAGE, EPISODES_PER_PAGE, PROGRAMS_PER_PAGE};
pub use config::{ConfigService, RemoteConfig};
pub use database::Database;
pub use errors::{DataError, Error, FetchError};
pub use models::{Episode, FeaturedMedia, Program};
pub use repository::Repository;
pub use sdk::{Sdk, SdkConfig};

/// The user-agent sent with every request.
pub const USER_AGENT: &str = concat!("radioteca/", env!("CARGO_PKG_VERSION"));
