// errors.rs
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

use thiserror::Error;

/// Failures originating from the local store.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("SQL query failed: {0}")]
    Sql(#[from] diesel::result::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("database migration failed: {0}")]
    Migration(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("episode {episode} declares no program membership")]
    NoMembership { episode: i32 },
}

/// Failures originating from the remote API.
///
/// `Connectivity` and `Server` describe conditions a later retry (or the
/// cache) can answer; `Api` means the request itself was rejected.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not reach the api: {0}")]
    Connectivity(String),
    #[error("server error (http {status})")]
    Server { status: u16 },
    #[error("api rejected the request (http {status})")]
    Api { status: u16 },
    #[error("malformed api payload: {0}")]
    Payload(String),
    #[error("invalid api url: {0}")]
    Url(#[from] url::ParseError),
}

impl FetchError {
    /// Whether retrying the same request can only fail again.
    ///
    /// The repository falls back to the cache for everything else.
    pub fn is_permanent(&self) -> bool {
        matches!(self, FetchError::Api { .. } | FetchError::Url(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Payload(err.to_string())
        } else if let Some(status) = err.status() {
            if status.is_server_error() {
                FetchError::Server {
                    status: status.as_u16(),
                }
            } else {
                FetchError::Api {
                    status: status.as_u16(),
                }
            }
        } else {
            // Timeouts, DNS failures, refused connections and whatever
            // else the transport ran into before getting a response.
            FetchError::Connectivity(err.to_string())
        }
    }
}

/// Umbrella error for operations that touch both sides.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Data(#[from] DataError),
}
