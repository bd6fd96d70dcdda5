// config.rs
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

//! Remote configuration, cached in the key/value table.

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use url::Url;

use crate::api::client::{check_status, client_builder};
use crate::database::Database;
use crate::errors::{Error, FetchError};

/// Compiled-in default API base, used until a fetch ever succeeds.
pub const DEFAULT_API_BASE: &str = "https://radioteca.net/wp-json/wp/v2";
/// Compiled-in default location of the audio archive.
pub const DEFAULT_ARCHIVE_BASE: &str = "https://archive.radioteca.net";
/// Location of the remote configuration document.
pub const DEFAULT_CONFIG_URL: &str = "https://radioteca.net/app/config.json";

const CONFIG_KEY: &str = "remote_config";

/// The remote configuration document: where the APIs live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base of the WordPress REST API.
    pub api_base: String,
    /// Base of the audio archive the episode files live under.
    pub archive_base: String,
    /// When this configuration was fetched; `None` for the defaults.
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            api_base: DEFAULT_API_BASE.to_owned(),
            archive_base: DEFAULT_ARCHIVE_BASE.to_owned(),
            fetched_at: None,
        }
    }
}

/// Serves the last-known-good configuration and refreshes it
/// best-effort in the background.
#[derive(Debug, Clone)]
pub struct ConfigService {
    db: Database,
    client: reqwest::Client,
    config_url: Url,
}

impl ConfigService {
    /// `config_url` overrides [`DEFAULT_CONFIG_URL`] when given.
    pub fn new(db: Database, config_url: Option<&str>) -> Result<Self, Error> {
        let config_url =
            Url::parse(config_url.unwrap_or(DEFAULT_CONFIG_URL)).map_err(FetchError::from)?;
        let client = client_builder().build().map_err(FetchError::from)?;
        Ok(ConfigService {
            db,
            client,
            config_url,
        })
    }

    /// The last configuration a fetch persisted, or the defaults.
    ///
    /// Never fails: an unreadable or corrupt entry degrades to the
    /// defaults with a warning, so construction paths that run before
    /// any network call stay synchronous and infallible.
    pub fn get(&self) -> RemoteConfig {
        match self.db.get_value(CONFIG_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!("stored remote config is corrupt, using defaults: {}", err);
                RemoteConfig::default()
            }),
            Ok(None) => RemoteConfig::default(),
            Err(err) => {
                warn!("could not read remote config, using defaults: {}", err);
                RemoteConfig::default()
            }
        }
    }

    /// Fetch the configuration document once and persist it.
    ///
    /// On failure the previously cached configuration is untouched.
    pub async fn fetch_and_cache(&self) -> Result<RemoteConfig, Error> {
        let resp = self
            .client
            .get(self.config_url.clone())
            .send()
            .await
            .map_err(FetchError::from)?;
        check_status(resp.status())?;

        let mut config: RemoteConfig = resp.json().await.map_err(FetchError::from)?;
        config.fetched_at = Some(Utc::now());

        let raw = serde_json::to_string(&config)
            .map_err(|err| FetchError::Payload(err.to_string()))?;
        self.db.set_value(CONFIG_KEY, &raw)?;
        info!("remote config refreshed");
        Ok(config)
    }

    /// Kick off a refresh on a detached task.
    ///
    /// The startup path does not wait for it; a failure is logged and
    /// swallowed here, never surfaced.
    pub fn spawn_refresh(&self) -> JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            if let Err(err) = service.fetch_and_cache().await {
                warn!("background config refresh failed: {}", err);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_db;
    use anyhow::Result;
    use pretty_assertions::assert_eq;

    fn stored(api_base: &str) -> String {
        serde_json::to_string(&RemoteConfig {
            api_base: api_base.to_owned(),
            archive_base: "https://files.example.org".to_owned(),
            fetched_at: Some(Utc::now()),
        })
        .unwrap()
    }

    #[test]
    fn test_defaults_before_any_fetch() -> Result<()> {
        let (db, _file) = test_db();
        let service = ConfigService::new(db, None)?;

        assert_eq!(service.get(), RemoteConfig::default());
        Ok(())
    }

    #[test]
    fn test_get_returns_last_persisted_value() -> Result<()> {
        let (db, _file) = test_db();
        db.set_value(CONFIG_KEY, &stored("https://mirror.example.org/wp-json/wp/v2"))?;
        let service = ConfigService::new(db, None)?;

        let config = service.get();
        assert_eq!(config.api_base, "https://mirror.example.org/wp-json/wp/v2");
        assert!(config.fetched_at.is_some());
        Ok(())
    }

    #[test]
    fn test_corrupt_entry_degrades_to_defaults() -> Result<()> {
        let (db, _file) = test_db();
        db.set_value(CONFIG_KEY, "not json at all")?;
        let service = ConfigService::new(db, None)?;

        assert_eq!(service.get(), RemoteConfig::default());
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_cached_config_untouched() -> Result<()> {
        let (db, _file) = test_db();
        let raw = stored("https://mirror.example.org/wp-json/wp/v2");
        db.set_value(CONFIG_KEY, &raw)?;

        // Nothing listens here; the fetch fails with connectivity.
        let service = ConfigService::new(db.clone(), Some("http://127.0.0.1:1/config.json"))?;
        let err = service.fetch_and_cache().await.unwrap_err();
        assert!(matches!(err, Error::Fetch(FetchError::Connectivity(_))));

        assert_eq!(db.get_value(CONFIG_KEY)?.as_deref(), Some(raw.as_str()));
        Ok(())
    }

    #[tokio::test]
    async fn test_spawned_refresh_swallows_the_failure() -> Result<()> {
        let (db, _file) = test_db();
        let service = ConfigService::new(db, Some("http://127.0.0.1:1/config.json"))?;

        // The task finishes cleanly even though the fetch failed.
        service.spawn_refresh().await?;
        assert_eq!(service.get(), RemoteConfig::default());
        Ok(())
    }
}
