// client.rs
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

use async_trait::async_trait;
use log::{debug, info};
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use std::time::Duration;

use crate::api::data::{PostDocument, TermDocument};
use crate::api::RemoteSource;
use crate::errors::FetchError;
use crate::models::{Episode, Program};

/// Related resources embedded into list responses, saving a request
/// per episode for covers and memberships.
const EMBED: &str = "wp:featuredmedia,wp:term";

/// Search terms this short are noise; they come back empty without a
/// request being issued.
const MIN_SEARCH_LEN: usize = 3;

pub(crate) fn client_builder() -> reqwest::ClientBuilder {
    let policy = Policy::custom(|attempt| {
        debug!("redirect attempt url: {:?}", attempt.url());
        if attempt.previous().len() > 10 {
            attempt.error("too many redirects")
        } else if Some(attempt.url()) == attempt.previous().last() {
            // avoid redirect loops
            attempt.stop()
        } else {
            attempt.follow()
        }
    });

    reqwest::Client::builder()
        .redirect(policy)
        .referer(false)
        .user_agent(crate::USER_AGENT)
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
}

/// Map a response status into the error taxonomy.
///
/// The 404-as-None case is handled by the single-episode endpoint
/// before calling this.
pub(crate) fn check_status(status: StatusCode) -> Result<(), FetchError> {
    if status.is_success() {
        Ok(())
    } else if status.is_client_error() {
        Err(FetchError::Api {
            status: status.as_u16(),
        })
    } else {
        Err(FetchError::Server {
            status: status.as_u16(),
        })
    }
}

/// Stateless reqwest client for the WordPress REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Build a client for the given API base, e.g.
    /// `https://radioteca.net/wp-json/wp/v2`.
    pub fn new(base: &str) -> Result<Self, FetchError> {
        // A trailing slash so joins append instead of replacing the
        // last path segment.
        let base = Url::parse(&format!("{}/", base.trim_end_matches('/')))?;
        let client = client_builder().build().map_err(FetchError::from)?;
        Ok(ApiClient { client, base })
    }

    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url, FetchError> {
        let mut url = self.base.join(path)?;
        url.query_pairs_mut().extend_pairs(params);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        info!("GET {}", url);
        let resp = self.client.get(url).send().await.map_err(FetchError::from)?;
        check_status(resp.status())?;
        resp.json::<T>().await.map_err(FetchError::from)
    }
}

#[async_trait]
impl RemoteSource for ApiClient {
    async fn programs(&self) -> Result<Vec<Program>, FetchError> {
        let url = self.endpoint(
            "radio",
            &[("per_page", super::PROGRAMS_PER_PAGE.to_string())],
        )?;
        let docs: Vec<TermDocument> = self.get_json(url).await?;
        Ok(docs.into_iter().map(Program::from).collect())
    }

    async fn episodes_for_program(
        &self,
        program_id: i32,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Episode>, FetchError> {
        let url = self.endpoint(
            "posts",
            &[
                ("radio", program_id.to_string()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
                ("orderby", "date".into()),
                ("order", "desc".into()),
                ("_embed", EMBED.into()),
            ],
        )?;
        let docs: Vec<PostDocument> = self.get_json(url).await?;
        Ok(docs.into_iter().map(Episode::from_document).collect())
    }

    async fn episodes(&self, page: u32, per_page: u32) -> Result<Vec<Episode>, FetchError> {
        let url = self.endpoint(
            "posts",
            &[
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
                ("orderby", "date".into()),
                ("order", "desc".into()),
                ("_embed", EMBED.into()),
            ],
        )?;
        let docs: Vec<PostDocument> = self.get_json(url).await?;
        Ok(docs.into_iter().map(Episode::from_document).collect())
    }

    async fn episode(&self, id: i32) -> Result<Option<Episode>, FetchError> {
        let url = self.endpoint(&format!("posts/{}", id), &[("_embed", EMBED.into())])?;

        info!("GET {}", url);
        let resp = self.client.get(url).send().await.map_err(FetchError::from)?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        check_status(resp.status())?;

        let doc: PostDocument = resp.json().await.map_err(FetchError::from)?;
        Ok(Some(Episode::from_document(doc)))
    }

    async fn search_episodes(&self, term: &str) -> Result<Vec<Episode>, FetchError> {
        let term = term.trim();
        if term.chars().count() < MIN_SEARCH_LEN {
            debug!("search term {:?} below minimum length, skipping", term);
            return Ok(Vec::new());
        }

        let url = self.endpoint(
            "posts",
            &[
                ("search", term.to_string()),
                ("orderby", "date".into()),
                ("order", "desc".into()),
                ("_embed", EMBED.into()),
            ],
        )?;
        let docs: Vec<PostDocument> = self.get_json(url).await?;
        Ok(docs.into_iter().map(Episode::from_document).collect())
    }
}
