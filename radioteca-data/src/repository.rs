// repository.rs
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

//! Read-through cache over the remote source.

use log::warn;

use crate::api::RemoteSource;
use crate::database::Database;
use crate::errors::{Error, FetchError};
use crate::models::{CachedEpisode, Episode, NewProgram, Program};

/// Composes a [`RemoteSource`] and the local store.
///
/// Every read tries the remote first and persists what it got; on a
/// transient failure it serves the cache instead, and propagates the
/// original error only when the cache has nothing to offer. An
/// [`FetchError::Api`] rejection is permanent and never falls back.
///
/// The repository is stateless per call: pagination bookkeeping (page
/// counter, has-more) belongs to the caller.
#[derive(Debug)]
pub struct Repository<S> {
    source: S,
    db: Database,
}

impl<S> Repository<S>
where
    S: RemoteSource + Send + Sync,
{
    /// Compose a remote source with the local store.
    pub fn new(source: S, db: Database) -> Self {
        Repository { source, db }
    }

    /// Fetch the program listing, refreshing the cached table
    /// wholesale on success.
    pub async fn programs(&self) -> Result<Vec<Program>, Error> {
        match self.source.programs().await {
            Ok(fresh) => {
                let rows: Vec<NewProgram> = fresh.iter().map(NewProgram::from).collect();
                self.db.replace_all_programs(&rows)?;
                Ok(fresh)
            }
            Err(err) => {
                let cached = self.fall_back(err, |db| db.get_programs())?;
                Ok(cached)
            }
        }
    }

    /// A single program, served from the cache.
    ///
    /// When the id is not cached yet the program table is refreshed
    /// from remote once and re-read.
    pub async fn program(&self, id: i32) -> Result<Option<Program>, Error> {
        if let Some(program) = self.db.get_program(id)? {
            return Ok(Some(program));
        }

        self.programs().await?;
        Ok(self.db.get_program(id)?)
    }

    /// One page of a program's episodes.
    ///
    /// On success the program's cached set is swapped for the fetched
    /// page in a single transaction, every row scoped to `program_id`.
    pub async fn episodes_for_program(
        &self,
        program_id: i32,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Episode>, Error> {
        match self
            .source
            .episodes_for_program(program_id, page, per_page)
            .await
        {
            Ok(fresh) => {
                let rows: Vec<CachedEpisode> = fresh
                    .iter()
                    .map(|ep| CachedEpisode::from_episode_in(ep, program_id))
                    .collect();
                self.db.replace_program_episodes(program_id, &rows)?;
                Ok(fresh)
            }
            Err(err) => {
                let cached = self.fall_back(err, |db| db.get_program_episodes(program_id))?;
                Ok(cached.into_iter().map(Episode::from).collect())
            }
        }
    }

    /// One page of episodes across all programs.
    pub async fn all_episodes(&self, page: u32, per_page: u32) -> Result<Vec<Episode>, Error> {
        match self.source.episodes(page, per_page).await {
            Ok(fresh) => {
                self.db.upsert_episodes(&cache_rows(&fresh))?;
                Ok(fresh)
            }
            Err(err) => {
                let cached = self.fall_back(err, |db| db.get_episodes())?;
                Ok(cached.into_iter().map(Episode::from).collect())
            }
        }
    }

    /// A single episode; `None` when the remote end has no such id.
    pub async fn episode(&self, id: i32) -> Result<Option<Episode>, Error> {
        match self.source.episode(id).await {
            Ok(Some(fresh)) => {
                self.db.upsert_episodes(&cache_rows(std::slice::from_ref(&fresh)))?;
                Ok(Some(fresh))
            }
            Ok(None) => Ok(None),
            Err(err) if err.is_permanent() => Err(err.into()),
            Err(err) => match self.db.get_episode(id)? {
                Some(row) => {
                    warn!("episode fetch failed, serving cache: {}", err);
                    Ok(Some(row.into()))
                }
                None => Err(err.into()),
            },
        }
    }

    /// Search episodes by term.
    ///
    /// On a transient failure the local substring search answers
    /// instead, empty result included -- an empty search result is a
    /// legitimate answer and indistinguishable from a cold cache.
    pub async fn search_episodes(&self, term: &str) -> Result<Vec<Episode>, Error> {
        match self.source.search_episodes(term).await {
            Ok(fresh) => {
                self.db.upsert_episodes(&cache_rows(&fresh))?;
                Ok(fresh)
            }
            Err(err) if err.is_permanent() => Err(err.into()),
            Err(err) => {
                warn!("search failed, serving local matches: {}", err);
                let cached = self.db.search_episodes(term)?;
                Ok(cached.into_iter().map(Episode::from).collect())
            }
        }
    }

    /// The shared fallback arm: permanent errors propagate untouched,
    /// transient ones are answered from the cache unless it is empty,
    /// in which case the original error surfaces.
    fn fall_back<T>(
        &self,
        err: FetchError,
        read: impl FnOnce(&Database) -> Result<Vec<T>, crate::errors::DataError>,
    ) -> Result<Vec<T>, Error> {
        if err.is_permanent() {
            return Err(err.into());
        }

        let cached = read(&self.db)?;
        if cached.is_empty() {
            Err(err.into())
        } else {
            warn!("fetch failed, serving cache: {}", err);
            Ok(cached)
        }
    }
}

/// Flatten episodes for a general upsert, dropping (and logging) the
/// ones that declare no program membership.
fn cache_rows(episodes: &[Episode]) -> Vec<CachedEpisode> {
    episodes
        .iter()
        .filter_map(|ep| {
            CachedEpisode::from_episode(ep)
                .map_err(|err| warn!("not caching episode: {}", err))
                .ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_db;
    use crate::models::EpisodeBuilder;
    use anyhow::Result;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Canned remote end. Counts the calls that reach it.
    struct StubSource {
        response: StubResponse,
        calls: AtomicUsize,
    }

    enum StubResponse {
        Programs(Vec<Program>),
        Episodes(Vec<Episode>),
        OneEpisode(Option<Episode>),
        Offline,
        ServerDown,
        Forbidden,
    }

    impl StubSource {
        fn new(response: StubResponse) -> Self {
            StubSource {
                response,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn error(&self) -> FetchError {
            match self.response {
                StubResponse::Offline => FetchError::Connectivity("network unreachable".into()),
                StubResponse::ServerDown => FetchError::Server { status: 503 },
                StubResponse::Forbidden => FetchError::Api { status: 403 },
                _ => unreachable!("stub holds a success response"),
            }
        }

        fn episodes(&self) -> Result<Vec<Episode>, FetchError> {
            match &self.response {
                StubResponse::Episodes(eps) => Ok(eps.clone()),
                _ => Err(self.error()),
            }
        }
    }

    #[async_trait]
    impl RemoteSource for StubSource {
        async fn programs(&self) -> Result<Vec<Program>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                StubResponse::Programs(programs) => Ok(programs.clone()),
                _ => Err(self.error()),
            }
        }

        async fn episodes_for_program(
            &self,
            _program_id: i32,
            _page: u32,
            _per_page: u32,
        ) -> Result<Vec<Episode>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.episodes()
        }

        async fn episodes(&self, _page: u32, _per_page: u32) -> Result<Vec<Episode>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.episodes()
        }

        async fn episode(&self, _id: i32) -> Result<Option<Episode>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                StubResponse::OneEpisode(ep) => Ok(ep.clone()),
                _ => Err(self.error()),
            }
        }

        async fn search_episodes(&self, _term: &str) -> Result<Vec<Episode>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.episodes()
        }
    }

    fn sample_programs() -> Vec<Program> {
        let docs: Vec<crate::api::data::TermDocument> =
            serde_json::from_str(&std::fs::read_to_string("tests/fixtures/programs.json").unwrap())
                .unwrap();
        docs.into_iter().map(Program::from).collect()
    }

    fn sample_episode(id: i32, programs: Vec<i32>, title: &str, published: &str) -> Episode {
        EpisodeBuilder::default()
            .id(id)
            .title(title)
            .published(published)
            .duration("30:00")
            .programs(programs)
            .build()
            .unwrap()
    }

    fn seed_programs(db: &Database) {
        let rows: Vec<NewProgram> = sample_programs().iter().map(NewProgram::from).collect();
        db.replace_all_programs(&rows).unwrap();
    }

    #[tokio::test]
    async fn test_programs_persist_on_success() -> Result<()> {
        let (db, _file) = test_db();
        let repo = Repository::new(StubSource::new(StubResponse::Programs(sample_programs())), db.clone());

        let fresh = repo.programs().await?;
        assert_eq!(fresh.len(), 3);

        // Cached for the next offline read, ordered by name.
        let names: Vec<_> = db.get_programs()?.iter().map(|p| p.name().to_owned()).collect();
        assert_eq!(names, ["Madrugada", "Memoria", "Sapiens XXI"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_programs_offline_serves_cache() -> Result<()> {
        let (db, _file) = test_db();
        seed_programs(&db);
        let repo = Repository::new(StubSource::new(StubResponse::Offline), db);

        let programs = repo.programs().await?;
        assert_eq!(programs.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_programs_offline_empty_cache_raises() {
        let (db, _file) = test_db();
        let repo = Repository::new(StubSource::new(StubResponse::Offline), db);

        let err = repo.programs().await.unwrap_err();
        assert!(
            matches!(err, Error::Fetch(FetchError::Connectivity(_))),
            "{:?}",
            err
        );
    }

    #[tokio::test]
    async fn test_programs_server_error_serves_cache() -> Result<()> {
        let (db, _file) = test_db();
        seed_programs(&db);
        let repo = Repository::new(StubSource::new(StubResponse::ServerDown), db);

        assert_eq!(repo.programs().await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_programs_api_error_never_falls_back() {
        let (db, _file) = test_db();
        seed_programs(&db);
        let repo = Repository::new(StubSource::new(StubResponse::Forbidden), db);

        let err = repo.programs().await.unwrap_err();
        assert!(
            matches!(err, Error::Fetch(FetchError::Api { status: 403 })),
            "{:?}",
            err
        );
    }

    #[tokio::test]
    async fn test_program_reads_through_the_cache() -> Result<()> {
        let (db, _file) = test_db();
        let source = StubSource::new(StubResponse::Programs(sample_programs()));
        let repo = Repository::new(source, db);

        // Cold cache: one remote refresh.
        let program = repo.program(7).await?.unwrap();
        assert_eq!(program.name(), "Sapiens XXI");
        assert_eq!(repo.source.calls(), 1);

        // Warm cache: no further remote traffic.
        assert!(repo.program(12).await?.is_some());
        assert_eq!(repo.source.calls(), 1);

        // Unknown id: one more refresh, then a clean None.
        assert!(repo.program(999).await?.is_none());
        assert_eq!(repo.source.calls(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_refresh_scopes_rows_to_the_program() -> Result<()> {
        let (db, _file) = test_db();
        // Both episodes declare program 3 first; the refresh is for 7.
        let fetched = vec![
            sample_episode(1, vec![3, 7], "Uno", "2026-01-01T00:00:00"),
            sample_episode(2, vec![3, 7], "Dos", "2026-01-02T00:00:00"),
        ];
        let repo = Repository::new(StubSource::new(StubResponse::Episodes(fetched)), db.clone());

        repo.episodes_for_program(7, 1, 100).await?;

        let rows = db.get_program_episodes(7)?;
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.program_id == 7));
        assert!(db.get_program_episodes(3)?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_refresh_replaces_the_cached_set() -> Result<()> {
        let (db, _file) = test_db();
        db.upsert_episodes(&[
            CachedEpisode::from_episode_in(
                &sample_episode(1, vec![7], "Viejo", "2026-01-01T00:00:00"),
                7,
            ),
            CachedEpisode::from_episode_in(
                &sample_episode(90, vec![12], "Ajeno", "2026-01-01T00:00:00"),
                12,
            ),
        ])?;

        let fetched = vec![sample_episode(2, vec![7], "Nuevo", "2026-02-01T00:00:00")];
        let repo = Repository::new(StubSource::new(StubResponse::Episodes(fetched)), db.clone());

        repo.episodes_for_program(7, 1, 100).await?;

        let ids: Vec<_> = db.get_program_episodes(7)?.iter().map(|e| e.id).collect();
        assert_eq!(ids, [2]);
        // Other programs' rows are untouched.
        assert_eq!(db.get_program_episodes(12)?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_program_episodes_offline_serves_cache() -> Result<()> {
        let (db, _file) = test_db();
        db.upsert_episodes(&[CachedEpisode::from_episode_in(
            &sample_episode(1, vec![7], "Uno", "2026-01-01T00:00:00"),
            7,
        )])?;
        let repo = Repository::new(StubSource::new(StubResponse::Offline), db);

        let episodes = repo.episodes_for_program(7, 1, 100).await?;
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].programs(), [7]);
        Ok(())
    }

    #[tokio::test]
    async fn test_program_episodes_offline_empty_cache_raises() {
        let (db, _file) = test_db();
        let repo = Repository::new(StubSource::new(StubResponse::Offline), db);

        let err = repo.episodes_for_program(7, 1, 100).await.unwrap_err();
        assert!(matches!(err, Error::Fetch(FetchError::Connectivity(_))));
    }

    #[tokio::test]
    async fn test_missing_episode_is_none() -> Result<()> {
        let (db, _file) = test_db();
        let repo = Repository::new(StubSource::new(StubResponse::OneEpisode(None)), db);

        assert_eq!(repo.episode(404404).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_episode_offline_serves_cache() -> Result<()> {
        let (db, _file) = test_db();
        db.upsert_episodes(&[CachedEpisode::from_episode_in(
            &sample_episode(5, vec![7], "Cinco", "2026-01-05T00:00:00"),
            7,
        )])?;
        let repo = Repository::new(StubSource::new(StubResponse::Offline), db);

        let episode = repo.episode(5).await?.unwrap();
        assert_eq!(episode.title(), "Cinco");

        let err = repo.episode(6).await.unwrap_err();
        assert!(matches!(err, Error::Fetch(FetchError::Connectivity(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_membershipless_episode_returned_but_not_cached() -> Result<()> {
        let (db, _file) = test_db();
        let orphan = sample_episode(9, vec![], "Huérfano", "2026-01-09T00:00:00");
        let repo = Repository::new(
            StubSource::new(StubResponse::OneEpisode(Some(orphan))),
            db.clone(),
        );

        assert!(repo.episode(9).await?.is_some());
        assert_eq!(db.get_episode(9)?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_episode_api_error_never_falls_back() -> Result<()> {
        let (db, _file) = test_db();
        db.upsert_episodes(&[CachedEpisode::from_episode_in(
            &sample_episode(5, vec![7], "Cinco", "2026-01-05T00:00:00"),
            7,
        )])?;
        let repo = Repository::new(StubSource::new(StubResponse::Forbidden), db);

        let err = repo.episode(5).await.unwrap_err();
        assert!(matches!(err, Error::Fetch(FetchError::Api { status: 403 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_search_offline_serves_local_matches() -> Result<()> {
        let (db, _file) = test_db();
        db.upsert_episodes(&[CachedEpisode::from_episode_in(
            &sample_episode(1, vec![7], "Historia de la radio", "2026-01-01T00:00:00"),
            7,
        )])?;
        let repo = Repository::new(StubSource::new(StubResponse::Offline), db);

        let hits = repo.search_episodes("radio").await?;
        assert_eq!(hits.len(), 1);

        // Unlike the listings, an empty local result is a valid answer.
        assert!(repo.search_episodes("jazz").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_search_persists_fresh_results() -> Result<()> {
        let (db, _file) = test_db();
        let fetched = vec![sample_episode(8, vec![7], "Ocho", "2026-01-08T00:00:00")];
        let repo = Repository::new(StubSource::new(StubResponse::Episodes(fetched)), db.clone());

        repo.search_episodes("ocho").await?;
        assert!(db.get_episode(8)?.is_some());
        Ok(())
    }
}
