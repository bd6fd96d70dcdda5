// data.rs
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

//! Wire documents of the WordPress REST API.

use serde::Deserialize;

/// Name of the custom taxonomy whose terms are programs.
pub(crate) const PROGRAM_TAXONOMY: &str = "radio";

/// A rendered field. WordPress wraps html-rendered values this way.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Rendered {
    pub rendered: String,
}

/// A term of the program taxonomy, as `GET /radio` returns it.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TermDocument {
    pub id: i32,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub count: Option<i32>,
    #[serde(default)]
    pub meta: TermMeta,
}

/// Registered meta fields on a program term.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct TermMeta {
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A post, as the `/posts` endpoints return it.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PostDocument {
    pub id: i32,
    pub date: String,
    pub title: Rendered,
    #[serde(default)]
    pub content: Option<Rendered>,
    #[serde(default)]
    pub meta: PostMeta,
    // Present when the request asked for `_embed`.
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<EmbeddedDocuments>,
}

/// Registered meta fields on a post.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PostMeta {
    #[serde(default)]
    pub archive_url: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

/// The `_embedded` related resources of a post.
///
/// Terms come grouped in one list per taxonomy requested.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct EmbeddedDocuments {
    #[serde(rename = "wp:featuredmedia", default)]
    pub media: Vec<MediaDocument>,
    #[serde(rename = "wp:term", default)]
    pub terms: Vec<Vec<TermRef>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MediaDocument {
    pub source_url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TermRef {
    pub id: i32,
    #[serde(default)]
    pub taxonomy: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Episode, Program};
    use anyhow::Result;
    use pretty_assertions::assert_eq;

    use std::fs;

    #[test]
    fn test_parse_program_terms() -> Result<()> {
        let input = fs::read_to_string("tests/fixtures/programs.json")?;
        let docs: Vec<TermDocument> = serde_json::from_str(&input)?;
        assert_eq!(docs.len(), 3);

        let programs: Vec<Program> = docs.into_iter().map(Program::from).collect();

        assert_eq!(programs[0].id(), 7);
        assert_eq!(programs[0].name(), "Sapiens XXI");
        assert_eq!(programs[0].slug(), "sapiens-xxi");
        assert_eq!(
            programs[0].description(),
            Some("Divulgación científica semanal.")
        );
        assert_eq!(
            programs[0].image_uri(),
            Some("https://radioteca.net/media/sapiens.jpg")
        );
        assert_eq!(programs[0].episode_count(), Some(240));

        // Bare term: no description, no meta image, no count.
        assert_eq!(programs[2].description(), None);
        assert_eq!(programs[2].image_uri(), None);
        Ok(())
    }

    #[test]
    fn test_parse_post_listing() -> Result<()> {
        let input = fs::read_to_string("tests/fixtures/posts.json")?;
        let docs: Vec<PostDocument> = serde_json::from_str(&input)?;
        assert_eq!(docs.len(), 2);

        let episodes: Vec<Episode> = docs.into_iter().map(Episode::from_document).collect();

        let first = &episodes[0];
        assert_eq!(first.id(), 2401);
        assert_eq!(first.title(), "La conquista del espacio");
        assert_eq!(
            first.content(),
            Some("<p>Carrera espacial y guerra fría.</p>")
        );
        assert_eq!(
            first.archive_uri(),
            Some("https://archive.radioteca.net/audio/2401.mp3")
        );
        assert_eq!(first.published(), "2026-05-02T18:00:00");
        assert_eq!(first.duration(), "58:30");
        // Both program memberships survive; the category term does not
        // contribute one.
        assert_eq!(first.programs(), [7, 12]);
        assert_eq!(first.media().len(), 1);
        assert_eq!(
            first.media()[0].source_uri(),
            "https://radioteca.net/media/espacio.jpg"
        );
        assert_eq!(first.media()[0].alt(), Some("Cohete en la rampa"));

        // Minimal post: no embeds, no meta, no content.
        let second = &episodes[1];
        assert_eq!(second.content(), None);
        assert_eq!(second.archive_uri(), None);
        assert_eq!(second.duration(), "");
        assert!(second.programs().is_empty());
        assert!(second.media().is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_single_post_sanitizes_markup() -> Result<()> {
        let input = fs::read_to_string("tests/fixtures/post_single.json")?;
        let doc: PostDocument = serde_json::from_str(&input)?;
        let episode = Episode::from_document(doc);

        // Markup is stripped from the title and scripts from the body.
        assert_eq!(episode.title(), "Entrevista: memoria sonora");
        assert_eq!(
            episode.content(),
            Some("<p>Una hora con el archivo de la radio.</p>")
        );
        assert_eq!(episode.programs(), [12]);
        Ok(())
    }

    #[test]
    fn test_parse_empty_listing() -> Result<()> {
        let docs: Vec<PostDocument> = serde_json::from_str("[]")?;
        assert!(docs.is_empty());
        Ok(())
    }
}
