// episode.rs
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

use derive_builder::Builder;

use crate::api::data::{PostDocument, PROGRAM_TAXONOMY};
use crate::models::CachedEpisode;
use crate::utils::{sanitize_html, sanitize_text};

/// A featured image attached to an episode.
///
/// Only `source_uri` survives the cache round trip; the rest is
/// available while the record is fresh from the network.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeaturedMedia {
    source_uri: String,
    alt: Option<String>,
}

impl FeaturedMedia {
    pub(crate) fn new(source_uri: String, alt: Option<String>) -> Self {
        FeaturedMedia { source_uri, alt }
    }

    /// Reconstruct a media entry from a cached image uri.
    pub(crate) fn from_uri(uri: String) -> Self {
        FeaturedMedia {
            source_uri: uri,
            alt: None,
        }
    }

    /// Get the image location.
    pub fn source_uri(&self) -> &str {
        &self.source_uri
    }

    /// Get the alternative text, when the API provided one.
    pub fn alt(&self) -> Option<&str> {
        self.alt.as_deref()
    }
}

/// Domain model of an episode.
///
/// Unlike the cached row, an episode may declare membership in several
/// programs and carry more than one media entry.
#[derive(Debug, Clone, Default, Builder, PartialEq)]
#[builder(default)]
#[builder(derive(Debug))]
#[builder(setter(into))]
pub struct Episode {
    id: i32,
    title: String,
    content: Option<String>,
    archive_uri: Option<String>,
    media: Vec<FeaturedMedia>,
    published: String,
    duration: String,
    programs: Vec<i32>,
}

impl Episode {
    /// Parse a `PostDocument` into an `Episode`.
    pub(crate) fn from_document(doc: PostDocument) -> Episode {
        let embedded = doc.embedded.unwrap_or_default();

        let media = embedded
            .media
            .into_iter()
            .map(|m| FeaturedMedia::new(m.source_url, m.alt_text))
            .collect();

        // The `_embedded` terms come grouped per taxonomy; only the
        // program taxonomy contributes memberships.
        let programs = embedded
            .terms
            .into_iter()
            .flatten()
            .filter(|t| t.taxonomy == PROGRAM_TAXONOMY)
            .map(|t| t.id)
            .collect();

        let content = doc
            .content
            .map(|c| sanitize_html(&c.rendered))
            .filter(|c| !c.is_empty());

        Episode {
            id: doc.id,
            title: sanitize_text(&doc.title.rendered),
            content,
            archive_uri: doc.meta.archive_url,
            media,
            published: doc.date,
            duration: doc.meta.duration.unwrap_or_default(),
            programs,
        }
    }

    /// Get the episode `id`.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Get the episode `title`.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the episode `content`, sanitized html.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Get the `archive_uri`.
    ///
    /// Location of the playable media file.
    pub fn archive_uri(&self) -> Option<&str> {
        self.archive_uri.as_deref()
    }

    /// Get the featured media entries.
    pub fn media(&self) -> &[FeaturedMedia] {
        &self.media
    }

    /// Get the publication date, as the API formatted it.
    ///
    /// Opaque to this layer; the server already orders by it.
    pub fn published(&self) -> &str {
        &self.published
    }

    /// Get the `duration`, a formatted string such as `"58:30"`.
    pub fn duration(&self) -> &str {
        &self.duration
    }

    /// Ids of the programs this episode belongs to.
    pub fn programs(&self) -> &[i32] {
        &self.programs
    }
}

impl From<CachedEpisode> for Episode {
    /// Lift a cached row back into the domain shape.
    ///
    /// The single stored membership becomes a one-element list, the
    /// single stored image uri a one-element media list.
    fn from(row: CachedEpisode) -> Episode {
        Episode {
            id: row.id,
            title: row.title,
            content: row.content,
            archive_uri: row.archive_uri,
            media: row
                .image_uri
                .map(|uri| vec![FeaturedMedia::from_uri(uri)])
                .unwrap_or_default(),
            published: row.published,
            duration: row.duration,
            programs: vec![row.program_id],
        }
    }
}
