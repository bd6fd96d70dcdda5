// program.rs
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

use diesel::prelude::*;

use crate::api::data::TermDocument;
use crate::schema::programs;
use crate::utils::{sanitize_html, sanitize_text};

/// Diesel model of the programs table.
///
/// Also the domain record handed to the host layer; a program survives
/// the cache round trip without loss, so one shape serves both.
#[derive(Queryable, Identifiable, PartialEq)]
#[diesel(table_name = programs)]
#[derive(Debug, Clone)]
pub struct Program {
    id: i32,
    name: String,
    slug: String,
    description: Option<String>,
    image_uri: Option<String>,
    episode_count: Option<i32>,
}

impl Program {
    /// Get the program `id`.
    ///
    /// The id of the taxonomy term in the remote API, reused as our
    /// primary key.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Get the program `name`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the program `slug`.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Get the `description`.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Get the `image_uri`.
    ///
    /// Location of the program cover image, when the API declares one.
    pub fn image_uri(&self) -> Option<&str> {
        self.image_uri.as_deref()
    }

    /// Number of episodes the remote end reports for this program.
    pub fn episode_count(&self) -> Option<i32> {
        self.episode_count
    }
}

impl From<TermDocument> for Program {
    fn from(doc: TermDocument) -> Program {
        let description = Some(sanitize_html(&doc.description))
            .filter(|d| !d.is_empty());

        Program {
            id: doc.id,
            name: sanitize_text(&doc.name),
            slug: doc.slug,
            description,
            image_uri: doc.meta.image_url,
            episode_count: doc.count,
        }
    }
}
