// new_program.rs
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
use diesel::prelude::*;

use crate::models::Program;
use crate::schema::programs;

/// Insertable row for the programs table.
#[derive(Insertable)]
#[diesel(table_name = programs)]
#[derive(Debug, Clone, Default, Builder, PartialEq)]
#[builder(default)]
#[builder(derive(Debug))]
#[builder(setter(into))]
pub(crate) struct NewProgram {
    id: i32,
    name: String,
    slug: String,
    description: Option<String>,
    image_uri: Option<String>,
    episode_count: Option<i32>,
}

impl From<&Program> for NewProgram {
    fn from(p: &Program) -> NewProgram {
        NewProgram {
            id: p.id(),
            name: p.name().to_owned(),
            slug: p.slug().to_owned(),
            description: p.description().map(str::to_owned),
            image_uri: p.image_uri().map(str::to_owned),
            episode_count: p.episode_count(),
        }
    }
}

impl PartialEq<Program> for NewProgram {
    fn eq(&self, other: &Program) -> bool {
        (self.id == other.id())
            && (self.name == other.name())
            && (self.slug == other.slug())
            && (self.description.as_deref() == other.description())
            && (self.image_uri.as_deref() == other.image_uri())
            && (self.episode_count == other.episode_count())
    }
}

// Ignore the following getters. They are used in unit tests mainly.
impl NewProgram {
    #[allow(dead_code)]
    pub(crate) fn id(&self) -> i32 {
        self.id
    }

    #[allow(dead_code)]
    pub(crate) fn name(&self) -> &str {
        &self.name
    }
}
