// utils.rs
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

//! Helper functions.

/// Sanitize rendered html content.
///
/// Keeps the markup the default ammonia whitelist allows, minus `rel`
/// attributes on `<a>` tags.
pub(crate) fn sanitize_html(text: &str) -> String {
    ammonia::Builder::new()
        .link_rel(None)
        .clean(text.trim())
        .to_string()
}

/// Strip every tag, leaving plain text. Used for titles and names.
pub(crate) fn sanitize_text(text: &str) -> String {
    ammonia::Builder::empty().clean(text.trim()).to_string()
}
