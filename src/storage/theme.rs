/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::storage::persistent_store::{Backend, Collection, PersistentStore};
use anyhow::Error;
use std::fmt;

/// Display preference. Anything unrecognized in the store reads as light.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
	#[default]
	Light,
	Dark,
}

impl Theme {
	pub fn load<B: Backend>(store: &PersistentStore<B>) -> Theme {
		match store.get_str(Collection::Theme).as_deref() {
			Some("dark") => Theme::Dark,
			_ => Theme::Light,
		}
	}

	pub fn save<B: Backend>(
		&self,
		store: &mut PersistentStore<B>,
	) -> Result<(), Error> {
		store.set_str(Collection::Theme, self.as_str())
	}

	pub fn toggled(&self) -> Theme {
		match self {
			Theme::Light => Theme::Dark,
			Theme::Dark => Theme::Light,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Theme::Light => "light",
			Theme::Dark => "dark",
		}
	}
}

impl fmt::Display for Theme {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}
