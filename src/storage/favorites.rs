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
use crate::util::currency::CurrencyCode;
use anyhow::Error;
use log::info;
use serde::{Deserialize, Serialize};

/// A pair the user starred. At most one per ordered (base, quote).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FavoritePair {
	pub base: CurrencyCode,
	pub quote: CurrencyCode,
	pub name: String,
}

impl FavoritePair {
	fn is(&self, base: &CurrencyCode, quote: &CurrencyCode) -> bool {
		&self.base == base && &self.quote == quote
	}
}

/// What a mutation actually did, so the caller can tell the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FavoriteChange {
	Added,
	AlreadyExists,
	Removed,
	NotPresent,
}

/// In-memory mirror of the favorites collection. Every mutation reads the
/// store, writes it back in full, and refreshes the mirror from the store.
pub struct FavoritesManager {
	favorites: Vec<FavoritePair>,
}

impl FavoritesManager {
	pub fn load<B: Backend>(store: &PersistentStore<B>) -> Self {
		Self {
			favorites: store.get(Collection::Favorites),
		}
	}

	pub fn list(&self) -> &[FavoritePair] {
		&self.favorites
	}

	/// Order matters: USD/TRY and TRY/USD are different favorites.
	pub fn is_favorite(&self, base: &CurrencyCode, quote: &CurrencyCode) -> bool {
		self.favorites.iter().any(|f| f.is(base, quote))
	}

	pub fn add<B: Backend>(
		&mut self,
		store: &mut PersistentStore<B>,
		base: &CurrencyCode,
		quote: &CurrencyCode,
		name: &str,
	) -> Result<FavoriteChange, Error> {
		let mut favorites: Vec<FavoritePair> = store.get(Collection::Favorites);

		if favorites.iter().any(|f| f.is(base, quote)) {
			self.reload(store);
			return Ok(FavoriteChange::AlreadyExists);
		}

		favorites.push(FavoritePair {
			base: base.clone(),
			quote: quote.clone(),
			name: name.to_string(),
		});
		store.set(Collection::Favorites, &favorites)?;
		self.reload(store);

		info!("added favorite {}/{}", base, quote);
		Ok(FavoriteChange::Added)
	}

	/// Removing something that isn't there is not an error.
	pub fn remove<B: Backend>(
		&mut self,
		store: &mut PersistentStore<B>,
		base: &CurrencyCode,
		quote: &CurrencyCode,
	) -> Result<FavoriteChange, Error> {
		let favorites: Vec<FavoritePair> = store.get(Collection::Favorites);
		let before = favorites.len();

		let kept: Vec<FavoritePair> =
			favorites.into_iter().filter(|f| !f.is(base, quote)).collect();
		let change = if kept.len() < before {
			FavoriteChange::Removed
		} else {
			FavoriteChange::NotPresent
		};

		store.set(Collection::Favorites, &kept)?;
		self.reload(store);

		info!("removed favorite {}/{}", base, quote);
		Ok(change)
	}

	/// The single star affordance: removes when present, adds otherwise.
	pub fn toggle<B: Backend>(
		&mut self,
		store: &mut PersistentStore<B>,
		base: &CurrencyCode,
		quote: &CurrencyCode,
		name: &str,
	) -> Result<FavoriteChange, Error> {
		self.reload(store);
		if self.is_favorite(base, quote) {
			self.remove(store, base, quote)
		} else {
			self.add(store, base, quote, name)
		}
	}

	fn reload<B: Backend>(&mut self, store: &PersistentStore<B>) {
		self.favorites = store.get(Collection::Favorites);
	}
}
