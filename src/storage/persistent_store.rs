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
use anyhow::Error;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
#[cfg(test)]
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// The three independent things kur remembers between runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collection {
	Theme,
	Favorites,
	History,
}

impl Collection {
	pub fn key(&self) -> &'static str {
		match self {
			Collection::Theme => "kur_theme",
			Collection::Favorites => "kur_favorites",
			Collection::History => "kur_history",
		}
	}
}

/// Durable key-value storage underneath the store. Reads never fail: an
/// unreadable value is reported as absent.
pub trait Backend {
	fn read(&self, key: &str) -> Option<Value>;
	fn write(&mut self, key: &str, value: Value) -> Result<(), Error>;
	fn remove(&mut self, key: &str) -> Result<(), Error>;
}

/// Keeps every key in a single JSON object on disk. Each write replaces
/// the whole file through a rename, so a crash leaves either the old or
/// the new contents.
pub struct FileBackend {
	path: PathBuf,
}

impl FileBackend {
	pub fn new(path: PathBuf) -> Self {
		Self { path }
	}

	/// Loads the file as a map. Missing and malformed files both come back
	/// empty; the latter gets overwritten on the next write.
	fn load(&self) -> Map<String, Value> {
		let content = match fs::read_to_string(&self.path) {
			Ok(c) => c,
			Err(_) => return Map::new(),
		};

		match serde_json::from_str::<Value>(&content) {
			Ok(Value::Object(map)) => map,
			_ => {
				warn!(
					"store {} is not a JSON object; treating it as empty",
					self.path.display()
				);
				Map::new()
			},
		}
	}

	fn save(&self, map: Map<String, Value>) -> Result<(), Error> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent)?;
		}

		let tmp = self.path.with_extension("json.tmp");
		fs::write(&tmp, serde_json::to_string_pretty(&Value::Object(map))?)?;
		fs::rename(&tmp, &self.path)?;
		Ok(())
	}
}

impl Backend for FileBackend {
	fn read(&self, key: &str) -> Option<Value> {
		self.load().remove(key)
	}

	fn write(&mut self, key: &str, value: Value) -> Result<(), Error> {
		let mut map = self.load();
		map.insert(key.to_string(), value);
		self.save(map)
	}

	fn remove(&mut self, key: &str) -> Result<(), Error> {
		let mut map = self.load();
		if map.remove(key).is_some() {
			self.save(map)?;
		}
		Ok(())
	}
}

/// Backend that lives only as long as the process.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryBackend {
	entries: BTreeMap<String, Value>,
}

#[cfg(test)]
impl Backend for MemoryBackend {
	fn read(&self, key: &str) -> Option<Value> {
		self.entries.get(key).cloned()
	}

	fn write(&mut self, key: &str, value: Value) -> Result<(), Error> {
		self.entries.insert(key.to_string(), value);
		Ok(())
	}

	fn remove(&mut self, key: &str) -> Result<(), Error> {
		self.entries.remove(key);
		Ok(())
	}
}

/// Typed access to the collections. Every `set` replaces the collection
/// wholesale; there are no partial writes.
pub struct PersistentStore<B: Backend> {
	backend: B,
}

impl<B: Backend> PersistentStore<B> {
	pub fn new(backend: B) -> Self {
		Self { backend }
	}

	/// Returns the records of a collection. Missing or malformed data is
	/// "no data yet" and yields an empty list.
	pub fn get<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
		let value = match self.backend.read(collection.key()) {
			Some(v) => v,
			None => return Vec::new(),
		};

		serde_json::from_value(value).unwrap_or_else(|e| {
			warn!("discarding malformed {}: {}", collection.key(), e);
			Vec::new()
		})
	}

	pub fn set<T: Serialize>(
		&mut self,
		collection: Collection,
		records: &[T],
	) -> Result<(), Error> {
		self.backend
			.write(collection.key(), serde_json::to_value(records)?)
	}

	/// Scalar read for collections that hold a single string.
	pub fn get_str(&self, collection: Collection) -> Option<String> {
		match self.backend.read(collection.key()) {
			Some(Value::String(s)) => Some(s),
			_ => None,
		}
	}

	pub fn set_str(
		&mut self,
		collection: Collection,
		value: &str,
	) -> Result<(), Error> {
		self.backend
			.write(collection.key(), Value::String(value.to_string()))
	}

	pub fn remove(&mut self, collection: Collection) -> Result<(), Error> {
		self.backend.remove(collection.key())
	}

	#[cfg(test)]
	pub fn backend(&self) -> &B {
		&self.backend
	}

	#[cfg(test)]
	pub fn backend_mut(&mut self) -> &mut B {
		&mut self.backend
	}
}
