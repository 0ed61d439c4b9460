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
use crate::config::config_file::Config;
use anyhow::{anyhow, bail, Error};
use dirs::{data_dir, home_dir};
use std::fs;
use std::fs::File;
use std::path::PathBuf;

/// Resolves where kur keeps its files on this machine.
pub struct Filesystem {
	home: Option<PathBuf>,
	data: Option<PathBuf>,
}

impl Filesystem {
	pub fn new() -> Self {
		Self {
			home: home_dir(),
			data: data_dir(),
		}
	}

	/// Fetches the config from the given path, or default path if none.
	/// The default file is created empty on first use; a custom path
	/// must already exist.
	pub fn get_config(
		&self,
		custom_config_path: Option<&String>,
	) -> Result<Config, Error> {
		let config_path = match &custom_config_path {
			None => match &self.home {
				Some(home) => home.join(".config/kur/config.toml"),
				None => bail!("Unable to determine home directory"),
			},
			Some(p) => PathBuf::from(p),
		};

		// create empty config file if it doesn't exist
		if !config_path.exists() && custom_config_path.is_none() {
			if let Some(parent) = config_path.parent() {
				fs::create_dir_all(parent)?;
			}
			File::create(config_path.clone())?;
		}

		let content = fs::read_to_string(&config_path).map_err(|e| {
			anyhow!("failed to read config {}: {}", config_path.display(), e)
		})?;
		let config: Config = toml::from_str(&content)
			.map_err(|e| anyhow!("failed to parse config: {}", e))?;

		Ok(config)
	}

	/// Picks the store file: the command line wins over the config file,
	/// which wins over the platform data directory.
	pub fn store_path(
		&self,
		custom_store_path: Option<&String>,
		config: &Config,
	) -> Result<PathBuf, Error> {
		if let Some(p) = custom_store_path.or(config.store_path()) {
			return Ok(PathBuf::from(p));
		}

		match &self.data {
			Some(data) => Ok(data.join("kur/store.json")),
			None => bail!("Unable to determine data directory"),
		}
	}
}
