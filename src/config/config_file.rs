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
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Lookback window the chart opens with when a pair is selected.
pub const DEFAULT_CHART_DAYS: u32 = 7;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
	pub api: Option<Api>,
	pub storage: Option<Storage>,
	pub chart: Option<Chart>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Api {
	pub url: Option<String>,
	pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Storage {
	/// Location of the store file holding theme, favorites and history.
	pub path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Chart {
	pub default_days: Option<u32>,
}

impl Config {
	pub fn api_url(&self) -> String {
		self.api
			.as_ref()
			.and_then(|a| a.url.clone())
			.unwrap_or(DEFAULT_API_URL.to_owned())
			.trim_end_matches('/')
			.to_string()
	}

	pub fn timeout(&self) -> Duration {
		Duration::from_secs(
			self.api
				.as_ref()
				.and_then(|a| a.timeout_secs)
				.unwrap_or(DEFAULT_TIMEOUT_SECS),
		)
	}

	pub fn store_path(&self) -> Option<&String> {
		self.storage.as_ref().and_then(|s| s.path.as_ref())
	}

	pub fn default_days(&self) -> u32 {
		self.chart
			.as_ref()
			.and_then(|c| c.default_days)
			.unwrap_or(DEFAULT_CHART_DAYS)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_config_uses_defaults() {
		let config: Config = toml::from_str("").unwrap();
		assert_eq!(config.api_url(), DEFAULT_API_URL);
		assert_eq!(config.timeout(), Duration::from_secs(5));
		assert_eq!(config.default_days(), 7);
		assert!(config.store_path().is_none());
	}

	#[test]
	fn test_full_config() {
		let config: Config = toml::from_str(
			r#"
			[api]
			url = "https://rates.example.com/api/"
			timeout_secs = 12

			[storage]
			path = "/tmp/kur/store.json"

			[chart]
			default_days = 30
			"#,
		)
		.unwrap();

		assert_eq!(config.api_url(), "https://rates.example.com/api");
		assert_eq!(config.timeout(), Duration::from_secs(12));
		assert_eq!(config.store_path().unwrap(), "/tmp/kur/store.json");
		assert_eq!(config.default_days(), 30);
	}
}
