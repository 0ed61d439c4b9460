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
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Nothing listens here, so any request fails fast.
const DEAD_API: &str = "http://127.0.0.1:9/api";

/// An isolated config and store for one test.
struct Fixture {
	_dir: TempDir,
	config: PathBuf,
	store: PathBuf,
}

impl Fixture {
	fn new() -> Self {
		let dir = TempDir::new().unwrap();
		let config = dir.path().join("config.toml");
		let store = dir.path().join("store.json");
		fs::write(&config, "").unwrap();

		Self {
			_dir: dir,
			config,
			store,
		}
	}

	fn with_store(self, content: &str) -> Self {
		fs::write(&self.store, content).unwrap();
		self
	}

	fn kur(&self) -> Command {
		let mut cmd = Command::cargo_bin("kur").unwrap();
		cmd.arg("--config")
			.arg(&self.config)
			.arg("--store")
			.arg(&self.store)
			.arg("--api-url")
			.arg(DEAD_API);
		cmd
	}

	fn stored(&self, key: &str) -> Value {
		let content = fs::read_to_string(&self.store).unwrap();
		let store: Value = serde_json::from_str(&content).unwrap();
		store[key].clone()
	}
}

#[test]
fn test_favorite_add_then_remove() {
	let fx = Fixture::new();

	fx.kur()
		.args(["fav", "add", "usd", "try", "Dollar/Lira"])
		.assert()
		.success()
		.stdout(predicate::str::contains("[success] Dollar/Lira added to favorites"))
		.stdout(predicate::str::contains("★ Dollar/Lira\n  Data unavailable"));

	let favorites = fx.stored("kur_favorites");
	assert_eq!(
		favorites,
		json!([{"base": "USD", "quote": "TRY", "name": "Dollar/Lira"}])
	);

	fx.kur()
		.args(["fav", "add", "USD", "TRY", "Again"])
		.assert()
		.success()
		.stdout(predicate::str::contains(
			"[info] This pair is already in your favorites",
		));
	assert_eq!(fx.stored("kur_favorites").as_array().unwrap().len(), 1);

	fx.kur()
		.args(["fav", "remove", "USD", "TRY"])
		.assert()
		.success()
		.stdout(predicate::str::contains("[success] Removed from favorites"))
		.stdout(predicate::str::contains("No favorites yet"));

	assert_eq!(fx.stored("kur_favorites"), json!([]));
}

#[test]
fn test_theme_toggle_persists() {
	let fx = Fixture::new();

	fx.kur()
		.arg("theme")
		.assert()
		.success()
		.stdout("Theme: light\n");

	fx.kur()
		.args(["theme", "toggle"])
		.assert()
		.success()
		.stdout("[success] Dark mode enabled\n");

	fx.kur()
		.arg("theme")
		.assert()
		.success()
		.stdout("Theme: dark\n");
	assert_eq!(fx.stored("kur_theme"), json!("dark"));
}

#[test]
fn test_format_outputs() {
	let fx = Fixture::new();
	let cases = [
		("1234567", "1.23M\n"),
		("1500", "1.50K\n"),
		("0.005", "0.00500000\n"),
		("0.5", "0.5000\n"),
		("5", "5.00\n"),
	];

	for (input, expected) in cases {
		fx.kur().args(["format", input]).assert().success().stdout(expected);
	}

	fx.kur().arg("format").assert().success().stdout("0.00\n");
}

#[test]
fn test_history_list_and_clear() {
	let fx = Fixture::new().with_store(
		&json!({
			"kur_history": [{
				"from": "USD",
				"to": "TRY",
				"amount": 100.0,
				"result": 3250.0,
				"rate": 32.5,
				"timestamp": "2024-03-05T14:20:00.000Z"
			}]
		})
		.to_string(),
	);

	fx.kur()
		.arg("history")
		.assert()
		.success()
		.stdout(predicate::str::contains("100.00 USD"))
		.stdout(predicate::str::contains("3.25K TRY"))
		.stdout(predicate::str::contains("32.50"));

	fx.kur()
		.args(["history", "clear"])
		.assert()
		.success()
		.stdout("[success] History cleared\n");

	fx.kur()
		.arg("history")
		.assert()
		.success()
		.stdout("No conversions yet\n");
	assert_eq!(fx.stored("kur_history"), Value::Null);
}

#[test]
fn test_corrupt_store_reads_as_empty() {
	let fx = Fixture::new().with_store("{ this is not json");

	fx.kur()
		.arg("history")
		.assert()
		.success()
		.stdout("No conversions yet\n");

	fx.kur()
		.args(["fav", "list"])
		.assert()
		.success()
		.stdout("No favorites yet\n");
}

#[test]
fn test_invalid_amount_fails_without_request() {
	let fx = Fixture::new();

	fx.kur()
		.args(["convert", "0", "USD", "TRY"])
		.assert()
		.code(1)
		.stdout("")
		.stderr(predicate::str::contains("[error] Please enter a valid amount"));

	fx.kur()
		.args(["convert", "10", "USD", "usd"])
		.assert()
		.code(1)
		.stderr(predicate::str::contains(
			"[error] Source and target currency cannot be the same",
		));
}

#[test]
fn test_unreachable_api_is_reported() {
	let fx = Fixture::new();

	fx.kur()
		.args(["convert", "10", "USD", "TRY"])
		.assert()
		.code(1)
		.stderr(predicate::str::contains("[error] Conversion failed: "));
	assert!(!fx.store.exists());
}

#[test]
fn test_bad_currency_code_is_rejected_by_parser() {
	let fx = Fixture::new();

	fx.kur()
		.args(["convert", "10", "DOLLAR", "TRY"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Invalid currency code: DOLLAR"));
}
