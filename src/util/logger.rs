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
use anyhow::{anyhow, Error};
use log::{LevelFilter, Log, Metadata, Record};
use std::env;
use std::str::FromStr;

/// Environment variable that overrides the verbosity flags, e.g.
/// `KUR_LOG=debug`.
pub const LOG_ENV: &str = "KUR_LOG";

/// Writes log records to stderr so they never mix with report output.
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
	fn enabled(&self, metadata: &Metadata) -> bool {
		metadata.level() <= log::max_level()
	}

	fn log(&self, record: &Record) {
		if self.enabled(record.metadata()) {
			eprintln!(
				"[{}] {}: {}",
				record.level(),
				record.target(),
				record.args()
			);
		}
	}

	fn flush(&self) {}
}

pub fn init(verbosity: u8) -> Result<(), Error> {
	let level = level_for(verbosity, env::var(LOG_ENV).ok().as_deref());

	log::set_logger(&LOGGER)
		.map_err(|e| anyhow!("failed to install logger: {}", e))?;
	log::set_max_level(level);

	Ok(())
}

/// The environment wins when it holds a valid level name; otherwise each
/// `-v` raises the level by one step from `warn`.
fn level_for(verbosity: u8, env_value: Option<&str>) -> LevelFilter {
	if let Some(level) = env_value.and_then(|v| LevelFilter::from_str(v).ok())
	{
		return level;
	}

	match verbosity {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	}
}
