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
use crate::error::DashboardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A currency identifier such as "USD". Equality is exact and
/// case-sensitive; user input is normalized on the way in by `parse`, while
/// codes coming back from the API or the store are taken as they are.
#[derive(
	Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
	/// Parses user input: trims, uppercases, and requires 3 ASCII letters.
	pub fn parse(input: &str) -> Result<Self, DashboardError> {
		let code = input.trim().to_ascii_uppercase();

		if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
			return Err(DashboardError::Validation(format!(
				"Invalid currency code: {}",
				input.trim()
			)));
		}

		Ok(CurrencyCode(code))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl FromStr for CurrencyCode {
	type Err = DashboardError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		CurrencyCode::parse(s)
	}
}

impl fmt::Display for CurrencyCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Test helper for building codes from literals.
#[cfg(test)]
pub fn code(s: &str) -> CurrencyCode {
	CurrencyCode::parse(s).unwrap()
}
