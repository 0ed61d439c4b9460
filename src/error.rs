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
use thiserror::Error;

/// Failures a user can be told about. Anything here ends up as an error
/// notice; none of it is fatal to the process.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
	/// Bad input caught before any request went out.
	#[error("{0}")]
	Validation(String),

	#[error("Please select a currency pair first")]
	NoSelection,

	/// The rate API could not be reached or answered with a failure.
	#[error("{0}")]
	Upstream(String),

	#[error("Not enough data to draw the chart")]
	InsufficientData,

	/// The local store could not be written.
	#[error("Could not save local data: {0}")]
	Storage(String),
}

impl DashboardError {
	pub fn validation(message: &str) -> Self {
		DashboardError::Validation(message.to_string())
	}

	pub fn storage(err: anyhow::Error) -> Self {
		DashboardError::Storage(err.to_string())
	}

	/// Prefixes an upstream failure with what the user was trying to do;
	/// other kinds already read well on their own.
	pub fn context(self, action: &str) -> Self {
		match self {
			DashboardError::Upstream(msg) => {
				DashboardError::Upstream(format!("{}: {}", action, msg))
			},
			other => other,
		}
	}
}
