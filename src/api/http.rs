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
use crate::api::models::ErrorPayload;
use crate::error::DashboardError;
use anyhow::Error;
use log::debug;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub struct Client {
	client: reqwest::blocking::Client,
	base_url: String,
}

impl Client {
	pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
		Ok(Client {
			client: reqwest::blocking::Client::builder()
				.timeout(timeout)
				.build()?,
			base_url: base_url.trim_end_matches('/').to_string(),
		})
	}

	/// Sends a GET and decodes the response. Transport failures and non-2xx
	/// codes both come back as upstream errors, carrying the server's own
	/// message when it sent one.
	pub fn get<Q, R>(
		&self,
		endpoint: &str,
		query_params: Option<Q>,
	) -> Result<R, DashboardError>
	where
		Q: Serialize,
		R: for<'de> Deserialize<'de>,
	{
		let url = format!("{}/{}", self.base_url, endpoint);

		let mut request = self.client.request(Method::GET, &url);

		if let Some(query_params) = query_params {
			request = request.query(&query_params);
		}

		debug!("Sending GET to {}", url);
		let response = request
			.send()
			.map_err(|e| DashboardError::Upstream(e.to_string()))?;

		// Handle non-2xx response codes
		let status = response.status();
		if !status.is_success() {
			let body = response.text().unwrap_or_default();
			return Err(DashboardError::Upstream(failure_message(
				status.as_u16(),
				&body,
			)));
		}

		response
			.json::<R>()
			.map_err(|e| DashboardError::Upstream(e.to_string()))
	}
}

/// Prefers `detail`, then `error`, from a JSON error body.
fn failure_message(status: u16, body: &str) -> String {
	serde_json::from_str::<ErrorPayload>(body)
		.ok()
		.and_then(|p| p.detail.or(p.error))
		.unwrap_or_else(|| format!("Request failed with status: {}", status))
}
