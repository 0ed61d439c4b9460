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
use crate::api::models::HistorySeries;
use crate::api::rates::RateSource;
use crate::error::DashboardError;
use crate::util::currency::CurrencyCode;
use chrono::NaiveDate;
use log::{debug, warn};

/// Series colors, cycled by style index. The first one always belongs to
/// the primary series.
pub const PALETTE: [(&str, (u8, u8, u8)); 4] = [
	("purple", (147, 51, 234)),
	("blue", (59, 130, 246)),
	("green", (16, 185, 129)),
	("amber", (245, 158, 11)),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesStyle {
	/// Filled, for the selected pair.
	Area,
	/// Unfilled, for comparisons.
	Line,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartPoint {
	pub x: NaiveDate,
	pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartSeries {
	pub label: String,
	pub points: Vec<ChartPoint>,
	pub style_index: usize,
	pub style: SeriesStyle,
}

/// Everything a renderer needs to draw one chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartData {
	pub title: String,
	pub series: Vec<ChartSeries>,
}

/// What to draw, captured at the moment the load was issued.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartRequest {
	pub revision: u64,
	pub base: CurrencyCode,
	pub quote: CurrencyCode,
	pub name: String,
	pub comparisons: Vec<CurrencyCode>,
	pub days: u32,
}

/// Raw responses for one request, before assembly. Comparisons that failed
/// to load are simply absent.
pub struct FetchedSeries {
	pub primary: HistorySeries,
	pub comparisons: Vec<(CurrencyCode, HistorySeries)>,
}

pub struct ChartDataAssembler {
	palette_size: usize,
}

impl ChartDataAssembler {
	pub fn new(palette_size: usize) -> Self {
		Self {
			palette_size: palette_size.max(1),
		}
	}

	/// Pulls the primary series and one series per comparison currency, all
	/// against the request's base. A failed comparison is logged and left
	/// out; a failed primary aborts.
	pub fn fetch<S: RateSource>(
		&self,
		source: &S,
		request: &ChartRequest,
	) -> Result<FetchedSeries, DashboardError> {
		let primary = source
			.history(&request.base, &request.quote, request.days)
			.map_err(|e| e.context("Failed to load chart"))?;
		debug!(
			"{} points for {}/{}",
			primary.data.len(),
			primary.base,
			primary.quote
		);

		let mut comparisons = Vec::new();
		for currency in &request.comparisons {
			match source.history(&request.base, currency, request.days) {
				Ok(series) => comparisons.push((currency.clone(), series)),
				Err(e) => {
					warn!(
						"dropping comparison {}/{}: {}",
						request.base, currency, e
					)
				},
			}
		}

		Ok(FetchedSeries {
			primary,
			comparisons,
		})
	}

	/// Builds the ordered series list. Comparison results may come in any
	/// order; each is placed by the position of its currency in the
	/// request, and results for currencies the request doesn't name are
	/// ignored.
	pub fn assemble(
		&self,
		request: &ChartRequest,
		fetched: FetchedSeries,
	) -> Result<ChartData, DashboardError> {
		if fetched.primary.data.is_empty() {
			return Err(DashboardError::InsufficientData);
		}

		let mut series = vec![ChartSeries {
			label: format!("{}/{}", request.base, request.quote),
			points: points_of(&fetched.primary),
			style_index: 0,
			style: SeriesStyle::Area,
		}];

		let mut comparisons = fetched.comparisons;
		for (position, currency) in request.comparisons.iter().enumerate() {
			let Some(at) = comparisons.iter().position(|(c, _)| c == currency)
			else {
				continue;
			};
			let (_, history) = comparisons.swap_remove(at);

			series.push(ChartSeries {
				label: format!("{}/{}", request.base, currency),
				points: points_of(&history),
				style_index: (position + 1) % self.palette_size,
				style: SeriesStyle::Line,
			});
		}
		debug!("assembled {} series for {}", series.len(), request.name);

		Ok(ChartData {
			title: format!("{} - Last {} Days", request.name, request.days),
			series,
		})
	}
}

fn points_of(history: &HistorySeries) -> Vec<ChartPoint> {
	history
		.data
		.iter()
		.map(|p| ChartPoint {
			x: p.date,
			y: p.rate,
		})
		.collect()
}
