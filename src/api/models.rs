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
use crate::util::currency::CurrencyCode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// -------------
// -- SENDING --
// -------------

#[derive(Debug, Serialize)]
pub struct NoParams {}

#[derive(Debug, Serialize)]
pub struct ConvertParams {
	pub from_currency: String,
	pub to_currency: String,
	pub amount: f64,
}

#[derive(Debug, Serialize)]
pub struct MultiConvertParams {
	pub from_currency: String,
	pub amount: f64,
}

#[derive(Debug, Serialize)]
pub struct HistoryParams {
	pub days: u32,
}

#[derive(Debug, Serialize)]
pub struct CompareDatesParams {
	pub start_date: String,
	pub end_date: String,
}

// ---------------
// -- RECEIVING --
// ---------------

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CurrencyInfo {
	pub name: String,
	pub symbol: String,
}

/// Currency metadata keyed by code.
pub type CurrencyTable = BTreeMap<CurrencyCode, CurrencyInfo>;

#[derive(Debug, Deserialize)]
pub struct CurrenciesHolder {
	pub fiat: CurrencyTable,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PopularPair {
	pub base: CurrencyCode,
	pub quote: CurrencyCode,
	pub name: String,

	/// Missing or zero means the server had nothing; such pairs are skipped.
	pub rate: Option<f64>,

	#[serde(default)]
	pub change_24h: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Conversion {
	pub from: CurrencyCode,
	pub to: CurrencyCode,
	pub amount: f64,
	pub result: f64,
	pub rate: f64,
}

#[derive(Debug, Deserialize)]
pub struct MultiConversionHolder {
	pub conversions: Vec<MultiConversion>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MultiConversion {
	pub currency: CurrencyCode,
	pub symbol: String,
	pub name: String,
	pub amount: f64,
	pub rate: f64,
}

#[derive(Debug, Deserialize)]
pub struct RatesHolder {
	pub rates: BTreeMap<String, f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HistorySeries {
	pub base: CurrencyCode,
	pub quote: CurrencyCode,
	pub data: Vec<RatePoint>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RatePoint {
	pub date: NaiveDate,
	pub rate: f64,
}

#[derive(Debug, Deserialize)]
pub struct RateOnDate {
	pub rate: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DateComparison {
	pub start_rate: f64,
	pub end_rate: f64,
	pub change_percent: f64,
	pub change_direction: String,
}

/// Body of a failed request. The API uses either field.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorPayload {
	pub detail: Option<String>,
	pub error: Option<String>,
}
