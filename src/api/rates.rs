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
use crate::api::http::Client;
use crate::api::models::{
	CompareDatesParams, Conversion, ConvertParams, CurrenciesHolder,
	CurrencyTable, DateComparison, HistoryParams, HistorySeries,
	MultiConversion, MultiConversionHolder, MultiConvertParams, NoParams,
	PopularPair, RateOnDate, RatesHolder,
};
use crate::error::DashboardError;
use crate::util::currency::CurrencyCode;
use anyhow::Error;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::time::Duration;

/// Everything the dashboard needs from the outside world. Rates are opaque:
/// whatever comes back is passed through untouched.
pub trait RateSource {
	fn currencies(&self) -> Result<CurrencyTable, DashboardError>;

	fn popular_pairs(&self) -> Result<Vec<PopularPair>, DashboardError>;

	fn convert(
		&self,
		from: &CurrencyCode,
		to: &CurrencyCode,
		amount: f64,
	) -> Result<Conversion, DashboardError>;

	fn multi_convert(
		&self,
		from: &CurrencyCode,
		amount: f64,
	) -> Result<Vec<MultiConversion>, DashboardError>;

	/// Latest rates from `base` to every other currency, keyed by code.
	fn rates(
		&self,
		base: &CurrencyCode,
	) -> Result<BTreeMap<String, f64>, DashboardError>;

	fn history(
		&self,
		base: &CurrencyCode,
		quote: &CurrencyCode,
		days: u32,
	) -> Result<HistorySeries, DashboardError>;

	fn rate_on_date(
		&self,
		base: &CurrencyCode,
		quote: &CurrencyCode,
		date: NaiveDate,
	) -> Result<f64, DashboardError>;

	fn compare_dates(
		&self,
		base: &CurrencyCode,
		quote: &CurrencyCode,
		start: NaiveDate,
		end: NaiveDate,
	) -> Result<DateComparison, DashboardError>;
}

/// The HTTP rate API.
pub struct RateApi {
	http: Client,
}

impl RateApi {
	pub fn new(api_url: &str, timeout: Duration) -> Result<Self, Error> {
		Ok(RateApi {
			http: Client::new(api_url, timeout)?,
		})
	}
}

impl RateSource for RateApi {
	fn currencies(&self) -> Result<CurrencyTable, DashboardError> {
		let resp: CurrenciesHolder =
			self.http.get("currencies", None::<NoParams>)?;
		Ok(resp.fiat)
	}

	fn popular_pairs(&self) -> Result<Vec<PopularPair>, DashboardError> {
		self.http.get("popular-pairs", None::<NoParams>)
	}

	fn convert(
		&self,
		from: &CurrencyCode,
		to: &CurrencyCode,
		amount: f64,
	) -> Result<Conversion, DashboardError> {
		self.http.get(
			"convert",
			Some(ConvertParams {
				from_currency: from.to_string(),
				to_currency: to.to_string(),
				amount,
			}),
		)
	}

	fn multi_convert(
		&self,
		from: &CurrencyCode,
		amount: f64,
	) -> Result<Vec<MultiConversion>, DashboardError> {
		let resp: MultiConversionHolder = self.http.get(
			"multi-convert",
			Some(MultiConvertParams {
				from_currency: from.to_string(),
				amount,
			}),
		)?;
		Ok(resp.conversions)
	}

	fn rates(
		&self,
		base: &CurrencyCode,
	) -> Result<BTreeMap<String, f64>, DashboardError> {
		let resp: RatesHolder = self
			.http
			.get(format!("rates/{}", base).as_str(), None::<NoParams>)?;
		Ok(resp.rates)
	}

	fn history(
		&self,
		base: &CurrencyCode,
		quote: &CurrencyCode,
		days: u32,
	) -> Result<HistorySeries, DashboardError> {
		self.http.get(
			format!("history/{}/{}", base, quote).as_str(),
			Some(HistoryParams { days }),
		)
	}

	fn rate_on_date(
		&self,
		base: &CurrencyCode,
		quote: &CurrencyCode,
		date: NaiveDate,
	) -> Result<f64, DashboardError> {
		let resp: RateOnDate = self.http.get(
			format!("rate-on-date/{}/{}/{}", base, quote, date).as_str(),
			None::<NoParams>,
		)?;
		Ok(resp.rate)
	}

	fn compare_dates(
		&self,
		base: &CurrencyCode,
		quote: &CurrencyCode,
		start: NaiveDate,
		end: NaiveDate,
	) -> Result<DateComparison, DashboardError> {
		self.http.get(
			format!("compare-dates/{}/{}", base, quote).as_str(),
			Some(CompareDatesParams {
				start_date: start.to_string(),
				end_date: end.to_string(),
			}),
		)
	}
}
