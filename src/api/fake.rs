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
//! In-memory stand-in for the rate API, for tests.

use crate::api::models::{
	Conversion, CurrencyInfo, CurrencyTable, DateComparison, HistorySeries,
	MultiConversion, PopularPair, RatePoint,
};
use crate::api::rates::RateSource;
use crate::error::DashboardError;
use crate::util::currency::{code, CurrencyCode};
use chrono::NaiveDate;
use std::cell::RefCell;
use std::collections::BTreeMap;

#[derive(Default)]
pub struct FakeRates {
	currencies: Option<CurrencyTable>,
	popular: Vec<PopularPair>,
	latest: BTreeMap<String, BTreeMap<String, f64>>,
	history: BTreeMap<(String, String), Vec<RatePoint>>,
	on_date: BTreeMap<(String, String, NaiveDate), f64>,
	comparison: Option<DateComparison>,
	calls: RefCell<Vec<String>>,
}

pub fn date(s: &str) -> NaiveDate {
	NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn missing(what: String) -> DashboardError {
	DashboardError::Upstream(format!("no data for {}", what))
}

impl FakeRates {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_currency(mut self, c: &str, name: &str, symbol: &str) -> Self {
		self.currencies.get_or_insert_with(BTreeMap::new).insert(
			code(c),
			CurrencyInfo {
				name: name.to_string(),
				symbol: symbol.to_string(),
			},
		);
		self
	}

	pub fn with_popular(
		mut self,
		base: &str,
		quote: &str,
		name: &str,
		rate: Option<f64>,
		change_24h: f64,
	) -> Self {
		self.popular.push(PopularPair {
			base: code(base),
			quote: code(quote),
			name: name.to_string(),
			rate,
			change_24h,
		});
		self
	}

	/// Latest rate used by `rates`, `convert` and `multi_convert`.
	pub fn with_rate(mut self, base: &str, quote: &str, rate: f64) -> Self {
		self.latest
			.entry(base.to_string())
			.or_default()
			.insert(quote.to_string(), rate);
		self
	}

	pub fn with_history(
		mut self,
		base: &str,
		quote: &str,
		points: &[(&str, f64)],
	) -> Self {
		self.history.insert(
			(base.to_string(), quote.to_string()),
			points
				.iter()
				.map(|(d, r)| RatePoint {
					date: date(d),
					rate: *r,
				})
				.collect(),
		);
		self
	}

	pub fn with_rate_on(
		mut self,
		base: &str,
		quote: &str,
		on: &str,
		rate: f64,
	) -> Self {
		self.on_date
			.insert((base.to_string(), quote.to_string(), date(on)), rate);
		self
	}

	pub fn with_comparison(mut self, comparison: DateComparison) -> Self {
		self.comparison = Some(comparison);
		self
	}

	/// Every request made so far, in order.
	pub fn calls(&self) -> Vec<String> {
		self.calls.borrow().clone()
	}

	fn record(&self, call: String) {
		self.calls.borrow_mut().push(call);
	}

	fn latest(&self, base: &str, quote: &str) -> Option<f64> {
		self.latest.get(base).and_then(|r| r.get(quote)).copied()
	}
}

impl RateSource for FakeRates {
	fn currencies(&self) -> Result<CurrencyTable, DashboardError> {
		self.record("currencies".to_string());
		self.currencies
			.clone()
			.ok_or_else(|| missing("currencies".to_string()))
	}

	fn popular_pairs(&self) -> Result<Vec<PopularPair>, DashboardError> {
		self.record("popular-pairs".to_string());
		Ok(self.popular.clone())
	}

	fn convert(
		&self,
		from: &CurrencyCode,
		to: &CurrencyCode,
		amount: f64,
	) -> Result<Conversion, DashboardError> {
		self.record(format!("convert {} {} {}", amount, from, to));
		let rate = self
			.latest(from.as_str(), to.as_str())
			.ok_or_else(|| missing(format!("{}/{}", from, to)))?;

		Ok(Conversion {
			from: from.clone(),
			to: to.clone(),
			amount,
			result: amount * rate,
			rate,
		})
	}

	fn multi_convert(
		&self,
		from: &CurrencyCode,
		amount: f64,
	) -> Result<Vec<MultiConversion>, DashboardError> {
		self.record(format!("multi-convert {} {}", amount, from));
		let rates = self
			.latest
			.get(from.as_str())
			.ok_or_else(|| missing(from.to_string()))?;

		Ok(rates
			.iter()
			.map(|(quote, rate)| MultiConversion {
				currency: code(quote),
				symbol: quote.clone(),
				name: quote.clone(),
				amount: amount * rate,
				rate: *rate,
			})
			.collect())
	}

	fn rates(
		&self,
		base: &CurrencyCode,
	) -> Result<BTreeMap<String, f64>, DashboardError> {
		self.record(format!("rates {}", base));
		self.latest
			.get(base.as_str())
			.cloned()
			.ok_or_else(|| missing(base.to_string()))
	}

	fn history(
		&self,
		base: &CurrencyCode,
		quote: &CurrencyCode,
		days: u32,
	) -> Result<HistorySeries, DashboardError> {
		self.record(format!("history {}/{} {}", base, quote, days));
		let data = self
			.history
			.get(&(base.to_string(), quote.to_string()))
			.cloned()
			.ok_or_else(|| missing(format!("{}/{}", base, quote)))?;

		Ok(HistorySeries {
			base: base.clone(),
			quote: quote.clone(),
			data,
		})
	}

	fn rate_on_date(
		&self,
		base: &CurrencyCode,
		quote: &CurrencyCode,
		on: NaiveDate,
	) -> Result<f64, DashboardError> {
		self.record(format!("rate-on-date {}/{} {}", base, quote, on));
		self.on_date
			.get(&(base.to_string(), quote.to_string(), on))
			.copied()
			.ok_or_else(|| missing(format!("{}/{} on {}", base, quote, on)))
	}

	fn compare_dates(
		&self,
		base: &CurrencyCode,
		quote: &CurrencyCode,
		start: NaiveDate,
		end: NaiveDate,
	) -> Result<DateComparison, DashboardError> {
		self.record(format!(
			"compare-dates {}/{} {} {}",
			base, quote, start, end
		));
		self.comparison
			.clone()
			.ok_or_else(|| missing("comparison".to_string()))
	}
}
