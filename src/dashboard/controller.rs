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
use crate::api::models::{
	Conversion, CurrencyInfo, CurrencyTable, DateComparison, MultiConversion,
	PopularPair,
};
use crate::api::rates::RateSource;
use crate::dashboard::chart::{
	ChartData, ChartDataAssembler, ChartRequest, FetchedSeries, PALETTE,
};
use crate::dashboard::notify::{NoticeSink, NotificationCenter, Severity};
use crate::dashboard::selection::{
	display_name, ComparisonChange, PairSelectionState,
};
use crate::error::DashboardError;
use crate::storage::favorites::{FavoriteChange, FavoritePair, FavoritesManager};
use crate::storage::history::{HistoryEntry, HistoryLedger, NewEntry};
use crate::storage::persistent_store::{Backend, PersistentStore};
use crate::storage::theme::Theme;
use crate::util::currency::CurrencyCode;
use chrono::{Days, NaiveDate};
use log::{info, warn};
use std::time::Instant;

/// Default lookback for date queries.
const DEFAULT_LOOKBACK_DAYS: u64 = 30;

/// Shortest search term that triggers a lookup.
const MIN_SEARCH_LEN: usize = 2;

/// A popular pair that had a usable rate.
#[derive(Clone, Debug, PartialEq)]
pub struct PairCard {
	pub base: CurrencyCode,
	pub quote: CurrencyCode,
	pub name: String,
	pub rate: f64,
	pub change_24h: f64,
	pub is_favorite: bool,
}

/// State of one favorite's rate lookup. Each card is fetched on its own and
/// a failure only affects that card.
#[derive(Clone, Debug, PartialEq)]
pub enum CardRate {
	Rate(f64),
	/// The lookup worked but had nothing for this quote.
	Missing,
	/// The lookup failed.
	Unavailable,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FavoriteCard {
	pub favorite: FavoritePair,
	pub rate: CardRate,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RateOnDateView {
	pub base: CurrencyCode,
	pub quote: CurrencyCode,
	pub date: NaiveDate,
	pub rate: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonView {
	pub base: CurrencyCode,
	pub quote: CurrencyCode,
	pub start: NaiveDate,
	pub end: NaiveDate,
	pub comparison: DateComparison,
}

/// What happened to a chart load once its data was in.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartOutcome {
	Ready(ChartData),
	/// The selection moved on while the load was in flight.
	Stale,
}

/// Owns every piece of dashboard state and funnels all mutations. Failures
/// are shown as error notices and also handed back to the caller.
pub struct Dashboard<S: RateSource, B: Backend, N: NoticeSink> {
	source: S,
	store: PersistentStore<B>,
	favorites: FavoritesManager,
	history: HistoryLedger,
	selection: PairSelectionState,
	currencies: Option<CurrencyTable>,
	notices: NotificationCenter<N>,
	assembler: ChartDataAssembler,
}

impl<S: RateSource, B: Backend, N: NoticeSink> Dashboard<S, B, N> {
	pub fn new(
		source: S,
		store: PersistentStore<B>,
		sink: N,
		default_days: u32,
	) -> Self {
		let favorites = FavoritesManager::load(&store);
		let history = HistoryLedger::load(&store);

		Self {
			source,
			store,
			favorites,
			history,
			selection: PairSelectionState::new(default_days),
			currencies: None,
			notices: NotificationCenter::new(sink),
			assembler: ChartDataAssembler::new(PALETTE.len()),
		}
	}

	pub fn selection(&self) -> &PairSelectionState {
		&self.selection
	}

	pub fn notices(&self) -> &NotificationCenter<N> {
		&self.notices
	}

	pub fn prune_notices(&mut self, now: Instant) {
		self.notices.prune(now);
	}

	fn notify(&mut self, message: &str, severity: Severity) {
		self.notices.notify(message, severity);
	}

	/// Shows the error, if any, and passes the result through.
	fn check<T>(
		&mut self,
		result: Result<T, DashboardError>,
	) -> Result<T, DashboardError> {
		if let Err(e) = &result {
			self.notify(&e.to_string(), Severity::Error);
		}
		result
	}

	// -----------
	// -- THEME --
	// -----------

	pub fn theme(&self) -> Theme {
		Theme::load(&self.store)
	}

	pub fn toggle_theme(&mut self) -> Result<Theme, DashboardError> {
		let theme = self.theme().toggled();
		let saved = theme.save(&mut self.store).map_err(DashboardError::storage);
		self.check(saved)?;

		let message = match theme {
			Theme::Dark => "Dark mode enabled",
			Theme::Light => "Light mode enabled",
		};
		self.notify(message, Severity::Success);
		Ok(theme)
	}

	// ----------------
	// -- CURRENCIES --
	// ----------------

	/// Currency metadata, fetched once and kept for the session.
	pub fn currencies(&mut self) -> Result<CurrencyTable, DashboardError> {
		if let Some(table) = &self.currencies {
			return Ok(table.clone());
		}

		let fetched = self
			.source
			.currencies()
			.map_err(|e| e.context("Could not load currencies"));
		let table = self.check(fetched)?;
		self.currencies = Some(table.clone());
		Ok(table)
	}

	/// Matches code or name, ignoring case. Short terms match nothing and
	/// cause no lookup.
	pub fn search(
		&mut self,
		term: &str,
	) -> Result<Vec<(CurrencyCode, CurrencyInfo)>, DashboardError> {
		let needle = term.trim().to_lowercase();
		if needle.chars().count() < MIN_SEARCH_LEN {
			return Ok(Vec::new());
		}

		Ok(self
			.currencies()?
			.into_iter()
			.filter(|(code, info)| {
				code.as_str().to_lowercase().contains(&needle)
					|| info.name.to_lowercase().contains(&needle)
			})
			.collect())
	}

	/// Best available name for a pair. Metadata failures only cost the
	/// pretty name, so they are logged rather than shown.
	fn pair_name(&mut self, base: &CurrencyCode, quote: &CurrencyCode) -> String {
		if self.currencies.is_none() {
			match self.source.currencies() {
				Ok(table) => self.currencies = Some(table),
				Err(e) => warn!("no currency names available: {}", e),
			}
		}
		display_name(base, quote, self.currencies.as_ref())
	}

	// -----------------
	// -- CONVERSIONS --
	// -----------------

	pub fn popular_pairs(&mut self) -> Result<Vec<PairCard>, DashboardError> {
		let fetched = self
			.source
			.popular_pairs()
			.map_err(|e| e.context("Could not load popular pairs"));
		let pairs = self.check(fetched)?;

		Ok(pairs
			.into_iter()
			.filter_map(|p: PopularPair| {
				let rate = p.rate.filter(|r| *r != 0.0)?;
				Some(PairCard {
					is_favorite: self.favorites.is_favorite(&p.base, &p.quote),
					base: p.base,
					quote: p.quote,
					name: p.name,
					rate,
					change_24h: p.change_24h,
				})
			})
			.collect())
	}

	/// Converts and records the result in the history log.
	pub fn convert(
		&mut self,
		amount: f64,
		from: &CurrencyCode,
		to: &CurrencyCode,
	) -> Result<Conversion, DashboardError> {
		let validated = validate_amount(amount).and_then(|_| {
			if from == to {
				return Err(DashboardError::validation(
					"Source and target currency cannot be the same",
				));
			}
			Ok(())
		});
		self.check(validated)?;

		let fetched = self
			.source
			.convert(from, to, amount)
			.map_err(|e| e.context("Conversion failed"));
		let conversion = self.check(fetched)?;

		let recorded = self
			.history
			.append(
				&mut self.store,
				NewEntry {
					from: conversion.from.clone(),
					to: conversion.to.clone(),
					amount: conversion.amount,
					result: conversion.result,
					rate: conversion.rate,
				},
			)
			.map_err(DashboardError::storage);
		self.check(recorded)?;

		info!("converted {} {} to {}", amount, from, to);
		Ok(conversion)
	}

	pub fn multi_convert(
		&mut self,
		amount: f64,
		from: &CurrencyCode,
	) -> Result<Vec<MultiConversion>, DashboardError> {
		self.check(validate_amount(amount))?;

		let fetched = self
			.source
			.multi_convert(from, amount)
			.map_err(|e| e.context("Multi conversion failed"));
		self.check(fetched)
	}

	// ----------------
	// -- DATE QUERY --
	// ----------------

	/// Rate for a past day. Without a date, looks 30 days back from `today`.
	pub fn rate_on_date(
		&mut self,
		base: &CurrencyCode,
		quote: &CurrencyCode,
		date: Option<NaiveDate>,
		today: NaiveDate,
	) -> Result<RateOnDateView, DashboardError> {
		let date = date.unwrap_or_else(|| lookback(today));
		self.check(not_in_future(date, today))?;

		let fetched = self
			.source
			.rate_on_date(base, quote, date)
			.map_err(|e| e.context("Could not fetch the rate"));
		let rate = self.check(fetched)?;

		Ok(RateOnDateView {
			base: base.clone(),
			quote: quote.clone(),
			date,
			rate,
		})
	}

	pub fn compare_dates(
		&mut self,
		base: &CurrencyCode,
		quote: &CurrencyCode,
		start: Option<NaiveDate>,
		end: Option<NaiveDate>,
		today: NaiveDate,
	) -> Result<ComparisonView, DashboardError> {
		let start = start.unwrap_or_else(|| lookback(today));
		let end = end.unwrap_or(today);
		let validated =
			not_in_future(start, today).and_then(|_| not_in_future(end, today));
		self.check(validated)?;

		let fetched = self
			.source
			.compare_dates(base, quote, start, end)
			.map_err(|e| e.context("Comparison failed"));
		let comparison = self.check(fetched)?;

		Ok(ComparisonView {
			base: base.clone(),
			quote: quote.clone(),
			start,
			end,
			comparison,
		})
	}

	// ---------------
	// -- FAVORITES --
	// ---------------

	/// One card per favorite, each with its own rate lookup.
	pub fn favorite_cards(&self) -> Vec<FavoriteCard> {
		self.favorites
			.list()
			.iter()
			.map(|favorite| {
				let rate = match self.source.rates(&favorite.base) {
					Ok(rates) => match rates.get(favorite.quote.as_str()) {
						Some(rate) => CardRate::Rate(*rate),
						None => CardRate::Missing,
					},
					Err(e) => {
						warn!(
							"no rate for favorite {}/{}: {}",
							favorite.base, favorite.quote, e
						);
						CardRate::Unavailable
					},
				};

				FavoriteCard {
					favorite: favorite.clone(),
					rate,
				}
			})
			.collect()
	}

	pub fn add_favorite(
		&mut self,
		base: &CurrencyCode,
		quote: &CurrencyCode,
		name: Option<String>,
	) -> Result<Vec<FavoriteCard>, DashboardError> {
		let name = name.unwrap_or_else(|| self.pair_name(base, quote));
		let added = self
			.favorites
			.add(&mut self.store, base, quote, &name)
			.map_err(DashboardError::storage);
		let change = self.check(added)?;

		self.announce_favorite(change, &name);
		Ok(self.favorite_cards())
	}

	pub fn remove_favorite(
		&mut self,
		base: &CurrencyCode,
		quote: &CurrencyCode,
	) -> Result<Vec<FavoriteCard>, DashboardError> {
		let removed = self
			.favorites
			.remove(&mut self.store, base, quote)
			.map_err(DashboardError::storage);
		let change = self.check(removed)?;

		self.announce_favorite(change, "");
		Ok(self.favorite_cards())
	}

	pub fn toggle_favorite(
		&mut self,
		base: &CurrencyCode,
		quote: &CurrencyCode,
		name: Option<String>,
	) -> Result<Vec<FavoriteCard>, DashboardError> {
		let name = match name {
			Some(name) => name,
			None if self.favorites.is_favorite(base, quote) => String::new(),
			None => self.pair_name(base, quote),
		};
		let toggled = self
			.favorites
			.toggle(&mut self.store, base, quote, &name)
			.map_err(DashboardError::storage);
		let change = self.check(toggled)?;

		self.announce_favorite(change, &name);
		Ok(self.favorite_cards())
	}

	fn announce_favorite(&mut self, change: FavoriteChange, name: &str) {
		match change {
			FavoriteChange::Added => {
				self.notify(&format!("{} added to favorites", name), Severity::Success)
			},
			FavoriteChange::AlreadyExists => self.notify(
				"This pair is already in your favorites",
				Severity::Info,
			),
			FavoriteChange::Removed | FavoriteChange::NotPresent => {
				self.notify("Removed from favorites", Severity::Success)
			},
		}
	}

	// -------------
	// -- HISTORY --
	// -------------

	pub fn history(&self) -> &[HistoryEntry] {
		self.history.list()
	}

	pub fn clear_history(&mut self) -> Result<(), DashboardError> {
		let cleared = self
			.history
			.clear(&mut self.store)
			.map_err(DashboardError::storage);
		self.check(cleared)?;

		self.notify("History cleared", Severity::Success);
		Ok(())
	}

	// ---------------
	// -- SELECTION --
	// ---------------

	/// Points the chart at a pair. Without a name, one is built from the
	/// currency metadata.
	pub fn select(
		&mut self,
		base: &CurrencyCode,
		quote: &CurrencyCode,
		name: Option<String>,
	) {
		let name = name.unwrap_or_else(|| self.pair_name(base, quote));
		self.notify(&format!("{} selected", name), Severity::Success);
		self.selection.select(base.clone(), quote.clone(), name);
	}

	pub fn set_period(&mut self, days: u32) -> Result<(), DashboardError> {
		let changed = self.selection.set_period(days);
		self.check(changed)
	}

	pub fn add_comparison(
		&mut self,
		currency: &CurrencyCode,
	) -> Result<ComparisonChange, DashboardError> {
		let added = self.selection.add_comparison(currency.clone());
		let change = self.check(added)?;

		match change {
			ComparisonChange::Added => self.notify(
				&format!("{} added to the chart", currency),
				Severity::Success,
			),
			ComparisonChange::AlreadyPresent => self.notify(
				"This currency is already on the chart",
				Severity::Info,
			),
		}
		Ok(change)
	}

	pub fn clear_comparisons(&mut self) {
		self.selection.clear_comparisons();
		self.notify("Extra currencies removed", Severity::Success);
	}

	// -----------
	// -- CHART --
	// -----------

	/// Issues the fetches for the current selection. The returned request
	/// records which selection the data belongs to.
	pub fn load_chart(
		&mut self,
	) -> Result<(ChartRequest, FetchedSeries), DashboardError> {
		let request = self
			.selection
			.chart_request()
			.ok_or(DashboardError::NoSelection);
		let request = self.check(request)?;

		let fetched = self.assembler.fetch(&self.source, &request);
		let fetched = self.check(fetched)?;
		Ok((request, fetched))
	}

	/// Turns fetched data into a chart, unless the selection changed since
	/// the request was issued.
	pub fn complete_chart(
		&mut self,
		request: ChartRequest,
		fetched: FetchedSeries,
	) -> Result<ChartOutcome, DashboardError> {
		if request.revision != self.selection.revision() {
			warn!(
				"discarding chart for {}/{}: selection changed",
				request.base, request.quote
			);
			return Ok(ChartOutcome::Stale);
		}

		let assembled = self.assembler.assemble(&request, fetched);
		Ok(ChartOutcome::Ready(self.check(assembled)?))
	}

	pub fn chart(&mut self) -> Result<ChartOutcome, DashboardError> {
		let (request, fetched) = self.load_chart()?;
		self.complete_chart(request, fetched)
	}

	#[cfg(test)]
	pub fn source(&self) -> &S {
		&self.source
	}

	#[cfg(test)]
	pub fn store(&self) -> &PersistentStore<B> {
		&self.store
	}
}

fn validate_amount(amount: f64) -> Result<(), DashboardError> {
	if !amount.is_finite() || amount <= 0.0 {
		return Err(DashboardError::validation("Please enter a valid amount"));
	}
	Ok(())
}

fn not_in_future(date: NaiveDate, today: NaiveDate) -> Result<(), DashboardError> {
	if date > today {
		return Err(DashboardError::Validation(format!(
			"{} is in the future",
			date
		)));
	}
	Ok(())
}

fn lookback(today: NaiveDate) -> NaiveDate {
	today
		.checked_sub_days(Days::new(DEFAULT_LOOKBACK_DAYS))
		.unwrap_or(today)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::fake::{date, FakeRates};
	use crate::dashboard::notify::RecordingSink;
	use crate::storage::persistent_store::{Collection, MemoryBackend};
	use crate::util::currency::code;
	use serde_json::Value;

	type TestDashboard = Dashboard<FakeRates, MemoryBackend, RecordingSink>;

	fn rates() -> FakeRates {
		FakeRates::new()
			.with_currency("USD", "US Dollar", "$")
			.with_currency("TRY", "Turkish Lira", "₺")
			.with_currency("EUR", "Euro", "€")
			.with_rate("USD", "TRY", 32.5)
			.with_rate("USD", "EUR", 0.92)
			.with_history(
				"USD",
				"TRY",
				&[("2024-03-01", 32.0), ("2024-03-02", 32.5)],
			)
			.with_history("USD", "EUR", &[("2024-03-01", 0.92)])
	}

	fn dashboard(source: FakeRates) -> TestDashboard {
		Dashboard::new(
			source,
			PersistentStore::new(MemoryBackend::default()),
			RecordingSink::default(),
			7,
		)
	}

	fn last_notice(d: &TestDashboard) -> (Severity, String) {
		d.notices().sink().last().cloned().unwrap()
	}

	#[test]
	fn test_convert_records_history() {
		let mut d = dashboard(rates());
		let conversion = d.convert(100.0, &code("USD"), &code("TRY")).unwrap();

		assert_eq!(conversion.result, 3250.0);
		let history = d.history();
		assert_eq!(history.len(), 1);
		assert_eq!(history[0].amount, 100.0);
		assert_eq!(history[0].from, code("USD"));
		assert_eq!(history[0].to, code("TRY"));
		assert_eq!(history[0].result, conversion.result);
		assert_eq!(history[0].rate, conversion.rate);
	}

	#[test]
	fn test_convert_validates_before_calling_out() {
		let mut d = dashboard(rates());

		for amount in [0.0, -5.0, f64::NAN] {
			assert!(matches!(
				d.convert(amount, &code("USD"), &code("TRY")),
				Err(DashboardError::Validation(_))
			));
		}
		assert_eq!(
			last_notice(&d),
			(Severity::Error, "Please enter a valid amount".to_string())
		);

		assert!(d.convert(10.0, &code("USD"), &code("USD")).is_err());
		assert_eq!(
			last_notice(&d).1,
			"Source and target currency cannot be the same"
		);

		assert!(d.source().calls().is_empty());
		assert!(d.history().is_empty());
	}

	#[test]
	fn test_failed_convert_leaves_history_alone() {
		let mut d = dashboard(rates());
		let result = d.convert(5.0, &code("EUR"), &code("TRY"));

		assert!(matches!(result, Err(DashboardError::Upstream(_))));
		assert!(last_notice(&d).1.starts_with("Conversion failed: "));
		assert!(d.history().is_empty());
	}

	#[test]
	fn test_popular_pairs_skip_missing_rates() {
		let source = rates()
			.with_popular("USD", "TRY", "Dollar/Lira", Some(32.5), 0.4)
			.with_popular("EUR", "TRY", "Euro/Lira", None, 0.0)
			.with_popular("GBP", "TRY", "Pound/Lira", Some(0.0), 0.0);
		let mut d = dashboard(source);
		d.add_favorite(&code("USD"), &code("TRY"), None).unwrap();

		let cards = d.popular_pairs().unwrap();
		assert_eq!(cards.len(), 1);
		assert_eq!(cards[0].name, "Dollar/Lira");
		assert!(cards[0].is_favorite);
	}

	#[test]
	fn test_favorites_scenario() {
		let mut d = dashboard(rates());
		let (usd, lira) = (code("USD"), code("TRY"));

		let cards = d
			.add_favorite(&usd, &lira, Some("Dollar/Lira".to_string()))
			.unwrap();
		assert_eq!(cards.len(), 1);
		assert_eq!(cards[0].rate, CardRate::Rate(32.5));
		assert_eq!(
			last_notice(&d),
			(Severity::Success, "Dollar/Lira added to favorites".to_string())
		);

		let stored = d.store().backend().read(Collection::Favorites.key());
		match stored {
			Some(Value::Array(records)) => assert_eq!(records.len(), 1),
			other => panic!("unexpected store contents: {:?}", other),
		}

		d.add_favorite(&usd, &lira, None).unwrap();
		assert_eq!(last_notice(&d).0, Severity::Info);

		let cards = d.remove_favorite(&usd, &lira).unwrap();
		assert!(cards.is_empty());
		assert_eq!(
			d.store().backend().read(Collection::Favorites.key()),
			Some(Value::Array(vec![]))
		);
	}

	#[test]
	fn test_favorite_name_defaults_to_currency_names() {
		let mut d = dashboard(rates());
		let cards = d.toggle_favorite(&code("USD"), &code("TRY"), None).unwrap();
		assert_eq!(cards[0].favorite.name, "US Dollar/Turkish Lira");

		let cards = d.toggle_favorite(&code("USD"), &code("TRY"), None).unwrap();
		assert!(cards.is_empty());
	}

	#[test]
	fn test_favorite_cards_degrade_independently() {
		let mut d = dashboard(rates());
		d.add_favorite(&code("GBP"), &code("TRY"), Some("Pound".to_string()))
			.unwrap();
		d.add_favorite(&code("USD"), &code("JPY"), Some("Yen".to_string()))
			.unwrap();
		d.add_favorite(&code("USD"), &code("EUR"), Some("Euro".to_string()))
			.unwrap();

		let rates: Vec<CardRate> =
			d.favorite_cards().into_iter().map(|c| c.rate).collect();
		assert_eq!(
			rates,
			vec![CardRate::Unavailable, CardRate::Missing, CardRate::Rate(0.92)]
		);
	}

	#[test]
	fn test_clear_history() {
		let mut d = dashboard(rates());
		d.convert(1.0, &code("USD"), &code("EUR")).unwrap();
		d.clear_history().unwrap();

		assert!(d.history().is_empty());
		assert_eq!(last_notice(&d).1, "History cleared");
	}

	#[test]
	fn test_theme_toggle_persists() {
		let mut d = dashboard(rates());
		assert_eq!(d.theme(), Theme::Light);

		assert_eq!(d.toggle_theme().unwrap(), Theme::Dark);
		assert_eq!(d.theme(), Theme::Dark);
		assert_eq!(last_notice(&d).1, "Dark mode enabled");

		assert_eq!(d.toggle_theme().unwrap(), Theme::Light);
		assert_eq!(last_notice(&d).1, "Light mode enabled");
	}

	#[test]
	fn test_search() {
		let mut d = dashboard(rates());
		assert!(d.search("e").unwrap().is_empty());
		assert!(d.source().calls().is_empty());

		let found: Vec<CurrencyCode> =
			d.search("lira").unwrap().into_iter().map(|(c, _)| c).collect();
		assert_eq!(found, vec![code("TRY")]);

		let found: Vec<CurrencyCode> =
			d.search("eu").unwrap().into_iter().map(|(c, _)| c).collect();
		assert_eq!(found, vec![code("EUR")]);

		// metadata is fetched once per session
		assert_eq!(d.source().calls(), vec!["currencies"]);
	}

	#[test]
	fn test_date_queries_default_and_reject_future() {
		let today = date("2024-04-10");
		let source = rates().with_rate_on("USD", "TRY", "2024-03-11", 31.9);
		let mut d = dashboard(source);

		let view = d
			.rate_on_date(&code("USD"), &code("TRY"), None, today)
			.unwrap();
		assert_eq!(view.date, date("2024-03-11"));
		assert_eq!(view.rate, 31.9);

		let future =
			d.rate_on_date(&code("USD"), &code("TRY"), Some(date("2024-04-11")), today);
		assert!(matches!(future, Err(DashboardError::Validation(_))));

		let future = d.compare_dates(
			&code("USD"),
			&code("TRY"),
			None,
			Some(date("2025-01-01")),
			today,
		);
		assert!(future.is_err());
		assert_eq!(d.source().calls().len(), 1);
	}

	#[test]
	fn test_compare_dates_defaults() {
		let today = date("2024-04-10");
		let source = rates().with_comparison(DateComparison {
			start_rate: 30.0,
			end_rate: 33.0,
			change_percent: 10.0,
			change_direction: "up".to_string(),
		});
		let mut d = dashboard(source);

		let view = d
			.compare_dates(&code("USD"), &code("TRY"), None, None, today)
			.unwrap();
		assert_eq!(view.start, date("2024-03-11"));
		assert_eq!(view.end, today);
		assert_eq!(view.comparison.change_percent, 10.0);
	}

	#[test]
	fn test_period_and_comparison_need_selection() {
		let mut d = dashboard(rates());

		assert_eq!(d.set_period(30), Err(DashboardError::NoSelection));
		assert_eq!(
			last_notice(&d),
			(
				Severity::Error,
				"Please select a currency pair first".to_string()
			)
		);
		assert!(d.add_comparison(&code("EUR")).is_err());
		assert!(matches!(d.chart(), Err(DashboardError::NoSelection)));
		assert!(d.source().calls().is_empty());
	}

	#[test]
	fn test_chart_for_selection() {
		let mut d = dashboard(rates());
		d.select(&code("USD"), &code("TRY"), None);
		assert_eq!(last_notice(&d).1, "US Dollar/Turkish Lira selected");

		d.add_comparison(&code("EUR")).unwrap();
		assert_eq!(
			d.add_comparison(&code("EUR")).unwrap(),
			ComparisonChange::AlreadyPresent
		);

		match d.chart().unwrap() {
			ChartOutcome::Ready(chart) => {
				assert_eq!(chart.title, "US Dollar/Turkish Lira - Last 7 Days");
				assert_eq!(chart.series.len(), 2);
				assert_eq!(chart.series[1].label, "USD/EUR");
			},
			ChartOutcome::Stale => panic!("chart should be current"),
		}
	}

	#[test]
	fn test_stale_chart_is_discarded() {
		let mut d = dashboard(rates());
		d.select(&code("USD"), &code("TRY"), Some("Dollar/Lira".to_string()));
		let (request, fetched) = d.load_chart().unwrap();

		// the user moves on before the data is in
		d.select(&code("USD"), &code("EUR"), Some("Dollar/Euro".to_string()));
		assert_eq!(
			d.complete_chart(request, fetched).unwrap(),
			ChartOutcome::Stale
		);

		let (request, fetched) = d.load_chart().unwrap();
		assert!(matches!(
			d.complete_chart(request, fetched).unwrap(),
			ChartOutcome::Ready(_)
		));
	}

	#[test]
	fn test_period_change_makes_inflight_chart_stale() {
		let mut d = dashboard(rates());
		d.select(&code("USD"), &code("TRY"), Some("Dollar/Lira".to_string()));
		let (request, fetched) = d.load_chart().unwrap();

		d.set_period(30).unwrap();
		assert_eq!(
			d.complete_chart(request, fetched).unwrap(),
			ChartOutcome::Stale
		);
	}

	#[test]
	fn test_empty_history_is_reported() {
		let source = rates().with_history("USD", "GBP", &[]);
		let mut d = dashboard(source);
		d.select(&code("USD"), &code("GBP"), None);

		assert_eq!(d.chart(), Err(DashboardError::InsufficientData));
		assert_eq!(last_notice(&d).1, "Not enough data to draw the chart");
	}
}
