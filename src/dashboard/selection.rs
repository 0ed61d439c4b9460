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
use crate::api::models::CurrencyTable;
use crate::dashboard::chart::ChartRequest;
use crate::error::DashboardError;
use crate::util::currency::CurrencyCode;
use log::info;

/// Longest lookback the rate API serves.
pub const MAX_DAYS: u32 = 365;

/// The pair the chart is showing.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedPair {
	pub base: CurrencyCode,
	pub quote: CurrencyCode,
	pub name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComparisonChange {
	Added,
	AlreadyPresent,
}

/// Which pair is inspected, which extra currencies are drawn against its
/// base, and over how many days.
///
/// Every change that alters what the chart should show bumps `revision`,
/// so a chart load that finishes after the user moved on can be told
/// apart from a current one.
pub struct PairSelectionState {
	current: Option<SelectedPair>,
	comparisons: Vec<CurrencyCode>,
	days: u32,
	default_days: u32,
	revision: u64,
}

impl PairSelectionState {
	pub fn new(default_days: u32) -> Self {
		Self {
			current: None,
			comparisons: Vec::new(),
			days: default_days,
			default_days,
			revision: 0,
		}
	}

	pub fn current(&self) -> Option<&SelectedPair> {
		self.current.as_ref()
	}

	pub fn comparisons(&self) -> &[CurrencyCode] {
		&self.comparisons
	}

	pub fn days(&self) -> u32 {
		self.days
	}

	pub fn revision(&self) -> u64 {
		self.revision
	}

	/// Switches the chart to a new pair. Comparisons were picked against the
	/// old base, so they are dropped even when the pair doesn't change, and
	/// the period goes back to its default.
	pub fn select(
		&mut self,
		base: CurrencyCode,
		quote: CurrencyCode,
		name: String,
	) {
		info!("selected {}/{}", base, quote);
		self.current = Some(SelectedPair { base, quote, name });
		self.comparisons.clear();
		self.days = self.default_days;
		self.revision += 1;
	}

	pub fn set_period(&mut self, days: u32) -> Result<(), DashboardError> {
		if self.current.is_none() {
			return Err(DashboardError::NoSelection);
		}
		validate_days(days)?;

		self.days = days;
		self.revision += 1;
		Ok(())
	}

	pub fn add_comparison(
		&mut self,
		currency: CurrencyCode,
	) -> Result<ComparisonChange, DashboardError> {
		if self.current.is_none() {
			return Err(DashboardError::NoSelection);
		}
		if self.comparisons.contains(&currency) {
			return Ok(ComparisonChange::AlreadyPresent);
		}

		self.comparisons.push(currency);
		self.revision += 1;
		Ok(ComparisonChange::Added)
	}

	pub fn clear_comparisons(&mut self) {
		self.comparisons.clear();
		self.revision += 1;
	}

	/// Snapshot of what the chart should show right now, or None when no
	/// pair is selected.
	pub fn chart_request(&self) -> Option<ChartRequest> {
		self.current.as_ref().map(|pair| ChartRequest {
			revision: self.revision,
			base: pair.base.clone(),
			quote: pair.quote.clone(),
			name: pair.name.clone(),
			comparisons: self.comparisons.clone(),
			days: self.days,
		})
	}
}

pub fn validate_days(days: u32) -> Result<(), DashboardError> {
	if days == 0 || days > MAX_DAYS {
		return Err(DashboardError::Validation(format!(
			"Days must be between 1 and {}",
			MAX_DAYS
		)));
	}
	Ok(())
}

/// "US Dollar/Turkish Lira" when names are known, codes otherwise.
pub fn display_name(
	base: &CurrencyCode,
	quote: &CurrencyCode,
	currencies: Option<&CurrencyTable>,
) -> String {
	let name_of = |c: &CurrencyCode| {
		currencies
			.and_then(|table| table.get(c))
			.map(|info| info.name.clone())
			.unwrap_or_else(|| c.to_string())
	};

	format!("{}/{}", name_of(base), name_of(quote))
}
