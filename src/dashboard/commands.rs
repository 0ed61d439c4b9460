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
use crate::api::rates::RateSource;
use crate::dashboard::controller::{ChartOutcome, Dashboard};
use crate::dashboard::notify::NoticeSink;
use crate::reports::renderer::{ChartRenderer, FavoritesRenderer};
use crate::reports::terminal_reporter::TerminalReporter;
use crate::storage::persistent_store::Backend;
use crate::util::currency::CurrencyCode;
use crate::util::format::format_number;
use anyhow::Error;
use chrono::NaiveDate;
use clap::Subcommand;
use std::io::Write;

/// Every action the dashboard offers, shared by the one-shot CLI and the
/// interactive shell.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
	/// Convert an amount between two currencies
	Convert {
		#[arg(allow_negative_numbers = true)]
		amount: f64,
		from: CurrencyCode,
		to: CurrencyCode,
	},

	/// Convert an amount into every supported currency
	Multi {
		#[arg(allow_negative_numbers = true)]
		amount: f64,
		from: CurrencyCode,
	},

	/// List popular pairs with their 24h change
	Pairs,

	/// List supported currencies
	Currencies,

	/// Find currencies by code or name
	Search { term: String },

	/// Show the rate history of a pair
	Chart {
		base: CurrencyCode,
		quote: CurrencyCode,

		/// Lookback in days (1-365)
		#[arg(short, long)]
		days: Option<u32>,

		/// Extra currencies to draw against the base
		#[arg(short, long)]
		compare: Vec<CurrencyCode>,

		/// Display name for the pair
		#[arg(short, long)]
		name: Option<String>,
	},

	/// Rate of a pair on a past date (default: 30 days ago)
	OnDate {
		base: CurrencyCode,
		quote: CurrencyCode,
		date: Option<NaiveDate>,
	},

	/// Compare the rate of a pair on two dates
	CompareDates {
		base: CurrencyCode,
		quote: CurrencyCode,

		/// Start date, YYYY-MM-DD (default: 30 days ago)
		#[arg(long)]
		start: Option<NaiveDate>,

		/// End date, YYYY-MM-DD (default: today)
		#[arg(long)]
		end: Option<NaiveDate>,
	},

	/// Show or change favorite pairs
	Fav {
		#[command(subcommand)]
		action: Option<FavAction>,
	},

	/// Show or clear the conversion history
	History {
		#[command(subcommand)]
		action: Option<HistoryAction>,
	},

	/// Show or toggle the color theme
	Theme {
		#[command(subcommand)]
		action: Option<ThemeAction>,
	},

	/// Print a number the way the dashboard displays it
	Format {
		#[arg(allow_negative_numbers = true)]
		value: Option<f64>,
	},
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum FavAction {
	List,
	Add {
		base: CurrencyCode,
		quote: CurrencyCode,
		name: Option<String>,
	},
	Remove {
		base: CurrencyCode,
		quote: CurrencyCode,
	},
	Toggle {
		base: CurrencyCode,
		quote: CurrencyCode,
		name: Option<String>,
	},
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum HistoryAction {
	List,
	Clear,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ThemeAction {
	Show,
	Toggle,
}

/// Runs one command against the dashboard and renders its result.
/// Failures have already been shown as notices by the time they get here.
pub fn execute<S, B, N, W>(
	dashboard: &mut Dashboard<S, B, N>,
	command: Command,
	today: NaiveDate,
	reporter: &mut TerminalReporter<W>,
) -> Result<(), Error>
where
	S: RateSource,
	B: Backend,
	N: NoticeSink,
	W: Write,
{
	match command {
		Command::Convert { amount, from, to } => {
			let conversion = dashboard.convert(amount, &from, &to)?;
			reporter.conversion(&conversion)?;
		},
		Command::Multi { amount, from } => {
			let conversions = dashboard.multi_convert(amount, &from)?;
			reporter.multi_conversion(amount, &from, &conversions)?;
		},
		Command::Pairs => {
			let cards = dashboard.popular_pairs()?;
			reporter.popular_pairs(&cards)?;
		},
		Command::Currencies => {
			let table = dashboard.currencies()?;
			let listed: Vec<_> = table.into_iter().collect();
			reporter.currencies(&listed)?;
		},
		Command::Search { term } => {
			let found = dashboard.search(&term)?;
			reporter.currencies(&found)?;
		},
		Command::Chart {
			base,
			quote,
			days,
			compare,
			name,
		} => {
			dashboard.select(&base, &quote, name);
			if let Some(days) = days {
				dashboard.set_period(days)?;
			}
			for currency in &compare {
				dashboard.add_comparison(currency)?;
			}
			draw_chart(dashboard, reporter)?;
		},
		Command::OnDate { base, quote, date } => {
			let view = dashboard.rate_on_date(&base, &quote, date, today)?;
			reporter.rate_on_date(&view)?;
		},
		Command::CompareDates {
			base,
			quote,
			start,
			end,
		} => {
			let view = dashboard.compare_dates(&base, &quote, start, end, today)?;
			reporter.comparison(&view)?;
		},
		Command::Fav { action } => {
			let cards = match action.unwrap_or(FavAction::List) {
				FavAction::List => dashboard.favorite_cards(),
				FavAction::Add { base, quote, name } => {
					dashboard.add_favorite(&base, &quote, name)?
				},
				FavAction::Remove { base, quote } => {
					dashboard.remove_favorite(&base, &quote)?
				},
				FavAction::Toggle { base, quote, name } => {
					dashboard.toggle_favorite(&base, &quote, name)?
				},
			};
			reporter.render_favorites(&cards)?;
		},
		Command::History { action } => match action.unwrap_or(HistoryAction::List)
		{
			HistoryAction::List => reporter.history(dashboard.history())?,
			HistoryAction::Clear => dashboard.clear_history()?,
		},
		Command::Theme { action } => match action.unwrap_or(ThemeAction::Show) {
			ThemeAction::Show => reporter.theme(dashboard.theme())?,
			ThemeAction::Toggle => {
				dashboard.toggle_theme()?;
			},
		},
		Command::Format { value } => reporter.line(&format_number(value))?,
	}

	Ok(())
}

/// Loads and renders the chart for the current selection. A load that went
/// stale in the meantime renders nothing.
pub fn draw_chart<S, B, N, W>(
	dashboard: &mut Dashboard<S, B, N>,
	reporter: &mut TerminalReporter<W>,
) -> Result<(), Error>
where
	S: RateSource,
	B: Backend,
	N: NoticeSink,
	W: Write,
{
	let (request, fetched) = dashboard.load_chart()?;
	match dashboard.complete_chart(request, fetched)? {
		ChartOutcome::Ready(chart) => reporter.render_chart(&chart),
		ChartOutcome::Stale => Ok(()),
	}
}
