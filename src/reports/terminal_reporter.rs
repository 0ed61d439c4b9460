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
use crate::api::models::{Conversion, CurrencyInfo, MultiConversion};
use crate::dashboard::chart::{ChartData, ChartSeries, SeriesStyle, PALETTE};
use crate::dashboard::controller::{
	CardRate, ComparisonView, FavoriteCard, PairCard, RateOnDateView,
};
use crate::dashboard::notify::Notice;
use crate::dashboard::selection::PairSelectionState;
use crate::reports::renderer::{ChartRenderer, FavoritesRenderer};
use crate::reports::table::Table;
use crate::storage::history::HistoryEntry;
use crate::storage::theme::Theme;
use crate::util::currency::CurrencyCode;
use crate::util::format::{fmt, format_change, format_number};
use anyhow::Error;
use chrono::{DateTime, Local, NaiveDate};
use std::collections::BTreeSet;
use std::io::Write;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Plain-text views of everything the dashboard produces.
pub struct TerminalReporter<W: Write> {
	out: W,
}

impl<W: Write> TerminalReporter<W> {
	pub fn new(out: W) -> Self {
		Self { out }
	}

	#[cfg(test)]
	pub fn into_inner(self) -> W {
		self.out
	}

	pub fn line(&mut self, text: &str) -> Result<(), Error> {
		writeln!(self.out, "{}", text)?;
		Ok(())
	}

	pub fn prompt(&mut self, text: &str) -> Result<(), Error> {
		write!(self.out, "{}", text)?;
		self.out.flush()?;
		Ok(())
	}

	fn table(&mut self, table: &Table) -> Result<(), Error> {
		write!(self.out, "{}", table.render())?;
		Ok(())
	}

	pub fn theme(&mut self, theme: Theme) -> Result<(), Error> {
		self.line(&format!("Theme: {}", theme))
	}

	pub fn conversion(&mut self, c: &Conversion) -> Result<(), Error> {
		self.line(&format!(
			"{} {} = {} {}",
			fmt(c.amount),
			c.from,
			fmt(c.result),
			c.to
		))?;
		self.line(&format!("1 {} = {} {}", c.from, fmt(c.rate), c.to))
	}

	pub fn multi_conversion(
		&mut self,
		amount: f64,
		from: &CurrencyCode,
		conversions: &[MultiConversion],
	) -> Result<(), Error> {
		self.line(&format!("{} {} is worth:", fmt(amount), from))?;

		let mut table = Table::new(4);
		table.add_header(vec!["Code", "Name", "Amount", "Rate"]);
		table.add_separator();
		table.right_align(vec![2, 3]);
		for c in conversions {
			table.add_row(vec![
				c.currency.to_string(),
				c.name.clone(),
				format!("{} {}", c.symbol, fmt(c.amount)),
				fmt(c.rate),
			]);
		}
		self.table(&table)
	}

	pub fn popular_pairs(&mut self, cards: &[PairCard]) -> Result<(), Error> {
		if cards.is_empty() {
			return self.line("No popular pairs available");
		}

		let mut table = Table::new(5);
		table.add_header(vec!["", "Pair", "Name", "Rate", "24h"]);
		table.add_separator();
		table.right_align(vec![3, 4]);
		for card in cards {
			let arrow = if card.change_24h >= 0.0 { "▲" } else { "▼" };
			table.add_row(vec![
				(if card.is_favorite { "★" } else { "☆" }).to_string(),
				format!("{}/{}", card.base, card.quote),
				card.name.clone(),
				fmt(card.rate),
				format!("{} {}", arrow, format_change(card.change_24h)),
			]);
		}
		self.table(&table)
	}

	pub fn currencies(
		&mut self,
		currencies: &[(CurrencyCode, CurrencyInfo)],
	) -> Result<(), Error> {
		if currencies.is_empty() {
			return self.line("No matching currencies");
		}

		let mut table = Table::new(3);
		table.add_header(vec!["Code", "Symbol", "Name"]);
		table.add_separator();
		for (code, info) in currencies {
			table.add_row(vec![
				code.to_string(),
				info.symbol.clone(),
				info.name.clone(),
			]);
		}
		self.table(&table)
	}

	pub fn history(&mut self, entries: &[HistoryEntry]) -> Result<(), Error> {
		if entries.is_empty() {
			return self.line("No conversions yet");
		}

		let mut table = Table::new(4);
		table.add_header(vec!["When", "Amount", "Result", "Rate"]);
		table.add_separator();
		table.right_align(vec![1, 2, 3]);
		for entry in entries {
			table.add_row(vec![
				local_time(&entry.timestamp),
				format!("{} {}", fmt(entry.amount), entry.from),
				format!("{} {}", fmt(entry.result), entry.to),
				fmt(entry.rate),
			]);
		}
		self.table(&table)
	}

	pub fn rate_on_date(&mut self, view: &RateOnDateView) -> Result<(), Error> {
		self.line(&format!("On {}:", long_date(view.date)))?;
		self.line(&format!(
			"1 {} = {} {}",
			view.base,
			fmt(view.rate),
			view.quote
		))
	}

	pub fn comparison(&mut self, view: &ComparisonView) -> Result<(), Error> {
		let c = &view.comparison;
		let arrow = if c.change_percent >= 0.0 { "▲" } else { "▼" };

		self.line(&format!("{}/{}", view.base, view.quote))?;
		self.line(&format!(
			"{}: {}",
			long_date(view.start),
			fmt(c.start_rate)
		))?;
		self.line(&format!("{}: {}", long_date(view.end), fmt(c.end_rate)))?;
		self.line(&format!(
			"Change: {} {} ({})",
			arrow,
			format_change(c.change_percent),
			c.change_direction
		))
	}

	/// The selection, followed by whatever notices are still on screen.
	pub fn status(
		&mut self,
		selection: &PairSelectionState,
		notices: &[&Notice],
	) -> Result<(), Error> {
		match selection.current() {
			Some(pair) => {
				self.line(&format!("{} ({}/{})", pair.name, pair.base, pair.quote))?;
				self.line(&format!("Period: {} days", selection.days()))?;
				if !selection.comparisons().is_empty() {
					let codes: Vec<String> = selection
						.comparisons()
						.iter()
						.map(|c| c.to_string())
						.collect();
					self.line(&format!("Compared with: {}", codes.join(", ")))?;
				}
			},
			None => self.line("No pair selected")?,
		}

		for notice in notices {
			self.line(&format!("  [{}] {}", notice.severity, notice.message))?;
		}
		Ok(())
	}
}

impl<W: Write> ChartRenderer for TerminalReporter<W> {
	fn render_chart(&mut self, chart: &ChartData) -> Result<(), Error> {
		self.line(&chart.title)?;
		self.line("")?;

		let label_width =
			chart.series.iter().map(|s| s.label.len()).max().unwrap_or(0);
		for series in &chart.series {
			let (color, _) = PALETTE[series.style_index % PALETTE.len()];
			let marker = match series.style {
				SeriesStyle::Area => '■',
				SeriesStyle::Line => '─',
			};
			self.line(&format!(
				"{} {:<width$}  {}  ({})",
				marker,
				series.label,
				sparkline(series),
				color,
				width = label_width
			))?;
		}
		self.line("")?;

		// One row per date that any series has a point for
		let dates: BTreeSet<NaiveDate> = chart
			.series
			.iter()
			.flat_map(|s| s.points.iter().map(|p| p.x))
			.collect();

		let mut table = Table::new(chart.series.len() + 1);
		let mut header = vec!["Date"];
		header.extend(chart.series.iter().map(|s| s.label.as_str()));
		table.add_header(header);
		table.add_separator();
		table.right_align((1..=chart.series.len()).collect());

		for date in dates {
			let mut row = vec![date.to_string()];
			for series in &chart.series {
				row.push(
					series
						.points
						.iter()
						.find(|p| p.x == date)
						.map(|p| fmt(p.y))
						.unwrap_or_else(|| "-".to_string()),
				);
			}
			table.add_row(row);
		}
		self.table(&table)
	}
}

impl<W: Write> FavoritesRenderer for TerminalReporter<W> {
	fn render_favorites(&mut self, cards: &[FavoriteCard]) -> Result<(), Error> {
		if cards.is_empty() {
			return self.line("No favorites yet");
		}

		for card in cards {
			let fav = &card.favorite;
			self.line(&format!("★ {}", fav.name))?;
			match card.rate {
				CardRate::Rate(rate) => {
					self.line(&format!("  {}", format_number(Some(rate))))?;
					self.line(&format!("  {}/{}", fav.base, fav.quote))?;
				},
				CardRate::Missing => {
					self.line("  -")?;
					self.line(&format!("  {}/{}", fav.base, fav.quote))?;
				},
				CardRate::Unavailable => self.line("  Data unavailable")?,
			}
		}
		Ok(())
	}
}

fn sparkline(series: &ChartSeries) -> String {
	let (min, max) = series
		.points
		.iter()
		.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
			(lo.min(p.y), hi.max(p.y))
		});
	let span = max - min;

	series
		.points
		.iter()
		.map(|p| {
			if span <= 0.0 || !span.is_finite() {
				return SPARK_LEVELS[SPARK_LEVELS.len() / 2];
			}
			let level = ((p.y - min) / span * (SPARK_LEVELS.len() - 1) as f64)
				.round() as usize;
			SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
		})
		.collect()
}

/// "05.03 14:20" in local time, or the raw value if it doesn't parse.
fn local_time(timestamp: &str) -> String {
	match DateTime::parse_from_rfc3339(timestamp) {
		Ok(t) => t.with_timezone(&Local).format("%d.%m %H:%M").to_string(),
		Err(_) => timestamp.to_string(),
	}
}

fn long_date(date: NaiveDate) -> String {
	date.format("%-d %B %Y").to_string()
}
