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
use crate::dashboard::commands::{draw_chart, execute, Command};
use crate::dashboard::controller::Dashboard;
use crate::dashboard::notify::NoticeSink;
use crate::dashboard::selection::ComparisonChange;
use crate::error::DashboardError;
use crate::reports::terminal_reporter::TerminalReporter;
use crate::storage::persistent_store::Backend;
use crate::util::currency::CurrencyCode;
use anyhow::Error;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::debug;
use regex::Regex;
use std::io::{BufRead, Write};
use std::time::Instant;

const PROMPT: &str = "kur> ";

#[derive(Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
	#[command(subcommand)]
	command: ShellCommand,
}

/// The shell understands every CLI command plus the ones that only make
/// sense with a selection that lives across lines.
#[derive(Subcommand, Debug, PartialEq)]
enum ShellCommand {
	#[command(flatten)]
	Run(Command),

	/// Select the pair to chart
	Select {
		base: CurrencyCode,
		quote: CurrencyCode,
		name: Option<String>,
	},

	/// Change the chart period
	Period { days: u32 },

	/// Draw another currency against the selected base
	Compare { currency: CurrencyCode },

	/// Remove all extra chart currencies
	Uncompare,

	/// Show the current selection
	Status,

	/// Leave the shell
	#[command(alias = "exit")]
	Quit,
}

pub struct Shell {
	token_regex: Regex,
}

impl Shell {
	pub fn new() -> Result<Self, Error> {
		Ok(Self {
			token_regex: Regex::new(r#""([^"]*)"|(\S+)"#)?,
		})
	}

	/// Splits a line on whitespace, keeping double-quoted runs together.
	fn tokenize(&self, input: &str) -> Vec<String> {
		self.token_regex
			.captures_iter(input)
			.map(|cap| {
				cap.get(1).map_or_else(
					move || cap[2].to_string(),
					|m| m.as_str().to_string(),
				)
			})
			.collect()
	}

	/// Reads commands until end of input or `quit`. A failed command only
	/// ends that line; its notice has already been shown.
	pub fn run<S, B, N, R, W>(
		&self,
		dashboard: &mut Dashboard<S, B, N>,
		input: R,
		reporter: &mut TerminalReporter<W>,
		today: NaiveDate,
	) -> Result<(), Error>
	where
		S: RateSource,
		B: Backend,
		N: NoticeSink,
		R: BufRead,
		W: Write,
	{
		let mut lines = input.lines();

		loop {
			dashboard.prune_notices(Instant::now());
			reporter.prompt(PROMPT)?;

			let line = match lines.next() {
				Some(line) => line?,
				None => break,
			};

			let tokens = self.tokenize(&line);
			if tokens.is_empty() {
				continue;
			}

			let command = match ShellLine::try_parse_from(tokens) {
				Ok(parsed) => parsed.command,
				Err(e) => {
					reporter.line(e.to_string().trim_end())?;
					continue;
				},
			};

			if command == ShellCommand::Quit {
				break;
			}

			if let Err(e) = self.dispatch(dashboard, command, reporter, today) {
				match e.downcast_ref::<DashboardError>() {
					Some(shown) => debug!("command failed: {}", shown),
					None => return Err(e),
				}
			}
		}

		Ok(())
	}

	fn dispatch<S, B, N, W>(
		&self,
		dashboard: &mut Dashboard<S, B, N>,
		command: ShellCommand,
		reporter: &mut TerminalReporter<W>,
		today: NaiveDate,
	) -> Result<(), Error>
	where
		S: RateSource,
		B: Backend,
		N: NoticeSink,
		W: Write,
	{
		match command {
			ShellCommand::Run(command) => {
				execute(dashboard, command, today, reporter)?
			},
			ShellCommand::Select { base, quote, name } => {
				dashboard.select(&base, &quote, name);
				draw_chart(dashboard, reporter)?;
			},
			ShellCommand::Period { days } => {
				dashboard.set_period(days)?;
				draw_chart(dashboard, reporter)?;
			},
			ShellCommand::Compare { currency } => {
				if dashboard.add_comparison(&currency)? == ComparisonChange::Added {
					draw_chart(dashboard, reporter)?;
				}
			},
			ShellCommand::Uncompare => {
				dashboard.clear_comparisons();
				if dashboard.selection().current().is_some() {
					draw_chart(dashboard, reporter)?;
				}
			},
			ShellCommand::Status => {
				let notices = dashboard.notices().active(Instant::now());
				reporter.status(dashboard.selection(), &notices)?
			},
			ShellCommand::Quit => {},
		}

		Ok(())
	}
}
