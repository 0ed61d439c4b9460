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
use crate::api::rates::RateApi;
use crate::dashboard::commands::{execute, Command};
use crate::dashboard::controller::Dashboard;
use crate::dashboard::notify::TerminalSink;
use crate::dashboard::selection::validate_days;
use crate::dashboard::shell::Shell;
use crate::error::DashboardError;
use crate::reports::terminal_reporter::TerminalReporter;
use crate::storage::filesystem::Filesystem;
use crate::storage::persistent_store::{FileBackend, PersistentStore};
use anyhow::{anyhow, Error};
use chrono::Local;
use clap::{ArgAction, Parser, Subcommand};
use log::debug;
use std::io;
use std::process;

mod api;
mod config;
mod dashboard;
mod error;
mod reports;
mod storage;
mod util;

#[derive(Parser)]
#[command(
	name = "kur",
	version = "0.1",
	about = "Terminal currency exchange dashboard"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	#[command(subcommand)]
	directive: Directive,

	// -----------
	// -- FLAGS --
	// -----------
	/// Custom config file location (default: ~/.config/kur/config.toml)
	#[arg(long, global = true)]
	config: Option<String>,

	/// Base URL of the rate API, overriding the config file
	#[arg(long, global = true)]
	api_url: Option<String>,

	/// Store file for theme, favorites and history, overriding the config
	#[arg(long, global = true)]
	store: Option<String>,

	/// More log output on stderr; repeat for more detail
	#[arg(short, long, global = true, action = ArgAction::Count)]
	verbose: u8,
}

#[derive(Subcommand)]
enum Directive {
	#[command(flatten)]
	Run(Command),

	/// Start an interactive session that keeps the chart selection
	Shell,
}

fn main() -> Result<(), Error> {
	let args = Cli::parse();
	util::logger::init(args.verbose)?;

	match run(args) {
		// already shown to the user as a notice
		Err(e) if e.downcast_ref::<DashboardError>().is_some() => {
			debug!("exiting after failure: {}", e);
			process::exit(1)
		},
		other => other,
	}
}

fn run(args: Cli) -> Result<(), Error> {
	let fs = Filesystem::new();
	let config = fs.get_config(args.config.as_ref())?;
	let store_path = fs.store_path(args.store.as_ref(), &config)?;

	let default_days = config.default_days();
	validate_days(default_days)
		.map_err(|e| anyhow!("invalid chart.default_days in config: {}", e))?;

	let api_url = match args.api_url {
		Some(url) => url.trim_end_matches('/').to_string(),
		None => config.api_url(),
	};
	debug!("using API at {} and store {}", api_url, store_path.display());

	let source = RateApi::new(&api_url, config.timeout())?;
	let store = PersistentStore::new(FileBackend::new(store_path));
	let mut dashboard = Dashboard::new(source, store, TerminalSink, default_days);

	let today = Local::now().date_naive();
	let mut reporter = TerminalReporter::new(io::stdout().lock());

	match args.directive {
		Directive::Run(command) => {
			execute(&mut dashboard, command, today, &mut reporter)
		},
		Directive::Shell => Shell::new()?.run(
			&mut dashboard,
			io::stdin().lock(),
			&mut reporter,
			today,
		),
	}
}
