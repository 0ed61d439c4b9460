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
use std::fmt;
use std::time::{Duration, Instant};

/// How long a notice stays fully visible.
pub const DISPLAY_DURATION: Duration = Duration::from_millis(3000);

/// Fade-out that follows the display period.
pub const FADE_DURATION: Duration = Duration::from_millis(500);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
	Info,
	Success,
	Error,
}

impl fmt::Display for Severity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Severity::Info => write!(f, "info"),
			Severity::Success => write!(f, "success"),
			Severity::Error => write!(f, "error"),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	Visible,
	Fading,
	Dismissed,
}

#[derive(Clone, Debug)]
pub struct Notice {
	pub id: u64,
	pub message: String,
	pub severity: Severity,
	pub issued_at: Instant,
}

impl Notice {
	/// Depends on nothing but this notice's own issue time.
	pub fn phase(&self, now: Instant) -> Phase {
		let elapsed = now.saturating_duration_since(self.issued_at);

		if elapsed < DISPLAY_DURATION {
			Phase::Visible
		} else if elapsed < DISPLAY_DURATION + FADE_DURATION {
			Phase::Fading
		} else {
			Phase::Dismissed
		}
	}
}

/// Where notices are shown the moment they are issued.
pub trait NoticeSink {
	fn present(&mut self, notice: &Notice);
}

/// Errors go to stderr, everything else to stdout.
pub struct TerminalSink;

impl NoticeSink for TerminalSink {
	fn present(&mut self, notice: &Notice) {
		match notice.severity {
			Severity::Error => {
				eprintln!("[{}] {}", notice.severity, notice.message)
			},
			_ => println!("[{}] {}", notice.severity, notice.message),
		}
	}
}

/// Transient user-facing messages. Notices stack; each one expires on its
/// own schedule and there is no shared timer.
pub struct NotificationCenter<N: NoticeSink> {
	sink: N,
	notices: Vec<Notice>,
	next_id: u64,
}

impl<N: NoticeSink> NotificationCenter<N> {
	pub fn new(sink: N) -> Self {
		Self {
			sink,
			notices: Vec::new(),
			next_id: 1,
		}
	}

	pub fn notify(&mut self, message: &str, severity: Severity) -> u64 {
		self.notify_at(message, severity, Instant::now())
	}

	pub fn notify_at(
		&mut self,
		message: &str,
		severity: Severity,
		now: Instant,
	) -> u64 {
		let notice = Notice {
			id: self.next_id,
			message: message.to_string(),
			severity,
			issued_at: now,
		};
		self.next_id += 1;

		self.sink.present(&notice);
		let id = notice.id;
		self.notices.push(notice);
		id
	}

	/// Notices still on screen (visible or fading), oldest first.
	pub fn active(&self, now: Instant) -> Vec<&Notice> {
		self.notices
			.iter()
			.filter(|n| n.phase(now) != Phase::Dismissed)
			.collect()
	}

	pub fn prune(&mut self, now: Instant) {
		self.notices.retain(|n| n.phase(now) != Phase::Dismissed);
	}

	#[cfg(test)]
	pub fn sink(&self) -> &N {
		&self.sink
	}
}

/// Sink that remembers everything it was shown.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
	pub shown: Vec<(Severity, String)>,
}

#[cfg(test)]
impl RecordingSink {
	pub fn last(&self) -> Option<&(Severity, String)> {
		self.shown.last()
	}

	pub fn messages(&self) -> Vec<&str> {
		self.shown.iter().map(|(_, m)| m.as_str()).collect()
	}
}

#[cfg(test)]
impl NoticeSink for RecordingSink {
	fn present(&mut self, notice: &Notice) {
		self.shown.push((notice.severity, notice.message.clone()));
	}
}
