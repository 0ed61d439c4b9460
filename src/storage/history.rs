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
use crate::storage::persistent_store::{Backend, Collection, PersistentStore};
use crate::util::currency::CurrencyCode;
use anyhow::Error;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// How many conversions the ledger keeps.
pub const MAX_HISTORY: usize = 10;

/// One recorded conversion. Entries are never edited once written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
	pub from: CurrencyCode,
	pub to: CurrencyCode,
	pub amount: f64,
	pub result: f64,
	pub rate: f64,

	/// RFC 3339, UTC
	pub timestamp: String,
}

/// A conversion as reported by the API, not yet stamped.
#[derive(Clone, Debug, PartialEq)]
pub struct NewEntry {
	pub from: CurrencyCode,
	pub to: CurrencyCode,
	pub amount: f64,
	pub result: f64,
	pub rate: f64,
}

/// Bounded log of the latest conversions, most recent first. Inserting an
/// eleventh entry evicts the oldest one.
pub struct HistoryLedger {
	entries: Vec<HistoryEntry>,
}

impl HistoryLedger {
	pub fn load<B: Backend>(store: &PersistentStore<B>) -> Self {
		Self {
			entries: store.get(Collection::History),
		}
	}

	pub fn list(&self) -> &[HistoryEntry] {
		&self.entries
	}

	pub fn append<B: Backend>(
		&mut self,
		store: &mut PersistentStore<B>,
		entry: NewEntry,
	) -> Result<(), Error> {
		self.append_at(store, entry, Utc::now())
	}

	pub fn append_at<B: Backend>(
		&mut self,
		store: &mut PersistentStore<B>,
		entry: NewEntry,
		at: DateTime<Utc>,
	) -> Result<(), Error> {
		let mut entries: Vec<HistoryEntry> = store.get(Collection::History);

		entries.insert(
			0,
			HistoryEntry {
				from: entry.from,
				to: entry.to,
				amount: entry.amount,
				result: entry.result,
				rate: entry.rate,
				timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
			},
		);
		entries.truncate(MAX_HISTORY);

		store.set(Collection::History, &entries)?;
		self.entries = store.get(Collection::History);
		Ok(())
	}

	pub fn clear<B: Backend>(
		&mut self,
		store: &mut PersistentStore<B>,
	) -> Result<(), Error> {
		store.remove(Collection::History)?;
		self.entries = store.get(Collection::History);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::storage::persistent_store::MemoryBackend;
	use crate::util::currency::code;
	use chrono::TimeZone;
	use rand::Rng;

	fn entry(amount: f64) -> NewEntry {
		NewEntry {
			from: code("USD"),
			to: code("TRY"),
			amount,
			result: amount * 32.5,
			rate: 32.5,
		}
	}

	fn setup() -> (PersistentStore<MemoryBackend>, HistoryLedger) {
		let store = PersistentStore::new(MemoryBackend::default());
		let ledger = HistoryLedger::load(&store);
		(store, ledger)
	}

	#[test]
	fn test_append_prepends() {
		let (mut store, mut ledger) = setup();
		ledger.append(&mut store, entry(1.0)).unwrap();
		ledger.append(&mut store, entry(2.0)).unwrap();

		let amounts: Vec<f64> = ledger.list().iter().map(|e| e.amount).collect();
		assert_eq!(amounts, vec![2.0, 1.0]);
	}

	#[test]
	fn test_up_to_capacity_returns_reverse_insertion_order() {
		let mut rng = rand::thread_rng();

		for _ in 0..50 {
			let (mut store, mut ledger) = setup();
			let count = rng.gen_range(0..=MAX_HISTORY);
			let amounts: Vec<f64> =
				(0..count).map(|_| rng.gen_range(0.01..1_000_000.0)).collect();

			for &a in &amounts {
				ledger.append(&mut store, entry(a)).unwrap();
			}

			let listed: Vec<f64> =
				ledger.list().iter().map(|e| e.amount).collect();
			let expected: Vec<f64> = amounts.iter().rev().copied().collect();
			assert_eq!(listed, expected);
		}
	}

	#[test]
	fn test_eleventh_append_evicts_oldest() {
		let (mut store, mut ledger) = setup();
		for i in 1..=11 {
			ledger.append(&mut store, entry(i as f64)).unwrap();
		}

		let amounts: Vec<f64> = ledger.list().iter().map(|e| e.amount).collect();
		assert_eq!(amounts.len(), MAX_HISTORY);
		assert!(!amounts.contains(&1.0));
		assert_eq!(amounts.first(), Some(&11.0));
		assert_eq!(amounts.last(), Some(&2.0));

		let stored: Vec<HistoryEntry> = store.get(Collection::History);
		assert_eq!(stored.len(), MAX_HISTORY);
	}

	#[test]
	fn test_timestamps_descend() {
		let (mut store, mut ledger) = setup();
		let start = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();

		for i in 0..5 {
			let at = start + chrono::Duration::minutes(i);
			ledger.append_at(&mut store, entry(i as f64), at).unwrap();
		}

		let stamps: Vec<&str> =
			ledger.list().iter().map(|e| e.timestamp.as_str()).collect();
		assert_eq!(stamps[0], "2025-03-01T12:04:00.000Z");
		assert!(stamps.windows(2).all(|w| w[0] > w[1]));
	}

	#[test]
	fn test_clear_removes_collection() {
		let (mut store, mut ledger) = setup();
		ledger.append(&mut store, entry(5.0)).unwrap();
		ledger.clear(&mut store).unwrap();

		assert!(ledger.list().is_empty());
		assert!(store.get::<HistoryEntry>(Collection::History).is_empty());
	}
}
