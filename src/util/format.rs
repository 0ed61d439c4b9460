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
/// Renders a rate or amount for display. The result is for people only and
/// must never be parsed back into a number; stored and transmitted values
/// keep their full precision.
///
/// Large magnitudes are abbreviated with K/M suffixes and tiny ones keep
/// eight decimals so they don't collapse to zero.
pub fn format_number(value: Option<f64>) -> String {
	let value = match value {
		Some(v) => v,
		None => return "0.00".to_string(),
	};

	let abs = value.abs();

	if abs >= 1_000_000.0 {
		format!("{:.2}M", value / 1_000_000.0)
	} else if abs >= 1_000.0 {
		format!("{:.2}K", value / 1_000.0)
	} else if abs > 0.0 && abs < 0.01 {
		format!("{:.8}", value)
	} else if abs < 1.0 {
		format!("{:.4}", value)
	} else {
		format!("{:.2}", value)
	}
}

/// Shorthand for the common case of a value that is known to be present.
pub fn fmt(value: f64) -> String {
	format_number(Some(value))
}

/// Signed percentage as shown in comparisons, e.g. "+4.20%" or "-1.5%".
/// Zero gets no sign.
pub fn format_change(percent: f64) -> String {
	if percent > 0.0 {
		format!("+{}%", percent)
	} else {
		format!("{}%", percent)
	}
}
