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
/// Column-aligned table for listings such as conversions, pairs and chart
/// points. Rendering produces a string so the caller decides where it goes.
pub struct Table {
	column_count: usize,
	rows: Vec<Row>,
	right_align: Vec<bool>, // indicates columns by index
}

pub enum Row {
	Header(Vec<String>),
	Data(Vec<String>),
	Separator,
}

impl Table {
	pub fn new(column_count: usize) -> Self {
		Self {
			column_count,
			rows: Vec::new(),
			right_align: vec![false; column_count],
		}
	}

	pub fn add_header(&mut self, row: Vec<&str>) {
		self.rows.push(Row::Header(
			row.into_iter().map(|s| s.to_string()).collect(),
		));
	}

	pub fn add_row(&mut self, row: Vec<String>) {
		self.rows.push(Row::Data(row));
	}

	pub fn add_separator(&mut self) {
		self.rows.push(Row::Separator);
	}

	/// Specifies columns that should be right-aligned by index.
	pub fn right_align(&mut self, cols: Vec<usize>) {
		for col in cols {
			if col < self.column_count {
				self.right_align[col] = true;
			}
		}
	}

	pub fn render(&self) -> String {
		let mut max_widths = vec![0; self.column_count];

		// Widths count characters, not bytes; currency symbols are multibyte
		for row in &self.rows {
			if let Row::Data(cells) | Row::Header(cells) = row {
				for (i, value) in cells.iter().take(self.column_count).enumerate()
				{
					max_widths[i] = max_widths[i].max(width_of(value));
				}
			}
		}

		let mut out = String::new();
		for row in &self.rows {
			let line = match row {
				Row::Header(cells) => self.render_header(&max_widths, cells),
				Row::Data(cells) => self.render_data(&max_widths, cells),
				Row::Separator => {
					let total: usize = max_widths.iter().sum::<usize>()
						+ 3 * self.column_count.saturating_sub(1);
					"-".repeat(total)
				},
			};
			out.push_str(line.trim_end());
			out.push('\n');
		}
		out
	}

	fn render_data(&self, max_widths: &[usize], cells: &[String]) -> String {
		cells
			.iter()
			.take(self.column_count)
			.enumerate()
			.map(|(i, value)| {
				if self.right_align[i] {
					pad_left(value, max_widths[i])
				} else {
					pad_right(value, max_widths[i])
				}
			})
			.collect::<Vec<String>>()
			.join("   ")
	}

	fn render_header(&self, max_widths: &[usize], cells: &[String]) -> String {
		cells
			.iter()
			.take(self.column_count)
			.enumerate()
			.map(|(i, value)| center_align(value, max_widths[i]))
			.collect::<Vec<String>>()
			.join(" | ")
	}
}

fn width_of(value: &str) -> usize {
	value.chars().count()
}

fn pad_left(value: &str, width: usize) -> String {
	let fill = width.saturating_sub(width_of(value));
	format!("{}{}", " ".repeat(fill), value)
}

fn pad_right(value: &str, width: usize) -> String {
	let fill = width.saturating_sub(width_of(value));
	format!("{}{}", value, " ".repeat(fill))
}

fn center_align(value: &str, width: usize) -> String {
	let total_padding = width.saturating_sub(width_of(value));
	let left_padding = total_padding / 2;
	let right_padding = total_padding - left_padding;

	format!(
		"{}{}{}",
		" ".repeat(left_padding),
		value,
		" ".repeat(right_padding)
	)
}
