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
use crate::dashboard::chart::ChartData;
use crate::dashboard::controller::FavoriteCard;
use anyhow::Error;

/// Draws an assembled chart. Gets prepared data only and never reaches
/// back into dashboard state.
pub trait ChartRenderer {
	fn render_chart(&mut self, chart: &ChartData) -> Result<(), Error>;
}

/// Draws the favorites view, one card per favorite.
pub trait FavoritesRenderer {
	fn render_favorites(&mut self, cards: &[FavoriteCard]) -> Result<(), Error>;
}
