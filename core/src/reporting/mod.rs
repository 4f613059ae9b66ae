/*
 * Copyright (c) 2025. Adapta Team
 * This file is part of Adapta.
 * Adapta is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Adapta is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Adapta. If not, see <https://www.gnu.org/licenses/>.
 */
pub mod table;

pub use table::{Alignment, Cell, Row, Table};
