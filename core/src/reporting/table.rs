/*
 * Copyright (c) 2025. Adapta Team
 * This file is part of Adapta.
 * Adapta is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Adapta is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Adapta. If not, see <https://www.gnu.org/licenses/>.
 */
//! Columnar terminal rendering.
//!
//! Column widths are computed from the content, spanning cells distribute
//! any deficit into their last covered column, and the whole table is
//! shrunk column by column when it would overflow the terminal.
use ansi_term::Style;
use std::fmt;

const COLUMN_GAP: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Default)]
pub struct Cell {
    text: String,
    alignment: Alignment,
    style: Option<Style>,
    hspan: usize,
}

impl Cell {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into(), alignment: Alignment::Left, style: None, hspan: 1 }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// `columns` must be >= 1.
    pub fn with_hspan(mut self, columns: usize) -> Self {
        self.hspan = columns.max(1);
        self
    }

    fn hspan(&self) -> usize {
        self.hspan.max(1)
    }

    fn width(&self) -> usize {
        self.text.chars().count()
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::new(text)
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::new(text)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Row {
    cells: Vec<Cell>,
    header: bool,
    separator: Option<char>,
}

impl Row {
    pub fn new<I, C>(cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        Self { cells: cells.into_iter().map(Into::into).collect(), header: false, separator: None }
    }

    fn separator(separator: char) -> Self {
        Self { cells: vec![], header: false, separator: Some(separator) }
    }

    fn logical_width(&self) -> usize {
        self.cells.iter().map(Cell::hspan).sum()
    }
}

pub struct Table {
    rows: Vec<Row>,
    color: bool,
    max_width: Option<usize>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            rows: vec![],
            color: atty::is(atty::Stream::Stdout),
            max_width: term_size::dimensions().map(|(w, _)| w),
        }
    }
}

impl Table {
    pub fn color(&self) -> bool {
        self.color
    }

    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    pub fn set_max_width(&mut self, max_width: Option<usize>) {
        self.max_width = max_width;
    }

    pub fn set_heading_row<I, C>(&mut self, headings: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        let mut row = Row::new(headings);
        row.header = true;
        self.rows.push(row);
    }

    pub fn push_row<I, C>(&mut self, cells: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.rows.push(Row::new(cells));
    }

    pub fn push_separator_row(&mut self, separator: char) {
        self.rows.push(Row::separator(separator));
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn print<W: fmt::Write>(&self, writer: &mut W) -> fmt::Result {
        let column_count = self.rows.iter().map(Row::logical_width).max().unwrap_or(0);
        if column_count == 0 {
            return Ok(());
        }
        let widths = self.column_widths(column_count);
        let total: usize = widths.iter().sum::<usize>() + COLUMN_GAP * (column_count - 1);

        for row in &self.rows {
            if let Some(separator) = row.separator {
                writeln!(writer, "{}", separator.to_string().repeat(total))?;
                continue;
            }
            let mut line = String::new();
            let mut position = 0;
            for (i, cell) in row.cells.iter().enumerate() {
                let span = cell.hspan().min(column_count - position);
                let field_width: usize = widths[position..position + span].iter().sum::<usize>()
                    + COLUMN_GAP * (span - 1);
                let field = pad(&fit(&cell.text, field_width), field_width, cell.alignment);
                let style = cell.style.or_else(|| row.header.then(|| Style::new().bold()));
                match style.filter(|_| self.color) {
                    Some(style) => {
                        line.push_str(&style.paint(field).to_string());
                    }
                    None => line.push_str(&field),
                }
                position += span;
                if i + 1 < row.cells.len() {
                    line.push_str(&" ".repeat(COLUMN_GAP));
                }
            }
            writeln!(writer, "{}", line.trim_end())?;
        }
        Ok(())
    }

    fn column_widths(&self, column_count: usize) -> Vec<usize> {
        let mut widths = vec![0usize; column_count];
        // Single-span cells set the base widths.
        for row in &self.rows {
            let mut position = 0;
            for cell in &row.cells {
                if cell.hspan() == 1 && position < column_count {
                    widths[position] = widths[position].max(cell.width());
                }
                position += cell.hspan();
            }
        }
        // Spanning cells widen their last covered column when the covered
        // span falls short.
        for row in &self.rows {
            let mut position = 0;
            for cell in &row.cells {
                let span = cell.hspan().min(column_count.saturating_sub(position));
                if span > 1 {
                    let covered: usize =
                        widths[position..position + span].iter().sum::<usize>() + COLUMN_GAP * (span - 1);
                    if cell.width() > covered {
                        widths[position + span - 1] += cell.width() - covered;
                    }
                }
                position += span;
            }
        }
        // Shrink the widest columns until the table fits the terminal.
        if let Some(max_width) = self.max_width {
            let gap_total = COLUMN_GAP * (column_count - 1);
            let mut total: usize = widths.iter().sum::<usize>() + gap_total;
            while total > max_width {
                let widest = widths
                    .iter()
                    .enumerate()
                    .max_by_key(|(_, w)| **w)
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                if widths[widest] <= 1 {
                    break;
                }
                widths[widest] -= 1;
                total -= 1;
            }
        }
        widths
    }
}

fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut truncated: String = text.chars().take(width - 1).collect();
    truncated.push('…');
    truncated
}

fn pad(text: &str, width: usize, alignment: Alignment) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let deficit = width - len;
    match alignment {
        Alignment::Left => format!("{}{}", text, " ".repeat(deficit)),
        Alignment::Right => format!("{}{}", " ".repeat(deficit), text),
        Alignment::Center => {
            let left = deficit / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(deficit - left))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_table() -> Table {
        let mut table = Table::default();
        table.set_color(false);
        table.set_max_width(None);
        table
    }

    #[test]
    fn test_column_alignment() {
        let mut table = plain_table();
        table.set_heading_row(["Nombre", "Monto"]);
        table.push_separator_row('-');
        table.push_row(vec![Cell::new("Reforestación"), Cell::new("2,000").with_alignment(Alignment::Right)]);
        table.push_row(vec![Cell::new("Drenaje"), Cell::new("500").with_alignment(Alignment::Right)]);
        let mut out = String::new();
        table.print(&mut out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Nombre         Monto");
        assert_eq!(lines[1], "--------------------");
        assert_eq!(lines[2], "Reforestación  2,000");
        assert_eq!(lines[3], "Drenaje          500");
    }

    #[test]
    fn test_spanning_cell() {
        let mut table = plain_table();
        table.push_row(["aaaa", "bb"]);
        table.push_row(vec![Cell::new("Fondo verde").with_hspan(2).with_alignment(Alignment::Center)]);
        let mut out = String::new();
        table.print(&mut out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        // Total width: 4 + 2 + gap(2) = 8; the spanning cell widens the
        // last covered column to fit its 11 chars.
        assert_eq!(lines[1], "Fondo verde");
        assert_eq!(lines[0], "aaaa  bb");
    }

    #[test]
    fn test_shrinks_to_max_width() {
        let mut table = plain_table();
        table.set_max_width(Some(12));
        table.push_row(["una descripción muy larga", "x"]);
        let mut out = String::new();
        table.print(&mut out).unwrap();
        let first = out.lines().next().unwrap();
        assert!(first.chars().count() <= 12);
        assert!(first.contains('…'));
    }

    #[test]
    fn test_empty_table() {
        let table = plain_table();
        let mut out = String::new();
        table.print(&mut out).unwrap();
        assert!(out.is_empty());
    }
}
