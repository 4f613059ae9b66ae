/*
 * Copyright (c) 2025. Adapta Team
 * This file is part of Adapta.
 * Adapta is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Adapta is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Adapta. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::err;
use crate::error::AdaptaResult;
use csv::ReaderBuilder;
use std::fs::File;
use std::io;
use std::path::Path;

/// One display record from the table view: an ordered sequence of cell text,
/// indexed by zero-based column position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(|c| c.as_str())
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn width(&self) -> usize {
        self.cells.len()
    }

    /// Projects the row onto `columns`, in the order given.
    /// Returns `None` if any index lies beyond the row's width.
    pub fn project(&self, columns: &[usize]) -> Option<Row> {
        let mut cells = Vec::with_capacity(columns.len());
        for &col in columns {
            cells.push(self.cells.get(col)?.clone());
        }
        Some(Row { cells })
    }
}

impl<const N: usize> From<[&str; N]> for Row {
    fn from(cells: [&str; N]) -> Self {
        Self::new(cells.iter().map(|c| c.to_string()).collect())
    }
}

/// The filtered/sorted row set handed over by the table view at export time,
/// taken as an opaque read-only snapshot. The first CSV record carries the
/// column headers.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Snapshot {
    pub fn from_csv_path(path: &Path) -> AdaptaResult<Self> {
        let file = File::open(path)
            .map_err(|e| err!(e; "Unable to open snapshot file '{}'", path.display()))?;
        Self::from_reader(file)
    }

    /// Rows may be ragged here; widths are validated downstream where a
    /// column is actually addressed.
    pub fn from_reader<R: io::Read>(reader: R) -> AdaptaResult<Self> {
        let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = csv_reader
            .headers()
            .map_err(|e| err!(e; "Unable to read the snapshot header record"))?
            .iter()
            .map(str::to_string)
            .collect();
        let mut rows = vec![];
        for record in csv_reader.records() {
            let record = record.map_err(|e| err!(e; "Malformed snapshot record"))?;
            rows.push(Row::new(record.iter().map(str::to_string).collect()));
        }
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_read_snapshot() {
        let csv = indoc! {"
            Fuente de financiamiento,Estado,Categoría,Monto
            Presupuesto estatal,Aprobado,Infraestructura,\"10,000\"
            Fondo verde,Ejecutado,Capacitación,5000.50
        "};
        let snapshot = Snapshot::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(snapshot.headers().len(), 4);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.rows()[0].cell(3), Some("10,000"));
        assert_eq!(snapshot.rows()[1].cell(0), Some("Fondo verde"));
    }

    #[test]
    fn test_ragged_rows_load() {
        let csv = "A,B,C\n1,2,3\n4,5\n";
        let snapshot = Snapshot::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(snapshot.rows()[1].width(), 2);
        assert_eq!(snapshot.rows()[1].cell(2), None);
    }

    #[test]
    fn test_project() {
        let row = Row::from(["a", "b", "c", "d"]);
        assert_eq!(row.project(&[1, 3]), Some(Row::from(["b", "d"])));
        assert_eq!(row.project(&[1, 4]), None);
    }
}
