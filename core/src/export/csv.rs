/*
 * Copyright (c) 2025. Adapta Team
 * This file is part of Adapta.
 * Adapta is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Adapta is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Adapta. If not, see <https://www.gnu.org/licenses/>.
 */
//! CSV export: the document title on its own line, then the localized
//! header record, then one record per displayed row.
use crate::err;
use crate::error::AdaptaResult;
use crate::snapshot::Row;
use ::csv::WriterBuilder;
use std::io;

pub fn write_view<W: io::Write>(
    writer: W,
    title: &str,
    headings: &[&str],
    rows: &[Row],
) -> AdaptaResult<()> {
    let mut csv_writer = WriterBuilder::new().flexible(true).from_writer(writer);
    csv_writer
        .write_record([title])
        .and_then(|_| csv_writer.write_record(headings))
        .map_err(|e| err!(e; "Unable to write the export header"))?;
    for row in rows {
        csv_writer
            .write_record(row.cells())
            .map_err(|e| err!(e; "Unable to write an export record"))?;
    }
    csv_writer.flush().map_err(|e| err!(e; "Unable to flush the export"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_write_view() {
        let rows = [Row::from(["Reforestación", "Niquero", "En ejecución"]),
            Row::from(["Drenaje pluvial", "Pilón", "Planificada"])];
        let mut out = vec![];
        write_view(
            &mut out,
            "Reporte de acciones de adaptación para el cambio climático.",
            &["Nombre", "Municipio", "Estado"],
            &rows,
        )
        .unwrap();
        let expected = indoc! {"
            Reporte de acciones de adaptación para el cambio climático.
            Nombre,Municipio,Estado
            Reforestación,Niquero,En ejecución
            Drenaje pluvial,Pilón,Planificada
        "};
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_cells_needing_quotes() {
        let rows = [Row::from(["uno, dos", "x"])];
        let mut out = vec![];
        write_view(&mut out, "t", &["A", "B"], &rows).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("\"uno, dos\",x"));
    }

    #[test]
    fn test_empty_view() {
        let mut out = vec![];
        write_view(&mut out, "t", &["A"], &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "t\nA\n");
    }
}
