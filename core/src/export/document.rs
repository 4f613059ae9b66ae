/*
 * Copyright (c) 2025. Adapta Team
 * This file is part of Adapta.
 * Adapta is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Adapta is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Adapta. If not, see <https://www.gnu.org/licenses/>.
 */
//! The document definition handed to the downstream renderer.
//!
//! The renderer takes a flat table body (rows of styled, optionally
//! column-spanning cells), equal-width column metadata and a fixed layout
//! block, serialized as JSON. Flattening a grouped report emits, per group,
//! a header cell spanning every visible column, the member rows, and a
//! totals row whose merged label spans all but the last column.
use crate::aggregate::GroupedReport;
use crate::err;
use crate::error::AdaptaResult;
use crate::locale::Lang;
use crate::snapshot::Row;
use serde::Serialize;

const GROUP_HEADER_FILL: &str = "#d1e7dd";
const GROUP_HEADER_COLOR: &str = "#000000";

/// Alignment names as the renderer spells them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocAlignment {
    Left,
    Center,
    Right,
}

/// Header fill and title color pairing. The indicator report is the green
/// variant; every other view exports the blue one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocTheme {
    Blue,
    Green,
}

impl DocTheme {
    fn header_fill(self) -> &'static str {
        match self {
            DocTheme::Blue => "#1B84FF",
            DocTheme::Green => "#348E38",
        }
    }

    fn title_color(self) -> &'static str {
        match self {
            DocTheme::Blue => "gray",
            DocTheme::Green => "green",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocCell {
    pub text: String,
    #[serde(rename = "colSpan", skip_serializing_if = "Option::is_none")]
    pub col_span: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<DocAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(rename = "fillColor", skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
}

impl DocCell {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self { text: text.into(), col_span: None, alignment: None, bold: None, fill_color: None, color: None }
    }

    pub fn centered(mut self) -> Self {
        self.alignment = Some(DocAlignment::Center);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = Some(true);
        self
    }

    pub fn spanning(mut self, columns: usize) -> Self {
        self.col_span = Some(columns);
        self
    }

    pub fn filled(mut self, fill: &'static str, color: &'static str) -> Self {
        self.fill_color = Some(fill);
        self.color = Some(color);
        self
    }

    /// The filler object behind a spanning cell; the renderer expects the
    /// body to stay rectangular.
    fn pad() -> Self {
        Self::text("")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TitleStyle {
    pub color: &'static str,
    #[serde(rename = "fontSize")]
    pub font_size: u8,
    pub alignment: DocAlignment,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableHeaderStyle {
    pub bold: bool,
    #[serde(rename = "fontSize")]
    pub font_size: u8,
    pub color: &'static str,
    #[serde(rename = "fillColor")]
    pub fill_color: &'static str,
    pub alignment: DocAlignment,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocStyles {
    pub title: TitleStyle,
    #[serde(rename = "tableHeader")]
    pub table_header: TableHeaderStyle,
}

impl DocStyles {
    fn themed(theme: DocTheme) -> Self {
        Self {
            title: TitleStyle { color: theme.title_color(), font_size: 20, alignment: DocAlignment::Center },
            table_header: TableHeaderStyle {
                bold: true,
                font_size: 11,
                color: "white",
                fill_color: theme.header_fill(),
                alignment: DocAlignment::Center,
            },
        }
    }
}

/// Cell paddings and hair lines, fixed across every export.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocLayout {
    pub padding_left: u8,
    pub padding_right: u8,
    pub padding_top: u8,
    pub padding_bottom: u8,
    pub h_line_width: f32,
    pub v_line_width: f32,
    pub h_line_color: &'static str,
    pub v_line_color: &'static str,
}

impl Default for DocLayout {
    fn default() -> Self {
        Self {
            padding_left: 4,
            padding_right: 4,
            padding_top: 8,
            padding_bottom: 8,
            h_line_width: 0.5,
            v_line_width: 0.5,
            h_line_color: "#aaa",
            v_line_color: "#aaa",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument {
    pub title: String,
    pub header: Vec<DocCell>,
    pub body: Vec<Vec<DocCell>>,
    /// One `*` per body column: equal widths over the full page, sized to
    /// the columns actually present once the body is flattened.
    pub widths: Vec<&'static str>,
    pub styles: DocStyles,
    pub layout: DocLayout,
}

impl ExportDocument {
    /// An ungrouped export: one body row per member row.
    pub fn plain<S: Into<String>>(
        title: S,
        headings: &[&str],
        rows: &[Row],
        theme: DocTheme,
        centered: bool,
    ) -> Self {
        let body = rows
            .iter()
            .map(|row| {
                row.cells()
                    .iter()
                    .map(|cell| {
                        let cell = DocCell::text(cell.clone());
                        if centered { cell.centered() } else { cell }
                    })
                    .collect()
            })
            .collect();
        Self::assemble(title.into(), headings, body, theme)
    }

    /// A grouped, totaled export. Per group: one merged header cell
    /// spanning the visible columns, the member rows, and a totals row
    /// carrying the two-decimal subtotal in the last column.
    pub fn grouped<S: Into<String>>(
        title: S,
        headings: &[&str],
        report: &GroupedReport,
        lang: Lang,
        theme: DocTheme,
    ) -> Self {
        let columns = headings.len();
        let mut body: Vec<Vec<DocCell>> = vec![];
        for group in report.groups() {
            let mut header_row = vec![
                DocCell::text(group.key())
                    .spanning(columns)
                    .centered()
                    .bold()
                    .filled(GROUP_HEADER_FILL, GROUP_HEADER_COLOR),
            ];
            header_row.extend((1..columns).map(|_| DocCell::pad()));
            body.push(header_row);

            for member in group.members() {
                let mut row: Vec<DocCell> =
                    member.cells().iter().map(|cell| DocCell::text(cell.clone())).collect();
                // The summed column is shown centered, like the totals row below it.
                if let Some(last) = row.last_mut() {
                    last.alignment = Some(DocAlignment::Center);
                }
                body.push(row);
            }

            let subtotal = DocCell::text(group.subtotal_rounded()).centered().bold();
            if columns > 1 {
                let mut totals = vec![DocCell::text(lang.total()).spanning(columns - 1).centered().bold()];
                totals.extend((2..columns).map(|_| DocCell::pad()));
                totals.push(subtotal);
                body.push(totals);
            } else {
                body.push(vec![subtotal]);
            }
        }
        Self::assemble(title.into(), headings, body, theme)
    }

    fn assemble(title: String, headings: &[&str], body: Vec<Vec<DocCell>>, theme: DocTheme) -> Self {
        let header: Vec<DocCell> = headings.iter().map(|h| DocCell::text(*h)).collect();
        // Width metadata follows the flattened body; an empty export keeps
        // the header's count so the renderer still draws a table shell.
        let column_count = body.first().map(|row| row.len()).unwrap_or(header.len());
        Self {
            title,
            header,
            body,
            widths: vec!["*"; column_count],
            styles: DocStyles::themed(theme),
            layout: DocLayout::default(),
        }
    }

    pub fn column_count(&self) -> usize {
        self.widths.len()
    }

    pub fn to_json(&self) -> AdaptaResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| err!(e; "Unable to serialize the export document"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{AggregationSpec, GroupedReport};

    fn sample_report() -> GroupedReport {
        let rows = [
            Row::from(["Fondo verde", "Aprobado", "Obras", "2,000"]),
            Row::from(["Fondo verde", "Pendiente", "Obras", "1,500.25"]),
            Row::from(["Estatal", "Aprobado", "Capacitación", "x"]),
        ];
        let spec = AggregationSpec { group_column: 0, value_column: 3, visible_columns: vec![0, 1, 2, 3] };
        GroupedReport::build(&rows, &spec).unwrap()
    }

    #[test]
    fn test_grouped_body_shape() {
        let doc = ExportDocument::grouped(
            "Financiamiento",
            &["Fuente de financiamiento", "Estado", "Categoría", "Monto"],
            &sample_report(),
            Lang::Spanish,
            DocTheme::Blue,
        );
        // Two groups: (header + 2 members + total) + (header + 1 member + total).
        assert_eq!(doc.body.len(), 7);
        assert_eq!(doc.widths, vec!["*", "*", "*", "*"]);

        let group_header = &doc.body[0][0];
        assert_eq!(group_header.text, "Fondo verde");
        assert_eq!(group_header.col_span, Some(4));
        assert_eq!(group_header.fill_color, Some("#d1e7dd"));
        assert_eq!(doc.body[0].len(), 4);

        let totals = &doc.body[3];
        assert_eq!(totals[0].text, "Total");
        assert_eq!(totals[0].col_span, Some(3));
        assert_eq!(totals[3].text, "3500.25");
        assert_eq!(totals[3].bold, Some(true));
    }

    #[test]
    fn test_unparsable_member_totals_to_zero() {
        let doc = ExportDocument::grouped(
            "Financiamiento",
            &["Fuente de financiamiento", "Estado", "Categoría", "Monto"],
            &sample_report(),
            Lang::Spanish,
            DocTheme::Blue,
        );
        assert_eq!(doc.body[6][3].text, "0.00");
    }

    #[test]
    fn test_empty_report_keeps_header_widths() {
        let report = GroupedReport::default();
        let doc = ExportDocument::grouped("Financiamiento", &["A", "B"], &report, Lang::Spanish, DocTheme::Blue);
        assert!(doc.body.is_empty());
        assert_eq!(doc.widths.len(), 2);
        assert!(doc.to_json().is_ok());
    }

    #[test]
    fn test_plain_document_centering() {
        let rows = [Row::from(["2024-01-01", "5"])];
        let doc = ExportDocument::plain("Reporte", &["Fecha", "Valor"], &rows, DocTheme::Green, false);
        assert_eq!(doc.body[0][0].alignment, None);
        assert_eq!(doc.styles.table_header.fill_color, "#348E38");

        let doc = ExportDocument::plain("Reporte", &["Fecha", "Valor"], &rows, DocTheme::Blue, true);
        assert_eq!(doc.body[0][0].alignment, Some(DocAlignment::Center));
    }

    #[test]
    fn test_json_field_names() {
        let doc = ExportDocument::grouped(
            "Financiamiento",
            &["Fuente de financiamiento", "Estado", "Categoría", "Monto"],
            &sample_report(),
            Lang::Spanish,
            DocTheme::Blue,
        );
        let json = doc.to_json().unwrap();
        assert!(json.contains("\"colSpan\": 4"));
        assert!(json.contains("\"fillColor\": \"#1B84FF\""));
        assert!(json.contains("\"paddingLeft\": 4"));
        assert!(json.contains("\"hLineColor\": \"#aaa\""));
        assert!(json.contains("\"alignment\": \"center\""));
    }
}
