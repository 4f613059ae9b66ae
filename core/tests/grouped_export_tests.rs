/*
 * Copyright (c) 2025. Adapta Team
 * This file is part of Adapta.
 * Adapta is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Adapta is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Adapta. If not, see <https://www.gnu.org/licenses/>.
 */
//! The whole export path: snapshot -> view pipeline -> aggregation ->
//! document flattening, as one run of the planned-budgets report.
use adapta_core::aggregate::GroupedReport;
use adapta_core::export::csv as csv_export;
use adapta_core::export::document::{DocTheme, ExportDocument};
use adapta_core::locale::Lang;
use adapta_core::snapshot::Snapshot;
use adapta_core::view::{ViewConfig, ViewQuery};
use indoc::indoc;

const PLANNED_SNAPSHOT: &str = indoc! {"
    Fuente de financiamiento,Estado,Categoría,Monto
    Presupuesto estatal,Aprobado,Infraestructura,\"10,000\"
    Fondo verde del clima,Aprobado,Capacitación,\"5,000.50\"
    Presupuesto estatal,Pendiente,Reforestación,250
    Fondo verde del clima,Aprobado,Obras costeras,sin definir
"};

#[test]
fn test_grouped_document_from_snapshot() {
    let snapshot = Snapshot::from_reader(PLANNED_SNAPSHOT.as_bytes()).unwrap();
    let view = ViewConfig::planned_budgets();
    let displayed = view.apply(snapshot.rows(), &ViewQuery::default());

    // Default ordering sorts by the funding-source column, so groups come
    // out contiguous.
    let spec = view.aggregation_spec().unwrap();
    let report = GroupedReport::build(&displayed, &spec).unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(report.groups()[0].key(), "Fondo verde del clima");
    assert_eq!(report.groups()[0].subtotal(), 5000.50);
    assert_eq!(report.groups()[1].key(), "Presupuesto estatal");
    assert_eq!(report.groups()[1].subtotal(), 10250.0);

    let columns = view.document_columns().unwrap();
    let headings = view.column_titles(columns, Lang::Spanish).unwrap();
    let doc = ExportDocument::grouped(
        Lang::Spanish.document_title(view.kind()),
        &headings,
        &report,
        Lang::Spanish,
        view.document_theme(),
    );
    assert_eq!(doc.title, "Financiamiento");
    // Each group: merged header + members + totals row.
    assert_eq!(doc.body.len(), (1 + 2 + 1) + (1 + 2 + 1));
    assert_eq!(doc.widths, vec!["*"; 4]);
    assert_eq!(doc.body[0][0].col_span, Some(4));
    assert_eq!(doc.body[3][0].text, "Total");
    assert_eq!(doc.body[3][3].text, "5000.50");
    assert_eq!(doc.body[7][3].text, "10250.00");

    let json = doc.to_json().unwrap();
    assert!(json.contains("\"tableHeader\""));
    assert!(json.contains("\"widths\""));
}

#[test]
fn test_status_filter_feeds_the_export() {
    let snapshot = Snapshot::from_reader(PLANNED_SNAPSHOT.as_bytes()).unwrap();
    let view = ViewConfig::planned_budgets();
    let query = ViewQuery { status: Some("Aprobado".to_string()), ..Default::default() };
    let displayed = view.apply(snapshot.rows(), &query);
    assert_eq!(displayed.len(), 3);

    let report = GroupedReport::build(&displayed, &view.aggregation_spec().unwrap()).unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(report.groups()[1].key(), "Presupuesto estatal");
    assert_eq!(report.groups()[1].subtotal(), 10000.0);
}

#[test]
fn test_empty_snapshot_yields_empty_export() {
    let snapshot =
        Snapshot::from_reader("Fuente de financiamiento,Estado,Categoría,Monto\n".as_bytes()).unwrap();
    let view = ViewConfig::planned_budgets();
    let displayed = view.apply(snapshot.rows(), &ViewQuery::default());
    let report = GroupedReport::build(&displayed, &view.aggregation_spec().unwrap()).unwrap();
    assert!(report.is_empty());

    let doc = ExportDocument::grouped("Financiamiento", &["A", "B", "C", "D"], &report, Lang::Spanish, DocTheme::Blue);
    assert!(doc.body.is_empty());
    assert_eq!(doc.column_count(), 4);
}

#[test]
fn test_csv_export_projection() {
    let snapshot = Snapshot::from_reader(PLANNED_SNAPSHOT.as_bytes()).unwrap();
    let view = ViewConfig::planned_budgets();
    let displayed = view.apply(snapshot.rows(), &ViewQuery::default());

    let columns = view.export_columns().unwrap();
    let headings = view.column_titles(columns, Lang::English).unwrap();
    let projected: Vec<_> = displayed.iter().map(|r| r.project(columns).unwrap()).collect();

    let mut out = vec![];
    csv_export::write_view(&mut out, "Financing", &headings, &projected).unwrap();
    let text = String::from_utf8(out).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Financing"));
    assert_eq!(lines.next(), Some("Funding source,Status,Category,Amount"));
    assert_eq!(lines.count(), 4);
}
