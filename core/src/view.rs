/*
 * Copyright (c) 2025. Adapta Team
 * This file is part of Adapta.
 * Adapta is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Adapta is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Adapta. If not, see <https://www.gnu.org/licenses/>.
 */
//! The four administrative table views and their display pipeline.
//!
//! A `ViewConfig` is the closed description of one view: its columns, the
//! default ordering, which column the status dropdown filters, and the
//! column projections its exports use. `apply` reproduces the grid's draw
//! pipeline — global search, status filter, date range, then ordering — so
//! exports consume exactly the rows the view would display.
use crate::aggregate::AggregationSpec;
use crate::err;
use crate::error::AdaptaResult;
use crate::export::document::DocTheme;
use crate::locale::Lang;
use crate::numeric;
use crate::snapshot::Row;
use chrono::NaiveDate;
use std::cmp::Ordering;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Actions,
    PlannedBudgets,
    ExecutedBudgets,
    IndicatorResults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnKind {
    #[default]
    Text,
    Numeric,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone)]
pub struct ColumnDef {
    title_es: &'static str,
    title_en: &'static str,
    kind: ColumnKind,
    searchable: bool,
    orderable: bool,
    visible: bool,
}

impl ColumnDef {
    fn new(title_es: &'static str, title_en: &'static str) -> Self {
        Self { title_es, title_en, kind: ColumnKind::Text, searchable: true, orderable: true, visible: true }
    }

    fn numeric(mut self) -> Self {
        self.kind = ColumnKind::Numeric;
        self
    }

    fn date(mut self) -> Self {
        self.kind = ColumnKind::Date;
        self
    }

    fn unsearchable(mut self) -> Self {
        self.searchable = false;
        self
    }

    fn unorderable(mut self) -> Self {
        self.orderable = false;
        self
    }

    fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn title(&self, lang: Lang) -> &'static str {
        match lang {
            Lang::Spanish => self.title_es,
            Lang::English => self.title_en,
        }
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn is_orderable(&self) -> bool {
        self.orderable
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// The filter state of one invocation, threaded explicitly to the display
/// pipeline. The status sentinel `Todos`/`All` clears the status filter, as
/// the dropdown does.
#[derive(Debug, Clone, Default)]
pub struct ViewQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub begin: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct ViewConfig {
    kind: ViewKind,
    columns: Vec<ColumnDef>,
    default_order: Option<(usize, SortDirection)>,
    status_column: Option<usize>,
    date_column: Option<usize>,
    export_columns: Option<Vec<usize>>,
    document_columns: Option<Vec<usize>>,
    grouped_export: Option<(usize, usize)>,
    document_centered: bool,
    document_theme: DocTheme,
}

impl ViewConfig {
    /// The actions listing. The leading selection column and the trailing
    /// row-buttons column carry no exportable text.
    pub fn actions() -> Self {
        Self {
            kind: ViewKind::Actions,
            columns: vec![
                ColumnDef::new("", "").unsearchable().unorderable(),
                ColumnDef::new("Nombre", "Name"),
                ColumnDef::new("Municipio", "Municipality"),
                ColumnDef::new("Programa", "Programme"),
                ColumnDef::new("Estado", "Status"),
                ColumnDef::new("Acciones", "Actions").unsearchable().unorderable(),
            ],
            default_order: Some((3, SortDirection::Ascending)),
            status_column: Some(4),
            date_column: None,
            export_columns: Some(vec![1, 2, 4]),
            document_columns: Some(vec![1, 2, 3, 4]),
            grouped_export: None,
            document_centered: true,
            document_theme: DocTheme::Blue,
        }
    }

    /// Planned budgets. The funding-source column is hidden on screen but
    /// still drives ordering, exports and the grouped document.
    pub fn planned_budgets() -> Self {
        Self {
            kind: ViewKind::PlannedBudgets,
            columns: vec![
                ColumnDef::new("Fuente de financiamiento", "Funding source").hidden(),
                ColumnDef::new("Estado", "Status"),
                ColumnDef::new("Categoría", "Category"),
                ColumnDef::new("Monto", "Amount").numeric(),
            ],
            default_order: Some((0, SortDirection::Ascending)),
            status_column: Some(1),
            date_column: None,
            export_columns: Some(vec![0, 1, 2, 3]),
            document_columns: Some(vec![0, 1, 2, 3]),
            grouped_export: Some((0, 3)),
            document_centered: false,
            document_theme: DocTheme::Blue,
        }
    }

    /// Executed budgets. The view defines no export buttons.
    pub fn executed_budgets() -> Self {
        Self {
            kind: ViewKind::ExecutedBudgets,
            columns: vec![
                ColumnDef::new("Monto", "Amount").numeric(),
                ColumnDef::new("Fecha de inicio", "Start date").date(),
                ColumnDef::new("Fecha de finalización", "End date").date(),
                ColumnDef::new("Observación", "Observation"),
            ],
            default_order: Some((1, SortDirection::Ascending)),
            status_column: None,
            date_column: Some(1),
            export_columns: None,
            document_columns: None,
            grouped_export: None,
            document_centered: false,
            document_theme: DocTheme::Blue,
        }
    }

    /// Indicator results. Snapshot order is preserved: the view declares no
    /// default ordering.
    pub fn indicator_results() -> Self {
        Self {
            kind: ViewKind::IndicatorResults,
            columns: vec![
                ColumnDef::new("Fecha", "Date").date(),
                ColumnDef::new("Valor", "Value").numeric(),
                ColumnDef::new("Fuente del dato", "Data source"),
                ColumnDef::new("Variables", "Variables"),
                ColumnDef::new("Observaciones o comentarios", "Comments"),
            ],
            default_order: None,
            status_column: None,
            date_column: Some(0),
            export_columns: Some(vec![0, 1, 2, 3, 4]),
            document_columns: Some(vec![0, 1, 2, 3, 4]),
            grouped_export: None,
            document_centered: false,
            document_theme: DocTheme::Green,
        }
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn visible_columns(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.visible)
            .map(|(i, _)| i)
            .collect()
    }

    /// Columns projected into the CSV export, when the view defines one.
    pub fn export_columns(&self) -> Option<&[usize]> {
        self.export_columns.as_deref()
    }

    /// Columns projected into the document export, when the view defines
    /// one.
    pub fn document_columns(&self) -> Option<&[usize]> {
        self.document_columns.as_deref()
    }

    /// The grouped-document columns, for views that total a numeric column
    /// per group.
    pub fn grouped_export(&self) -> Option<(usize, usize)> {
        self.grouped_export
    }

    /// Regroups the document export on different columns. Out-of-range
    /// indices surface as width errors when the aggregation runs.
    pub fn set_grouped_export(&mut self, group_column: usize, value_column: usize) {
        self.grouped_export = Some((group_column, value_column));
    }

    /// The grouped-document parameters, for views that total a numeric
    /// column per group.
    pub fn aggregation_spec(&self) -> Option<AggregationSpec> {
        let (group_column, value_column) = self.grouped_export?;
        let visible_columns = self.document_columns.clone()?;
        Some(AggregationSpec { group_column, value_column, visible_columns })
    }

    pub fn document_centered(&self) -> bool {
        self.document_centered
    }

    pub fn document_theme(&self) -> DocTheme {
        self.document_theme
    }

    pub fn column_titles(&self, columns: &[usize], lang: Lang) -> AdaptaResult<Vec<&'static str>> {
        columns
            .iter()
            .map(|&i| {
                self.columns
                    .get(i)
                    .map(|c| c.title(lang))
                    .ok_or_else(|| err!("Column {} is not defined for this view", i))
            })
            .collect()
    }

    /// Returns the rows the view currently displays: global search, status
    /// filter, date range, then the default ordering — the grid's draw
    /// pipeline. Rows too narrow for a filtered column simply fail the
    /// filter; width errors are raised downstream where a projection is
    /// taken.
    pub fn apply(&self, rows: &[Row], query: &ViewQuery) -> Vec<Row> {
        let search = query
            .search
            .as_deref()
            .map(str::to_lowercase)
            .filter(|s| !s.is_empty());
        let status = query.status.as_deref().filter(|s| {
            !s.is_empty() && !s.eq_ignore_ascii_case("todos") && !s.eq_ignore_ascii_case("all")
        });

        let mut displayed: Vec<Row> = rows
            .iter()
            .filter(|row| self.row_matches(row, search.as_deref(), status, query))
            .cloned()
            .collect();

        if let Some((column, direction)) = self.default_order {
            displayed.sort_by(|a, b| {
                let ord = self.compare_cells(
                    column,
                    a.cell(column).unwrap_or(""),
                    b.cell(column).unwrap_or(""),
                );
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }
        displayed
    }

    fn row_matches(
        &self,
        row: &Row,
        search: Option<&str>,
        status: Option<&str>,
        query: &ViewQuery,
    ) -> bool {
        if let Some(needle) = search {
            let hit = self.columns.iter().enumerate().any(|(i, col)| {
                col.searchable
                    && row
                        .cell(i)
                        .map(|cell| cell.to_lowercase().contains(needle))
                        .unwrap_or(false)
            });
            if !hit {
                return false;
            }
        }

        if let (Some(wanted), Some(column)) = (status, self.status_column) {
            let matched = row.cell(column).map(|cell| cell.eq_ignore_ascii_case(wanted)).unwrap_or(false);
            if !matched {
                return false;
            }
        }

        if query.begin.is_some() || query.end.is_some() {
            if let Some(column) = self.date_column {
                let date = row
                    .cell(column)
                    .and_then(|cell| NaiveDate::parse_from_str(cell, DATE_FORMAT).ok());
                match date {
                    Some(date) => {
                        if query.begin.map(|begin| date < begin).unwrap_or(false) {
                            return false;
                        }
                        if query.end.map(|end| date > end).unwrap_or(false) {
                            return false;
                        }
                    }
                    // A dated filter excludes rows whose date cell cannot be read.
                    None => return false,
                }
            }
        }
        true
    }

    fn compare_cells(&self, column: usize, a: &str, b: &str) -> Ordering {
        let kind = self.columns.get(column).map(|c| c.kind).unwrap_or_default();
        match kind {
            ColumnKind::Numeric => numeric::compare(a, b),
            ColumnKind::Date => {
                let parse = |s: &str| NaiveDate::parse_from_str(s, DATE_FORMAT).ok();
                match (parse(a), parse(b)) {
                    (Some(da), Some(db)) => da.cmp(&db),
                    _ => a.to_lowercase().cmp(&b.to_lowercase()),
                }
            }
            ColumnKind::Text => a.to_lowercase().cmp(&b.to_lowercase()),
        }
    }
}
