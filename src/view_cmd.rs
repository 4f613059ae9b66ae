/*
 * Copyright (c) 2025. Adapta Team
 * This file is part of Adapta.
 * Adapta is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Adapta is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Adapta. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::{ExecCommand, Session};
use adapta_core::aggregate::GroupedReport;
use adapta_core::err;
use adapta_core::error::AdaptaResult;
use adapta_core::export::csv as csv_export;
use adapta_core::export::document::ExportDocument;
use adapta_core::reporting::table::{Alignment, Cell, Table};
use adapta_core::snapshot::Row;
use adapta_core::view::{ColumnKind, ViewConfig, ViewQuery};
use clap::ValueEnum;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Columnar table on the terminal
    #[default]
    Table,
    /// Comma separated values
    Csv,
    /// Document definition (JSON) for the report renderer
    Doc,
}

/// One view invocation: the view's configuration plus the filters and the
/// requested export shape.
pub struct ViewCommand {
    view: ViewConfig,
    query: ViewQuery,
    export: ExportFormat,
    output: Option<PathBuf>,
}

impl ViewCommand {
    pub fn new(
        view: ViewConfig,
        query: ViewQuery,
        export: ExportFormat,
        output: Option<PathBuf>,
    ) -> Self {
        Self { view, query, export, output }
    }

    fn writer(&self) -> AdaptaResult<Box<dyn Write>> {
        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .map_err(|e| err!(e; "Unable to create '{}'", path.display()))?;
                Ok(Box::new(file))
            }
            None => Ok(Box::new(io::stdout())),
        }
    }

    fn print_table(
        &self,
        session: &Session,
        displayed: &[Row],
        snapshot_rows: usize,
    ) -> AdaptaResult<()> {
        let lang = session.lang;
        if displayed.is_empty() {
            let message = if snapshot_rows == 0 {
                lang.empty_table(self.view.kind())
            } else {
                lang.zero_records()
            };
            println!("{}", message);
            return Ok(());
        }

        let mut table = Table::default();
        if let Some(color) = session.color {
            table.set_color(color);
        }
        let visible = self.view.visible_columns();
        table.set_heading_row(self.view.column_titles(&visible, lang)?);
        table.push_separator_row('-');
        // Views grouped on a column repeat its value as a merged header row
        // whenever it changes, like the on-screen table does.
        let group_column = self.view.grouped_export().map(|(group, _)| group);
        let mut last_group: Option<String> = None;
        for row in displayed {
            if let Some(column) = group_column {
                let group = row.cell(column).unwrap_or("");
                if last_group.as_deref() != Some(group) {
                    table.push_row(vec![
                        Cell::new(group)
                            .with_hspan(visible.len())
                            .with_alignment(Alignment::Center),
                    ]);
                    last_group = Some(group.to_string());
                }
            }
            let cells = visible
                .iter()
                .map(|&i| {
                    let cell = Cell::new(row.cell(i).unwrap_or(""));
                    match self.view.columns()[i].kind() {
                        ColumnKind::Numeric => cell.with_alignment(Alignment::Right),
                        _ => cell,
                    }
                })
                .collect::<Vec<_>>();
            table.push_row(cells);
        }
        let mut output = String::new();
        table.print(&mut output).map_err(|e| err!(e; "Unable to render the table"))?;
        print!("{output}");
        Ok(())
    }

    fn write_csv(&self, session: &Session, displayed: &[Row]) -> AdaptaResult<()> {
        let lang = session.lang;
        let columns = self.view.export_columns().ok_or_else(|| {
            err!("The '{}' view does not define exports", lang.view_title(self.view.kind()))
        })?;
        let headings = self.view.column_titles(columns, lang)?;
        let projected = project_all(displayed, columns)?;
        csv_export::write_view(
            self.writer()?,
            lang.document_title(self.view.kind()),
            &headings,
            &projected,
        )
    }

    fn write_document(&self, session: &Session, displayed: &[Row]) -> AdaptaResult<()> {
        let lang = session.lang;
        let columns = self.view.document_columns().ok_or_else(|| {
            err!("The '{}' view does not define exports", lang.view_title(self.view.kind()))
        })?;
        let headings = self.view.column_titles(columns, lang)?;
        let title = lang.document_title(self.view.kind());

        let doc = match self.view.aggregation_spec() {
            Some(spec) => {
                let report = GroupedReport::build(displayed, &spec)?;
                ExportDocument::grouped(title, &headings, &report, lang, self.view.document_theme())
            }
            None => {
                let projected = project_all(displayed, columns)?;
                ExportDocument::plain(
                    title,
                    &headings,
                    &projected,
                    self.view.document_theme(),
                    self.view.document_centered(),
                )
            }
        };
        let mut writer = self.writer()?;
        writeln!(writer, "{}", doc.to_json()?)
            .map_err(|e| err!(e; "Unable to write the export document"))
    }
}

impl ExecCommand for ViewCommand {
    fn execute(&self, session: &Session) -> AdaptaResult<()> {
        let snapshot = session.load_snapshot()?;
        let displayed = self.view.apply(snapshot.rows(), &self.query);
        match self.export {
            ExportFormat::Table => self.print_table(session, &displayed, snapshot.len()),
            ExportFormat::Csv => self.write_csv(session, &displayed),
            ExportFormat::Doc => self.write_document(session, &displayed),
        }
    }
}

fn project_all(displayed: &[Row], columns: &[usize]) -> AdaptaResult<Vec<Row>> {
    displayed
        .iter()
        .enumerate()
        .map(|(i, row)| {
            row.project(columns).ok_or_else(|| {
                err!(
                    "Row {} is {} columns wide; cannot project columns {:?}",
                    i + 1,
                    row.width(),
                    columns
                )
            })
        })
        .collect()
}
