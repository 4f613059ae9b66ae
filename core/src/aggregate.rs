/*
 * Copyright (c) 2025. Adapta Team
 * This file is part of Adapta.
 * Adapta is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Adapta is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Adapta. If not, see <https://www.gnu.org/licenses/>.
 */
//! Grouped aggregation over displayed table rows.
//!
//! One pass turns the view's current row set into an ordered sequence of
//! groups, each carrying its member rows (projected to the export columns)
//! and a running subtotal of the value column. Groups appear in
//! first-encounter order of their key, not sorted; callers wanting
//! contiguous groups must hand in rows already sorted by the group column.
use crate::err;
use crate::error::AdaptaResult;
use crate::numeric;
use crate::snapshot::Row;
use std::collections::HashMap;

/// Which columns drive one grouped export. Built fresh per invocation and
/// passed explicitly; there is no process-wide export state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationSpec {
    /// Column whose text value names a row's group. Keys compare by exact
    /// string equality.
    pub group_column: usize,
    /// Column summed into each group's subtotal.
    pub value_column: usize,
    /// Columns carried into the report body, in projection order.
    pub visible_columns: Vec<usize>,
}

/// The rows sharing one group-column value, plus their accumulated subtotal.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    key: String,
    members: Vec<Row>,
    subtotal: f64,
}

impl Group {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Member rows in encounter order, projected to the spec's visible
    /// columns.
    pub fn members(&self) -> &[Row] {
        &self.members
    }

    /// The subtotal at full precision, accumulated in encounter order.
    pub fn subtotal(&self) -> f64 {
        self.subtotal
    }

    /// The subtotal as rendered in exports: fixed two decimal places.
    pub fn subtotal_rounded(&self) -> String {
        format!("{:.2}", self.subtotal)
    }
}

/// Ordered sequence of groups produced by one aggregation pass, ready for
/// columnar export rendering. Constructed fresh per export and discarded
/// once serialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedReport {
    groups: Vec<Group>,
}

impl GroupedReport {
    /// Single left-to-right pass over `rows`. A row narrower than any
    /// addressed column aborts the whole invocation; no partial report is
    /// produced. Unparsable value cells count as zero (see
    /// [`crate::numeric`]).
    pub fn build(rows: &[Row], spec: &AggregationSpec) -> AdaptaResult<Self> {
        let mut groups: Vec<Group> = vec![];
        let mut index: HashMap<String, usize> = HashMap::new();
        for (row_no, row) in rows.iter().enumerate() {
            let key = row.cell(spec.group_column).ok_or_else(|| {
                err!(
                    "Row {} is {} columns wide; group column {} is out of range",
                    row_no + 1,
                    row.width(),
                    spec.group_column
                )
            })?;
            let value_cell = row.cell(spec.value_column).ok_or_else(|| {
                err!(
                    "Row {} is {} columns wide; value column {} is out of range",
                    row_no + 1,
                    row.width(),
                    spec.value_column
                )
            })?;
            let projected = row.project(&spec.visible_columns).ok_or_else(|| {
                err!(
                    "Row {} is {} columns wide; cannot project columns {:?}",
                    row_no + 1,
                    row.width(),
                    spec.visible_columns
                )
            })?;
            let value = numeric::lenient_value(value_cell);

            let group_index = match index.get(key) {
                Some(i) => *i,
                None => {
                    groups.push(Group {
                        key: key.to_string(),
                        members: vec![],
                        subtotal: 0.0,
                    });
                    index.insert(key.to_string(), groups.len() - 1);
                    groups.len() - 1
                }
            };
            let group = &mut groups[group_index];
            group.members.push(projected);
            group.subtotal += value;
        }
        Ok(Self { groups })
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
