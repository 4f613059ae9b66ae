/*
 * Copyright (c) 2025. Adapta Team
 * This file is part of Adapta.
 * Adapta is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Adapta is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Adapta. If not, see <https://www.gnu.org/licenses/>.
 */
//! User-facing strings. The registry's interface is Spanish-first with an
//! English toggle; every label lives here as a closed table rather than a
//! keyed property bag.
use crate::err;
use crate::error::AdaptaError;
use crate::view::ViewKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lang {
    #[default]
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "en")]
    English,
}

impl FromStr for Lang {
    type Err = AdaptaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "es" | "spanish" => Ok(Lang::Spanish),
            "en" | "english" => Ok(Lang::English),
            other => Err(err!("Unknown language '{}'; expected 'es' or 'en'", other)),
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lang::Spanish => write!(f, "es"),
            Lang::English => write!(f, "en"),
        }
    }
}

impl Lang {
    pub fn view_title(self, view: ViewKind) -> &'static str {
        match (self, view) {
            (Lang::Spanish, ViewKind::Actions) => "Acciones de adaptación",
            (Lang::English, ViewKind::Actions) => "Adaptation actions",
            (Lang::Spanish, ViewKind::PlannedBudgets) => "Presupuestos planificados",
            (Lang::English, ViewKind::PlannedBudgets) => "Planned budgets",
            (Lang::Spanish, ViewKind::ExecutedBudgets) => "Presupuestos ejecutados",
            (Lang::English, ViewKind::ExecutedBudgets) => "Executed budgets",
            (Lang::Spanish, ViewKind::IndicatorResults) => "Resultados del indicador",
            (Lang::English, ViewKind::IndicatorResults) => "Indicator results",
        }
    }

    /// Title printed on exported documents, as the registry words it.
    pub fn document_title(self, view: ViewKind) -> &'static str {
        match (self, view) {
            (Lang::Spanish, ViewKind::Actions) => {
                "Reporte de acciones de adaptación para el cambio climático."
            }
            (Lang::English, ViewKind::Actions) => {
                "Report of adaptation actions for climate change."
            }
            (Lang::Spanish, ViewKind::PlannedBudgets) => "Financiamiento",
            (Lang::English, ViewKind::PlannedBudgets) => "Financing",
            (Lang::Spanish, ViewKind::IndicatorResults) => "Reporte de resultados del indicador.",
            (Lang::English, ViewKind::IndicatorResults) => "Report of indicator results.",
            (_, ViewKind::ExecutedBudgets) => self.view_title(view),
        }
    }

    /// Shown when the filters match nothing.
    pub fn zero_records(self) -> &'static str {
        match self {
            Lang::Spanish => "No se encontraron resultados",
            Lang::English => "No results found",
        }
    }

    /// Shown when the snapshot itself holds no rows.
    pub fn empty_table(self, view: ViewKind) -> &'static str {
        match (self, view) {
            (Lang::Spanish, ViewKind::Actions) => "No hay acciones registradas",
            (Lang::English, ViewKind::Actions) => "No actions registered",
            (Lang::Spanish, ViewKind::PlannedBudgets | ViewKind::ExecutedBudgets) => {
                "No hay presupuestos planificados registrados"
            }
            (Lang::English, ViewKind::PlannedBudgets | ViewKind::ExecutedBudgets) => {
                "No budgets registered"
            }
            (Lang::Spanish, ViewKind::IndicatorResults) => "No hay resultados registrados",
            (Lang::English, ViewKind::IndicatorResults) => "No results registered",
        }
    }

    /// Label on the merged cell of a group's totals row.
    pub fn total(self) -> &'static str {
        "Total"
    }

    pub fn select_at_least_one(self) -> &'static str {
        match self {
            Lang::Spanish => "Debe seleccionar al menos una acción para eliminar.",
            Lang::English => "Select at least one action to delete.",
        }
    }

    pub fn confirm_delete(self, count: usize) -> String {
        match self {
            Lang::Spanish => {
                format!("¿Está seguro que desea eliminar {} acción(es) seleccionada(s)?", count)
            }
            Lang::English => format!("Are you sure you want to delete {} selected action(s)?", count),
        }
    }

    pub fn delete_summary(self, deleted: usize, errors: usize) -> String {
        match self {
            Lang::Spanish => format!("Eliminadas: {}. Errores: {}.", deleted, errors),
            Lang::English => format!("Deleted: {}. Errors: {}.", deleted, errors),
        }
    }

    pub fn delete_cancelled(self) -> &'static str {
        match self {
            Lang::Spanish => "Operación cancelada.",
            Lang::English => "Operation cancelled.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("es".parse::<Lang>().unwrap(), Lang::Spanish);
        assert_eq!("EN".parse::<Lang>().unwrap(), Lang::English);
        assert!("fr".parse::<Lang>().is_err());
    }

    #[test]
    fn test_default_is_spanish() {
        assert_eq!(Lang::default(), Lang::Spanish);
        assert_eq!(Lang::default().zero_records(), "No se encontraron resultados");
    }

    #[test]
    fn test_summary_strings() {
        assert_eq!(Lang::Spanish.delete_summary(3, 1), "Eliminadas: 3. Errores: 1.");
        assert_eq!(Lang::English.delete_summary(0, 2), "Deleted: 0. Errors: 2.");
    }
}
