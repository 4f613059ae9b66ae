/*
 * Copyright (c) 2025. Adapta Team
 * This file is part of Adapta.
 * Adapta is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Adapta is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Adapta. If not, see <https://www.gnu.org/licenses/>.
 */
//! Bulk deletion against the registry server.
//!
//! One POST per action id, issued sequentially in input order. Every
//! failure — refused deletion, transport error, malformed response — is
//! tallied and the pass continues; the caller receives a single aggregated
//! outcome. There are no retries.
use crate::err;
use crate::error::AdaptaResult;
use log::{debug, warn};

/// Aggregated result of one bulk-delete pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted: usize,
    pub errors: usize,
}

/// The registry's deletion endpoint. Kept behind a trait so the tallying
/// pass is exercisable without a server.
pub trait DeleteEndpoint {
    /// Returns `Ok(true)` when the server confirmed the deletion,
    /// `Ok(false)` when it refused it.
    fn delete(&self, id: &str) -> AdaptaResult<bool>;
}

pub fn purge_all<E: DeleteEndpoint>(endpoint: &E, ids: &[String]) -> DeleteOutcome {
    let mut outcome = DeleteOutcome::default();
    for id in ids {
        match endpoint.delete(id) {
            Ok(true) => {
                debug!("Deleted action '{}'", id);
                outcome.deleted += 1;
            }
            Ok(false) => {
                warn!("Server refused to delete action '{}'", id);
                outcome.errors += 1;
            }
            Err(e) => {
                warn!("Unable to delete action '{}': {}", id, e);
                outcome.errors += 1;
            }
        }
    }
    outcome
}

/// The real endpoint: `POST <base>/acciones/eliminar/<id>/` with the CSRF
/// and XHR headers the server expects, answering `{"success": bool}`.
pub struct HttpEndpoint {
    base_url: String,
    csrf_token: Option<String>,
    client: reqwest::blocking::Client,
}

impl HttpEndpoint {
    pub fn new<S: Into<String>>(base_url: S, csrf_token: Option<String>) -> AdaptaResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| err!(e; "Unable to construct the HTTP client"))?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { base_url, csrf_token, client })
    }
}

impl DeleteEndpoint for HttpEndpoint {
    fn delete(&self, id: &str) -> AdaptaResult<bool> {
        let url = format!("{}/acciones/eliminar/{}/", self.base_url, id);
        let mut request =
            self.client.post(&url).header("X-Requested-With", "XMLHttpRequest");
        if let Some(token) = &self.csrf_token {
            request = request.header("X-CSRFToken", token);
        }
        let response = request.send().map_err(|e| err!(e; "POST {} failed", url))?;
        if !response.status().is_success() {
            return Ok(false);
        }
        let body: serde_json::Value =
            response.json().map_err(|e| err!(e; "Malformed response from {}", url))?;
        Ok(body.get("success").and_then(|v| v.as_bool()).unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Scripted endpoint: answers per id and records the call order.
    struct ScriptedEndpoint {
        refused: Vec<&'static str>,
        failing: Vec<&'static str>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedEndpoint {
        fn new(refused: Vec<&'static str>, failing: Vec<&'static str>) -> Self {
            Self { refused, failing, calls: RefCell::new(vec![]) }
        }
    }

    impl DeleteEndpoint for ScriptedEndpoint {
        fn delete(&self, id: &str) -> AdaptaResult<bool> {
            self.calls.borrow_mut().push(id.to_string());
            if self.failing.iter().any(|f| *f == id) {
                return Err(err!("connection reset"));
            }
            Ok(!self.refused.iter().any(|r| *r == id))
        }
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_all_deleted() {
        let endpoint = ScriptedEndpoint::new(vec![], vec![]);
        let outcome = purge_all(&endpoint, &ids(&["1", "2", "3"]));
        assert_eq!(outcome, DeleteOutcome { deleted: 3, errors: 0 });
    }

    #[test]
    fn test_mixed_failures_never_short_circuit() {
        let endpoint = ScriptedEndpoint::new(vec!["2"], vec!["3"]);
        let outcome = purge_all(&endpoint, &ids(&["1", "2", "3", "4"]));
        assert_eq!(outcome, DeleteOutcome { deleted: 2, errors: 2 });
        assert_eq!(*endpoint.calls.borrow(), ids(&["1", "2", "3", "4"]));
    }

    #[test]
    fn test_empty_id_list() {
        let endpoint = ScriptedEndpoint::new(vec![], vec![]);
        assert_eq!(purge_all(&endpoint, &[]), DeleteOutcome::default());
    }
}
