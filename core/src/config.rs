/*
 * Copyright (c) 2025. Adapta Team
 * This file is part of Adapta.
 * Adapta is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Adapta is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Adapta. If not, see <https://www.gnu.org/licenses/>.
 */
//! Persisted user preferences. The interface remembers the chosen language
//! between runs, like the web client's stored language toggle.
use crate::err;
use crate::error::AdaptaResult;
use crate::locale::Lang;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub lang: Lang,
}

impl Preferences {
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("adapta").join("preferences.json"))
    }

    /// Loads the stored preferences, falling back to the defaults when the
    /// file is absent or unreadable. A bad preferences file never blocks a
    /// run.
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                debug!("Ignoring malformed preferences file '{}': {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn store(&self) -> AdaptaResult<()> {
        let path = Self::path().ok_or_else(|| err!("No user configuration directory available"))?;
        self.store_to(&path)
    }

    pub fn store_to(&self, path: &Path) -> AdaptaResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| err!(e; "Unable to create '{}'", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| err!(e; "Unable to serialize preferences"))?;
        fs::write(path, contents)
            .map_err(|e| err!(e; "Unable to write preferences to '{}'", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");
        let prefs = Preferences { lang: Lang::English };
        prefs.store_to(&path).unwrap();
        assert_eq!(Preferences::load_from(&path), prefs);
    }

    #[test]
    fn test_missing_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::load_from(&dir.path().join("absent.json"));
        assert_eq!(prefs.lang, Lang::Spanish);
    }

    #[test]
    fn test_malformed_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{not json").unwrap();
        assert_eq!(Preferences::load_from(&path), Preferences::default());
    }

    #[test]
    fn test_stored_language_code() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        Preferences { lang: Lang::English }.store_to(&path).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("\"en\""));
    }
}
