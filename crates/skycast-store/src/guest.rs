//! JSON-file storage for the anonymous guest identity.
//!
//! Two independent documents under the data directory: one for preferences,
//! one for the insertion-ordered favorites list. A missing or corrupt
//! document degrades to the default value; a failed write is logged and
//! swallowed. The guest path prioritizes availability over durability.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::types::Preferences;

const PREFERENCES_FILE: &str = "guest_preferences.json";
const FAVORITES_FILE: &str = "guest_favorites.json";

#[derive(Debug, Clone)]
pub struct GuestStore {
    dir: PathBuf,
}

impl GuestStore {
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn load_preferences(&self) -> Preferences {
        self.read_json(PREFERENCES_FILE).unwrap_or_default()
    }

    pub fn save_preferences(&self, prefs: &Preferences) {
        self.write_json(PREFERENCES_FILE, prefs);
    }

    /// Favorite city names in insertion order. Never contains duplicates.
    pub fn load_favorites(&self) -> Vec<String> {
        self.read_json(FAVORITES_FILE).unwrap_or_default()
    }

    pub fn save_favorites(&self, favorites: &[String]) {
        self.write_json(FAVORITES_FILE, &favorites);
    }

    /// Idempotent: a city that is already present is left where it is.
    pub fn add_favorite(&self, city_name: &str) {
        let mut favorites = self.load_favorites();
        if favorites.iter().any(|c| c == city_name) {
            return;
        }
        favorites.push(city_name.to_string());
        self.save_favorites(&favorites);
    }

    /// Idempotent: removing an absent city is a no-op.
    pub fn remove_favorite(&self, city_name: &str) {
        let mut favorites = self.load_favorites();
        let before = favorites.len();
        favorites.retain(|c| c != city_name);
        if favorites.len() != before {
            self.save_favorites(&favorites);
        }
    }

    pub fn is_favorite(&self, city_name: &str) -> bool {
        self.load_favorites().iter().any(|c| c == city_name)
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let path = self.file_path(name);
        if !path.exists() {
            return None;
        }

        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Corrupt guest document {}, using defaults: {}", path.display(), e);
                None
            }
        }
    }

    /// Write to a temp file in the same directory, then rename over the
    /// target, so a crash mid-write never leaves a half-written document.
    fn write_json<T: Serialize>(&self, name: &str, value: &T) {
        if let Err(e) = self.try_write_json(name, value) {
            tracing::warn!("Failed to persist guest document {}: {}", name, e);
        }
    }

    fn try_write_json<T: Serialize>(&self, name: &str, value: &T) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;

        let contents = serde_json::to_string_pretty(value)?;
        let path = self.file_path(name);
        let tmp = self.file_path(&format!("{}.tmp", name));

        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}
