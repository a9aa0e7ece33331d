use serde::{Deserialize, Serialize};

/// The active identity. Repository calls take this explicitly; it decides
/// which backend is authoritative for the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// Anonymous guest, backed by local JSON documents.
    Anonymous,
    /// Authenticated account, backed by the SQLite store.
    Account(Account),
}

impl Identity {
    pub fn is_account(&self) -> bool {
        matches!(self, Identity::Account(_))
    }
}

/// An authenticated user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

/// Per-identity display preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub default_city: String,
    pub is_metric: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            default_city: "Istanbul".to_string(),
            is_metric: true,
        }
    }
}
