//! Dual-backend preference and favorites storage for SkyCast.
//!
//! Accounts live in SQLite; the anonymous guest lives in two JSON
//! documents. `PreferenceRepository` routes each call by the identity
//! passed to it, so the rest of the application never knows which backend
//! it is talking to.

pub mod account;
pub mod guest;
pub mod repository;
pub mod types;

pub use account::AccountStore;
pub use guest::GuestStore;
pub use repository::PreferenceRepository;
pub use types::{Account, Identity, Preferences};
