//! Centralized error types for the SkyCast application.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for UI display
//! - Preserves full error context for debugging/logging

use thiserror::Error;

/// Top-level application error type.
///
/// All errors in the SkyCast application should be convertible to this type.
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    ///
    /// These messages are designed to be actionable and non-technical.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Weather(e) => e.user_message(),
            AppError::Storage(e) => e.user_message(),
            AppError::Auth(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Weather provider errors.
///
/// None of these are retried automatically; a retry is always a fresh
/// user-initiated request.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The provider does not know the requested city. User-correctable.
    #[error("city not found: {0}")]
    CityNotFound(String),

    /// Transport-level failure (connection refused, DNS, TLS, ...).
    #[error("network error: {0}")]
    Network(reqwest::Error),

    /// The provider answered, but not with a usable payload (bad status,
    /// missing required field, undecodable body).
    #[error("provider error: {0}")]
    Provider(String),

    #[error("request timed out")]
    Timeout,

    /// The request was superseded by a newer one. Control flow only; this
    /// is never shown to the user.
    #[error("request cancelled")]
    Cancelled,
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::CityNotFound(_) => "City not found. Check the spelling and try again.",
            WeatherError::Network(_) => "Unable to connect. Check your internet connection.",
            WeatherError::Provider(_) => "Weather service error. Please try again.",
            WeatherError::Timeout => "The request timed out. Please try again.",
            WeatherError::Cancelled => "",
        }
    }
}

/// Account-backend storage errors (SQLite).
///
/// Guest-file faults never surface as this type; the guest store degrades
/// to defaults instead.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A write was keyed to an account id with no users row.
    #[error("account no longer exists")]
    MissingAccount,
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::Database(_) => "Saving your data failed. Please try again.",
            StorageError::Io(_) => "Saving your data failed. Please try again.",
            StorageError::MissingAccount => "Your account could not be found. Sign in again.",
        }
    }

    /// True when the underlying SQLite failure is a UNIQUE constraint
    /// violation (e.g. a duplicate username at registration).
    pub fn is_unique_violation(&self) -> bool {
        match self {
            StorageError::Database(rusqlite::Error::SqliteFailure(err, Some(msg))) => {
                err.code == rusqlite::ErrorCode::ConstraintViolation && msg.contains("UNIQUE")
            }
            _ => false,
        }
    }
}

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("username already exists")]
    UsernameTaken,

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "Invalid credentials. Please check and try again.",
            AuthError::UsernameTaken => "That username is already taken. Pick another.",
            AuthError::Storage(e) => e.user_message(),
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_weather_error(self) -> WeatherError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_weather_error(self) -> WeatherError {
        if self.is_timeout() {
            WeatherError::Timeout
        } else if self.is_decode() {
            WeatherError::Provider(self.to_string())
        } else {
            WeatherError::Network(self)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_app_error_conversion() {
        let auth_err = AuthError::InvalidCredentials;
        let app_err: AppError = auth_err.into();
        assert!(matches!(app_err, AppError::Auth(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_user_message_propagation() {
        let app_err = AppError::Auth(AuthError::UsernameTaken);
        assert_eq!(app_err.user_message(), "That username is already taken. Pick another.");
    }

    #[test]
    fn test_storage_error_wraps_into_auth() {
        let storage = StorageError::MissingAccount;
        let auth: AuthError = storage.into();
        assert!(matches!(auth, AuthError::Storage(StorageError::MissingAccount)));
    }

    #[test]
    fn test_unique_violation_detection() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE),
            Some("UNIQUE constraint failed: users.username".to_string()),
        );
        let storage: StorageError = err.into();
        assert!(storage.is_unique_violation());

        assert!(!StorageError::MissingAccount.is_unique_violation());
    }

    #[test]
    fn test_city_not_found_is_user_correctable() {
        let err = WeatherError::CityNotFound("Istanbul".to_string());
        assert!(err.user_message().contains("City not found"));
    }

    #[test]
    fn test_cancelled_has_no_user_message() {
        assert!(WeatherError::Cancelled.user_message().is_empty());
    }
}
