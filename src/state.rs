// src/state.rs

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use validator::Validate;

use crate::client::{HttpListingsApi, ListingsApi};
use crate::errors::AppError;
use crate::session::{FileSessionStore, SessionStore};
use crate::ui::{Navigator, Notifier, TracingNavigator, TracingNotifier};

const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SESSION_FILE: &str = "session.json";

/// Współdzielony kontekst formularzy: sesja, API, komunikaty i nawigacja.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<dyn SessionStore>,
    pub api: Arc<dyn ListingsApi>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
}

impl AppState {
    /// Kontekst dla CLI: sesja z pliku, prawdziwe API, komunikaty w logach.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Ok(Self {
            session: Arc::new(FileSessionStore::new(config.session_file.clone())),
            api: Arc::new(HttpListingsApi::new(config)?),
            notifier: Arc::new(TracingNotifier),
            navigator: Arc::new(TracingNavigator),
        })
    }
}

#[derive(Debug, Clone, Validate)]
pub struct AppConfig {
    #[validate(url(message = "VEYCOFLASH_API_URL musi być poprawnym adresem URL"))]
    pub api_base_url: String,

    #[validate(range(min = 1, max = 600, message = "Limit czasu musi mieścić się w 1..600 s"))]
    pub submit_timeout_secs: u64,

    pub session_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            submit_timeout_secs: DEFAULT_SUBMIT_TIMEOUT_SECS,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
        }
    }
}

impl AppConfig {
    /// Czyta konfigurację ze zmiennych środowiskowych (po `dotenvy::dotenv()`).
    pub fn from_env() -> Result<Self, AppError> {
        let api_base_url =
            env::var("VEYCOFLASH_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let submit_timeout_secs = match env::var("VEYCOFLASH_SUBMIT_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                AppError::Config(format!(
                    "VEYCOFLASH_SUBMIT_TIMEOUT_SECS musi być liczbą, otrzymano '{}'",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_SUBMIT_TIMEOUT_SECS,
        };
        let session_file = env::var("VEYCOFLASH_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE));

        let config = Self {
            api_base_url,
            submit_timeout_secs,
            session_file,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.submit_timeout_secs, 30);
    }

    #[test]
    fn invalid_url_is_rejected() {
        let config = AppConfig {
            api_base_url: "no es una url".to_string(),
            ..AppConfig::default()
        };
        let err = AppError::from(config.validate().unwrap_err());
        assert!(matches!(err, AppError::Config(m) if m.contains("api_base_url")));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = AppConfig {
            submit_timeout_secs: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
