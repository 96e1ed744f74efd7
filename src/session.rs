// src/session.rs

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::auth_models::{Publisher, SessionUser};
use crate::errors::AppError;

/// Magazyn klucz-wartość z rekordem sesji (odpowiednik `localStorage["user"]`).
pub trait SessionStore: Send + Sync {
    fn read(&self) -> Result<Option<String>, AppError>;
    fn write(&self, raw: &str) -> Result<(), AppError>;
    fn clear(&self) -> Result<(), AppError>;
}

/// Sesja trzymana w pliku JSON na dysku.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn read(&self) -> Result<Option<String>, AppError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(None),
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    fn write(&self, raw: &str) -> Result<(), AppError> {
        std::fs::write(&self.path, raw)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("Usunięto plik sesji {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    raw: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn with_user(user: &SessionUser) -> Result<Self, AppError> {
        let raw = serde_json::to_string(user)?;
        Ok(Self {
            raw: Mutex::new(Some(raw)),
        })
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn read(&self) -> Result<Option<String>, AppError> {
        Ok(self.raw.lock().ok().and_then(|raw| raw.clone()))
    }

    fn write(&self, raw: &str) -> Result<(), AppError> {
        if let Ok(mut slot) = self.raw.lock() {
            *slot = Some(raw.to_string());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        if let Ok(mut slot) = self.raw.lock() {
            *slot = None;
        }
        Ok(())
    }
}

/// Sprawdza, czy w magazynie jest ważna, zweryfikowana sesja z tokenem.
///
/// Kolejność sprawdzeń: brak rekordu, rekord nieczytelny, brak tokenu,
/// brak identyfikatora, konto niezweryfikowane. Usunięcie sesji i przekierowanie
/// robi wywołujący na podstawie `AppError::clears_session` / `AppError::redirect`.
pub fn require_publisher(store: &dyn SessionStore) -> Result<Publisher, AppError> {
    let raw = store.read()?.ok_or(AppError::SessionMissing)?;

    let user: SessionUser = serde_json::from_str(&raw).map_err(|e| {
        tracing::error!("Błąd parsowania rekordu sesji: {:?}", e);
        AppError::CorruptSession(e.to_string())
    })?;

    let token = match user.token.as_deref() {
        Some(token) if !token.trim().is_empty() => token.to_string(),
        _ => return Err(AppError::MissingToken),
    };

    let user_id = user.id.ok_or(AppError::MissingUserId)?;

    if !user.cuenta_verificada {
        tracing::warn!("Użytkownik {} nie ma zweryfikowanego konta", user_id);
        return Err(AppError::UnverifiedAccount);
    }

    Ok(Publisher {
        user_id,
        token,
        email: user.email,
    })
}
