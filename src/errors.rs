// src/errors.rs

use thiserror::Error;
use validator::ValidationErrors;

use crate::models::ListingKind;
use crate::ui::Destination;

const SESSION_EXPIRED_MESSAGE: &str =
    "Acceso denegado. Tu sesión puede haber expirado. Por favor, inicia sesión nuevamente.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Brak zapisanej sesji użytkownika")]
    SessionMissing,

    #[error("Sesja nie zawiera tokenu")]
    MissingToken,

    #[error("Sesja nie zawiera identyfikatora użytkownika")]
    MissingUserId,

    #[error("Nie można odczytać sesji: {0}")]
    CorruptSession(String),

    #[error("Konto użytkownika nie zostało zweryfikowane")]
    UnverifiedAccount,

    #[error("Błąd walidacji: {0}")]
    Validation(String),

    #[error("Przekroczono limit {max} obrazów")]
    TooManyImages { max: usize },

    #[error("Plik '{0}' nie jest obrazem")]
    NotAnImage(String),

    #[error("Plik '{0}' przekracza 5 MiB")]
    FileTooLarge(String),

    #[error("Indeks {index} poza zakresem (długość {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Publikacja już trwa")]
    AlreadySubmitting,

    #[error("Operacja anulowana")]
    Cancelled,

    #[error("Serwer odrzucił żądanie (403)")]
    Forbidden,

    #[error("Serwer zwrócił status {status}")]
    Api { status: u16, message: Option<String> },

    #[error("Błąd połączenia: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Błąd wejścia/wyjścia: {0}")]
    Io(#[from] std::io::Error),

    #[error("Błąd JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Nieprawidłowa konfiguracja: {0}")]
    Config(String),
}

impl AppError {
    /// Komunikat dla użytkownika, zależny od rodzaju publikacji.
    pub fn notice(&self, kind: ListingKind) -> String {
        match self {
            AppError::SessionMissing => {
                format!("Debes iniciar sesión para publicar {}", kind.plural_noun())
            }
            AppError::MissingToken => {
                "Token de autenticación no encontrado. Por favor, inicia sesión nuevamente."
                    .to_string()
            }
            AppError::MissingUserId => "Error: ID de usuario no disponible".to_string(),
            AppError::CorruptSession(_) => {
                "Error al verificar la sesión. Por favor, inicia sesión nuevamente.".to_string()
            }
            AppError::UnverifiedAccount => format!(
                "Debes verificar tu cuenta de email antes de publicar {}",
                kind.plural_noun()
            ),
            AppError::Validation(message) => message.clone(),
            AppError::TooManyImages { max } => format!("Puedes subir máximo {} imágenes", max),
            AppError::NotAnImage(name) => format!("{} no es una imagen válida", name),
            AppError::FileTooLarge(name) => format!("{} supera los 5MB", name),
            AppError::IndexOutOfRange { .. } => "La imagen seleccionada no existe".to_string(),
            AppError::AlreadySubmitting => "Publicando...".to_string(),
            AppError::Forbidden => SESSION_EXPIRED_MESSAGE.to_string(),
            AppError::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            AppError::Api { .. }
            | AppError::Transport(_)
            | AppError::Cancelled
            | AppError::Io(_)
            | AppError::Json(_)
            | AppError::Config(_) => kind.failure_fallback().to_string(),
        }
    }

    /// Dokąd przenieść użytkownika po tym błędzie (jeśli w ogóle).
    pub fn redirect(&self) -> Option<Destination> {
        match self {
            AppError::SessionMissing
            | AppError::MissingToken
            | AppError::MissingUserId
            | AppError::CorruptSession(_)
            | AppError::Forbidden => Some(Destination::Login),
            AppError::UnverifiedAccount => Some(Destination::VerifyEmail),
            _ => None,
        }
    }

    /// Czy zapisana sesja ma zostać usunięta.
    pub fn clears_session(&self) -> bool {
        matches!(
            self,
            AppError::MissingToken
                | AppError::MissingUserId
                | AppError::CorruptSession(_)
                | AppError::Forbidden
        )
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let msg = error.message.as_ref().map_or_else(
                    || format!("Pole '{}' jest nieprawidłowe", field),
                    |m| format!("Pole '{}': {}", field, m),
                );
                messages.push(msg);
            }
        }
        AppError::Config(messages.join("; "))
    }
}
