// src/media.rs

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures::future::join_all;
use tokio_util::bytes::Bytes;

use crate::errors::AppError;

/// Maksymalny rozmiar pojedynczego pliku (obrazy i QR).
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Plik wybrany przez użytkownika: bajty, oryginalna nazwa i typ MIME.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl SelectedFile {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: Bytes::from(bytes),
        }
    }

    /// Wczytuje plik z dysku, typ MIME ustalany na podstawie rozszerzenia.
    pub async fn from_path(path: &Path) -> Result<Self, AppError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            tracing::error!("Nie można wczytać pliku {}: {}", path.display(), e);
            AppError::Io(e)
        })?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("imagen.jpg")
            .to_string();
        let mime_type = mime_from_file_name(&file_name).to_string();
        tracing::debug!(
            "Wczytano plik {} ({}), rozmiar: {} bajtów",
            file_name,
            mime_type,
            bytes.len()
        );
        Ok(Self::new(file_name, mime_type, bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.to_ascii_lowercase().starts_with("image/")
    }
}

/// Typ MIME na podstawie rozszerzenia nazwy pliku.
pub fn mime_from_file_name(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "mp4" => "video/mp4",
        _ => "application/octet-stream",
    }
}

/// Plik musi być obrazem i nie może przekraczać 5 MiB.
pub fn validate_image_file(file: &SelectedFile) -> Result<(), AppError> {
    if !file.is_image() {
        tracing::warn!(
            "Odrzucono plik {}: typ {} nie jest obrazem",
            file.file_name,
            file.mime_type
        );
        return Err(AppError::NotAnImage(file.file_name.clone()));
    }
    if file.size() > MAX_FILE_SIZE {
        tracing::warn!(
            "Odrzucono plik {}: rozmiar {} bajtów przekracza limit",
            file.file_name,
            file.size()
        );
        return Err(AppError::FileTooLarge(file.file_name.clone()));
    }
    Ok(())
}

fn encode_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Generuje podgląd (data URI) poza wątkiem obsługi zdarzeń.
pub async fn read_preview(file: &SelectedFile) -> Result<String, AppError> {
    let bytes = file.bytes.clone();
    let mime_type = file.mime_type.clone();
    tokio::task::spawn_blocking(move || encode_data_uri(&mime_type, &bytes))
        .await
        .map_err(|e| {
            tracing::error!("Zadanie generowania podglądu nie powiodło się: {:?}", e);
            AppError::Io(std::io::Error::other(e))
        })
}

/// Uruchamia wszystkie odczyty naraz; wyniki wracają w kolejności wejściowej,
/// niezależnie od kolejności ukończenia.
pub async fn load_previews(
    files: Vec<SelectedFile>,
) -> Vec<Result<(SelectedFile, String), AppError>> {
    let futures = files.into_iter().map(|file| async move {
        let preview = read_preview(&file).await?;
        Ok((file, preview))
    });
    join_all(futures).await
}
