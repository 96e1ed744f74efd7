// src/forms/mod.rs

pub mod product;
pub mod service;

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::errors::AppError;
use crate::images::{AddReport, ImageCollection, ImageLimits, QrSlot};
use crate::media::SelectedFile;
use crate::models::{ListingKind, Weekday};
use crate::ui::{Notice, Notifier};

pub use product::ProductForm;
pub use service::ServiceForm;

pub(crate) const MISSING_FIELDS_MESSAGE: &str = "Por favor completa todos los campos obligatorios";

/// Płaska mapa pól formularza plus zbiór zaznaczonych dni tygodnia.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    values: HashMap<String, String>,
    days: BTreeSet<Weekday>,
}

impl FormFields {
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Wartość pola; pole nieustawione to pusty napis.
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn is_blank(&self, name: &str) -> bool {
        self.get(name).trim().is_empty()
    }

    /// Przełącza dzień; zwraca `true`, jeśli po zmianie dzień jest zaznaczony.
    pub fn toggle_day(&mut self, day: Weekday) -> bool {
        if self.days.remove(&day) {
            false
        } else {
            self.days.insert(day);
            true
        }
    }

    pub fn is_day_selected(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }

    pub fn selected_days(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.days.iter().copied()
    }

    pub fn joined_days(&self) -> String {
        self.days
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<String>>()
            .join(", ")
    }
}

/// Gotowa do wysłania treść ogłoszenia: pola tekstowe w kolejności wysyłki,
/// opcjonalny QR i zdjęcia (indeks 0 to zdjęcie główne).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPayload {
    pub kind: ListingKind,
    pub fields: Vec<(&'static str, String)>,
    pub deuna_qr: Option<SelectedFile>,
    pub images: Vec<SelectedFile>,
}

impl ListingPayload {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(key, _)| *key).collect()
    }
}

/// Zdjęcia i QR formularza, wspólne dla obu rodzajów ogłoszeń.
///
/// Każda operacja, która się nie powiedzie, wysyła komunikat przez `Notifier`.
/// Token anulowania żyje tyle co formularz i jest anulowany przy `Drop`.
pub struct FormMedia {
    kind: ListingKind,
    images: ImageCollection,
    deuna_qr: QrSlot,
    notifier: Arc<dyn Notifier>,
    cancel: CancellationToken,
}

impl FormMedia {
    pub fn new(kind: ListingKind, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            kind,
            images: ImageCollection::new(ImageLimits::for_kind(kind)),
            deuna_qr: QrSlot::default(),
            notifier,
            cancel: CancellationToken::new(),
        }
    }

    pub fn images(&self) -> &ImageCollection {
        &self.images
    }

    pub fn deuna_qr(&self) -> &QrSlot {
        &self.deuna_qr
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub async fn add_images(&mut self, files: Vec<SelectedFile>) -> Result<AddReport, AppError> {
        match self.images.add(files, &self.cancel).await {
            Ok(report) => {
                for rejection in &report.rejected {
                    self.report(rejection);
                }
                Ok(report)
            }
            Err(AppError::Cancelled) => Err(AppError::Cancelled),
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    pub fn remove_image(&mut self, index: usize) -> Result<(), AppError> {
        self.images.remove(index).map(|_| ())
    }

    pub fn promote_image(&mut self, index: usize) -> Result<(), AppError> {
        self.images.promote_to_principal(index)
    }

    pub async fn set_qr(&mut self, file: SelectedFile) -> Result<(), AppError> {
        match self.deuna_qr.set(file, &self.cancel).await {
            Err(AppError::Cancelled) => Err(AppError::Cancelled),
            Err(e) => {
                // QR ma własne komunikaty, bez nazwy pliku
                let message = match &e {
                    AppError::NotAnImage(_) => "El archivo debe ser una imagen".to_string(),
                    AppError::FileTooLarge(_) => "La imagen supera los 5MB".to_string(),
                    other => other.notice(self.kind),
                };
                self.notifier.notify(Notice::error(message));
                Err(e)
            }
            Ok(()) => Ok(()),
        }
    }

    pub fn clear_qr(&mut self) {
        self.deuna_qr.clear();
    }

    /// Porzuca zdjęcia i QR po udanej publikacji.
    pub(crate) fn discard(&mut self) {
        self.images.clear();
        self.deuna_qr.clear();
    }

    pub(crate) fn image_files(&self) -> Vec<SelectedFile> {
        self.images
            .entries()
            .iter()
            .map(|entry| entry.file.clone())
            .collect()
    }

    pub(crate) fn qr_file(&self) -> Option<SelectedFile> {
        self.deuna_qr.file().cloned()
    }

    fn report(&self, error: &AppError) {
        self.notifier.notify(Notice::error(error.notice(self.kind)));
    }
}

impl Drop for FormMedia {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Pole musi zawierać liczbę dodatnią.
pub(crate) fn positive_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n > 0.0)
}

/// Sprawdza, czy wartość należy do zamkniętego słownika.
pub(crate) fn check_vocabulary<T: std::str::FromStr>(
    fields: &FormFields,
    name: &str,
) -> Result<(), AppError> {
    fields
        .get(name)
        .parse::<T>()
        .map(|_| ())
        .map_err(|_| AppError::Validation(format!("Valor no válido para el campo {}", name)))
}
