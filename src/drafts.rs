// src/drafts.rs
//
// Szkic ogłoszenia w pliku JSON, odtwarzany krok po kroku przez operacje formularza.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::errors::AppError;
use crate::media::SelectedFile;
use crate::models::{ListingKind, Weekday};
use crate::selector::ActiveForm;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    pub tipo: ListingKind,
    #[serde(default)]
    pub campos: BTreeMap<String, String>,
    #[serde(default)]
    pub dias_disponibles: Vec<String>,
    #[serde(default)]
    pub imagenes: Vec<PathBuf>,
    /// Indeks zdjęcia, które ma zostać zdjęciem głównym.
    #[serde(default)]
    pub principal: Option<usize>,
    #[serde(default)]
    pub deuna_qr: Option<PathBuf>,
}

impl ListingDraft {
    pub async fn load(path: &Path) -> Result<Self, AppError> {
        let content = tokio::fs::read_to_string(path).await?;
        let draft = serde_json::from_str(&content)?;
        Ok(draft)
    }

    /// Wypełnia formularz: pola, dni, zdjęcia (jedna partia), zdjęcie główne i QR.
    /// Względne ścieżki plików są liczone od `base_dir`.
    pub async fn apply_to(&self, form: &mut ActiveForm, base_dir: &Path) -> Result<(), AppError> {
        for (name, value) in &self.campos {
            form.set_field(name, value.as_str());
        }

        match form {
            ActiveForm::Service(service) => {
                for raw in &self.dias_disponibles {
                    let day = Weekday::from_str(raw.trim()).map_err(|_| {
                        AppError::Validation(format!("Día no válido: {}", raw))
                    })?;
                    if !service.fields().is_day_selected(day) {
                        service.toggle_day(day);
                    }
                }
            }
            ActiveForm::Product(_) if !self.dias_disponibles.is_empty() => {
                tracing::warn!("Szkic produktu zawiera dni dostępności, pomijam");
            }
            ActiveForm::Product(_) => {}
        }

        if let Some(index) = self.principal {
            if index >= self.imagenes.len() {
                return Err(AppError::IndexOutOfRange {
                    index,
                    len: self.imagenes.len(),
                });
            }
        }

        if !self.imagenes.is_empty() {
            let mut files = Vec::with_capacity(self.imagenes.len());
            for path in &self.imagenes {
                files.push(SelectedFile::from_path(&base_dir.join(path)).await?);
            }
            let first_slot = form.media_mut().images().len();
            let report = form.media_mut().add_images(files).await?;

            // `principal` wskazuje pozycję w szkicu, nie w kolekcji po odrzuceniach
            if let Some(index) = self.principal {
                match report.placed_at(first_slot, index) {
                    Some(slot) => form.media_mut().promote_image(slot)?,
                    None => tracing::warn!(
                        "Zdjęcie główne {} zostało odrzucone, zostaje pierwsze przyjęte",
                        self.imagenes[index].display()
                    ),
                }
            }
        }

        if let Some(path) = &self.deuna_qr {
            let file = SelectedFile::from_path(&base_dir.join(path)).await?;
            form.media_mut().set_qr(file).await?;
        }

        Ok(())
    }
}
