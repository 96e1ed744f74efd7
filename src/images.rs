// src/images.rs

use tokio_util::sync::CancellationToken;

use crate::errors::AppError;
use crate::media::{SelectedFile, load_previews, read_preview, validate_image_file};
use crate::models::ListingKind;

/// Maksymalna liczba zdjęć w ogłoszeniu.
pub const MAX_IMAGES: usize = 5;

/// Zdjęcie w kolekcji: plik wraz z gotowym podglądem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub file: SelectedFile,
    pub preview: String,
}

impl ImageEntry {
    pub fn file_name(&self) -> &str {
        &self.file.file_name
    }

    pub fn size(&self) -> usize {
        self.file.size()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageLimits {
    pub min: usize,
    pub max: usize,
}

impl ImageLimits {
    pub fn for_kind(kind: ListingKind) -> Self {
        Self {
            min: kind.min_images(),
            max: MAX_IMAGES,
        }
    }
}

/// Wynik dodawania partii plików.
#[derive(Debug, Default)]
pub struct AddReport {
    pub appended: usize,
    /// Pozycje (w przekazanej partii) plików, które trafiły do kolekcji.
    pub accepted: Vec<usize>,
    pub rejected: Vec<AppError>,
}

impl AddReport {
    /// Pozycja w kolekcji, pod którą wylądował plik `input_index` z partii.
    /// `None`, gdy plik został odrzucony.
    pub fn placed_at(&self, first_slot: usize, input_index: usize) -> Option<usize> {
        self.accepted
            .iter()
            .position(|&i| i == input_index)
            .map(|offset| first_slot + offset)
    }
}

/// Uporządkowana lista zdjęć; pozycja 0 to zdjęcie główne.
#[derive(Debug, Clone)]
pub struct ImageCollection {
    limits: ImageLimits,
    entries: Vec<ImageEntry>,
}

impl ImageCollection {
    pub fn new(limits: ImageLimits) -> Self {
        Self {
            limits,
            entries: Vec::with_capacity(limits.max),
        }
    }

    pub fn limits(&self) -> ImageLimits {
        self.limits
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn principal(&self) -> Option<&ImageEntry> {
        self.entries.first()
    }

    pub fn meets_minimum(&self) -> bool {
        self.entries.len() >= self.limits.min
    }

    /// Dodaje partię plików.
    ///
    /// Cała partia jest odrzucana, gdy przekroczyłaby limit. Pliki niebędące
    /// obrazami lub większe niż 5 MiB są pomijane pojedynczo i trafiają do
    /// `AddReport::rejected`. Pozostałe są dopisywane jednym ruchem, w kolejności
    /// wyboru, dopiero gdy wszystkie podglądy są gotowe.
    pub async fn add(
        &mut self,
        files: Vec<SelectedFile>,
        cancel: &CancellationToken,
    ) -> Result<AddReport, AppError> {
        if self.entries.len() + files.len() > self.limits.max {
            tracing::warn!(
                "Odrzucono partię {} plików: obecnie {}, limit {}",
                files.len(),
                self.entries.len(),
                self.limits.max
            );
            return Err(AppError::TooManyImages {
                max: self.limits.max,
            });
        }

        let mut report = AddReport::default();
        let mut valid = Vec::with_capacity(files.len());
        let mut positions = Vec::with_capacity(files.len());
        for (index, file) in files.into_iter().enumerate() {
            match validate_image_file(&file) {
                Ok(()) => {
                    valid.push(file);
                    positions.push(index);
                }
                Err(e) => report.rejected.push(e),
            }
        }

        let loaded = load_previews(valid).await;

        if cancel.is_cancelled() {
            tracing::debug!("Formularz zamknięty w trakcie wczytywania podglądów, pomijam");
            return Err(AppError::Cancelled);
        }

        for (index, result) in positions.into_iter().zip(loaded) {
            match result {
                Ok((file, preview)) => {
                    tracing::debug!(
                        "Dodano zdjęcie {}, rozmiar: {} bajtów",
                        file.file_name,
                        file.size()
                    );
                    self.entries.push(ImageEntry { file, preview });
                    report.accepted.push(index);
                    report.appended += 1;
                }
                Err(e) => report.rejected.push(e),
            }
        }

        Ok(report)
    }

    pub fn remove(&mut self, index: usize) -> Result<ImageEntry, AppError> {
        self.check_index(index)?;
        Ok(self.entries.remove(index))
    }

    /// Przenosi zdjęcie z pozycji `index` na początek listy.
    pub fn promote_to_principal(&mut self, index: usize) -> Result<(), AppError> {
        self.check_index(index)?;
        let entry = self.entries.remove(index);
        self.entries.insert(0, entry);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn check_index(&self, index: usize) -> Result<(), AppError> {
        if index >= self.entries.len() {
            return Err(AppError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(())
    }
}

/// Pojedynczy kod QR płatności Deuna.
#[derive(Debug, Clone, Default)]
pub struct QrSlot {
    entry: Option<ImageEntry>,
}

impl QrSlot {
    pub fn entry(&self) -> Option<&ImageEntry> {
        self.entry.as_ref()
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.entry.as_ref().map(|e| &e.file)
    }

    pub fn preview(&self) -> Option<&str> {
        self.entry.as_ref().map(|e| e.preview.as_str())
    }

    /// Ustawia QR; odrzucony plik nie zmienia poprzedniego stanu.
    pub async fn set(
        &mut self,
        file: SelectedFile,
        cancel: &CancellationToken,
    ) -> Result<(), AppError> {
        validate_image_file(&file)?;
        let preview = read_preview(&file).await?;
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }
        tracing::debug!("Ustawiono QR Deuna: {}", file.file_name);
        self.entry = Some(ImageEntry { file, preview });
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MAX_FILE_SIZE;

    fn png(name: &str) -> SelectedFile {
        SelectedFile::new(name, "image/png", vec![1, 2, 3])
    }

    fn names(collection: &ImageCollection) -> Vec<&str> {
        collection.entries().iter().map(|e| e.file_name()).collect()
    }

    async fn filled(names: &[&str]) -> ImageCollection {
        let mut collection = ImageCollection::new(ImageLimits::for_kind(ListingKind::Servicio));
        let files = names.iter().map(|n| png(n)).collect();
        collection
            .add(files, &CancellationToken::new())
            .await
            .unwrap();
        collection
    }

    #[tokio::test]
    async fn add_appends_in_selection_order() {
        let collection = filled(&["a.png", "b.png", "c.png"]).await;
        assert_eq!(names(&collection), vec!["a.png", "b.png", "c.png"]);
        assert_eq!(collection.principal().unwrap().file_name(), "a.png");
        assert!(collection.principal().unwrap().preview.starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn oversized_batch_is_rejected_whole() {
        let mut collection = filled(&["a.png", "b.png", "c.png"]).await;
        let result = collection
            .add(vec![png("d.png"), png("e.png"), png("f.png")], &CancellationToken::new())
            .await;
        assert!(matches!(result, Err(AppError::TooManyImages { max: 5 })));
        assert_eq!(collection.len(), 3);
    }

    #[tokio::test]
    async fn invalid_files_are_skipped_individually() {
        let mut collection = ImageCollection::new(ImageLimits::for_kind(ListingKind::Producto));
        let files = vec![
            png("ok1.png"),
            SelectedFile::new("doc.pdf", "application/pdf", vec![1]),
            SelectedFile::new("big.jpg", "image/jpeg", vec![0u8; MAX_FILE_SIZE + 1]),
            png("ok2.png"),
        ];
        let report = collection
            .add(files, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(report.appended, 2);
        assert_eq!(report.accepted, vec![0, 3]);
        assert_eq!(report.placed_at(0, 3), Some(1));
        assert_eq!(report.placed_at(0, 1), None);
        assert_eq!(report.rejected.len(), 2);
        assert!(matches!(&report.rejected[0], AppError::NotAnImage(n) if n == "doc.pdf"));
        assert!(matches!(&report.rejected[1], AppError::FileTooLarge(n) if n == "big.jpg"));
        assert_eq!(names(&collection), vec!["ok1.png", "ok2.png"]);
    }

    #[tokio::test]
    async fn batch_filling_collection_exactly_is_accepted() {
        let mut collection = filled(&["a.png", "b.png", "c.png"]).await;
        let report = collection
            .add(vec![png("d.png"), png("e.png")], &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(report.appended, 2);
        assert_eq!(report.placed_at(3, 1), Some(4));
        assert_eq!(collection.len(), MAX_IMAGES);
        assert_eq!(names(&collection), vec!["a.png", "b.png", "c.png", "d.png", "e.png"]);
    }

    #[tokio::test]
    async fn full_collection_rejects_any_further_file() {
        let mut collection = filled(&["a.png", "b.png", "c.png", "d.png", "e.png"]).await;
        let cancel = CancellationToken::new();

        let single = collection.add(vec![png("f.png")], &cancel).await;
        assert!(matches!(single, Err(AppError::TooManyImages { max: 5 })));

        let batch = collection.add(vec![png("g.png"), png("h.png")], &cancel).await;
        assert!(matches!(batch, Err(AppError::TooManyImages { max: 5 })));

        assert_eq!(collection.len(), MAX_IMAGES);
        assert_eq!(collection.principal().unwrap().file_name(), "a.png");
    }

    #[tokio::test]
    async fn batch_limit_counts_invalid_files_too() {
        let mut collection = filled(&["a.png", "b.png", "c.png", "d.png"]).await;
        let files = vec![png("e.png"), SelectedFile::new("x.txt", "text/plain", vec![1])];
        let result = collection.add(files, &CancellationToken::new()).await;
        assert!(matches!(result, Err(AppError::TooManyImages { .. })));
        assert_eq!(collection.len(), 4);
    }

    #[tokio::test]
    async fn cancelled_add_appends_nothing() {
        let mut collection = ImageCollection::new(ImageLimits::for_kind(ListingKind::Servicio));
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = collection.add(vec![png("a.png")], &cancel).await;
        assert!(matches!(result, Err(AppError::Cancelled)));
        assert!(collection.is_empty());
    }

    #[tokio::test]
    async fn promote_moves_entry_to_front() {
        for i in 0..4 {
            let mut collection = filled(&["a.png", "b.png", "c.png", "d.png"]).await;
            let expected = collection.entries()[i].file_name().to_string();
            collection.promote_to_principal(i).unwrap();
            assert_eq!(collection.principal().unwrap().file_name(), expected);
            assert_eq!(collection.len(), 4);
        }

        let mut collection = filled(&["a.png", "b.png", "c.png", "d.png"]).await;
        collection.promote_to_principal(2).unwrap();
        assert_eq!(names(&collection), vec!["c.png", "a.png", "b.png", "d.png"]);
    }

    #[tokio::test]
    async fn remove_preserves_relative_order() {
        let mut collection = filled(&["a.png", "b.png", "c.png", "d.png"]).await;
        let removed = collection.remove(1).unwrap();
        assert_eq!(removed.file_name(), "b.png");
        assert_eq!(names(&collection), vec!["a.png", "c.png", "d.png"]);
        assert!(matches!(
            collection.remove(3),
            Err(AppError::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[tokio::test]
    async fn minimum_depends_on_kind() {
        let product = ImageCollection::new(ImageLimits::for_kind(ListingKind::Producto));
        let service = ImageCollection::new(ImageLimits::for_kind(ListingKind::Servicio));
        assert!(!product.meets_minimum());
        assert!(service.meets_minimum());
    }

    #[tokio::test]
    async fn rejected_qr_keeps_previous_one() {
        let mut qr = QrSlot::default();
        let cancel = CancellationToken::new();
        qr.set(png("qr.png"), &cancel).await.unwrap();

        let result = qr
            .set(SelectedFile::new("qr.gif.exe", "application/x-msdownload", vec![1]), &cancel)
            .await;
        assert!(matches!(result, Err(AppError::NotAnImage(_))));
        assert_eq!(qr.file().unwrap().file_name, "qr.png");

        qr.clear();
        assert!(qr.file().is_none());
        assert!(qr.preview().is_none());
    }
}
