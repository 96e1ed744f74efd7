// src/selector.rs

use crate::errors::AppError;
use crate::forms::{FormMedia, ProductForm, ServiceForm};
use crate::models::ListingKind;
use crate::state::AppState;
use crate::ui::Destination;

/// Formularz utworzony po wyborze rodzaju ogłoszenia.
pub enum ActiveForm {
    Product(ProductForm),
    Service(ServiceForm),
}

impl ActiveForm {
    pub fn kind(&self) -> ListingKind {
        match self {
            ActiveForm::Product(_) => ListingKind::Producto,
            ActiveForm::Service(_) => ListingKind::Servicio,
        }
    }

    pub fn media_mut(&mut self) -> &mut FormMedia {
        match self {
            ActiveForm::Product(form) => form.media_mut(),
            ActiveForm::Service(form) => form.media_mut(),
        }
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        match self {
            ActiveForm::Product(form) => form.set_field(name, value),
            ActiveForm::Service(form) => form.set_field(name, value),
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            ActiveForm::Product(form) => form.submission().submit_label(),
            ActiveForm::Service(form) => form.submission().submit_label(),
        }
    }

    pub async fn submit(&mut self) -> Result<(), AppError> {
        match self {
            ActiveForm::Product(form) => form.submit().await,
            ActiveForm::Service(form) => form.submit().await,
        }
    }
}

/// Ekran wyboru: nic, produkt albo usługa.
pub struct ListingTypeSelector {
    state: AppState,
    active: Option<ActiveForm>,
}

impl ListingTypeSelector {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            active: None,
        }
    }

    pub fn selection(&self) -> Option<ListingKind> {
        self.active.as_ref().map(ActiveForm::kind)
    }

    /// Tworzy nowy, pusty formularz wybranego rodzaju (poprzedni jest porzucany).
    pub fn choose(&mut self, kind: ListingKind) -> &mut ActiveForm {
        tracing::debug!("Wybrano rodzaj ogłoszenia: {}", kind);
        let form = match kind {
            ListingKind::Producto => ActiveForm::Product(ProductForm::new(self.state.clone())),
            ListingKind::Servicio => ActiveForm::Service(ServiceForm::new(self.state.clone())),
        };
        self.active.insert(form)
    }

    pub fn active_mut(&mut self) -> Option<&mut ActiveForm> {
        self.active.as_mut()
    }

    /// Powrót do ekranu wyboru; formularz jest zamykany, a jego zadania anulowane.
    pub fn back_to_chooser(&mut self) {
        self.active = None;
    }

    pub fn back_to_catalog(&mut self) {
        self.active = None;
        self.state.navigator.navigate(Destination::Catalog);
    }
}
