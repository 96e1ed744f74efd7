// src/forms/product.rs

use crate::auth_models::Publisher;
use crate::errors::AppError;
use crate::forms::{
    FormFields, FormMedia, ListingPayload, MISSING_FIELDS_MESSAGE, check_vocabulary,
    positive_number,
};
use crate::models::{ListingKind, ProductCategory, ProductCondition, Province};
use crate::state::AppState;
use crate::submission::SubmissionCoordinator;

/// Pola wymagane w kolejności sprawdzania.
const REQUIRED_FIELDS: [&str; 7] = [
    "nombre",
    "descripcion",
    "precio",
    "categoria",
    "ubicacion",
    "stock",
    "estado",
];

pub struct ProductForm {
    state: AppState,
    fields: FormFields,
    media: FormMedia,
    submission: SubmissionCoordinator,
}

impl ProductForm {
    pub fn new(state: AppState) -> Self {
        let media = FormMedia::new(ListingKind::Producto, state.notifier.clone());
        Self {
            state,
            fields: FormFields::default(),
            media,
            submission: SubmissionCoordinator::new(ListingKind::Producto),
        }
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        self.fields.set(name, value);
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn media(&self) -> &FormMedia {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut FormMedia {
        &mut self.media
    }

    pub fn submission(&self) -> &SubmissionCoordinator {
        &self.submission
    }

    /// Sprawdza formularz; zwraca pierwszy napotkany błąd.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_product(&self.fields, &self.media)
    }

    /// Sesja, walidacja, wysyłka i obsługa wyniku.
    pub async fn submit(&mut self) -> Result<(), AppError> {
        let fields = &self.fields;
        let media = &self.media;
        let cancel = media.cancellation_token();
        self.submission
            .submit(&self.state, &cancel, |publisher| {
                validate_product(fields, media)?;
                Ok(build_product_payload(fields, media, publisher))
            })
            .await?;
        self.media.discard();
        Ok(())
    }
}

fn validate_product(fields: &FormFields, media: &FormMedia) -> Result<(), AppError> {
    if REQUIRED_FIELDS.iter().any(|name| fields.is_blank(name)) {
        return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
    }

    check_vocabulary::<ProductCategory>(fields, "categoria")?;
    check_vocabulary::<Province>(fields, "ubicacion")?;
    check_vocabulary::<ProductCondition>(fields, "estado")?;

    if positive_number(fields.get("precio")).is_none() {
        return Err(AppError::Validation(
            "El precio debe ser mayor a 0".to_string(),
        ));
    }

    let stock = fields.get("stock").trim().parse::<i64>().unwrap_or(0);
    if stock <= 0 {
        return Err(AppError::Validation(
            "El stock debe ser mayor a 0".to_string(),
        ));
    }

    if !media.images().meets_minimum() {
        return Err(AppError::Validation(
            "Debes subir al menos 1 imagen del producto".to_string(),
        ));
    }

    Ok(())
}

/// Pola `stock` i `estado` idą do API jako `cantidad` i `estadoProducto`.
fn build_product_payload(
    fields: &FormFields,
    media: &FormMedia,
    publisher: &Publisher,
) -> ListingPayload {
    let mut payload_fields = vec![
        ("nombre", fields.get("nombre").to_string()),
        ("descripcion", fields.get("descripcion").to_string()),
        ("precio", fields.get("precio").trim().to_string()),
        ("categoria", fields.get("categoria").to_string()),
        ("ubicacion", fields.get("ubicacion").to_string()),
        ("cantidad", fields.get("stock").trim().to_string()),
        ("estadoProducto", fields.get("estado").to_string()),
        ("vendedorId", publisher.user_id.to_string()),
    ];
    if !fields.is_blank("deunaNumero") {
        payload_fields.push(("deunaNumero", fields.get("deunaNumero").trim().to_string()));
    }

    ListingPayload {
        kind: ListingKind::Producto,
        fields: payload_fields,
        deuna_qr: media.qr_file(),
        images: media.image_files(),
    }
}
