// src/forms/service.rs

use std::str::FromStr;

use crate::auth_models::Publisher;
use crate::errors::AppError;
use crate::forms::{
    FormFields, FormMedia, ListingPayload, MISSING_FIELDS_MESSAGE, check_vocabulary,
    positive_number,
};
use crate::models::{
    DurationUnit, ListingKind, Modality, PriceType, Province, ServiceCategory, Weekday,
};
use crate::state::AppState;
use crate::submission::SubmissionCoordinator;

const REQUIRED_FIELDS: [&str; 7] = [
    "titulo",
    "categoria",
    "descripcion",
    "tipoPrecio",
    "modalidad",
    "ciudad",
    "duracion",
];

pub struct ServiceForm {
    state: AppState,
    fields: FormFields,
    media: FormMedia,
    submission: SubmissionCoordinator,
}

impl ServiceForm {
    pub fn new(state: AppState) -> Self {
        let media = FormMedia::new(ListingKind::Servicio, state.notifier.clone());
        Self {
            state,
            fields: FormFields::default(),
            media,
            submission: SubmissionCoordinator::new(ListingKind::Servicio),
        }
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        self.fields.set(name, value);
    }

    pub fn toggle_day(&mut self, day: Weekday) -> bool {
        self.fields.toggle_day(day)
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

    pub fn validate(&self) -> Result<(), AppError> {
        validate_service(&self.fields)
    }

    pub async fn submit(&mut self) -> Result<(), AppError> {
        let fields = &self.fields;
        let media = &self.media;
        let cancel = media.cancellation_token();
        self.submission
            .submit(&self.state, &cancel, |publisher| {
                validate_service(fields)?;
                Ok(build_service_payload(fields, media, publisher))
            })
            .await?;
        self.media.discard();
        Ok(())
    }
}

fn is_negotiable(fields: &FormFields) -> bool {
    matches!(
        PriceType::from_str(fields.get("tipoPrecio")),
        Ok(PriceType::Negociable)
    )
}

fn validate_service(fields: &FormFields) -> Result<(), AppError> {
    if REQUIRED_FIELDS.iter().any(|name| fields.is_blank(name)) {
        return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
    }

    check_vocabulary::<ServiceCategory>(fields, "categoria")?;
    check_vocabulary::<PriceType>(fields, "tipoPrecio")?;
    check_vocabulary::<Modality>(fields, "modalidad")?;
    check_vocabulary::<Province>(fields, "ciudad")?;
    check_vocabulary::<DurationUnit>(fields, "duracion")?;

    // Przy cenie do negocjacji pole `precio` jest ignorowane
    if !is_negotiable(fields) && positive_number(fields.get("precio")).is_none() {
        return Err(AppError::Validation(
            "Debes ingresar un precio válido".to_string(),
        ));
    }

    if fields.selected_days().next().is_none() {
        return Err(AppError::Validation(
            "Selecciona al menos un día disponible".to_string(),
        ));
    }

    Ok(())
}

fn build_service_payload(
    fields: &FormFields,
    media: &FormMedia,
    publisher: &Publisher,
) -> ListingPayload {
    let precio = if is_negotiable(fields) {
        "0".to_string()
    } else {
        fields.get("precio").trim().to_string()
    };

    let mut payload_fields = vec![
        ("titulo", fields.get("titulo").to_string()),
        ("categoria", fields.get("categoria").to_string()),
        ("descripcion", fields.get("descripcion").to_string()),
        ("tipoPrecio", fields.get("tipoPrecio").to_string()),
        ("precio", precio),
        ("modalidad", fields.get("modalidad").to_string()),
        ("ciudad", fields.get("ciudad").to_string()),
        ("barrio", fields.get("barrio").to_string()),
        ("diasDisponibles", fields.joined_days()),
        ("horario", fields.get("horario").to_string()),
        ("duracion", fields.get("duracion").to_string()),
        ("condiciones", fields.get("condiciones").to_string()),
        ("vendedorId", publisher.user_id.to_string()),
    ];
    if !fields.is_blank("deunaNumero") {
        payload_fields.push(("deunaNumero", fields.get("deunaNumero").trim().to_string()));
    }

    ListingPayload {
        kind: ListingKind::Servicio,
        fields: payload_fields,
        deuna_qr: media.qr_file(),
        images: media.image_files(),
    }
}
