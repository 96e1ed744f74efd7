// src/client.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, multipart};
use serde::Deserialize;
use url::Url;

use crate::errors::AppError;
use crate::forms::ListingPayload;
use crate::media::SelectedFile;
use crate::state::AppConfig;

/// Backend przyjmujący nowe ogłoszenia.
#[async_trait]
pub trait ListingsApi: Send + Sync {
    async fn publish(&self, payload: ListingPayload, token: &str) -> Result<(), AppError>;
}

// Treść błędu zwracana przez backend, np. {"message": "Máximo 5 imágenes permitidas"}
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpListingsApi {
    client: Client,
    base_url: String,
}

impl HttpListingsApi {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let base = Url::parse(&config.api_base_url).map_err(|e| {
            AppError::Config(format!("Nieprawidłowy adres API '{}': {}", config.api_base_url, e))
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.submit_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint_url(&self, payload: &ListingPayload) -> String {
        format!("{}{}", self.base_url, payload.kind.endpoint())
    }
}

fn file_part(file: &SelectedFile) -> Result<multipart::Part, AppError> {
    multipart::Part::bytes(file.bytes.to_vec())
        .file_name(file.file_name.clone())
        .mime_str(&file.mime_type)
        .map_err(|e| {
            tracing::error!("Błąd ustawiania typu MIME dla {}: {}", file.file_name, e);
            AppError::Transport(e)
        })
}

/// Składa formularz multipart: pola tekstowe, QR, a na końcu zdjęcia w ustalonej kolejności.
pub fn build_form(payload: &ListingPayload) -> Result<multipart::Form, AppError> {
    let mut form = multipart::Form::new();
    for (name, value) in &payload.fields {
        form = form.text(*name, value.clone());
    }
    if let Some(qr) = &payload.deuna_qr {
        form = form.part("deunaQr", file_part(qr)?);
    }
    for image in &payload.images {
        form = form.part("imagenes", file_part(image)?);
    }
    Ok(form)
}

#[async_trait]
impl ListingsApi for HttpListingsApi {
    async fn publish(&self, payload: ListingPayload, token: &str) -> Result<(), AppError> {
        let url = self.endpoint_url(&payload);
        let form = build_form(&payload)?;
        tracing::debug!("POST {} ({} zdjęć)", url, payload.images.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Błąd sieci podczas wysyłania ogłoszenia: {}", e);
                AppError::Transport(e)
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::info!("Backend przyjął ogłoszenie, status {}", status);
            return Ok(());
        }

        if status == StatusCode::FORBIDDEN {
            tracing::error!("Backend odrzucił token (403)");
            return Err(AppError::Forbidden);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!("Błąd publikacji: Status={}, Treść={}", status, body);
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.message);
        Err(AppError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
