// src/test_support.rs

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::auth_models::SessionUser;
use crate::client::ListingsApi;
use crate::errors::AppError;
use crate::forms::ListingPayload;
use crate::media::SelectedFile;
use crate::session::MemorySessionStore;
use crate::state::AppState;
use crate::ui::{RecordingNavigator, RecordingNotifier};

type Responder = Box<dyn Fn() -> Result<(), AppError> + Send + Sync>;

/// API w pamięci: zapamiętuje wysłane ogłoszenia i zwraca ustaloną odpowiedź.
pub struct StubListingsApi {
    published: Mutex<Vec<ListingPayload>>,
    responder: Mutex<Responder>,
}

impl Default for StubListingsApi {
    fn default() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            responder: Mutex::new(Box::new(|| Ok(()))),
        }
    }
}

impl StubListingsApi {
    pub fn respond_with(&self, responder: impl Fn() -> Result<(), AppError> + Send + Sync + 'static) {
        *self.responder.lock().unwrap() = Box::new(responder);
    }

    pub fn calls(&self) -> usize {
        self.published.lock().unwrap().len()
    }

    pub fn last_payload(&self) -> Option<ListingPayload> {
        self.published.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ListingsApi for StubListingsApi {
    async fn publish(&self, payload: ListingPayload, _token: &str) -> Result<(), AppError> {
        self.published.lock().unwrap().push(payload);
        let responder = self.responder.lock().unwrap();
        responder()
    }
}

pub struct TestHarness {
    pub session: Arc<MemorySessionStore>,
    pub api: Arc<StubListingsApi>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
}

impl TestHarness {
    pub fn verified() -> Self {
        let user = SessionUser {
            id: Some(42),
            token: Some("token-42".to_string()),
            email: Some("vendedor@veycoflash.ec".to_string()),
            cuenta_verificada: true,
            ..Default::default()
        };
        Self::with_session(MemorySessionStore::with_user(&user).unwrap())
    }

    pub fn with_session(session: MemorySessionStore) -> Self {
        Self {
            session: Arc::new(session),
            api: Arc::new(StubListingsApi::default()),
            notifier: Arc::new(RecordingNotifier::default()),
            navigator: Arc::new(RecordingNavigator::default()),
        }
    }

    pub fn state(&self) -> AppState {
        AppState {
            session: self.session.clone(),
            api: self.api.clone(),
            notifier: self.notifier.clone(),
            navigator: self.navigator.clone(),
        }
    }
}

pub fn jpg(name: &str) -> SelectedFile {
    SelectedFile::new(name, "image/jpeg", vec![0xff, 0xd8, 0xff])
}
