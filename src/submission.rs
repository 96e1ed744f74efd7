// src/submission.rs

use tokio_util::sync::CancellationToken;

use crate::auth_models::Publisher;
use crate::errors::AppError;
use crate::forms::ListingPayload;
use crate::models::ListingKind;
use crate::session::require_publisher;
use crate::state::AppState;
use crate::ui::{Destination, Notice};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
}

/// Blokada wysyłki formularza.
///
/// Przejście do `Submitting` następuje dopiero po sprawdzeniu sesji i walidacji.
/// Błąd wysyłki wraca do `Idle`; po sukcesie stan zostaje, bo użytkownik
/// i tak opuszcza formularz.
#[derive(Debug)]
pub struct SubmissionCoordinator {
    kind: ListingKind,
    state: SubmissionState,
}

impl SubmissionCoordinator {
    pub fn new(kind: ListingKind) -> Self {
        Self {
            kind,
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Etykieta przycisku wysyłki.
    pub fn submit_label(&self) -> &'static str {
        match self.state {
            SubmissionState::Idle => self.kind.idle_label(),
            SubmissionState::Submitting => "Publicando...",
        }
    }

    pub async fn submit<F>(
        &mut self,
        app: &AppState,
        cancel: &CancellationToken,
        prepare: F,
    ) -> Result<(), AppError>
    where
        F: FnOnce(&Publisher) -> Result<ListingPayload, AppError>,
    {
        if self.is_submitting() {
            tracing::warn!("Zignorowano ponowną wysyłkę {}", self.kind);
            return Err(AppError::AlreadySubmitting);
        }

        let publisher = require_publisher(app.session.as_ref()).map_err(|e| {
            tracing::warn!("Weryfikacja sesji nie powiodła się: {}", e);
            self.report_failure(app, &e);
            e
        })?;

        let payload = prepare(&publisher).map_err(|e| {
            tracing::debug!("Walidacja formularza {} nie powiodła się: {}", self.kind, e);
            self.report_failure(app, &e);
            e
        })?;

        self.state = SubmissionState::Submitting;
        tracing::info!(
            user_id = publisher.user_id,
            email = ?publisher.email,
            has_token = !publisher.token.is_empty(),
            images = payload.images.len(),
            "Wysyłanie ogłoszenia ({})",
            self.kind
        );

        let result = app.api.publish(payload, &publisher.token).await;

        if cancel.is_cancelled() {
            tracing::debug!("Formularz zamknięty w trakcie wysyłki, pomijam wynik");
            self.state = SubmissionState::Idle;
            return Err(AppError::Cancelled);
        }

        match result {
            Ok(()) => {
                tracing::info!("Ogłoszenie ({}) opublikowane", self.kind);
                app.notifier
                    .notify(Notice::success(self.kind.success_message()));
                app.navigator.navigate(Destination::Profile);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Błąd publikacji ogłoszenia ({}): {:?}", self.kind, e);
                self.state = SubmissionState::Idle;
                self.report_failure(app, &e);
                Err(e)
            }
        }
    }

    /// Komunikat, ewentualne usunięcie sesji i przekierowanie.
    fn report_failure(&self, app: &AppState, error: &AppError) {
        if error.clears_session() {
            if let Err(e) = app.session.clear() {
                tracing::error!("Nie można usunąć sesji: {:?}", e);
            }
        }
        app.notifier.notify(Notice::error(error.notice(self.kind)));
        if let Some(destination) = error.redirect() {
            app.navigator.navigate(destination);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth_models::SessionUser;
    use crate::session::{MemorySessionStore, SessionStore};
    use crate::test_support::TestHarness;
    use std::sync::Arc;

    fn payload() -> ListingPayload {
        ListingPayload {
            kind: ListingKind::Servicio,
            fields: vec![("titulo", "x".to_string())],
            deuna_qr: None,
            images: vec![],
        }
    }

    #[tokio::test]
    async fn missing_session_redirects_without_submitting() {
        let harness = TestHarness::with_session(MemorySessionStore::default());
        let mut coordinator = SubmissionCoordinator::new(ListingKind::Producto);
        let result = coordinator
            .submit(&harness.state(), &CancellationToken::new(), |_| Ok(payload()))
            .await;

        assert!(matches!(result, Err(AppError::SessionMissing)));
        assert_eq!(coordinator.state(), SubmissionState::Idle);
        assert_eq!(harness.navigator.last(), Some(Destination::Login));
        assert_eq!(harness.api.calls(), 0);
    }

    #[tokio::test]
    async fn malformed_session_is_cleared() {
        let user = SessionUser {
            id: Some(1),
            token: None,
            cuenta_verificada: true,
            ..Default::default()
        };
        let store = MemorySessionStore::with_user(&user).unwrap();
        let harness = TestHarness::with_session(store);
        let mut coordinator = SubmissionCoordinator::new(ListingKind::Producto);
        let result = coordinator
            .submit(&harness.state(), &CancellationToken::new(), |_| Ok(payload()))
            .await;

        assert!(matches!(result, Err(AppError::MissingToken)));
        assert!(harness.session.read().unwrap().is_none());
        assert_eq!(harness.navigator.last(), Some(Destination::Login));
    }

    #[tokio::test]
    async fn unverified_account_goes_to_verification() {
        let user = SessionUser {
            id: Some(1),
            token: Some("t".to_string()),
            cuenta_verificada: false,
            ..Default::default()
        };
        let harness = TestHarness::with_session(MemorySessionStore::with_user(&user).unwrap());
        let mut coordinator = SubmissionCoordinator::new(ListingKind::Servicio);
        let result = coordinator
            .submit(&harness.state(), &CancellationToken::new(), |_| Ok(payload()))
            .await;

        assert!(matches!(result, Err(AppError::UnverifiedAccount)));
        assert!(harness.session.read().unwrap().is_some());
        assert_eq!(harness.navigator.last(), Some(Destination::VerifyEmail));
        assert_eq!(
            harness.notifier.messages(),
            vec!["Debes verificar tu cuenta de email antes de publicar servicios"]
        );
    }

    #[tokio::test]
    async fn forbidden_response_logs_user_out() {
        let harness = TestHarness::verified();
        harness.api.respond_with(|| Err(AppError::Forbidden));
        let mut coordinator = SubmissionCoordinator::new(ListingKind::Servicio);
        let result = coordinator
            .submit(&harness.state(), &CancellationToken::new(), |_| Ok(payload()))
            .await;

        assert!(matches!(result, Err(AppError::Forbidden)));
        assert_eq!(coordinator.state(), SubmissionState::Idle);
        assert!(harness.session.read().unwrap().is_none());
        assert_eq!(harness.navigator.last(), Some(Destination::Login));
    }

    #[tokio::test]
    async fn server_failure_returns_to_idle_with_server_message() {
        let harness = TestHarness::verified();
        harness.api.respond_with(|| {
            Err(AppError::Api {
                status: 400,
                message: Some("Tu cuenta no está activa".to_string()),
            })
        });
        let mut coordinator = SubmissionCoordinator::new(ListingKind::Producto);
        let result = coordinator
            .submit(&harness.state(), &CancellationToken::new(), |_| Ok(payload()))
            .await;

        assert!(result.is_err());
        assert_eq!(coordinator.submit_label(), "📤 Publicar Producto");
        assert_eq!(harness.notifier.messages(), vec!["Tu cuenta no está activa"]);
        assert!(harness.session.read().unwrap().is_some());
        assert_eq!(harness.navigator.last(), None);
    }

    #[tokio::test]
    async fn success_latches_and_navigates_to_profile() {
        let harness = TestHarness::verified();
        let mut coordinator = SubmissionCoordinator::new(ListingKind::Producto);
        coordinator
            .submit(&harness.state(), &CancellationToken::new(), |_| Ok(payload()))
            .await
            .unwrap();

        assert!(coordinator.is_submitting());
        assert_eq!(coordinator.submit_label(), "Publicando...");
        assert_eq!(harness.navigator.last(), Some(Destination::Profile));
        assert_eq!(
            harness.notifier.messages(),
            vec!["¡Producto publicado exitosamente!"]
        );

        let again = coordinator
            .submit(&harness.state(), &CancellationToken::new(), |_| Ok(payload()))
            .await;
        assert!(matches!(again, Err(AppError::AlreadySubmitting)));
        assert_eq!(harness.api.calls(), 1);
    }

    #[tokio::test]
    async fn cancelled_form_ignores_response() {
        let harness = TestHarness::verified();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut coordinator = SubmissionCoordinator::new(ListingKind::Producto);
        let result = coordinator
            .submit(&harness.state(), &cancel, |_| Ok(payload()))
            .await;

        assert!(matches!(result, Err(AppError::Cancelled)));
        assert!(harness.notifier.messages().is_empty());
        assert_eq!(harness.navigator.last(), None);
    }

    #[tokio::test]
    async fn session_is_checked_before_validation() {
        let harness = TestHarness::with_session(MemorySessionStore::default());
        let mut coordinator = SubmissionCoordinator::new(ListingKind::Producto);
        let validated = Arc::new(std::sync::atomic::AtomicBool::new(false));
        let flag = validated.clone();
        let _ = coordinator
            .submit(&harness.state(), &CancellationToken::new(), move |_| {
                flag.store(true, std::sync::atomic::Ordering::SeqCst);
                Ok(payload())
            })
            .await;
        assert!(!validated.load(std::sync::atomic::Ordering::SeqCst));
    }
}
