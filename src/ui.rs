// src/ui.rs
//
// Zewnętrzne możliwości interfejsu: komunikaty dla użytkownika i nawigacja.
// Formularze nie znają przeglądarki ani terminala, dostają implementacje przez `AppState`.

use std::sync::Mutex;

use strum_macros::Display;

/// Symboliczne miejsca docelowe nawigacji.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Destination {
    #[strum(serialize = "/login")]
    Login,
    #[strum(serialize = "/verificar-email")]
    VerifyEmail,
    #[strum(serialize = "/perfil")]
    Profile,
    #[strum(serialize = "/catalogo")]
    Catalog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Blokujący komunikat pokazywany użytkownikowi.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, destination: Destination);
}

/// Komunikaty wypisywane przez `tracing` (używane przez CLI).
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => tracing::info!("✅ {}", notice.message),
            NoticeLevel::Error => tracing::error!("{}", notice.message),
        }
    }
}

#[derive(Debug, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, destination: Destination) {
        tracing::info!("Nawigacja do {}", destination);
    }
}

/// Zapamiętuje komunikaty w kolejności wysłania.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notices().into_iter().map(|n| n.message).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<Destination>>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<Destination> {
        self.visited.lock().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Destination> {
        self.visited().last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, destination: Destination) {
        if let Ok(mut visited) = self.visited.lock() {
            visited.push(destination);
        }
    }
}
