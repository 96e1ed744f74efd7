// src/auth_models.rs
use serde::{Deserialize, Serialize};

/// Rekord zalogowanego użytkownika tak, jak zapisuje go ekran logowania.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub cuenta_verificada: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apellido: Option<String>,
}

/// Zweryfikowana tożsamość sprzedawcy, przekazywana do wysyłki formularza.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publisher {
    pub user_id: i64,
    pub token: String,
    pub email: Option<String>,
}
