//! Unified portal error model and mapping helpers.
//! This module provides a common error enum used across the session manager,
//! the mock data layer and the shell, along with the user-facing message map.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PortalError {
    /// Unknown email or wrong password. Both cases produce this exact value
    /// so a caller cannot tell which part of the credential pair failed.
    #[error("invalid_credentials: {message}")]
    InvalidCredentials { message: String },
    /// Persisted session state did not parse. Recovered by signing out.
    #[error("malformed_session: {message}")]
    MalformedSession { message: String },
    /// A call that requires a live session was made without one.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },
    #[error("not_found: {message}")]
    NotFound { message: String },
    #[error("conflict: {message}")]
    Conflict { message: String },
    /// Local profile storage failed.
    #[error("storage: {message}")]
    Storage { message: String },
}

impl PortalError {
    pub fn code_str(&self) -> &'static str {
        match self {
            PortalError::InvalidCredentials { .. } => "invalid_credentials",
            PortalError::MalformedSession { .. } => "malformed_session",
            PortalError::Unauthorized { .. } => "unauthorized",
            PortalError::NotFound { .. } => "not_found",
            PortalError::Conflict { .. } => "conflict",
            PortalError::Storage { .. } => "storage",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            PortalError::InvalidCredentials { message }
            | PortalError::MalformedSession { message }
            | PortalError::Unauthorized { message }
            | PortalError::NotFound { message }
            | PortalError::Conflict { message }
            | PortalError::Storage { message } => message.as_str(),
        }
    }

    pub fn invalid_credentials() -> Self {
        PortalError::InvalidCredentials { message: "Credenciais inválidas".into() }
    }
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        PortalError::MalformedSession { message: msg.into() }
    }
    pub fn unauthorized<S: Into<String>>(msg: S) -> Self {
        PortalError::Unauthorized { message: msg.into() }
    }
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        PortalError::NotFound { message: msg.into() }
    }
    pub fn conflict<S: Into<String>>(msg: S) -> Self {
        PortalError::Conflict { message: msg.into() }
    }
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        PortalError::Storage { message: msg.into() }
    }

    /// Map to the toast message shown to the user, matching the wording the
    /// portal has always used.
    pub fn toast(&self) -> &'static str {
        match self {
            PortalError::InvalidCredentials { .. } => {
                "Falha ao fazer login. Verifique suas credenciais."
            }
            PortalError::Unauthorized { .. } => {
                "Sua sessão expirou. Por favor, faça login novamente."
            }
            PortalError::Storage { .. } => {
                "Erro no servidor. Por favor, tente novamente mais tarde."
            }
            PortalError::MalformedSession { .. }
            | PortalError::NotFound { .. }
            | PortalError::Conflict { .. } => "Ocorreu um erro. Por favor, tente novamente.",
        }
    }
}

pub type PortalResult<T> = Result<T, PortalError>;

impl From<anyhow::Error> for PortalError {
    fn from(err: anyhow::Error) -> Self {
        // Default mapping: local storage unless remapped at the call site
        PortalError::Storage { message: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_and_display_mapping() {
        assert_eq!(PortalError::invalid_credentials().code_str(), "invalid_credentials");
        assert_eq!(PortalError::malformed("junk").code_str(), "malformed_session");
        assert_eq!(PortalError::unauthorized("no token").code_str(), "unauthorized");
        assert_eq!(PortalError::not_found("missing").code_str(), "not_found");
        assert_eq!(PortalError::conflict("dup").code_str(), "conflict");
        assert_eq!(PortalError::storage("disk").code_str(), "storage");

        let e = PortalError::unauthorized("no token");
        assert_eq!(e.to_string(), "unauthorized: no token");
        assert_eq!(e.message(), "no token");
    }

    #[test]
    fn toast_mapping() {
        assert_eq!(
            PortalError::invalid_credentials().toast(),
            "Falha ao fazer login. Verifique suas credenciais."
        );
        assert_eq!(
            PortalError::unauthorized("x").toast(),
            "Sua sessão expirou. Por favor, faça login novamente."
        );
        assert_eq!(
            PortalError::storage("x").toast(),
            "Erro no servidor. Por favor, tente novamente mais tarde."
        );
        assert_eq!(
            PortalError::not_found("x").toast(),
            "Ocorreu um erro. Por favor, tente novamente."
        );
    }

    #[test]
    fn credential_failures_are_indistinguishable() {
        // Same value regardless of which half of the pair was wrong.
        assert_eq!(PortalError::invalid_credentials(), PortalError::invalid_credentials());
    }

    #[test]
    fn anyhow_maps_to_storage() {
        let e: PortalError = anyhow::anyhow!("disk full").into();
        assert_eq!(e.code_str(), "storage");
        assert_eq!(e.message(), "disk full");
    }
}
