//! Login and logout.

use super::gate::AuthGate;
use crate::client::AsyncAdminClient;
use crate::error::{AdminApiError, AdminApiResult};
use serde::Serialize;
use std::sync::Arc;

/// Where the operator stands with the backend.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SessionStatus {
    /// A token is stored
    pub authenticated: bool,

    /// The backend rejected the last token and a new login is needed
    pub login_required: bool,
}

/// Obtains and discards the operator's token.
pub struct SessionService {
    client: Arc<dyn AsyncAdminClient>,
    gate: Arc<AuthGate>,
}

impl SessionService {
    pub fn new(client: Arc<dyn AsyncAdminClient>, gate: Arc<AuthGate>) -> Self {
        Self { client, gate }
    }

    /// Log in and store the issued token.
    pub async fn login(&self, username: &str, password: &str) -> AdminApiResult<()> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AdminApiError::InvalidRequest(
                "Username and password are required".to_string(),
            ));
        }

        let response = match self.client.login(username.trim(), password).await {
            Err(AdminApiError::Unauthorized) => {
                return Err(AdminApiError::InvalidRequest(
                    "Invalid credentials".to_string(),
                ))
            }
            other => other?,
        };

        match response.accepted_token() {
            Some(token) => {
                self.gate.accept_token(token)?;
                tracing::info!("Logged in as {}", username.trim());
                Ok(())
            }
            None => Err(AdminApiError::InvalidRequest(
                response
                    .error
                    .clone()
                    .unwrap_or_else(|| "Login failed".to_string()),
            )),
        }
    }

    pub fn logout(&self) {
        self.gate.logout();
        tracing::info!("Logged out");
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            authenticated: self.gate.is_authenticated(),
            login_required: self.gate.login_required(),
        }
    }
}
