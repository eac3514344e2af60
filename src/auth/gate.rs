//! The 401 gate.

use super::credentials::CredentialStore;
use crate::error::{AdminApiError, AdminApiResult};
use crate::metrics::Metrics;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Signs requests with the stored token and reacts to 401 responses.
///
/// Any unauthorized response, whatever the operation, clears the credential
/// and flags that the operator has to log in again. The flag drops on the
/// next successful login.
pub struct AuthGate {
    store: Arc<dyn CredentialStore>,
    login_required: AtomicBool,
    metrics: Metrics,
}

impl AuthGate {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self::with_metrics(store, Metrics::new())
    }

    /// Count 401s into `metrics`, shared with the client and coordinator.
    pub fn with_metrics(store: Arc<dyn CredentialStore>, metrics: Metrics) -> Self {
        Self {
            store,
            login_required: AtomicBool::new(false),
            metrics,
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Token to attach to the next request.
    pub fn token(&self) -> Option<String> {
        self.store.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.get().is_some()
    }

    /// True after a 401 until the next successful login.
    pub fn login_required(&self) -> bool {
        self.login_required.load(Ordering::SeqCst)
    }

    /// Store a freshly issued token.
    pub fn accept_token(&self, token: &str) -> AdminApiResult<()> {
        self.store
            .set(token)
            .map_err(|e| AdminApiError::Other(e.to_string()))?;
        self.login_required.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// Drop the credential on explicit logout.
    pub fn logout(&self) {
        if let Err(e) = self.store.clear() {
            tracing::error!("Failed to clear stored credential: {}", e);
        }
    }

    /// Clear the credential and require a new login.
    pub fn on_unauthorized(&self) {
        self.metrics.record_unauthorized();
        self.login_required.store(true, Ordering::SeqCst);
        if let Err(e) = self.store.clear() {
            tracing::error!("Failed to clear stored credential: {}", e);
        }
        tracing::warn!("Backend rejected the credential; login required");
    }

    /// Pass a result through, triggering the gate on `Unauthorized`.
    pub fn inspect<T>(&self, result: AdminApiResult<T>) -> AdminApiResult<T> {
        if let Err(AdminApiError::Unauthorized) = &result {
            self.on_unauthorized();
        }
        result
    }
}
