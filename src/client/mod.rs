//! HTTP client for the SMS admin backend.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. Every request is signed with the stored bearer
//! token, and every 401 is routed through the [`AuthGate`].

mod async_wrapper;
pub use async_wrapper::{AsyncAdminClient, AsyncAdminClientImpl};

use crate::auth::AuthGate;
use crate::config::Config;
use crate::domain::EntryId;
use crate::error::{AdminApiError, AdminApiResult};
use crate::metrics::Metrics;
use crate::models::{
    Ack, BulkAddRequest, BulkAddResponse, BulkCounts, EntryPatch, LoginRequest, LoginResponse,
    NewPhoneNumber, PersistedEntry, PhoneNumbersResponse, StatsSnapshot,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// HTTP client for the SMS admin backend.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct AdminClient {
    /// Base URL for the backend API
    base_url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Source of the bearer token and sink for 401s
    gate: Arc<AuthGate>,

    /// Counters shared with the gate
    metrics: Metrics,
}

impl AdminClient {
    /// Create a new AdminClient from configuration.
    pub fn new(config: &Config, gate: Arc<AuthGate>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.api_base_url.clone(),
            agent: Arc::new(agent),
            metrics: gate.metrics().clone(),
            gate,
        }
    }

    /// Create an AdminClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, gate: Arc<AuthGate>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            agent: Arc::new(agent),
            metrics: gate.metrics().clone(),
            gate,
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn gate(&self) -> &Arc<AuthGate> {
        &self.gate
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Attach the bearer token, when one is stored.
    fn sign(&self, request: ureq::Request) -> ureq::Request {
        match self.gate.token() {
            Some(token) => request.set("Authorization", &format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Send a request and apply the cross-cutting response handling:
    /// metrics, error logging, error mapping and, for signed requests, the
    /// 401 gate.
    fn execute(
        &self,
        request: ureq::Request,
        body: Option<&serde_json::Value>,
        signed: bool,
    ) -> AdminApiResult<ureq::Response> {
        let started = Instant::now();
        let method = request.method().to_string();
        let url = request.url().to_string();
        let request = if signed { self.sign(request) } else { request };
        let request = request.set("Content-Type", "application/json");

        tracing::debug!("{} {}", method, url);
        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        }
        .map_err(|e| self.map_error(e));

        match &result {
            Ok(response) => {
                tracing::debug!("{} {} - Success (status: {})", method, url, response.status());
            }
            Err(e) => {
                tracing::error!(url = %url, method = %method, "API Error: {}", e);
            }
        }
        self.metrics.record_request(started.elapsed(), result.is_err());

        if signed {
            self.gate.inspect(result)
        } else {
            result
        }
    }

    fn get(&self, path: &str) -> AdminApiResult<ureq::Response> {
        self.execute(self.agent.get(&self.build_url(path)), None, true)
    }

    fn post(&self, path: &str, body: &serde_json::Value) -> AdminApiResult<ureq::Response> {
        self.execute(self.agent.post(&self.build_url(path)), Some(body), true)
    }

    fn put(&self, path: &str, body: &serde_json::Value) -> AdminApiResult<ureq::Response> {
        self.execute(self.agent.put(&self.build_url(path)), Some(body), true)
    }

    fn delete(&self, path: &str) -> AdminApiResult<ureq::Response> {
        self.execute(self.agent.delete(&self.build_url(path)), None, true)
    }

    /// Map a ureq error to an AdminApiError.
    fn map_error(&self, error: ureq::Error) -> AdminApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 => AdminApiError::Unauthorized,
                    404 => AdminApiError::NotFound(message),
                    _ => AdminApiError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    AdminApiError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    AdminApiError::Timeout
                } else {
                    AdminApiError::HttpError(transport.to_string())
                }
            }
        }
    }

    fn read_json<T: DeserializeOwned>(response: ureq::Response) -> AdminApiResult<T> {
        let body = response
            .into_string()
            .map_err(|e| AdminApiError::HttpError(e.to_string()))?;
        serde_json::from_str(&body).map_err(AdminApiError::JsonError)
    }

    fn read_ack(response: ureq::Response) -> AdminApiResult<Ack> {
        let body = response
            .into_string()
            .map_err(|e| AdminApiError::HttpError(e.to_string()))?;
        if body.trim().is_empty() {
            return Ok(Ack::default());
        }
        let body = serde_json::from_str(&body).map_err(AdminApiError::JsonError)?;
        Ok(Ack { body })
    }

    // ========================= Session =========================

    /// Exchange operator credentials for a token.
    ///
    /// Sent without a bearer token, and a 401 here means bad credentials
    /// rather than an expired session, so the gate is not involved. This does
    /// not store the token; see [`crate::auth::SessionService`].
    pub fn login(&self, request: &LoginRequest) -> AdminApiResult<LoginResponse> {
        let body = serde_json::to_value(request).map_err(AdminApiError::JsonError)?;
        let request = self.agent.post(&self.build_url("/auth/login"));
        let response = self.execute(request, Some(&body), false)?;
        Self::read_json(response)
    }

    // ========================= Stats =========================

    pub fn get_stats(&self) -> AdminApiResult<StatsSnapshot> {
        let response = self.get("/stats")?;
        Self::read_json(response)
    }

    // ========================= Phone Numbers =========================

    /// List every stored phone number.
    pub fn list_phone_numbers(&self) -> AdminApiResult<Vec<PersistedEntry>> {
        let response = self.get("/phone-numbers")?;
        let parsed: PhoneNumbersResponse = Self::read_json(response)?;
        let entries = parsed.phone_numbers.unwrap_or_default();
        self.metrics.record_entries_listed(entries.len());
        Ok(entries)
    }

    pub fn add_phone_number(&self, entry: &NewPhoneNumber) -> AdminApiResult<Ack> {
        let body = serde_json::to_value(entry).map_err(AdminApiError::JsonError)?;
        let response = self.post("/phone-numbers", &body)?;
        Self::read_ack(response)
    }

    /// Add several numbers in one request and return the backend's reconciliation.
    pub fn add_phone_numbers_bulk(&self, entries: &[NewPhoneNumber]) -> AdminApiResult<BulkCounts> {
        let request = BulkAddRequest {
            phone_numbers: entries.to_vec(),
        };
        let body = serde_json::to_value(&request).map_err(AdminApiError::JsonError)?;

        tracing::info!("Submitting {} phone numbers in bulk", entries.len());
        let response = self.post("/phone-numbers/bulk", &body)?;

        let parsed: BulkAddResponse = Self::read_json(response)?;
        Ok(parsed.results)
    }

    pub fn update_phone_number(&self, id: &EntryId, patch: &EntryPatch) -> AdminApiResult<Ack> {
        let body = serde_json::to_value(patch).map_err(AdminApiError::JsonError)?;
        let path = format!("/phone-numbers/{}", id.path_segment());
        let response = self.put(&path, &body)?;
        Self::read_ack(response)
    }

    pub fn delete_phone_number(&self, id: &EntryId) -> AdminApiResult<Ack> {
        let path = format!("/phone-numbers/{}", id.path_segment());
        let response = self.delete(&path)?;
        Self::read_ack(response)
    }
}
