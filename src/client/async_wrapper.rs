//! Async wrapper around synchronous AdminClient.
//!
//! This module provides an async interface to the synchronous AdminClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::AdminClient;
use crate::domain::EntryId;
use crate::error::{AdminApiError, AdminApiResult};
use crate::models::*;
use async_trait::async_trait;
use std::sync::Arc;

/// Async wrapper trait for backend operations.
#[async_trait]
pub trait AsyncAdminClient: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> AdminApiResult<LoginResponse>;

    async fn get_stats(&self) -> AdminApiResult<StatsSnapshot>;

    async fn list_phone_numbers(&self) -> AdminApiResult<Vec<PersistedEntry>>;
    async fn add_phone_number(&self, entry: &NewPhoneNumber) -> AdminApiResult<Ack>;
    async fn add_phone_numbers_bulk(&self, entries: &[NewPhoneNumber])
        -> AdminApiResult<BulkCounts>;
    async fn update_phone_number(&self, id: &EntryId, patch: &EntryPatch) -> AdminApiResult<Ack>;
    async fn delete_phone_number(&self, id: &EntryId) -> AdminApiResult<Ack>;
}

/// Async wrapper around synchronous AdminClient.
#[derive(Clone)]
pub struct AsyncAdminClientImpl {
    client: Arc<AdminClient>,
}

impl AsyncAdminClientImpl {
    pub fn new(client: AdminClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// The wrapped synchronous client.
    pub fn inner(&self) -> &AdminClient {
        &self.client
    }
}

fn join_error(e: tokio::task::JoinError) -> AdminApiError {
    AdminApiError::HttpError(format!("Task join error: {}", e))
}

#[async_trait]
impl AsyncAdminClient for AsyncAdminClientImpl {
    async fn login(&self, username: &str, password: &str) -> AdminApiResult<LoginResponse> {
        let client = self.client.clone();
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        tokio::task::spawn_blocking(move || client.login(&request))
            .await
            .map_err(join_error)?
    }

    async fn get_stats(&self) -> AdminApiResult<StatsSnapshot> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.get_stats())
            .await
            .map_err(join_error)?
    }

    async fn list_phone_numbers(&self) -> AdminApiResult<Vec<PersistedEntry>> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.list_phone_numbers())
            .await
            .map_err(join_error)?
    }

    async fn add_phone_number(&self, entry: &NewPhoneNumber) -> AdminApiResult<Ack> {
        let client = self.client.clone();
        let entry = entry.clone();

        tokio::task::spawn_blocking(move || client.add_phone_number(&entry))
            .await
            .map_err(join_error)?
    }

    async fn add_phone_numbers_bulk(
        &self,
        entries: &[NewPhoneNumber],
    ) -> AdminApiResult<BulkCounts> {
        let client = self.client.clone();
        let entries = entries.to_vec();

        tokio::task::spawn_blocking(move || client.add_phone_numbers_bulk(&entries))
            .await
            .map_err(join_error)?
    }

    async fn update_phone_number(&self, id: &EntryId, patch: &EntryPatch) -> AdminApiResult<Ack> {
        let client = self.client.clone();
        let id = id.clone();
        let patch = patch.clone();

        tokio::task::spawn_blocking(move || client.update_phone_number(&id, &patch))
            .await
            .map_err(join_error)?
    }

    async fn delete_phone_number(&self, id: &EntryId) -> AdminApiResult<Ack> {
        let client = self.client.clone();
        let id = id.clone();

        tokio::task::spawn_blocking(move || client.delete_phone_number(&id))
            .await
            .map_err(join_error)?
    }
}
