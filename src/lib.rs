//! SMS Admin MCP Server - a Model Context Protocol server for the SMS
//! notification admin console.
//!
//! The console keeps the list of phone numbers that receive SMS
//! notifications. This library exposes it to AI assistants: formatting
//! numbers as they are typed, submitting several at once and reconciling the
//! backend's bulk counts into one status line, managing the stored list, and
//! signing every request with the operator's token.
//!
//! # Architecture
//!
//! - **domain**: Phone number normalization and validated identifiers
//! - **models**: Wire types for the backend API
//! - **error**: Error types per concern
//! - **config**: Configuration from environment variables
//! - **auth**: Credential storage, the 401 gate and login/logout
//! - **client**: HTTP client for the backend, sync and async
//! - **repositories**: Transport seams used by the submission and services
//! - **submission**: Bulk submission reconciliation
//! - **services**: Add form, stored list, stats and dashboard
//! - **metrics**: Counters for requests, rejected credentials and submissions
//! - **server**: MCP protocol server

pub mod auth;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;
pub mod submission;

pub use auth::{AuthGate, CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use client::AdminClient;
pub use config::Config;
pub use domain::{format_phone_input, format_stored_number, PhoneEntry};
pub use error::{AdminApiError, ConfigError, CredentialError, FormError};
pub use metrics::{Metrics, MetricsSummary};
pub use models::{BulkCounts, PersistedEntry, StatsSnapshot};
pub use server::SmsAdminMcpServer;
pub use submission::{BulkSubmissionCoordinator, StatusKind, StatusMessage};
