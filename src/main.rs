//! SMS Admin MCP Server - Main entry point
//!
//! This is the main executable for the SMS Admin MCP Server, which provides a
//! Model Context Protocol (MCP) interface to the SMS notification admin console.

use anyhow::Result;
use sms_admin_mcp::auth::SessionService;
use sms_admin_mcp::client::{AsyncAdminClient, AsyncAdminClientImpl};
use sms_admin_mcp::repositories::{
    AdminPhoneNumberRepository, AdminStatsRepository, PhoneNumberRepository, StatsRepository,
};
use sms_admin_mcp::{
    AdminClient, AuthGate, Config, FileCredentialStore, Metrics, SmsAdminMcpServer,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration first so LOG_LEVEL can seed the filter
    let config = Config::from_env();

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let default_level = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting SMS Admin MCP Server with API URL: {}",
        config.api_base_url
    );

    // Credential store and the 401 gate every request goes through
    let store = Arc::new(FileCredentialStore::open(config.credentials_path.clone()));
    info!("Credentials stored at {}", store.path().display());
    let metrics = Metrics::new();
    let gate = Arc::new(AuthGate::with_metrics(store, metrics.clone()));

    // Initialize backend client
    let sync_client = AdminClient::new(&config, gate.clone());
    let client = Arc::new(AsyncAdminClientImpl::new(sync_client)) as Arc<dyn AsyncAdminClient>;

    if let Some((username, password)) = config.startup_login() {
        if gate.is_authenticated() {
            info!("Using stored credential; skipping startup login");
        } else if let Err(e) = SessionService::new(client.clone(), gate.clone())
            .login(username, password)
            .await
        {
            warn!("Startup login failed: {}", e);
        }
    }

    // Initialize repositories
    let phone_repo = Arc::new(AdminPhoneNumberRepository::new(client.clone()))
        as Arc<dyn PhoneNumberRepository>;
    let stats_repo =
        Arc::new(AdminStatsRepository::new(client.clone())) as Arc<dyn StatsRepository>;

    let server = SmsAdminMcpServer::new(phone_repo, stats_repo, client, gate.clone());
    info!("SMS Admin MCP Server initialized");

    // Run the server (this will block until the server exits)
    info!("Starting MCP server with stdio transport");
    sms_admin_mcp::server::run_server(server).await?;

    info!("Session totals: {}", metrics.summary());

    info!("SMS Admin MCP Server shutdown complete");
    Ok(())
}
