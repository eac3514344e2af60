//! MCP tool handlers for the SMS admin server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.

use crate::auth::{AuthGate, SessionService};
use crate::client::AsyncAdminClient;
use crate::domain::{format_phone_input, to_digits, EntryId};
use crate::error::{AdminApiError, AdminApiResult, FormError};
use crate::repositories::{PhoneNumberRepository, StatsRepository};
use crate::services::{
    delete_prompt, DashboardService, EditDraft, PhoneNumberForm, PhoneNumberListService,
    PhoneNumberListServiceImpl, StatsService, StatsServiceImpl,
};
use crate::submission::{BulkSubmissionCoordinator, StatusMessage};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// The SMS admin MCP server.
#[derive(Clone)]
pub struct SmsAdminMcpServer {
    form: Arc<Mutex<PhoneNumberForm>>,
    coordinator: Arc<BulkSubmissionCoordinator>,
    list_service: Arc<dyn PhoneNumberListService>,
    stats_service: Arc<dyn StatsService>,
    dashboard: Arc<DashboardService>,
    session: Arc<SessionService>,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for SmsAdminMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "sms-admin-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("MCP server for the SMS notification admin console - log in, add phone numbers in bulk, and manage the stored numbers and dashboard stats.".into()),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
struct LoginParams {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct FormatPhoneParams {
    input: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct EntryRow {
    phone_number: String,
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct AddPhoneNumbersParams {
    entries: Vec<EntryRow>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdatePhoneNumberParams {
    id: String,
    phone_number: String,
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct TogglePhoneNumberParams {
    id: String,
    /// Current state of the number; it is flipped
    active: bool,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct DeletePhoneNumberParams {
    id: String,
    #[serde(default)]
    confirm: Option<bool>,
}

/// Outcome of `add_phone_numbers`.
#[derive(Debug, Serialize)]
struct SubmissionResponse {
    #[serde(flatten)]
    status: StatusMessage,
    reset: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    clears_at: Option<String>,
    pending_entries: Vec<String>,
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn json_result(value: &impl Serialize) -> Result<CallToolResult, McpError> {
    let json_response = serde_json::to_string_pretty(value).map_err(to_mcp_error)?;
    Ok(CallToolResult::success(vec![Content::text(json_response)]))
}

fn status_result(status: &StatusMessage) -> Result<CallToolResult, McpError> {
    let json_response = serde_json::to_string_pretty(status).map_err(to_mcp_error)?;
    if status.is_error() {
        Ok(CallToolResult::error(vec![Content::text(json_response)]))
    } else {
        Ok(CallToolResult::success(vec![Content::text(json_response)]))
    }
}

fn session_expired() -> CallToolResult {
    let message = FormError::Auth(AdminApiError::Unauthorized).to_string();
    CallToolResult::error(vec![Content::text(message)])
}

/// Unwrap a service result; auth failures become a tool error asking for a new login.
fn guard<T>(result: AdminApiResult<T>) -> Result<Result<T, CallToolResult>, McpError> {
    match result {
        Ok(value) => Ok(Ok(value)),
        Err(e) if e.is_auth_error() => Ok(Err(session_expired())),
        Err(e) => Err(to_mcp_error(e)),
    }
}

fn parse_id(raw: &str) -> Result<EntryId, McpError> {
    EntryId::new(raw).map_err(|e| McpError::invalid_params(e.to_string(), None))
}

// Tool router implementation
#[tool_router]
impl SmsAdminMcpServer {
    /// Create a new SMS admin MCP server.
    pub fn new(
        phone_repo: Arc<dyn PhoneNumberRepository>,
        stats_repo: Arc<dyn StatsRepository>,
        client: Arc<dyn AsyncAdminClient>,
        gate: Arc<AuthGate>,
    ) -> Self {
        let coordinator = Arc::new(BulkSubmissionCoordinator::with_metrics(
            phone_repo.clone(),
            gate.metrics().clone(),
        ));

        let list_service = Arc::new(PhoneNumberListServiceImpl::new(phone_repo))
            as Arc<dyn PhoneNumberListService>;

        let stats_service =
            Arc::new(StatsServiceImpl::new(stats_repo)) as Arc<dyn StatsService>;

        let dashboard = Arc::new(DashboardService::new(
            stats_service.clone(),
            list_service.clone(),
        ));

        Self {
            form: Arc::new(Mutex::new(PhoneNumberForm::new())),
            coordinator,
            list_service,
            stats_service,
            dashboard,
            session: Arc::new(SessionService::new(client, gate)),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Log in to the SMS admin backend and store the issued token")]
    async fn login(&self, params: Parameters<LoginParams>) -> Result<CallToolResult, McpError> {
        let params = params.0;

        match self.session.login(&params.username, &params.password).await {
            Ok(()) => json_result(&self.session.status()),
            Err(AdminApiError::InvalidRequest(message)) => {
                Ok(CallToolResult::error(vec![Content::text(message)]))
            }
            Err(e) => Err(to_mcp_error(e)),
        }
    }

    #[tool(description = "Log out and discard the stored token")]
    async fn logout(&self) -> Result<CallToolResult, McpError> {
        self.session.logout();
        json_result(&self.session.status())
    }

    #[tool(description = "Report whether a token is stored and whether a new login is required")]
    async fn session_status(&self) -> Result<CallToolResult, McpError> {
        json_result(&self.session.status())
    }

    /// Format partial input the way the entry field does while typing.
    #[tool(
        description = "Format partial phone number input as (XXX) XXX-XXXX, keeping only the first 10 digits"
    )]
    async fn format_phone_number(
        &self,
        params: Parameters<FormatPhoneParams>,
    ) -> Result<CallToolResult, McpError> {
        let input = params.0.input;
        json_result(&serde_json::json!({
            "formatted": format_phone_input(&input),
            "digits": to_digits(&input),
        }))
    }

    /// Submit phone numbers through the add form.
    #[tool(
        description = "Add one or more phone numbers with optional labels. Numbers are sent with all their digits, country code included. Entries with fewer than 10 digits are skipped; several valid entries go through the bulk endpoint and duplicates are reported."
    )]
    async fn add_phone_numbers(
        &self,
        params: Parameters<AddPhoneNumbersParams>,
    ) -> Result<CallToolResult, McpError> {
        let rows: Vec<(String, String)> = params
            .0
            .entries
            .into_iter()
            .map(|row| (row.phone_number, row.label.unwrap_or_default()))
            .collect();

        tracing::info!("MCP Handler: add_phone_numbers called with {} rows", rows.len());

        // The form lock is released while the request is outstanding; the busy
        // flag refuses a second submission in the meantime
        let entries = {
            let mut form = self.form.lock().await;
            if form.is_busy() {
                return Ok(CallToolResult::error(vec![Content::text(
                    FormError::Busy.to_string(),
                )]));
            }
            form.replace_entries(&rows);
            match form.begin_submit() {
                Ok(entries) => entries,
                Err(e) => return Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
            }
        };

        let result = self.coordinator.submit(&entries).await;

        let mut form = self.form.lock().await;
        let status = match form.finish_submit(result, Instant::now()) {
            Ok(status) => status,
            Err(FormError::Auth(_)) => return Ok(session_expired()),
            Err(e) => return Err(to_mcp_error(e)),
        };

        let effect = status.form_effect();
        let clears_at = effect.auto_clear_after.and_then(|ttl| {
            chrono::Duration::from_std(ttl)
                .ok()
                .map(|ttl| (chrono::Utc::now() + ttl).to_rfc3339())
        });
        let response = SubmissionResponse {
            reset: effect.reset_entries,
            clears_at,
            pending_entries: form
                .entries()
                .iter()
                .filter(|e| !e.is_blank())
                .map(|e| e.raw_input.clone())
                .collect(),
            status,
        };

        let json_response = serde_json::to_string_pretty(&response).map_err(to_mcp_error)?;
        if response.status.is_error() {
            Ok(CallToolResult::error(vec![Content::text(json_response)]))
        } else {
            Ok(CallToolResult::success(vec![Content::text(json_response)]))
        }
    }

    #[tool(
        description = "List stored phone numbers with display formatting and active/inactive counts"
    )]
    async fn list_phone_numbers(&self) -> Result<CallToolResult, McpError> {
        match guard(self.list_service.load().await)? {
            Ok(listing) => json_result(&listing),
            Err(expired) => Ok(expired),
        }
    }

    #[tool(description = "Change the number and label of a stored phone number")]
    async fn update_phone_number(
        &self,
        params: Parameters<UpdatePhoneNumberParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let id = parse_id(&params.id)?;
        let draft = EditDraft {
            phone_number: params.phone_number,
            label: params.label.unwrap_or_default(),
        };

        match guard(self.list_service.save_edit(&id, &draft).await)? {
            Ok(status) => status_result(&status),
            Err(expired) => Ok(expired),
        }
    }

    #[tool(
        description = "Enable or disable a stored phone number. Pass its current active state; it is flipped."
    )]
    async fn toggle_phone_number(
        &self,
        params: Parameters<TogglePhoneNumberParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let id = parse_id(&params.id)?;

        match guard(self.list_service.toggle_active(&id, params.active).await)? {
            Ok(status) => status_result(&status),
            Err(expired) => Ok(expired),
        }
    }

    /// Delete a stored number; without `confirm` only the prompt is returned.
    #[tool(
        description = "Delete a stored phone number. Call first without confirm to get the confirmation prompt, then again with confirm=true."
    )]
    async fn delete_phone_number(
        &self,
        params: Parameters<DeletePhoneNumberParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let id = parse_id(&params.id)?;

        if !params.confirm.unwrap_or(false) {
            let entry = match guard(self.list_service.find(&id).await)? {
                Ok(entry) => entry,
                Err(expired) => return Ok(expired),
            };
            let prompt = entry
                .as_ref()
                .map(delete_prompt)
                .unwrap_or_else(|| format!("Delete {}?", id));
            return json_result(&serde_json::json!({
                "confirm_required": true,
                "prompt": prompt,
            }));
        }

        match guard(self.list_service.delete(&id).await)? {
            Ok(status) => status_result(&status),
            Err(expired) => Ok(expired),
        }
    }

    #[tool(
        description = "Get dashboard stats: active numbers, transcriptions, SMS sent and extensions"
    )]
    async fn get_stats(&self) -> Result<CallToolResult, McpError> {
        match guard(self.stats_service.load().await)? {
            Ok(Some(stats)) => json_result(&stats),
            Ok(None) => Ok(CallToolResult::error(vec![Content::text(
                "Failed to load stats",
            )])),
            Err(expired) => Ok(expired),
        }
    }

    #[tool(description = "Load the dashboard: stats cards and the phone number list together")]
    async fn get_dashboard(&self) -> Result<CallToolResult, McpError> {
        match guard(self.dashboard.load().await)? {
            Ok(dashboard) => json_result(&dashboard),
            Err(expired) => Ok(expired),
        }
    }
}
