//! Any 401 clears the stored credential and requires a new login, whichever
//! operation received it.

use mockito::{Server, ServerGuard};
use sms_admin_mcp::auth::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
use sms_admin_mcp::client::{AsyncAdminClient, AsyncAdminClientImpl};
use sms_admin_mcp::domain::{EntryId, PhoneEntry};
use sms_admin_mcp::error::{AdminApiError, AdminApiResult};
use sms_admin_mcp::models::{EntryPatch, NewPhoneNumber};
use sms_admin_mcp::repositories::{AdminPhoneNumberRepository, PhoneNumberRepository};
use sms_admin_mcp::submission::BulkSubmissionCoordinator;
use sms_admin_mcp::submission::SubmissionPath;
use sms_admin_mcp::{AdminClient, AuthGate, Metrics};
use std::sync::Arc;

fn rejecting_server() -> ServerGuard {
    let mut server = Server::new();
    for (method, path) in [
        ("GET", "/stats"),
        ("GET", "/phone-numbers"),
        ("POST", "/phone-numbers"),
        ("POST", "/phone-numbers/bulk"),
        ("PUT", "/phone-numbers/65a1"),
        ("DELETE", "/phone-numbers/65a1"),
    ] {
        server
            .mock(method, path)
            .with_status(401)
            .with_body(r#"{"error": "Invalid token"}"#)
            .create();
    }
    server
}

fn assert_gate_tripped<T: std::fmt::Debug>(
    name: &str,
    operation: impl FnOnce(&AdminClient) -> AdminApiResult<T>,
) {
    let server = rejecting_server();
    let store = Arc::new(MemoryCredentialStore::with_token("stale"));
    let gate = Arc::new(AuthGate::new(store.clone()));
    let client = AdminClient::with_base_url(server.url(), gate.clone());

    let result = operation(&client);

    assert!(
        matches!(result, Err(AdminApiError::Unauthorized)),
        "{} returned {:?}",
        name,
        result
    );
    assert_eq!(store.get(), None, "{} left the token in place", name);
    assert!(gate.login_required(), "{} did not require login", name);
}

#[test]
fn test_every_operation_trips_the_gate() {
    let id = EntryId::new("65a1").unwrap();
    let entry = NewPhoneNumber {
        phone_number: "5551234567".to_string(),
        label: String::new(),
    };

    assert_gate_tripped("get_stats", |c| c.get_stats());
    assert_gate_tripped("list_phone_numbers", |c| c.list_phone_numbers());
    assert_gate_tripped("add_phone_number", |c| c.add_phone_number(&entry));
    assert_gate_tripped("add_phone_numbers_bulk", |c| {
        c.add_phone_numbers_bulk(&[entry.clone(), entry.clone()])
    });
    assert_gate_tripped("update_phone_number", |c| {
        c.update_phone_number(&id, &EntryPatch::active(true))
    });
    assert_gate_tripped("delete_phone_number", |c| c.delete_phone_number(&id));
}

#[test]
fn test_gate_removes_token_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("token.json");

    let store = Arc::new(FileCredentialStore::open(&path));
    store.set("stale").unwrap();
    assert!(path.exists());

    let server = rejecting_server();
    let gate = Arc::new(AuthGate::new(store.clone()));
    let client = AdminClient::with_base_url(server.url(), gate);

    assert!(client.list_phone_numbers().is_err());
    assert!(!path.exists());
    assert_eq!(FileCredentialStore::open(&path).get(), None);
}

#[tokio::test]
async fn test_submission_401_through_the_stack() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/phone-numbers/bulk")
        .match_header("authorization", "Bearer stale")
        .with_status(401)
        .create_async()
        .await;

    let metrics = Metrics::new();
    let store = Arc::new(MemoryCredentialStore::with_token("stale"));
    let gate = Arc::new(AuthGate::with_metrics(store.clone(), metrics.clone()));
    let client = Arc::new(AsyncAdminClientImpl::new(AdminClient::with_base_url(
        server.url(),
        gate.clone(),
    ))) as Arc<dyn AsyncAdminClient>;
    let repo =
        Arc::new(AdminPhoneNumberRepository::new(client)) as Arc<dyn PhoneNumberRepository>;
    let coordinator = BulkSubmissionCoordinator::with_metrics(repo, gate.metrics().clone());

    let entries = vec![
        PhoneEntry::new("(555) 123-4567", ""),
        PhoneEntry::new("(555) 123-4568", ""),
    ];
    let result = coordinator.submit(&entries).await;

    mock.assert_async().await;
    assert!(matches!(result, Err(AdminApiError::Unauthorized)));
    assert_eq!(store.get(), None);
    assert!(gate.login_required());

    // Gate, client and coordinator count into the same collector
    assert_eq!(metrics.unauthorized_total(), 1);
    assert_eq!(metrics.failed_requests_total(), 1);
    assert_eq!(metrics.submissions(SubmissionPath::Bulk), 1);
    assert_eq!(metrics.entries_sent_total(), 2);
}
