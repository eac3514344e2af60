use async_trait::async_trait;
use sms_admin_mcp::error::{AdminApiError, AdminApiResult};
use sms_admin_mcp::models::StatsSnapshot;
use sms_admin_mcp::repositories::StatsRepository;
use std::sync::{Arc, Mutex};

/// Mock stats repository returning a fixed snapshot, or a fixed failure.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockStatsRepository {
    snapshot: Arc<Mutex<StatsSnapshot>>,
    unauthorized: Arc<Mutex<bool>>,
    unavailable: Arc<Mutex<bool>>,
    calls: Arc<Mutex<usize>>,
}

#[allow(dead_code)]
impl MockStatsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_snapshot(&self, snapshot: StatsSnapshot) {
        *self.snapshot.lock().unwrap() = snapshot;
    }

    pub fn reject_credential(&self) {
        *self.unauthorized.lock().unwrap() = true;
    }

    pub fn go_down(&self) {
        *self.unavailable.lock().unwrap() = true;
    }

    pub fn get_call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl StatsRepository for MockStatsRepository {
    async fn get_stats(&self) -> AdminApiResult<StatsSnapshot> {
        *self.calls.lock().unwrap() += 1;
        if *self.unauthorized.lock().unwrap() {
            return Err(AdminApiError::Unauthorized);
        }
        if *self.unavailable.lock().unwrap() {
            return Err(AdminApiError::ApiError {
                status: 503,
                message: "Service Unavailable".to_string(),
            });
        }
        Ok(self.snapshot.lock().unwrap().clone())
    }
}
