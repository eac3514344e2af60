use crate::client::AsyncAdminClient;
use crate::error::AdminApiResult;
use crate::models::StatsSnapshot;
use crate::repositories::traits::StatsRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Stats repository backed by the admin API client.
pub struct AdminStatsRepository {
    client: Arc<dyn AsyncAdminClient>,
}

impl AdminStatsRepository {
    pub fn new(client: Arc<dyn AsyncAdminClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StatsRepository for AdminStatsRepository {
    async fn get_stats(&self) -> AdminApiResult<StatsSnapshot> {
        self.client.get_stats().await
    }
}
