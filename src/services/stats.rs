//! Dashboard stats service.

use crate::error::AdminApiResult;
use crate::models::StatsSnapshot;
use crate::repositories::StatsRepository;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// The four dashboard cards; values missing from the backend read as zero.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub active_numbers: u64,
    pub transcriptions: u64,
    pub sms_sent: u64,
    pub extensions: u64,
}

impl From<&StatsSnapshot> for DashboardStats {
    fn from(snapshot: &StatsSnapshot) -> Self {
        let summary = snapshot.summary.clone().unwrap_or_default();
        Self {
            active_numbers: snapshot
                .phone_numbers
                .as_ref()
                .and_then(|p| p.active)
                .unwrap_or(0),
            transcriptions: summary.total_transcriptions.unwrap_or(0),
            sms_sent: summary.total_sms_sent.unwrap_or(0),
            extensions: summary.total_extensions.unwrap_or(0),
        }
    }
}

#[async_trait]
pub trait StatsService: Send + Sync {
    /// Current dashboard values, or `None` when they could not be loaded.
    ///
    /// Only `AdminApiError::Unauthorized` is returned as an error.
    async fn load(&self) -> AdminApiResult<Option<DashboardStats>>;
}

pub struct StatsServiceImpl {
    repository: Arc<dyn StatsRepository>,
}

impl StatsServiceImpl {
    pub fn new(repository: Arc<dyn StatsRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl StatsService for StatsServiceImpl {
    async fn load(&self) -> AdminApiResult<Option<DashboardStats>> {
        match self.repository.get_stats().await {
            Ok(snapshot) => Ok(Some(DashboardStats::from(&snapshot))),
            Err(e) if e.is_auth_error() => Err(e),
            Err(e) => {
                tracing::error!("Failed to load stats: {}", e);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PhoneNumberStats, StatsSummary};

    #[test]
    fn test_dashboard_defaults_to_zero() {
        assert_eq!(
            DashboardStats::from(&StatsSnapshot::default()),
            DashboardStats::default()
        );
    }

    #[test]
    fn test_dashboard_from_snapshot() {
        let snapshot = StatsSnapshot {
            phone_numbers: Some(PhoneNumberStats {
                active: Some(7),
                ..Default::default()
            }),
            summary: Some(StatsSummary {
                total_transcriptions: Some(40),
                total_sms_sent: Some(39),
                total_extensions: None,
            }),
        };
        let stats = DashboardStats::from(&snapshot);
        assert_eq!(stats.active_numbers, 7);
        assert_eq!(stats.transcriptions, 40);
        assert_eq!(stats.sms_sent, 39);
        assert_eq!(stats.extensions, 0);
    }
}
