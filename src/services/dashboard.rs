//! Dashboard service.
//!
//! The landing view shows the stats cards above the phone number list; both
//! are fetched together.

use super::phone_number_list::{PhoneNumberListService, PhoneNumberListing};
use super::stats::{DashboardStats, StatsService};
use crate::error::AdminApiResult;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Dashboard {
    /// `None` when the stats could not be loaded
    pub stats: Option<DashboardStats>,
    pub listing: PhoneNumberListing,
}

pub struct DashboardService {
    stats: Arc<dyn StatsService>,
    list: Arc<dyn PhoneNumberListService>,
}

impl DashboardService {
    pub fn new(stats: Arc<dyn StatsService>, list: Arc<dyn PhoneNumberListService>) -> Self {
        Self { stats, list }
    }

    /// Load stats and listing concurrently.
    ///
    /// Fails only when the backend rejected the credential on either request.
    pub async fn load(&self) -> AdminApiResult<Dashboard> {
        let (stats, listing) = tokio::join!(self.stats.load(), self.list.load());
        Ok(Dashboard {
            stats: stats?,
            listing: listing?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::phone_number_list::EditDraft;
    use super::*;
    use crate::domain::EntryId;
    use crate::error::AdminApiError;
    use crate::models::PersistedEntry;
    use crate::submission::StatusMessage;
    use async_trait::async_trait;

    struct FixedStats(Option<DashboardStats>);

    #[async_trait]
    impl StatsService for FixedStats {
        async fn load(&self) -> AdminApiResult<Option<DashboardStats>> {
            Ok(self.0)
        }
    }

    struct ExpiredList;

    #[async_trait]
    impl PhoneNumberListService for ExpiredList {
        async fn load(&self) -> AdminApiResult<PhoneNumberListing> {
            Err(AdminApiError::Unauthorized)
        }

        async fn find(&self, _id: &EntryId) -> AdminApiResult<Option<PersistedEntry>> {
            Err(AdminApiError::Unauthorized)
        }

        async fn save_edit(
            &self,
            _id: &EntryId,
            _draft: &EditDraft,
        ) -> AdminApiResult<StatusMessage> {
            Err(AdminApiError::Unauthorized)
        }

        async fn toggle_active(
            &self,
            _id: &EntryId,
            _active: bool,
        ) -> AdminApiResult<StatusMessage> {
            Err(AdminApiError::Unauthorized)
        }

        async fn delete(&self, _id: &EntryId) -> AdminApiResult<StatusMessage> {
            Err(AdminApiError::Unauthorized)
        }
    }

    #[test]
    fn test_listing_auth_failure_fails_the_dashboard() {
        let service = DashboardService::new(
            Arc::new(FixedStats(Some(DashboardStats::default()))),
            Arc::new(ExpiredList),
        );

        let result = tokio_test::block_on(service.load());
        assert!(matches!(result, Err(AdminApiError::Unauthorized)));
    }
}
