//! Dashboard statistics snapshot.

use serde::{Deserialize, Serialize};

/// Response of `GET /stats`. Every field is optional on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsSnapshot {
    pub phone_numbers: Option<PhoneNumberStats>,
    pub summary: Option<StatsSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PhoneNumberStats {
    pub active: Option<u64>,
    pub inactive: Option<u64>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsSummary {
    pub total_transcriptions: Option<u64>,
    pub total_sms_sent: Option<u64>,
    pub total_extensions: Option<u64>,
}
