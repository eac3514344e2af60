//! In-process counters for the admin console.
//!
//! One [`Metrics`] value is shared by the auth gate, the HTTP client and the
//! submission coordinator. Clones point at the same counters.

use crate::submission::SubmissionPath;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Default)]
struct Counters {
    requests: AtomicU64,
    failed_requests: AtomicU64,
    request_time_ms: AtomicU64,
    unauthorized: AtomicU64,
    entries_listed: AtomicU64,
    empty_submissions: AtomicU64,
    single_submissions: AtomicU64,
    bulk_submissions: AtomicU64,
    entries_sent: AtomicU64,
}

/// Backend traffic, rejected credentials and submissions by path.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    counters: Arc<Counters>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one backend round trip.
    pub fn record_request(&self, elapsed: Duration, failed: bool) {
        let c = &self.counters;
        c.requests.fetch_add(1, Ordering::Relaxed);
        c.request_time_ms
            .fetch_add(elapsed.as_millis() as u64, Ordering::Relaxed);
        if failed {
            c.failed_requests.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Count a 401 on a signed request.
    pub fn record_unauthorized(&self) {
        self.counters.unauthorized.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_entries_listed(&self, count: usize) {
        self.counters
            .entries_listed
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Count one pass through the coordinator and the entries it sent.
    pub fn record_submission(&self, path: SubmissionPath, sent: usize) {
        self.path_counter(path).fetch_add(1, Ordering::Relaxed);
        self.counters
            .entries_sent
            .fetch_add(sent as u64, Ordering::Relaxed);
    }

    fn path_counter(&self, path: SubmissionPath) -> &AtomicU64 {
        match path {
            SubmissionPath::Empty => &self.counters.empty_submissions,
            SubmissionPath::Single => &self.counters.single_submissions,
            SubmissionPath::Bulk => &self.counters.bulk_submissions,
        }
    }

    pub fn requests_total(&self) -> u64 {
        self.counters.requests.load(Ordering::Relaxed)
    }

    pub fn failed_requests_total(&self) -> u64 {
        self.counters.failed_requests.load(Ordering::Relaxed)
    }

    pub fn unauthorized_total(&self) -> u64 {
        self.counters.unauthorized.load(Ordering::Relaxed)
    }

    pub fn entries_listed_total(&self) -> u64 {
        self.counters.entries_listed.load(Ordering::Relaxed)
    }

    /// Submissions that took `path`.
    pub fn submissions(&self, path: SubmissionPath) -> u64 {
        self.path_counter(path).load(Ordering::Relaxed)
    }

    pub fn entries_sent_total(&self) -> u64 {
        self.counters.entries_sent.load(Ordering::Relaxed)
    }

    /// Mean round-trip time, 0 before the first request.
    pub fn average_request_ms(&self) -> f64 {
        let requests = self.requests_total();
        if requests == 0 {
            return 0.0;
        }
        self.counters.request_time_ms.load(Ordering::Relaxed) as f64 / requests as f64
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            requests: self.requests_total(),
            failed_requests: self.failed_requests_total(),
            average_request_ms: self.average_request_ms(),
            unauthorized: self.unauthorized_total(),
            entries_listed: self.entries_listed_total(),
            empty_submissions: self.submissions(SubmissionPath::Empty),
            single_submissions: self.submissions(SubmissionPath::Single),
            bulk_submissions: self.submissions(SubmissionPath::Bulk),
            entries_sent: self.entries_sent_total(),
        }
    }
}

/// Point-in-time copy of the counters, logged at shutdown.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub requests: u64,
    pub failed_requests: u64,
    pub average_request_ms: f64,
    pub unauthorized: u64,
    pub entries_listed: u64,
    pub empty_submissions: u64,
    pub single_submissions: u64,
    pub bulk_submissions: u64,
    pub entries_sent: u64,
}

impl fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "requests: {} ({} failed, avg {:.1} ms), rejected credentials: {}, \
             submissions: {} single / {} bulk / {} empty, numbers sent: {}, numbers listed: {}",
            self.requests,
            self.failed_requests,
            self.average_request_ms,
            self.unauthorized,
            self.single_submissions,
            self.bulk_submissions,
            self.empty_submissions,
            self.entries_sent,
            self.entries_listed
        )
    }
}
