//! Broadcast identifiers and delivery reports.
//!
//! Every call to `notify` is tagged with a [`BroadcastId`] so that log lines
//! emitted by the registry and by subscribers can be correlated.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BroadcastId(Uuid);

impl BroadcastId {
    /// Create a new random broadcast id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BroadcastId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BroadcastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of a broadcast in which every attempted subscriber succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotifyReport {
    /// Correlation id for this broadcast.
    pub broadcast_id: BroadcastId,
    /// When the broadcast started.
    pub started_at: DateTime<Utc>,
    /// Number of `update` calls that returned successfully.
    pub delivered: usize,
    /// Registry entries skipped because their subscriber had been dropped.
    pub skipped: usize,
}

impl NotifyReport {
    pub(crate) fn begin() -> Self {
        Self {
            broadcast_id: BroadcastId::new(),
            started_at: Utc::now(),
            delivered: 0,
            skipped: 0,
        }
    }
}

/// One failed delivery collected under
/// [`DeliveryPolicy::CollectAndContinue`](crate::DeliveryPolicy::CollectAndContinue).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryFailure {
    /// Registry position of the failing entry.
    pub position: usize,
    /// Subscriber name, as reported by [`Subscriber::name`](crate::Subscriber::name).
    pub subscriber: String,
    /// Failure reason.
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_ids_are_unique() {
        assert_ne!(BroadcastId::new(), BroadcastId::new());
    }

    #[test]
    fn broadcast_id_serializes_as_plain_uuid() {
        let uuid = Uuid::new_v4();
        let id = BroadcastId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));
        assert_eq!(id.to_string(), uuid.to_string());
    }

    #[test]
    fn fresh_report_is_empty() {
        let before = Utc::now();
        let report = NotifyReport::begin();
        assert_eq!(report.delivered, 0);
        assert_eq!(report.skipped, 0);
        assert!(report.started_at >= before);
    }
}
