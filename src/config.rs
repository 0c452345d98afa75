//! Registry configuration.
//!
//! The defaults reproduce plain list semantics: the first failing subscriber
//! aborts the broadcast and dropped subscribers are skipped but kept.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ObserveResult};

/// What a broadcast does when a subscriber's `update` fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryPolicy {
    /// Return the first failure; later subscribers are not notified.
    #[default]
    FailFast,
    /// Notify every subscriber, then report all failures together.
    CollectAndContinue,
}

/// Behavior of a [`SubscriberRegistry`](crate::SubscriberRegistry).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Failure handling during a broadcast.
    pub delivery: DeliveryPolicy,
    /// Drop entries whose subscriber is gone before each mutation-triggered broadcast.
    pub prune_on_notify: bool,
}

impl RegistryConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns a config error if the JSON is malformed.
    pub fn from_json_str(json: &str) -> ObserveResult<Self> {
        let cfg = serde_json::from_str(json).map_err(ConfigError::from)?;
        Ok(cfg)
    }

    /// Load a JSON config file.
    ///
    /// # Errors
    /// Returns a config error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> ObserveResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Builder-style override of the delivery policy.
    #[must_use]
    pub fn with_delivery(mut self, delivery: DeliveryPolicy) -> Self {
        self.delivery = delivery;
        self
    }

    /// Builder-style override of dead-entry pruning.
    #[must_use]
    pub fn with_prune_on_notify(mut self, prune: bool) -> Self {
        self.prune_on_notify = prune;
        self
    }
}
