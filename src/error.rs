//! Error types for observe.
//!
//! All errors are strongly typed using thiserror so callers can pattern
//! match on the failing condition instead of parsing messages.
//!
//! Subscriber conformance is not represented here: only types implementing
//! [`Subscriber`](crate::Subscriber) can be attached, so a non-conforming
//! subscriber is rejected by the compiler rather than at call time.

use thiserror::Error;

use crate::report::DeliveryFailure;
use crate::subscriber::UpdateError;

/// Errors raised by registry membership operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Subscriber not found in registry: {subscriber}")]
    SubscriberNotFound {
        subscriber: String,
    },
}

/// Errors raised while broadcasting to subscribers.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Subscriber '{subscriber}' at position {position} failed to update: {source}")]
    UpdateFailed {
        subscriber: String,
        position: usize,
        #[source]
        source: UpdateError,
    },

    #[error("Subscriber at position {position} is already borrowed (re-entrant notification)")]
    SubscriberBusy {
        position: usize,
    },

    #[error("Broadcast partially delivered: {delivered} ok, {} failed", .failures.len())]
    Partial {
        delivered: usize,
        failures: Vec<DeliveryFailure>,
    },
}

/// Errors loading a [`RegistryConfig`](crate::RegistryConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top-level error type for observe.
#[derive(Debug, Error)]
pub enum ObserveError {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl ObserveError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if a detach targeted a subscriber that was not registered.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Registry(RegistryError::SubscriberNotFound { .. }))
    }

    /// Returns true if this is a delivery error.
    #[must_use]
    pub const fn is_delivery(&self) -> bool {
        matches!(self, Self::Delivery(_))
    }

    /// Returns true if this is a config error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if this is an internal error.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }
}

/// Result type alias for observe operations.
pub type ObserveResult<T> = Result<T, ObserveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_not_found() {
        let err = RegistryError::SubscriberNotFound {
            subscriber: "Staff".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("not found"));
        assert!(msg.contains("Staff"));
    }

    #[test]
    fn test_delivery_error_update_failed_keeps_source() {
        let err = DeliveryError::UpdateFailed {
            subscriber: "audit".to_string(),
            position: 2,
            source: UpdateError::new("disk full"),
        };
        let msg = format!("{err}");
        assert!(msg.contains("audit"));
        assert!(msg.contains("position 2"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_delivery_error_partial_counts() {
        let err = DeliveryError::Partial {
            delivered: 3,
            failures: vec![DeliveryFailure {
                position: 1,
                subscriber: "s".to_string(),
                reason: "boom".to_string(),
            }],
        };
        let msg = format!("{err}");
        assert!(msg.contains("3 ok"));
        assert!(msg.contains("1 failed"));
    }

    #[test]
    fn test_observe_error_from_registry() {
        let err: ObserveError = RegistryError::SubscriberNotFound {
            subscriber: "x".to_string(),
        }
        .into();
        assert!(err.is_not_found());
        assert!(!err.is_delivery());
    }

    #[test]
    fn test_observe_error_from_delivery() {
        let err: ObserveError = DeliveryError::SubscriberBusy { position: 0 }.into();
        assert!(err.is_delivery());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_observe_error_from_config() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ObserveError = ConfigError::from(parse).into();
        assert!(err.is_config());
    }

    #[test]
    fn test_observe_error_internal() {
        let err = ObserveError::internal("unexpected state");
        assert!(err.is_internal());
        assert!(format!("{err}").contains("unexpected state"));
    }
}
