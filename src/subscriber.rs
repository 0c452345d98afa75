//! The subscriber capability.
//!
//! A [`Subscriber`] is anything that wants to hear about changes to a
//! publisher of type `P`. During a broadcast it receives a shared reference
//! to the publisher, valid only for the duration of the call, and pulls
//! whatever state it needs from it.
//!
//! ## Example
//! ```
//! use observe::{Observable, Publisher, Subscriber, UpdateError};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! #[derive(Default)]
//! struct LastSeen(Option<u32>);
//!
//! impl Subscriber<Observable<u32>> for LastSeen {
//!     fn update(&mut self, publisher: &Observable<u32>) -> Result<(), UpdateError> {
//!         self.0 = Some(*publisher.get());
//!         Ok(())
//!     }
//! }
//!
//! let mut counter = Observable::new(0_u32);
//! let seen = Rc::new(RefCell::new(LastSeen::default()));
//! counter.attach(&seen);
//! counter.set(7).unwrap();
//! assert_eq!(seen.borrow().0, Some(7));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

/// Error returned by a subscriber that could not apply a notification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct UpdateError {
    reason: String,
}

impl UpdateError {
    /// Creates an update error with a human-readable reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The reason given by the subscriber.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Contract for entities notified by a publisher of type `P`.
pub trait Subscriber<P: ?Sized> {
    /// Apply a change notification.
    ///
    /// # Parameters
    /// - `publisher`: the publisher that changed; read its current state here.
    ///
    /// # Errors
    /// Returns [`UpdateError`] when the subscriber cannot apply the change. How
    /// the broadcast reacts is decided by [`DeliveryPolicy`](crate::DeliveryPolicy).
    fn update(&mut self, publisher: &P) -> Result<(), UpdateError>;

    /// Human-readable name (for logs and errors).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Caller-owned handle to a subscriber.
///
/// Registries hold only weak references to these; dropping the last handle
/// ends delivery to that subscriber.
pub type SubscriberRef<P> = Rc<RefCell<dyn Subscriber<P>>>;

#[cfg(test)]
mod tests {
    use super::*;

    struct Named;

    impl Subscriber<()> for Named {
        fn update(&mut self, _publisher: &()) -> Result<(), UpdateError> {
            Ok(())
        }

        fn name(&self) -> &str {
            "named"
        }
    }

    struct Anonymous;

    impl Subscriber<()> for Anonymous {
        fn update(&mut self, _publisher: &()) -> Result<(), UpdateError> {
            Err(UpdateError::new("rejected"))
        }
    }

    #[test]
    fn test_default_name_is_type_name() {
        assert!(Anonymous.name().ends_with("Anonymous"));
        assert_eq!(Named.name(), "named");
    }

    #[test]
    fn test_update_error_reason() {
        let err = Anonymous.update(&()).unwrap_err();
        assert_eq!(err.reason(), "rejected");
        assert_eq!(format!("{err}"), "rejected");
    }

    #[test]
    fn test_subscriber_ref_coerces_from_concrete() {
        let concrete = Rc::new(RefCell::new(Named));
        let handle: SubscriberRef<()> = concrete.clone();
        assert!(handle.borrow_mut().update(&()).is_ok());
        assert_eq!(Rc::strong_count(&concrete), 2);
    }
}
