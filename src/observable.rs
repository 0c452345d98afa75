//! A generic publisher of a single value.
//!
//! Every mutation goes through a setter that stores the new value and then
//! unconditionally notifies. There is no batching and no change detection:
//! setting the same value twice broadcasts twice.

use std::fmt;

use crate::config::RegistryConfig;
use crate::error::ObserveResult;
use crate::publisher::Publisher;
use crate::registry::SubscriberRegistry;
use crate::report::NotifyReport;

/// Publisher owning one observable value of type `T`.
pub struct Observable<T> {
    value: T,
    subscribers: SubscriberRegistry<Observable<T>>,
}

impl<T> Observable<T> {
    /// Wrap `value` with an empty registry.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self::with_config(value, RegistryConfig::default())
    }

    /// Wrap `value` with an empty registry using `cfg`.
    #[must_use]
    pub fn with_config(value: T, cfg: RegistryConfig) -> Self {
        Self {
            value,
            subscribers: SubscriberRegistry::with_config(cfg),
        }
    }

    /// The current value.
    #[must_use]
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Store `value`, then notify.
    ///
    /// The value is stored even if the broadcast fails.
    ///
    /// # Errors
    /// Returns the broadcast's delivery error.
    pub fn set(&mut self, value: T) -> ObserveResult<NotifyReport> {
        self.value = value;
        self.publish()
    }

    /// Store `value`, notify, and hand back the previous value.
    ///
    /// # Errors
    /// Returns the broadcast's delivery error; the previous value is lost in that case.
    pub fn replace(&mut self, value: T) -> ObserveResult<T> {
        let previous = std::mem::replace(&mut self.value, value);
        self.publish()?;
        Ok(previous)
    }

    /// Mutate the value in place, then notify.
    ///
    /// # Errors
    /// Returns the broadcast's delivery error.
    pub fn update_with<F>(&mut self, f: F) -> ObserveResult<NotifyReport>
    where
        F: FnOnce(&mut T),
    {
        f(&mut self.value);
        self.publish()
    }

    /// Consume the publisher, returning the value. Subscribers are not notified.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> Publisher for Observable<T> {
    fn registry(&self) -> &SubscriberRegistry<Self> {
        &self.subscribers
    }

    fn registry_mut(&mut self) -> &mut SubscriberRegistry<Self> {
        &mut self.subscribers
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("subscribers", &self.subscribers)
            .finish()
    }
}
