//! The publisher side of the contract.
//!
//! Any type that owns a [`SubscriberRegistry<Self>`] can implement
//! [`Publisher`] by exposing it; attach/detach/notify then come for free and
//! subscribers receive `&Self` during a broadcast.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ObserveResult;
use crate::registry::SubscriberRegistry;
use crate::report::NotifyReport;
use crate::subscriber::Subscriber;

/// Contract for types that broadcast their own changes.
pub trait Publisher: Sized {
    /// The registry of subscribers to this publisher.
    fn registry(&self) -> &SubscriberRegistry<Self>;

    /// Mutable access to the registry.
    fn registry_mut(&mut self) -> &mut SubscriberRegistry<Self>;

    /// Register `subscriber`. Attaching twice means two notifications per broadcast.
    fn attach<S>(&mut self, subscriber: &Rc<RefCell<S>>)
    where
        S: Subscriber<Self> + 'static,
    {
        self.registry_mut().attach(subscriber);
    }

    /// Deregister the first occurrence of `subscriber`.
    ///
    /// # Errors
    /// Returns a not-found registry error if `subscriber` is not registered.
    fn detach<S>(&mut self, subscriber: &Rc<RefCell<S>>) -> ObserveResult<()>
    where
        S: Subscriber<Self> + 'static,
    {
        self.registry_mut().detach(subscriber)
    }

    /// Broadcast the current state to every registered subscriber.
    ///
    /// # Errors
    /// Returns a delivery error according to the registry's
    /// [`DeliveryPolicy`](crate::DeliveryPolicy).
    fn notify(&self) -> ObserveResult<NotifyReport> {
        self.registry().notify(self)
    }

    /// Number of registry entries (duplicates counted).
    fn subscriber_count(&self) -> usize {
        self.registry().len()
    }

    /// Prune dropped subscribers if the registry is configured to, then notify.
    ///
    /// Value mutators call this after changing state.
    ///
    /// # Errors
    /// Same as [`notify`](Self::notify).
    fn publish(&mut self) -> ObserveResult<NotifyReport> {
        if self.registry().config().prune_on_notify {
            self.registry_mut().prune();
        }
        self.notify()
    }
}
