//! Ordered subscriber registry and synchronous broadcast.
//!
//! The registry is the reusable core of every publisher: it keeps an ordered
//! list of weak references to subscribers and drives `update` calls on them.
//!
//! ## Rules
//! - **Order**: subscribers are notified in registration order.
//! - **Duplicates**: attaching the same subscriber twice yields two entries
//!   and two `update` calls per broadcast.
//! - **Identity**: detach matches by allocation, never by value equality.
//! - **Ownership**: entries are `Weak`; a subscriber dropped by its owner is
//!   skipped during broadcasts until [`prune`](SubscriberRegistry::prune) removes it.
//! - **No mutation mid-broadcast**: `notify` borrows `&self` while
//!   `attach`/`detach` need `&mut self`, so a subscriber cannot alter
//!   membership of the registry that is currently notifying it.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, debug_span, trace, warn};

use crate::config::{DeliveryPolicy, RegistryConfig};
use crate::error::{DeliveryError, ObserveResult, RegistryError};
use crate::report::{DeliveryFailure, NotifyReport};
use crate::subscriber::{Subscriber, SubscriberRef};

struct Entry<P: ?Sized> {
    handle: Weak<RefCell<dyn Subscriber<P>>>,
}

impl<P: ?Sized> Entry<P> {
    fn points_at(&self, subscriber: &SubscriberRef<P>) -> bool {
        self.handle.as_ptr().cast::<()>() == Rc::as_ptr(subscriber).cast::<()>()
    }

    fn is_live(&self) -> bool {
        self.handle.strong_count() > 0
    }
}

/// Ordered, non-owning collection of subscribers to a publisher of type `P`.
pub struct SubscriberRegistry<P: ?Sized> {
    cfg: RegistryConfig,
    entries: Vec<Entry<P>>,
}

impl<P: ?Sized> SubscriberRegistry<P> {
    /// Empty registry with the default config.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Empty registry with an explicit config.
    #[must_use]
    pub fn with_config(cfg: RegistryConfig) -> Self {
        Self {
            cfg,
            entries: Vec::new(),
        }
    }

    /// The active config.
    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.cfg
    }

    /// Append a subscriber. Duplicates are allowed.
    pub fn attach<S>(&mut self, subscriber: &Rc<RefCell<S>>)
    where
        S: Subscriber<P> + 'static,
    {
        let handle: SubscriberRef<P> = subscriber.clone();
        self.attach_handle(&handle);
    }

    /// Append an already type-erased subscriber handle.
    pub fn attach_handle(&mut self, subscriber: &SubscriberRef<P>) {
        self.entries.push(Entry {
            handle: Rc::downgrade(subscriber),
        });
        debug!(
            subscriber = %display_name(subscriber),
            registered = self.entries.len(),
            "subscriber attached"
        );
    }

    /// Remove the first entry for `subscriber`.
    ///
    /// # Errors
    /// Returns [`RegistryError::SubscriberNotFound`] if the subscriber is not
    /// registered; the registry is left unchanged.
    pub fn detach<S>(&mut self, subscriber: &Rc<RefCell<S>>) -> ObserveResult<()>
    where
        S: Subscriber<P> + 'static,
    {
        let handle: SubscriberRef<P> = subscriber.clone();
        self.detach_handle(&handle)
    }

    /// Remove the first entry for a type-erased handle.
    ///
    /// # Errors
    /// Returns [`RegistryError::SubscriberNotFound`] if the subscriber is not registered.
    pub fn detach_handle(&mut self, subscriber: &SubscriberRef<P>) -> ObserveResult<()> {
        let Some(position) = self.entries.iter().position(|e| e.points_at(subscriber)) else {
            return Err(RegistryError::SubscriberNotFound {
                subscriber: display_name(subscriber),
            }
            .into());
        };

        self.entries.remove(position);
        debug!(
            subscriber = %display_name(subscriber),
            position,
            registered = self.entries.len(),
            "subscriber detached"
        );
        Ok(())
    }

    /// Remove every entry for `subscriber`, returning how many were removed.
    pub fn detach_all<S>(&mut self, subscriber: &Rc<RefCell<S>>) -> usize
    where
        S: Subscriber<P> + 'static,
    {
        let handle: SubscriberRef<P> = subscriber.clone();
        let before = self.entries.len();
        self.entries.retain(|e| !e.points_at(&handle));
        let removed = before - self.entries.len();
        if removed > 0 {
            debug!(subscriber = %display_name(&handle), removed, "subscriber detached from all positions");
        }
        removed
    }

    /// Returns true if `subscriber` has at least one entry.
    #[must_use]
    pub fn contains<S>(&self, subscriber: &Rc<RefCell<S>>) -> bool
    where
        S: Subscriber<P> + 'static,
    {
        self.occurrences(subscriber) > 0
    }

    /// Number of entries pointing at `subscriber`.
    #[must_use]
    pub fn occurrences<S>(&self, subscriber: &Rc<RefCell<S>>) -> usize
    where
        S: Subscriber<P> + 'static,
    {
        let handle: SubscriberRef<P> = subscriber.clone();
        self.entries.iter().filter(|e| e.points_at(&handle)).count()
    }

    /// Number of entries, including ones whose subscriber was dropped.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries whose subscriber is still alive.
    #[must_use]
    pub fn live_len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_live()).count()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop entries whose subscriber no longer exists. Returns how many were removed.
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(Entry::is_live);
        let removed = before - self.entries.len();
        if removed > 0 {
            debug!(removed, registered = self.entries.len(), "pruned dropped subscribers");
        }
        removed
    }

    /// Call `update` on every live entry, in registration order.
    ///
    /// # Errors
    /// - [`DeliveryPolicy::FailFast`]: the first [`DeliveryError::UpdateFailed`] or
    ///   [`DeliveryError::SubscriberBusy`]; later entries are not notified.
    /// - [`DeliveryPolicy::CollectAndContinue`]: [`DeliveryError::Partial`] after
    ///   every entry was attempted, if any failed.
    pub fn notify(&self, publisher: &P) -> ObserveResult<NotifyReport> {
        let mut report = NotifyReport::begin();
        let span = debug_span!(
            "broadcast",
            broadcast_id = %report.broadcast_id,
            registered = self.entries.len()
        );
        let _guard = span.enter();

        let mut failures = Vec::new();

        for (position, entry) in self.entries.iter().enumerate() {
            let Some(subscriber) = entry.handle.upgrade() else {
                trace!(position, "skipping dropped subscriber");
                report.skipped += 1;
                continue;
            };

            match deliver(&subscriber, position, publisher) {
                Ok(()) => {
                    trace!(position, "delivered");
                    report.delivered += 1;
                }
                Err(err) => {
                    warn!(position, error = %err, "delivery failed");
                    match self.cfg.delivery {
                        DeliveryPolicy::FailFast => return Err(err.into()),
                        DeliveryPolicy::CollectAndContinue => failures.push(failure_record(position, err)),
                    }
                }
            }
        }

        if !failures.is_empty() {
            return Err(DeliveryError::Partial {
                delivered: report.delivered,
                failures,
            }
            .into());
        }

        debug!(delivered = report.delivered, skipped = report.skipped, "broadcast complete");
        Ok(report)
    }
}

impl<P: ?Sized> Default for SubscriberRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ?Sized> fmt::Debug for SubscriberRegistry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberRegistry")
            .field("cfg", &self.cfg)
            .field("len", &self.entries.len())
            .field("live", &self.live_len())
            .finish()
    }
}

fn deliver<P: ?Sized>(
    subscriber: &SubscriberRef<P>,
    position: usize,
    publisher: &P,
) -> Result<(), DeliveryError> {
    let Ok(mut sub) = subscriber.try_borrow_mut() else {
        return Err(DeliveryError::SubscriberBusy { position });
    };

    sub.update(publisher).map_err(|source| DeliveryError::UpdateFailed {
        subscriber: sub.name().to_string(),
        position,
        source,
    })
}

fn failure_record(position: usize, err: DeliveryError) -> DeliveryFailure {
    let subscriber = match &err {
        DeliveryError::UpdateFailed { subscriber, .. } => subscriber.clone(),
        DeliveryError::SubscriberBusy { .. } | DeliveryError::Partial { .. } => "<borrowed>".to_string(),
    };
    let reason = match err {
        DeliveryError::UpdateFailed { source, .. } => source.reason().to_string(),
        other => other.to_string(),
    };
    DeliveryFailure {
        position,
        subscriber,
        reason,
    }
}

// A subscriber that is mutably borrowed elsewhere cannot report its name.
fn display_name<P: ?Sized>(subscriber: &SubscriberRef<P>) -> String {
    subscriber
        .try_borrow()
        .map_or_else(|_| "<borrowed>".to_string(), |s| s.name().to_string())
}
