//! Company notice board: a worked example of the publisher/subscriber pair.
//!
//! [`StaffNotify`] publishes a piece of company information; every [`Staff`]
//! member attached to it keeps a copy of the latest notice.

use std::fmt;

use crate::config::RegistryConfig;
use crate::error::ObserveResult;
use crate::publisher::Publisher;
use crate::registry::SubscriberRegistry;
use crate::report::NotifyReport;
use crate::subscriber::{Subscriber, UpdateError};

/// Publisher of company information.
pub struct StaffNotify {
    info: Option<String>,
    staff: SubscriberRegistry<StaffNotify>,
}

impl StaffNotify {
    /// Notice board holding `info`. Nobody is notified of the initial value.
    #[must_use]
    pub fn new(info: Option<String>) -> Self {
        Self::with_config(info, RegistryConfig::default())
    }

    /// Notice board with an explicit registry config.
    #[must_use]
    pub fn with_config(info: Option<String>, cfg: RegistryConfig) -> Self {
        Self {
            info,
            staff: SubscriberRegistry::with_config(cfg),
        }
    }

    /// The current notice.
    #[must_use]
    pub fn company_info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    /// Post a new notice and push it to every attached staff member.
    ///
    /// # Errors
    /// Returns the broadcast's delivery error.
    pub fn set_company_info(&mut self, info: impl Into<String>) -> ObserveResult<NotifyReport> {
        self.info = Some(info.into());
        self.publish()
    }
}

impl Publisher for StaffNotify {
    fn registry(&self) -> &SubscriberRegistry<Self> {
        &self.staff
    }

    fn registry_mut(&mut self) -> &mut SubscriberRegistry<Self> {
        &mut self.staff
    }
}

impl fmt::Debug for StaffNotify {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaffNotify")
            .field("info", &self.info)
            .field("staff", &self.staff)
            .finish()
    }
}

/// A staff member caching the last notice they received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Staff {
    name: Option<String>,
    info: Option<String>,
}

impl Staff {
    /// Anonymous staff member with no notice yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Named staff member; the name shows up in logs and delivery errors.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            info: None,
        }
    }

    /// Last notice received, if any.
    #[must_use]
    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }
}

impl Subscriber<StaffNotify> for Staff {
    fn update(&mut self, notice: &StaffNotify) -> Result<(), UpdateError> {
        self.info = notice.company_info().map(str::to_owned);
        Ok(())
    }

    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("staff")
    }
}
