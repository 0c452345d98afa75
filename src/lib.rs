//! # observe - change notification for in-process state
//!
//! observe implements the publish-subscribe relationship between one piece of
//! state and the entities that depend on it: when the state changes, every
//! dependent is told, in the order it registered, without the publisher
//! knowing anything about what the dependents are.
//!
//! ## Core Concepts
//!
//! - **Subscriber**: anything implementing [`Subscriber<P>`]; receives `&P` on every change
//! - **SubscriberRegistry**: ordered, non-owning list of subscribers; drives broadcasts
//! - **Publisher**: a type exposing its registry; gains `attach`/`detach`/`notify`
//! - **Observable**: ready-made publisher of a single value
//!
//! ## Usage
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use observe::staff::{Staff, StaffNotify};
//! use observe::Publisher;
//!
//! let mut board = StaffNotify::new(Some("company info".to_string()));
//! let s1 = Rc::new(RefCell::new(Staff::new()));
//! let s2 = Rc::new(RefCell::new(Staff::new()));
//! board.attach(&s1);
//! board.attach(&s2);
//!
//! board.set_company_info("holiday tomorrow")?;
//! assert_eq!(s2.borrow().info(), Some("holiday tomorrow"));
//!
//! board.detach(&s2)?;
//! board.set_company_info("ten days off")?;
//! assert_eq!(s1.borrow().info(), Some("ten days off"));
//! assert_eq!(s2.borrow().info(), Some("holiday tomorrow"));
//! # Ok::<(), observe::ObserveError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod observable;
pub mod publisher;
pub mod registry;
pub mod report;
pub mod staff;
pub mod subscriber;

// Re-export primary types at crate root for convenience
pub use config::{DeliveryPolicy, RegistryConfig};
pub use error::{ConfigError, DeliveryError, ObserveError, ObserveResult, RegistryError};
pub use observable::Observable;
pub use publisher::Publisher;
pub use registry::SubscriberRegistry;
pub use report::{BroadcastId, DeliveryFailure, NotifyReport};
pub use subscriber::{Subscriber, SubscriberRef, UpdateError};
