//! Beacon SDK — client interaction tracking: observes click, view, and
//! search interactions, enriches them with user/device/page context, and
//! forwards each one as a JSON payload to a collection endpoint.
//!
//! # Modules
//!
//! - [`identity`] — Anonymous identifier resolution and persistence
//! - [`source`] — Interaction-dispatch seam and the simulated page source
//! - [`tracker`] — Caller-owned event tracker (binding + record assembly)
//! - [`dispatch`] — Fire-and-forget delivery to the collection endpoint

pub mod dispatch;
pub mod identity;
pub mod source;
pub mod tracker;

pub use dispatch::{CaptureDispatcher, Dispatcher, HttpDispatcher};
pub use source::{InteractionHandler, InteractionSource, SimulatedPage};
pub use tracker::EventTracker;
