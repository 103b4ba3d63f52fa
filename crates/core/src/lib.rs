//! Shared foundation for the Beacon tracking SDK — event record types,
//! configuration, error handling, the client-context seam, and the
//! user-agent classification heuristics.

pub mod classify;
pub mod config;
pub mod context;
pub mod error;
pub mod types;

pub use config::TrackerConfig;
pub use error::{BeaconError, BeaconResult};
