//! Matching engine for the loadboard system.
//!
//! Owns the shipment lifecycle state machine, bid admission and
//! acceptance, and truck availability consistency. Everything else in the
//! workspace is plumbing around this crate: storage is the gateway it
//! writes through, the service crate is a thin HTTP surface over its
//! operations.
//!
//! The engine never logs. It publishes typed [`loadboard_types::MarketEvent`]s
//! on a broadcast bus and leaves presentation to its callers.

mod batch;
mod locks;

pub mod engine;
pub mod error;
pub mod lifecycle;

pub use engine::MatchingEngine;
pub use error::EngineError;
