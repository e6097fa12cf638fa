//! Shared domain types for the loadboard matching system.
//!
//! Every crate in the workspace speaks in terms of these types: typed ids,
//! the authenticated session, shipments, trucks, bids, and the domain
//! events the engine publishes.

pub mod auth;
pub mod bid;
pub mod common;
pub mod events;
pub mod shipment;
pub mod stats;
pub mod truck;

pub use auth::*;
pub use bid::*;
pub use common::*;
pub use events::*;
pub use shipment::*;
pub use stats::*;
pub use truck::*;
