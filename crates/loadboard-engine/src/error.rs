//! Engine error taxonomy.
//!
//! Every variant is recoverable by the caller: retry, correct the input,
//! or re-fetch state. None is fatal to the process.

use loadboard_storage::StorageError;
use loadboard_types::ShipmentStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
	/// The named entity id is unknown.
	#[error("{0} not found")]
	NotFound(&'static str),

	/// The caller is not the owning shipper/driver and not an admin.
	#[error("Forbidden")]
	Forbidden,

	/// The requested status change is not a legal lifecycle transition.
	#[error("Invalid transition: {from} -> {to}")]
	InvalidTransition {
		from: ShipmentStatus,
		to: ShipmentStatus,
	},

	/// The shipment is no longer accepting bids or acceptance.
	#[error("Shipment is not open")]
	ShipmentNotOpen,

	/// The bid has already been accepted or rejected.
	#[error("Bid is not pending")]
	BidNotPending,

	/// The truck is inactive, busy, or in maintenance.
	#[error("Truck unavailable")]
	TruckUnavailable,

	/// Concurrent write conflict; the caller should retry.
	#[error("Contention on a concurrent write, retry")]
	Contention,

	/// Malformed input fields.
	#[error("Validation error: {0}")]
	Validation(String),

	/// Persistence gateway failure.
	#[error("Storage error: {0}")]
	Storage(#[from] StorageError),
}
