//! Bid types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::auth::PrincipalId;
use crate::common::Id;
use crate::shipment::ShipmentId;
use crate::truck::TruckId;

pub type BidId = Id<ShipmentBid>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BidStatus {
	Pending,
	Accepted,
	Rejected,
}

impl fmt::Display for BidStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			BidStatus::Pending => "pending",
			BidStatus::Accepted => "accepted",
			BidStatus::Rejected => "rejected",
		};
		write!(f, "{}", s)
	}
}

/// An offer by a truck owner to haul a shipment at a stated price.
///
/// Many bids may be pending per open shipment; at most one ever reaches
/// `accepted`, and acceptance rejects all siblings atomically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentBid {
	pub id: BidId,
	pub shipment_id: ShipmentId,
	pub truck_owner_id: PrincipalId,
	pub truck_id: TruckId,
	pub bid_amount: Decimal,
	pub status: BidStatus,
	pub notes: Option<String>,
	pub created_at: DateTime<Utc>,
}
