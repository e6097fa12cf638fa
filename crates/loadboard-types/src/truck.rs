//! Truck and truck availability types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::auth::PrincipalId;
use crate::common::Id;

pub type TruckId = Id<Truck>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TruckType {
	Flatbed,
	Refrigerated,
	Container,
	Tanker,
	Pickup,
}

impl fmt::Display for TruckType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			TruckType::Flatbed => "flatbed",
			TruckType::Refrigerated => "refrigerated",
			TruckType::Container => "container",
			TruckType::Tanker => "tanker",
			TruckType::Pickup => "pickup",
		};
		write!(f, "{}", s)
	}
}

impl FromStr for TruckType {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"flatbed" => Ok(TruckType::Flatbed),
			"refrigerated" => Ok(TruckType::Refrigerated),
			"container" => Ok(TruckType::Container),
			"tanker" => Ok(TruckType::Tanker),
			"pickup" => Ok(TruckType::Pickup),
			other => Err(format!("unknown truck type: {}", other)),
		}
	}
}

/// A vehicle registered by a driver. Owned by exactly one principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Truck {
	pub id: TruckId,
	pub owner_id: PrincipalId,
	/// Unique per owner, enforced at registration.
	pub plate_number: String,
	pub truck_type: TruckType,
	pub capacity_kg: Decimal,
	pub capacity_m3: Option<Decimal>,
	pub year_manufactured: u16,
	pub documents_verified: bool,
	pub insurance_expiry: Option<NaiveDate>,
	pub current_city: String,
	pub active: bool,
}

/// Fields a driver supplies when registering a truck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTruck {
	pub plate_number: String,
	pub truck_type: TruckType,
	pub capacity_kg: Decimal,
	pub capacity_m3: Option<Decimal>,
	pub year_manufactured: u16,
	pub insurance_expiry: Option<NaiveDate>,
	pub current_city: String,
}

/// Whether a truck can take on new work.
///
/// `busy` holds exactly while the truck is bound to one non-terminal
/// shipment; delivery or cancellation reverts it to `available`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
	Available,
	Busy,
	Maintenance,
}

impl fmt::Display for AvailabilityStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			AvailabilityStatus::Available => "available",
			AvailabilityStatus::Busy => "busy",
			AvailabilityStatus::Maintenance => "maintenance",
		};
		write!(f, "{}", s)
	}
}

impl FromStr for AvailabilityStatus {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"available" => Ok(AvailabilityStatus::Available),
			"busy" => Ok(AvailabilityStatus::Busy),
			"maintenance" => Ok(AvailabilityStatus::Maintenance),
			other => Err(format!("unknown availability status: {}", other)),
		}
	}
}

/// Per-truck availability record, keyed by truck id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruckAvailability {
	pub truck_id: TruckId,
	pub status: AvailabilityStatus,
}
