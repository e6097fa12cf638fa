//! Shipment request types and the lifecycle status enum.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::auth::PrincipalId;
use crate::common::Id;
use crate::truck::TruckType;

pub type ShipmentId = Id<ShipmentRequest>;

/// Lifecycle state of a shipment request.
///
/// Legal transitions are `open -> assigned -> in_transit -> delivered`,
/// plus `open -> cancelled` and `assigned -> cancelled`. The engine's
/// lifecycle module is the single place that validates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
	Open,
	Assigned,
	InTransit,
	Delivered,
	Cancelled,
}

impl ShipmentStatus {
	/// Terminal states accept no further transitions.
	pub fn is_terminal(&self) -> bool {
		matches!(self, ShipmentStatus::Delivered | ShipmentStatus::Cancelled)
	}
}

impl fmt::Display for ShipmentStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			ShipmentStatus::Open => "open",
			ShipmentStatus::Assigned => "assigned",
			ShipmentStatus::InTransit => "in_transit",
			ShipmentStatus::Delivered => "delivered",
			ShipmentStatus::Cancelled => "cancelled",
		};
		write!(f, "{}", s)
	}
}

/// A freight posting by a shipper.
///
/// Mutated only by the matching engine; never deleted, only transitioned
/// to `cancelled`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentRequest {
	pub id: ShipmentId,
	pub shipper_id: PrincipalId,
	pub pickup_location: String,
	pub delivery_location: String,
	pub goods_description: String,
	pub weight_kg: Decimal,
	pub volume_m3: Option<Decimal>,
	pub required_truck_type: Option<TruckType>,
	pub budget_amount: Decimal,
	pub pickup_date: NaiveDate,
	pub delivery_date: NaiveDate,
	pub status: ShipmentStatus,
	pub special_requirements: Option<String>,
	pub created_at: DateTime<Utc>,
}

/// Fields a shipper supplies when posting a shipment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShipment {
	pub pickup_location: String,
	pub delivery_location: String,
	pub goods_description: String,
	pub weight_kg: Decimal,
	pub volume_m3: Option<Decimal>,
	pub required_truck_type: Option<TruckType>,
	pub budget_amount: Decimal,
	pub pickup_date: NaiveDate,
	pub delivery_date: NaiveDate,
	pub special_requirements: Option<String>,
}

/// Optional filter for listing open shipments.
///
/// `truck_type` keeps only shipments a given truck type can serve (those
/// with no requirement, or requiring exactly that type); `max_weight_kg`
/// keeps shipments light enough for the caller's truck.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipmentFilter {
	pub truck_type: Option<TruckType>,
	pub max_weight_kg: Option<Decimal>,
}

impl ShipmentFilter {
	pub fn matches(&self, shipment: &ShipmentRequest) -> bool {
		if let Some(truck_type) = self.truck_type {
			if let Some(required) = shipment.required_truck_type {
				if required != truck_type {
					return false;
				}
			}
		}
		if let Some(max) = self.max_weight_kg {
			if shipment.weight_kg > max {
				return false;
			}
		}
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn shipment(weight: i64, required: Option<TruckType>) -> ShipmentRequest {
		ShipmentRequest {
			id: ShipmentId::new(),
			shipper_id: PrincipalId::new(),
			pickup_location: "Kano".into(),
			delivery_location: "Lagos".into(),
			goods_description: "grain".into(),
			weight_kg: Decimal::from(weight),
			volume_m3: None,
			required_truck_type: required,
			budget_amount: Decimal::from(1000),
			pickup_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
			delivery_date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
			status: ShipmentStatus::Open,
			special_requirements: None,
			created_at: Utc::now(),
		}
	}

	#[test]
	fn filter_respects_required_truck_type() {
		let filter = ShipmentFilter {
			truck_type: Some(TruckType::Flatbed),
			max_weight_kg: None,
		};
		assert!(filter.matches(&shipment(100, None)));
		assert!(filter.matches(&shipment(100, Some(TruckType::Flatbed))));
		assert!(!filter.matches(&shipment(100, Some(TruckType::Tanker))));
	}

	#[test]
	fn filter_respects_weight_cap() {
		let filter = ShipmentFilter {
			truck_type: None,
			max_weight_kg: Some(Decimal::from(500)),
		};
		assert!(filter.matches(&shipment(500, None)));
		assert!(!filter.matches(&shipment(501, None)));
	}

	#[test]
	fn status_strings_match_the_wire_format() {
		assert_eq!(
			serde_json::to_string(&ShipmentStatus::InTransit).unwrap(),
			"\"in_transit\""
		);
		assert_eq!(ShipmentStatus::InTransit.to_string(), "in_transit");
		assert!(ShipmentStatus::Delivered.is_terminal());
		assert!(ShipmentStatus::Cancelled.is_terminal());
		assert!(!ShipmentStatus::Assigned.is_terminal());
	}
}
