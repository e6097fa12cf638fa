//! Marketplace counters for the admin dashboard.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketStats {
	pub total_trucks: u64,
	pub total_shipments: u64,
	pub open_shipments: u64,
	pub delivered_shipments: u64,
}
