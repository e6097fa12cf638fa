//! Domain events published by the matching engine.
//!
//! The engine itself never logs; observers (the service layer, tests)
//! subscribe to the bus and decide what to do with each event.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::auth::PrincipalId;
use crate::bid::{BidId, ShipmentBid};
use crate::shipment::{ShipmentId, ShipmentRequest, ShipmentStatus};
use crate::truck::{AvailabilityStatus, Truck, TruckId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MarketEvent {
	Shipment(ShipmentEvent),
	Bid(BidEvent),
	Truck(TruckEvent),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ShipmentEvent {
	Created {
		shipment: ShipmentRequest,
	},
	StatusChanged {
		shipment_id: ShipmentId,
		from: ShipmentStatus,
		to: ShipmentStatus,
	},
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BidEvent {
	Submitted {
		bid: ShipmentBid,
	},
	Accepted {
		shipment_id: ShipmentId,
		bid_id: BidId,
		truck_owner_id: PrincipalId,
	},
	Rejected {
		shipment_id: ShipmentId,
		bid_id: BidId,
	},
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TruckEvent {
	Registered {
		truck: Truck,
	},
	AvailabilityChanged {
		truck_id: TruckId,
		status: AvailabilityStatus,
	},
}

/// Broadcast bus carrying [`MarketEvent`]s to any number of subscribers.
pub struct EventBus {
	sender: broadcast::Sender<MarketEvent>,
}

impl EventBus {
	pub fn new(capacity: usize) -> Self {
		let (sender, _) = broadcast::channel(capacity);
		Self { sender }
	}

	pub fn subscribe(&self) -> broadcast::Receiver<MarketEvent> {
		self.sender.subscribe()
	}

	/// Publishes an event; a send error only means nobody is listening.
	pub fn publish(&self, event: MarketEvent) -> Result<(), broadcast::error::SendError<MarketEvent>> {
		self.sender.send(event)?;
		Ok(())
	}
}

impl Clone for EventBus {
	fn clone(&self) -> Self {
		Self {
			sender: self.sender.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn events_reach_every_subscriber() {
		let bus = EventBus::new(16);
		let mut rx1 = bus.subscribe();
		let mut rx2 = bus.subscribe();

		let truck_id = TruckId::new();
		bus.publish(MarketEvent::Truck(TruckEvent::AvailabilityChanged {
			truck_id,
			status: AvailabilityStatus::Busy,
		}))
		.unwrap();

		for rx in [&mut rx1, &mut rx2] {
			match rx.recv().await.unwrap() {
				MarketEvent::Truck(TruckEvent::AvailabilityChanged { truck_id: id, status }) => {
					assert_eq!(id, truck_id);
					assert_eq!(status, AvailabilityStatus::Busy);
				}
				other => panic!("unexpected event: {:?}", other),
			}
		}
	}
}
