//! Engine operations: shipment posting, bid admission and acceptance,
//! lifecycle transitions, truck registration and availability.
//!
//! All writes touching a shipment run under that shipment's keyed lock;
//! writes touching a truck's availability additionally take the truck's
//! lock, always after the shipment's, so writers never deadlock.

use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

use loadboard_storage::{StorageError, StorageService};
use loadboard_types::{
	AvailabilityStatus, BidEvent, BidId, BidStatus, EventBus, MarketEvent, MarketStats,
	NewShipment, NewTruck, PrincipalId, Role, Session, ShipmentBid, ShipmentEvent, ShipmentFilter,
	ShipmentId, ShipmentRequest, ShipmentStatus, Truck, TruckAvailability, TruckEvent, TruckId,
};

use crate::batch::WriteBatch;
use crate::error::EngineError;
use crate::lifecycle;
use crate::locks::KeyedLocks;

const NS_SHIPMENTS: &str = "shipments";
const NS_TRUCKS: &str = "trucks";
const NS_AVAILABILITY: &str = "truck_availability";
const NS_BIDS: &str = "bids";

/// Bids are keyed under their shipment so one scan lists a shipment's bids.
fn bid_namespace(shipment_id: ShipmentId) -> String {
	format!("{}:{}", NS_BIDS, shipment_id)
}

/// The matching engine.
///
/// Thread-safe; operations take `&self` and may run concurrently. The
/// per-entity lock registry serializes the writes that matter.
pub struct MatchingEngine {
	storage: Arc<StorageService>,
	shipment_locks: KeyedLocks<ShipmentId>,
	truck_locks: KeyedLocks<TruckId>,
	registration_locks: KeyedLocks<PrincipalId>,
	events: EventBus,
}

impl MatchingEngine {
	pub fn new(storage: Arc<StorageService>, lock_timeout: Duration, event_capacity: usize) -> Self {
		Self {
			storage,
			shipment_locks: KeyedLocks::new(lock_timeout),
			truck_locks: KeyedLocks::new(lock_timeout),
			registration_locks: KeyedLocks::new(lock_timeout),
			events: EventBus::new(event_capacity),
		}
	}

	pub fn event_bus(&self) -> &EventBus {
		&self.events
	}

	fn emit(&self, event: MarketEvent) {
		// A send error only means nobody is subscribed right now.
		self.events.publish(event).ok();
	}

	// ---- shipments ----

	/// Posts a new shipment request. Shipper role required; the shipment
	/// starts `open`.
	pub async fn create_shipment(
		&self,
		session: &Session,
		new: NewShipment,
	) -> Result<ShipmentRequest, EngineError> {
		if session.role() != Role::Shipper {
			return Err(EngineError::Forbidden);
		}
		validate_new_shipment(&new)?;

		let shipment = ShipmentRequest {
			id: ShipmentId::new(),
			shipper_id: session.principal_id(),
			pickup_location: new.pickup_location,
			delivery_location: new.delivery_location,
			goods_description: new.goods_description,
			weight_kg: new.weight_kg,
			volume_m3: new.volume_m3,
			required_truck_type: new.required_truck_type,
			budget_amount: new.budget_amount,
			pickup_date: new.pickup_date,
			delivery_date: new.delivery_date,
			status: ShipmentStatus::Open,
			special_requirements: new.special_requirements,
			created_at: Utc::now(),
		};

		self.storage
			.store(NS_SHIPMENTS, &shipment.id.to_string(), &shipment)
			.await?;

		self.emit(MarketEvent::Shipment(ShipmentEvent::Created {
			shipment: shipment.clone(),
		}));
		Ok(shipment)
	}

	/// Lists open shipments, oldest first. Any authenticated principal may
	/// browse. Lock-free; tolerates staleness.
	pub async fn list_open_shipments(
		&self,
		_session: &Session,
		filter: &ShipmentFilter,
	) -> Result<Vec<ShipmentRequest>, EngineError> {
		let mut shipments: Vec<ShipmentRequest> = self
			.storage
			.retrieve_all::<ShipmentRequest>(NS_SHIPMENTS)
			.await?
			.into_iter()
			.filter(|s| s.status == ShipmentStatus::Open && filter.matches(s))
			.collect();
		shipments.sort_by_key(|s| s.created_at);
		Ok(shipments)
	}

	/// Lists the caller's own shipments, newest first.
	pub async fn list_shipments_by_shipper(
		&self,
		session: &Session,
	) -> Result<Vec<ShipmentRequest>, EngineError> {
		let mut shipments: Vec<ShipmentRequest> = self
			.storage
			.retrieve_all::<ShipmentRequest>(NS_SHIPMENTS)
			.await?
			.into_iter()
			.filter(|s| s.shipper_id == session.principal_id())
			.collect();
		shipments.sort_by_key(|s| std::cmp::Reverse(s.created_at));
		Ok(shipments)
	}

	// ---- trucks ----

	/// Registers a truck for the calling driver. The plate number must be
	/// unique among the caller's trucks; a fresh truck starts `available`.
	pub async fn register_truck(
		&self,
		session: &Session,
		new: NewTruck,
	) -> Result<Truck, EngineError> {
		if session.role() != Role::Driver {
			return Err(EngineError::Forbidden);
		}
		validate_new_truck(&new)?;

		// Serializes registrations per owner so the plate-uniqueness scan
		// below cannot race a concurrent insert.
		let _owner_guard = self.registration_locks.acquire(session.principal_id()).await?;

		let owned: Vec<Truck> = self
			.storage
			.retrieve_all::<Truck>(NS_TRUCKS)
			.await?
			.into_iter()
			.filter(|t| t.owner_id == session.principal_id())
			.collect();
		if owned
			.iter()
			.any(|t| t.plate_number.eq_ignore_ascii_case(&new.plate_number))
		{
			return Err(EngineError::Validation(format!(
				"plate number {} is already registered",
				new.plate_number
			)));
		}

		let truck = Truck {
			id: TruckId::new(),
			owner_id: session.principal_id(),
			plate_number: new.plate_number,
			truck_type: new.truck_type,
			capacity_kg: new.capacity_kg,
			capacity_m3: new.capacity_m3,
			year_manufactured: new.year_manufactured,
			documents_verified: false,
			insurance_expiry: new.insurance_expiry,
			current_city: new.current_city,
			active: true,
		};
		let availability = TruckAvailability {
			truck_id: truck.id,
			status: AvailabilityStatus::Available,
		};

		let mut batch = WriteBatch::new(&self.storage);
		batch.put(NS_TRUCKS, &truck.id.to_string(), &truck).await?;
		batch
			.put(NS_AVAILABILITY, &truck.id.to_string(), &availability)
			.await?;

		self.emit(MarketEvent::Truck(TruckEvent::Registered {
			truck: truck.clone(),
		}));
		Ok(truck)
	}

	/// Lists trucks in the given availability state. For `available` only
	/// active trucks are returned, matching what bidders may actually use.
	pub async fn list_trucks_by_availability(
		&self,
		_session: &Session,
		status: AvailabilityStatus,
	) -> Result<Vec<Truck>, EngineError> {
		let availability = self
			.storage
			.retrieve_all::<TruckAvailability>(NS_AVAILABILITY)
			.await?;
		let mut trucks = Vec::new();
		for record in availability {
			if record.status != status {
				continue;
			}
			let truck = self.load_truck(record.truck_id).await?;
			if status == AvailabilityStatus::Available && !truck.active {
				continue;
			}
			trucks.push(truck);
		}
		Ok(trucks)
	}

	/// Lists the caller's trucks with their availability.
	pub async fn list_trucks_by_owner(
		&self,
		session: &Session,
	) -> Result<Vec<(Truck, AvailabilityStatus)>, EngineError> {
		let trucks: Vec<Truck> = self
			.storage
			.retrieve_all::<Truck>(NS_TRUCKS)
			.await?
			.into_iter()
			.filter(|t| t.owner_id == session.principal_id())
			.collect();
		let mut result = Vec::with_capacity(trucks.len());
		for truck in trucks {
			let availability = self.load_availability(truck.id).await?;
			result.push((truck, availability.status));
		}
		Ok(result)
	}

	/// Moves an `available` truck into maintenance, or back out of it.
	/// A `busy` truck cannot change either way. Owner or admin only.
	pub async fn set_truck_maintenance(
		&self,
		session: &Session,
		truck_id: TruckId,
		on: bool,
	) -> Result<Truck, EngineError> {
		let _truck_guard = self.truck_locks.acquire(truck_id).await?;

		let truck = self.load_truck(truck_id).await?;
		if truck.owner_id != session.principal_id() && !session.is_admin() {
			return Err(EngineError::Forbidden);
		}

		let mut availability = self.load_availability(truck_id).await?;
		if availability.status == AvailabilityStatus::Busy {
			return Err(EngineError::TruckUnavailable);
		}

		let target = if on {
			AvailabilityStatus::Maintenance
		} else {
			AvailabilityStatus::Available
		};
		if availability.status != target {
			availability.status = target;
			self.storage
				.store(NS_AVAILABILITY, &truck_id.to_string(), &availability)
				.await?;
			self.emit(MarketEvent::Truck(TruckEvent::AvailabilityChanged {
				truck_id,
				status: target,
			}));
		}
		Ok(truck)
	}

	// ---- bids ----

	/// Submits a pending bid on an open shipment. Driver role required;
	/// the truck must belong to the caller, be active, and be available.
	pub async fn submit_bid(
		&self,
		session: &Session,
		shipment_id: ShipmentId,
		truck_id: TruckId,
		amount: Decimal,
		notes: Option<String>,
	) -> Result<ShipmentBid, EngineError> {
		if session.role() != Role::Driver {
			return Err(EngineError::Forbidden);
		}
		if amount <= Decimal::ZERO {
			return Err(EngineError::Validation(
				"bid amount must be positive".to_string(),
			));
		}

		let shipment = self.load_shipment(shipment_id).await?;
		if shipment.status != ShipmentStatus::Open {
			return Err(EngineError::ShipmentNotOpen);
		}

		let truck = self.load_truck(truck_id).await?;
		if truck.owner_id != session.principal_id() {
			return Err(EngineError::Forbidden);
		}
		if !truck.active {
			return Err(EngineError::TruckUnavailable);
		}
		let availability = self.load_availability(truck_id).await?;
		if availability.status != AvailabilityStatus::Available {
			return Err(EngineError::TruckUnavailable);
		}

		let bid = ShipmentBid {
			id: BidId::new(),
			shipment_id,
			truck_owner_id: session.principal_id(),
			truck_id,
			bid_amount: amount,
			status: BidStatus::Pending,
			notes,
			created_at: Utc::now(),
		};
		self.storage
			.store(&bid_namespace(shipment_id), &bid.id.to_string(), &bid)
			.await?;

		self.emit(MarketEvent::Bid(BidEvent::Submitted { bid: bid.clone() }));
		Ok(bid)
	}

	/// Lists bids on a shipment. Owning shipper or admin only.
	pub async fn list_bids(
		&self,
		session: &Session,
		shipment_id: ShipmentId,
	) -> Result<Vec<ShipmentBid>, EngineError> {
		let shipment = self.load_shipment(shipment_id).await?;
		if shipment.shipper_id != session.principal_id() && !session.is_admin() {
			return Err(EngineError::Forbidden);
		}
		let mut bids: Vec<ShipmentBid> = self
			.storage
			.retrieve_all(&bid_namespace(shipment_id))
			.await?;
		bids.sort_by_key(|b| b.created_at);
		Ok(bids)
	}

	/// Lists every bid the calling driver has placed, across shipments.
	pub async fn list_bids_by_owner(
		&self,
		session: &Session,
	) -> Result<Vec<ShipmentBid>, EngineError> {
		let mut bids: Vec<ShipmentBid> = self
			.storage
			.retrieve_all::<ShipmentBid>(NS_BIDS)
			.await?
			.into_iter()
			.filter(|b| b.truck_owner_id == session.principal_id())
			.collect();
		bids.sort_by_key(|b| std::cmp::Reverse(b.created_at));
		Ok(bids)
	}

	/// Accepts a bid: the critical transaction.
	///
	/// Under the shipment lock (and then the truck lock) the shipment, bid
	/// and availability are re-read, then the accepted bid, the rejected
	/// siblings, the assigned shipment and the busy truck are written
	/// through one batch that rolls back on partial failure.
	///
	/// Two concurrent accepts on the same shipment serialize on the lock;
	/// the loser re-reads the shipment as `assigned` and gets
	/// `ShipmentNotOpen` (or `Contention` if it never got the lock).
	pub async fn accept_bid(
		&self,
		session: &Session,
		shipment_id: ShipmentId,
		bid_id: BidId,
	) -> Result<ShipmentRequest, EngineError> {
		let _shipment_guard = self.shipment_locks.acquire(shipment_id).await?;

		let mut shipment = self.load_shipment(shipment_id).await?;
		if shipment.shipper_id != session.principal_id() && !session.is_admin() {
			return Err(EngineError::Forbidden);
		}
		if shipment.status != ShipmentStatus::Open {
			return Err(EngineError::ShipmentNotOpen);
		}

		let ns = bid_namespace(shipment_id);
		let mut bid: ShipmentBid = match self.storage.retrieve(&ns, &bid_id.to_string()).await {
			Ok(bid) => bid,
			Err(StorageError::NotFound) => return Err(EngineError::NotFound("bid")),
			Err(e) => return Err(e.into()),
		};
		if bid.status != BidStatus::Pending {
			return Err(EngineError::BidNotPending);
		}

		// Guards against the truck being double-booked between submission
		// and acceptance, including by an accept on another shipment.
		let _truck_guard = self.truck_locks.acquire(bid.truck_id).await?;
		let mut availability = self.load_availability(bid.truck_id).await?;
		if availability.status != AvailabilityStatus::Available {
			return Err(EngineError::TruckUnavailable);
		}

		lifecycle::validate_transition(shipment.status, ShipmentStatus::Assigned)?;

		let siblings: Vec<ShipmentBid> = self.storage.retrieve_all(&ns).await?;

		let mut batch = WriteBatch::new(&self.storage);

		bid.status = BidStatus::Accepted;
		batch.put(&ns, &bid.id.to_string(), &bid).await?;

		let mut rejected = Vec::new();
		for mut other in siblings {
			if other.id != bid.id && other.status == BidStatus::Pending {
				other.status = BidStatus::Rejected;
				batch.put(&ns, &other.id.to_string(), &other).await?;
				rejected.push(other.id);
			}
		}

		let from = shipment.status;
		shipment.status = ShipmentStatus::Assigned;
		batch
			.put(NS_SHIPMENTS, &shipment.id.to_string(), &shipment)
			.await?;

		availability.status = AvailabilityStatus::Busy;
		batch
			.put(NS_AVAILABILITY, &bid.truck_id.to_string(), &availability)
			.await?;

		// Events only after every write landed.
		self.emit(MarketEvent::Bid(BidEvent::Accepted {
			shipment_id,
			bid_id: bid.id,
			truck_owner_id: bid.truck_owner_id,
		}));
		for id in rejected {
			self.emit(MarketEvent::Bid(BidEvent::Rejected {
				shipment_id,
				bid_id: id,
			}));
		}
		self.emit(MarketEvent::Shipment(ShipmentEvent::StatusChanged {
			shipment_id,
			from,
			to: ShipmentStatus::Assigned,
		}));
		self.emit(MarketEvent::Truck(TruckEvent::AvailabilityChanged {
			truck_id: bid.truck_id,
			status: AvailabilityStatus::Busy,
		}));

		Ok(shipment)
	}

	// ---- lifecycle transitions ----

	/// The assigned driver confirms pickup.
	pub async fn mark_in_transit(
		&self,
		session: &Session,
		shipment_id: ShipmentId,
	) -> Result<ShipmentRequest, EngineError> {
		let _shipment_guard = self.shipment_locks.acquire(shipment_id).await?;

		let mut shipment = self.load_shipment(shipment_id).await?;
		lifecycle::validate_transition(shipment.status, ShipmentStatus::InTransit)?;

		let accepted = self.accepted_bid(shipment_id).await?;
		if accepted.truck_owner_id != session.principal_id() {
			return Err(EngineError::Forbidden);
		}

		let from = shipment.status;
		shipment.status = ShipmentStatus::InTransit;
		self.storage
			.store(NS_SHIPMENTS, &shipment.id.to_string(), &shipment)
			.await?;

		self.emit(MarketEvent::Shipment(ShipmentEvent::StatusChanged {
			shipment_id,
			from,
			to: ShipmentStatus::InTransit,
		}));
		Ok(shipment)
	}

	/// The assigned driver confirms delivery; the truck is released.
	pub async fn mark_delivered(
		&self,
		session: &Session,
		shipment_id: ShipmentId,
	) -> Result<ShipmentRequest, EngineError> {
		let _shipment_guard = self.shipment_locks.acquire(shipment_id).await?;

		let mut shipment = self.load_shipment(shipment_id).await?;
		lifecycle::validate_transition(shipment.status, ShipmentStatus::Delivered)?;

		let accepted = self.accepted_bid(shipment_id).await?;
		if accepted.truck_owner_id != session.principal_id() {
			return Err(EngineError::Forbidden);
		}

		// Locks and reads all happen before the first write; an error up
		// to here leaves nothing to undo.
		let _truck_guard = self.truck_locks.acquire(accepted.truck_id).await?;
		let mut availability = self.load_availability(accepted.truck_id).await?;

		let from = shipment.status;
		shipment.status = ShipmentStatus::Delivered;
		let released = availability.status != AvailabilityStatus::Available;

		let mut batch = WriteBatch::new(&self.storage);
		batch
			.put(NS_SHIPMENTS, &shipment.id.to_string(), &shipment)
			.await?;
		if released {
			availability.status = AvailabilityStatus::Available;
			batch
				.put(NS_AVAILABILITY, &accepted.truck_id.to_string(), &availability)
				.await?;
		}

		self.emit(MarketEvent::Shipment(ShipmentEvent::StatusChanged {
			shipment_id,
			from,
			to: ShipmentStatus::Delivered,
		}));
		if released {
			self.emit(MarketEvent::Truck(TruckEvent::AvailabilityChanged {
				truck_id: accepted.truck_id,
				status: AvailabilityStatus::Available,
			}));
		}
		Ok(shipment)
	}

	/// Cancels a shipment while `open` or `assigned`. Owning shipper or
	/// admin. From `assigned` the bound truck is released and the accepted
	/// bid rejected; pending bids are rejected on either path.
	pub async fn cancel_shipment(
		&self,
		session: &Session,
		shipment_id: ShipmentId,
	) -> Result<ShipmentRequest, EngineError> {
		let _shipment_guard = self.shipment_locks.acquire(shipment_id).await?;

		let mut shipment = self.load_shipment(shipment_id).await?;
		if shipment.shipper_id != session.principal_id() && !session.is_admin() {
			return Err(EngineError::Forbidden);
		}
		lifecycle::validate_transition(shipment.status, ShipmentStatus::Cancelled)?;

		let ns = bid_namespace(shipment_id);
		let bids: Vec<ShipmentBid> = self.storage.retrieve_all(&ns).await?;

		// The bound truck's lock and availability are taken before any
		// write is staged, so a contended or failed cancel changes
		// nothing and can simply be retried.
		let mut _truck_guard = None;
		let mut release = None;
		for bid in &bids {
			if bid.status == BidStatus::Accepted {
				_truck_guard = Some(self.truck_locks.acquire(bid.truck_id).await?);
				let availability = self.load_availability(bid.truck_id).await?;
				if availability.status != AvailabilityStatus::Available {
					release = Some(availability);
				}
			}
		}

		let mut batch = WriteBatch::new(&self.storage);
		let mut rejected = Vec::new();

		for mut bid in bids {
			if matches!(bid.status, BidStatus::Pending | BidStatus::Accepted) {
				bid.status = BidStatus::Rejected;
				batch.put(&ns, &bid.id.to_string(), &bid).await?;
				rejected.push(bid.id);
			}
		}

		let released_truck = match release {
			Some(mut availability) => {
				availability.status = AvailabilityStatus::Available;
				batch
					.put(NS_AVAILABILITY, &availability.truck_id.to_string(), &availability)
					.await?;
				Some(availability.truck_id)
			}
			None => None,
		};

		let from = shipment.status;
		shipment.status = ShipmentStatus::Cancelled;
		batch
			.put(NS_SHIPMENTS, &shipment.id.to_string(), &shipment)
			.await?;

		for id in rejected {
			self.emit(MarketEvent::Bid(BidEvent::Rejected {
				shipment_id,
				bid_id: id,
			}));
		}
		self.emit(MarketEvent::Shipment(ShipmentEvent::StatusChanged {
			shipment_id,
			from,
			to: ShipmentStatus::Cancelled,
		}));
		if let Some(truck_id) = released_truck {
			self.emit(MarketEvent::Truck(TruckEvent::AvailabilityChanged {
				truck_id,
				status: AvailabilityStatus::Available,
			}));
		}
		Ok(shipment)
	}

	// ---- stats ----

	/// Marketplace counters for the admin dashboard. Admin only.
	pub async fn stats(&self, session: &Session) -> Result<MarketStats, EngineError> {
		if !session.is_admin() {
			return Err(EngineError::Forbidden);
		}

		let trucks = self.storage.retrieve_all::<Truck>(NS_TRUCKS).await?;
		let shipments = self
			.storage
			.retrieve_all::<ShipmentRequest>(NS_SHIPMENTS)
			.await?;

		Ok(MarketStats {
			total_trucks: trucks.len() as u64,
			total_shipments: shipments.len() as u64,
			open_shipments: shipments
				.iter()
				.filter(|s| s.status == ShipmentStatus::Open)
				.count() as u64,
			delivered_shipments: shipments
				.iter()
				.filter(|s| s.status == ShipmentStatus::Delivered)
				.count() as u64,
		})
	}

	// ---- internals ----

	async fn load_shipment(&self, id: ShipmentId) -> Result<ShipmentRequest, EngineError> {
		match self.storage.retrieve(NS_SHIPMENTS, &id.to_string()).await {
			Ok(shipment) => Ok(shipment),
			Err(StorageError::NotFound) => Err(EngineError::NotFound("shipment")),
			Err(e) => Err(e.into()),
		}
	}

	async fn load_truck(&self, id: TruckId) -> Result<Truck, EngineError> {
		match self.storage.retrieve(NS_TRUCKS, &id.to_string()).await {
			Ok(truck) => Ok(truck),
			Err(StorageError::NotFound) => Err(EngineError::NotFound("truck")),
			Err(e) => Err(e.into()),
		}
	}

	async fn load_availability(&self, id: TruckId) -> Result<TruckAvailability, EngineError> {
		match self.storage.retrieve(NS_AVAILABILITY, &id.to_string()).await {
			Ok(availability) => Ok(availability),
			Err(StorageError::NotFound) => Err(EngineError::NotFound("truck availability")),
			Err(e) => Err(e.into()),
		}
	}

	async fn accepted_bid(&self, shipment_id: ShipmentId) -> Result<ShipmentBid, EngineError> {
		let bids: Vec<ShipmentBid> = self
			.storage
			.retrieve_all(&bid_namespace(shipment_id))
			.await?;
		bids.into_iter()
			.find(|b| b.status == BidStatus::Accepted)
			.ok_or(EngineError::NotFound("accepted bid"))
	}

}

fn validate_new_shipment(new: &NewShipment) -> Result<(), EngineError> {
	if new.pickup_location.trim().is_empty() {
		return Err(EngineError::Validation(
			"pickup location must not be empty".to_string(),
		));
	}
	if new.delivery_location.trim().is_empty() {
		return Err(EngineError::Validation(
			"delivery location must not be empty".to_string(),
		));
	}
	if new.goods_description.trim().is_empty() {
		return Err(EngineError::Validation(
			"goods description must not be empty".to_string(),
		));
	}
	if new.weight_kg <= Decimal::ZERO {
		return Err(EngineError::Validation(
			"weight must be positive".to_string(),
		));
	}
	if let Some(volume) = new.volume_m3 {
		if volume <= Decimal::ZERO {
			return Err(EngineError::Validation(
				"volume must be positive".to_string(),
			));
		}
	}
	if new.budget_amount <= Decimal::ZERO {
		return Err(EngineError::Validation(
			"budget must be positive".to_string(),
		));
	}
	if new.delivery_date < new.pickup_date {
		return Err(EngineError::Validation(
			"delivery date must not precede pickup date".to_string(),
		));
	}
	Ok(())
}

fn validate_new_truck(new: &NewTruck) -> Result<(), EngineError> {
	if new.plate_number.trim().is_empty() {
		return Err(EngineError::Validation(
			"plate number must not be empty".to_string(),
		));
	}
	if new.capacity_kg <= Decimal::ZERO {
		return Err(EngineError::Validation(
			"capacity must be positive".to_string(),
		));
	}
	if let Some(volume) = new.capacity_m3 {
		if volume <= Decimal::ZERO {
			return Err(EngineError::Validation(
				"volume capacity must be positive".to_string(),
			));
		}
	}
	if new.year_manufactured < 1950 {
		return Err(EngineError::Validation(
			"year of manufacture is implausible".to_string(),
		));
	}
	Ok(())
}
