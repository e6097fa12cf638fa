//! HTTP surface over the matching engine.
//!
//! One route per engine operation. The authenticated principal arrives in
//! `x-principal-id` / `x-principal-role` headers; identity itself is
//! managed outside this service.

use axum::{
	extract::{FromRequestParts, Path, Query, State},
	http::{request::Parts, StatusCode},
	response::{IntoResponse, Response},
	routing::{get, post},
	Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use loadboard_engine::{EngineError, MatchingEngine};
use loadboard_types::{
	AvailabilityStatus, BidId, NewShipment, NewTruck, Session, ShipmentFilter, ShipmentId, Truck,
	TruckId,
};

#[derive(Clone)]
pub struct AppState {
	pub engine: Arc<MatchingEngine>,
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/shipments", post(create_shipment))
		.route("/shipments/open", get(list_open_shipments))
		.route("/shipments/mine", get(list_my_shipments))
		.route("/shipments/{id}/bids", post(submit_bid).get(list_bids))
		.route("/shipments/{id}/accept", post(accept_bid))
		.route("/shipments/{id}/transit", post(mark_in_transit))
		.route("/shipments/{id}/delivered", post(mark_delivered))
		.route("/shipments/{id}/cancel", post(cancel_shipment))
		.route("/trucks", post(register_truck).get(list_trucks))
		.route("/trucks/mine", get(list_my_trucks))
		.route("/trucks/{id}/maintenance", post(set_maintenance))
		.route("/bids/mine", get(list_my_bids))
		.route("/stats", get(stats))
		.layer(TraceLayer::new_for_http())
		// Browser and mobile clients call this service directly.
		.layer(CorsLayer::permissive())
		.with_state(state)
}

/// API error wrapper translating engine errors to HTTP statuses.
pub enum ApiError {
	Engine(EngineError),
	Unauthorized(&'static str),
}

impl From<EngineError> for ApiError {
	fn from(e: EngineError) -> Self {
		ApiError::Engine(e)
	}
}

#[derive(Serialize)]
struct ErrorBody {
	error: String,
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let (status, message) = match self {
			ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.to_string()),
			ApiError::Engine(e) => {
				let status = match &e {
					EngineError::NotFound(_) => StatusCode::NOT_FOUND,
					EngineError::Forbidden => StatusCode::FORBIDDEN,
					EngineError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
					EngineError::InvalidTransition { .. }
					| EngineError::ShipmentNotOpen
					| EngineError::BidNotPending
					| EngineError::TruckUnavailable => StatusCode::CONFLICT,
					EngineError::Contention => StatusCode::SERVICE_UNAVAILABLE,
					EngineError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
				};
				(status, e.to_string())
			}
		};
		(status, Json(ErrorBody { error: message })).into_response()
	}
}

/// Session extracted from the identity headers.
pub struct AuthSession(pub Session);

impl<S> FromRequestParts<S> for AuthSession
where
	S: Send + Sync,
{
	type Rejection = ApiError;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let id = parts
			.headers
			.get("x-principal-id")
			.and_then(|v| v.to_str().ok())
			.ok_or(ApiError::Unauthorized("missing x-principal-id header"))?;
		let role = parts
			.headers
			.get("x-principal-role")
			.and_then(|v| v.to_str().ok())
			.ok_or(ApiError::Unauthorized("missing x-principal-role header"))?;

		let id = id
			.parse()
			.map_err(|_| ApiError::Unauthorized("x-principal-id is not a valid id"))?;
		let role = role
			.parse()
			.map_err(|_| ApiError::Unauthorized("x-principal-role is not a valid role"))?;

		Ok(AuthSession(Session::new(id, role)))
	}
}

async fn health() -> &'static str {
	"ok"
}

async fn create_shipment(
	State(state): State<AppState>,
	AuthSession(session): AuthSession,
	Json(body): Json<NewShipment>,
) -> Result<Response, ApiError> {
	let shipment = state.engine.create_shipment(&session, body).await?;
	Ok((StatusCode::CREATED, Json(shipment)).into_response())
}

async fn list_open_shipments(
	State(state): State<AppState>,
	AuthSession(session): AuthSession,
	Query(filter): Query<ShipmentFilter>,
) -> Result<Response, ApiError> {
	let shipments = state.engine.list_open_shipments(&session, &filter).await?;
	Ok(Json(shipments).into_response())
}

async fn list_my_shipments(
	State(state): State<AppState>,
	AuthSession(session): AuthSession,
) -> Result<Response, ApiError> {
	let shipments = state.engine.list_shipments_by_shipper(&session).await?;
	Ok(Json(shipments).into_response())
}

#[derive(Deserialize)]
struct SubmitBidBody {
	truck_id: TruckId,
	amount: Decimal,
	notes: Option<String>,
}

async fn submit_bid(
	State(state): State<AppState>,
	AuthSession(session): AuthSession,
	Path(shipment_id): Path<ShipmentId>,
	Json(body): Json<SubmitBidBody>,
) -> Result<Response, ApiError> {
	let bid = state
		.engine
		.submit_bid(&session, shipment_id, body.truck_id, body.amount, body.notes)
		.await?;
	Ok((StatusCode::CREATED, Json(bid)).into_response())
}

async fn list_bids(
	State(state): State<AppState>,
	AuthSession(session): AuthSession,
	Path(shipment_id): Path<ShipmentId>,
) -> Result<Response, ApiError> {
	let bids = state.engine.list_bids(&session, shipment_id).await?;
	Ok(Json(bids).into_response())
}

#[derive(Deserialize)]
struct AcceptBidBody {
	bid_id: BidId,
}

async fn accept_bid(
	State(state): State<AppState>,
	AuthSession(session): AuthSession,
	Path(shipment_id): Path<ShipmentId>,
	Json(body): Json<AcceptBidBody>,
) -> Result<Response, ApiError> {
	let shipment = state
		.engine
		.accept_bid(&session, shipment_id, body.bid_id)
		.await?;
	Ok(Json(shipment).into_response())
}

async fn mark_in_transit(
	State(state): State<AppState>,
	AuthSession(session): AuthSession,
	Path(shipment_id): Path<ShipmentId>,
) -> Result<Response, ApiError> {
	let shipment = state.engine.mark_in_transit(&session, shipment_id).await?;
	Ok(Json(shipment).into_response())
}

async fn mark_delivered(
	State(state): State<AppState>,
	AuthSession(session): AuthSession,
	Path(shipment_id): Path<ShipmentId>,
) -> Result<Response, ApiError> {
	let shipment = state.engine.mark_delivered(&session, shipment_id).await?;
	Ok(Json(shipment).into_response())
}

async fn cancel_shipment(
	State(state): State<AppState>,
	AuthSession(session): AuthSession,
	Path(shipment_id): Path<ShipmentId>,
) -> Result<Response, ApiError> {
	let shipment = state.engine.cancel_shipment(&session, shipment_id).await?;
	Ok(Json(shipment).into_response())
}

async fn register_truck(
	State(state): State<AppState>,
	AuthSession(session): AuthSession,
	Json(body): Json<NewTruck>,
) -> Result<Response, ApiError> {
	let truck = state.engine.register_truck(&session, body).await?;
	Ok((StatusCode::CREATED, Json(truck)).into_response())
}

#[derive(Deserialize)]
struct TruckListQuery {
	availability: Option<AvailabilityStatus>,
}

async fn list_trucks(
	State(state): State<AppState>,
	AuthSession(session): AuthSession,
	Query(query): Query<TruckListQuery>,
) -> Result<Response, ApiError> {
	let status = query.availability.unwrap_or(AvailabilityStatus::Available);
	let trucks = state
		.engine
		.list_trucks_by_availability(&session, status)
		.await?;
	Ok(Json(trucks).into_response())
}

#[derive(Serialize)]
struct OwnedTruck {
	#[serde(flatten)]
	truck: Truck,
	availability: AvailabilityStatus,
}

async fn list_my_trucks(
	State(state): State<AppState>,
	AuthSession(session): AuthSession,
) -> Result<Response, ApiError> {
	let trucks = state
		.engine
		.list_trucks_by_owner(&session)
		.await?
		.into_iter()
		.map(|(truck, availability)| OwnedTruck {
			truck,
			availability,
		})
		.collect::<Vec<_>>();
	Ok(Json(trucks).into_response())
}

#[derive(Deserialize)]
struct MaintenanceBody {
	on: bool,
}

async fn set_maintenance(
	State(state): State<AppState>,
	AuthSession(session): AuthSession,
	Path(truck_id): Path<TruckId>,
	Json(body): Json<MaintenanceBody>,
) -> Result<Response, ApiError> {
	let truck = state
		.engine
		.set_truck_maintenance(&session, truck_id, body.on)
		.await?;
	Ok(Json(truck).into_response())
}

async fn list_my_bids(
	State(state): State<AppState>,
	AuthSession(session): AuthSession,
) -> Result<Response, ApiError> {
	let bids = state.engine.list_bids_by_owner(&session).await?;
	Ok(Json(bids).into_response())
}

async fn stats(
	State(state): State<AppState>,
	AuthSession(session): AuthSession,
) -> Result<Response, ApiError> {
	let stats = state.engine.stats(&session).await?;
	Ok(Json(stats).into_response())
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::body::Body;
	use axum::http::{header::CONTENT_TYPE, Method, Request};
	use loadboard_storage::{MemoryStorage, StorageService};
	use loadboard_types::{Role, Session};
	use std::time::Duration;
	use tower::ServiceExt;

	fn test_state() -> AppState {
		let storage = Arc::new(StorageService::new(Box::new(MemoryStorage::new())));
		AppState {
			engine: Arc::new(MatchingEngine::new(storage, Duration::from_secs(2), 64)),
		}
	}

	fn shipper_session() -> Session {
		Session::new(loadboard_types::PrincipalId::new(), Role::Shipper)
	}

	fn shipment_json() -> String {
		serde_json::json!({
			"pickup_location": "Kano",
			"delivery_location": "Lagos",
			"goods_description": "bagged grain",
			"weight_kg": "1200",
			"volume_m3": null,
			"required_truck_type": null,
			"budget_amount": "900",
			"pickup_date": "2025-06-01",
			"delivery_date": "2025-06-03",
			"special_requirements": null
		})
		.to_string()
	}

	fn authed(request: axum::http::request::Builder, session: &Session) -> axum::http::request::Builder {
		request
			.header("x-principal-id", session.principal_id().to_string())
			.header("x-principal-role", session.role().to_string())
	}

	#[tokio::test]
	async fn missing_identity_headers_are_unauthorized() {
		let app = router(test_state());
		let request = Request::builder()
			.method(Method::POST)
			.uri("/shipments")
			.header(CONTENT_TYPE, "application/json")
			.body(Body::from(shipment_json()))
			.unwrap();

		let response = app.oneshot(request).await.unwrap();
		assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
	}

	#[tokio::test]
	async fn shipper_can_post_and_list_shipments() {
		let state = test_state();
		let app = router(state.clone());
		let session = shipper_session();

		let request = authed(
			Request::builder()
				.method(Method::POST)
				.uri("/shipments")
				.header(CONTENT_TYPE, "application/json"),
			&session,
		)
		.body(Body::from(shipment_json()))
		.unwrap();
		let response = app.clone().oneshot(request).await.unwrap();
		assert_eq!(response.status(), StatusCode::CREATED);

		let request = authed(
			Request::builder().method(Method::GET).uri("/shipments/open"),
			&session,
		)
		.body(Body::empty())
		.unwrap();
		let response = app.oneshot(request).await.unwrap();
		assert_eq!(response.status(), StatusCode::OK);

		// Confirm through the engine that the row landed.
		let open = state
			.engine
			.list_open_shipments(&session, &ShipmentFilter::default())
			.await
			.unwrap();
		assert_eq!(open.len(), 1);
	}

	#[tokio::test]
	async fn wrong_role_is_forbidden() {
		let app = router(test_state());
		let driver = Session::new(loadboard_types::PrincipalId::new(), Role::Driver);

		let request = authed(
			Request::builder()
				.method(Method::POST)
				.uri("/shipments")
				.header(CONTENT_TYPE, "application/json"),
			&driver,
		)
		.body(Body::from(shipment_json()))
		.unwrap();
		let response = app.oneshot(request).await.unwrap();
		assert_eq!(response.status(), StatusCode::FORBIDDEN);
	}

	#[tokio::test]
	async fn unknown_shipment_is_not_found() {
		let app = router(test_state());
		let session = shipper_session();

		let request = authed(
			Request::builder()
				.method(Method::POST)
				.uri(format!("/shipments/{}/cancel", ShipmentId::new())),
			&session,
		)
		.body(Body::empty())
		.unwrap();
		let response = app.oneshot(request).await.unwrap();
		assert_eq!(response.status(), StatusCode::NOT_FOUND);
	}

	#[tokio::test]
	async fn validation_errors_are_unprocessable() {
		let app = router(test_state());
		let session = shipper_session();

		let mut body: serde_json::Value = serde_json::from_str(&shipment_json()).unwrap();
		body["weight_kg"] = serde_json::json!("0");

		let request = authed(
			Request::builder()
				.method(Method::POST)
				.uri("/shipments")
				.header(CONTENT_TYPE, "application/json"),
			&session,
		)
		.body(Body::from(body.to_string()))
		.unwrap();
		let response = app.oneshot(request).await.unwrap();
		assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
	}
}
