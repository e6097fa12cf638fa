//! Write batching with pre-image rollback.
//!
//! The persistence gateway has no transactions, so multi-record mutations
//! (bid acceptance touches the bid, its siblings, the shipment, and the
//! truck availability) stage each write here. If any write fails, every
//! record already written is restored to its pre-image, keeping the whole
//! mutation all-or-nothing as observed through the gateway.

use loadboard_storage::{StorageError, StorageService};
use serde::Serialize;

use crate::error::EngineError;

pub(crate) struct WriteBatch<'a> {
	storage: &'a StorageService,
	// (namespace, id, pre-image); None means the record did not exist.
	applied: Vec<(String, String, Option<serde_json::Value>)>,
}

impl<'a> WriteBatch<'a> {
	pub fn new(storage: &'a StorageService) -> Self {
		Self {
			storage,
			applied: Vec::new(),
		}
	}

	/// Writes a record, remembering its pre-image. On failure the batch is
	/// rolled back before the error is returned.
	pub async fn put<T: Serialize>(
		&mut self,
		namespace: &str,
		id: &str,
		value: &T,
	) -> Result<(), EngineError> {
		let prior = match self.storage.retrieve::<serde_json::Value>(namespace, id).await {
			Ok(v) => Some(v),
			Err(StorageError::NotFound) => None,
			Err(e) => {
				self.rollback().await;
				return Err(e.into());
			}
		};

		if let Err(e) = self.storage.store(namespace, id, value).await {
			self.rollback().await;
			return Err(e.into());
		}

		self.applied.push((namespace.to_string(), id.to_string(), prior));
		Ok(())
	}

	/// Restores all applied writes, newest first. Restoration is best
	/// effort: the backend already failed once, so further failures are
	/// swallowed rather than cascaded.
	pub async fn rollback(&mut self) {
		for (namespace, id, prior) in self.applied.drain(..).rev() {
			match prior {
				Some(value) => {
					let _ = self.storage.store(&namespace, &id, &value).await;
				}
				None => {
					let _ = self.storage.remove(&namespace, &id).await;
				}
			}
		}
	}
}
