//! Persistence gateway for the loadboard system.
//!
//! This crate provides the abstraction the matching engine reads and
//! writes through, supporting different backend implementations such as
//! in-memory or file-based storage.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod file;
	pub mod memory;
}

pub use implementations::file::FileStorage;
pub use implementations::memory::MemoryStorage;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
	/// Error that occurs when a requested item is not found.
	#[error("Not found")]
	NotFound,
	/// Error that occurs during serialization/deserialization.
	#[error("Serialization error: {0}")]
	Serialization(String),
	/// Error that occurs in the storage backend.
	#[error("Backend error: {0}")]
	Backend(String),
}

/// Trait defining the low-level interface for storage backends.
///
/// Backends are plain key-value stores; keys are `namespace:id` strings
/// assembled by [`StorageService`]. `scan` returns every value whose key
/// starts with the given prefix, which is what the engine's listing
/// operations are built on.
#[async_trait]
pub trait StorageInterface: Send + Sync {
	/// Retrieves raw bytes for the given key.
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError>;

	/// Stores raw bytes under the given key, replacing any prior value.
	async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;

	/// Deletes the value associated with the given key. Deleting a missing
	/// key is not an error.
	async fn delete(&self, key: &str) -> Result<(), StorageError>;

	/// Checks if a key exists in storage.
	async fn exists(&self, key: &str) -> Result<bool, StorageError>;

	/// Returns all values whose key starts with `prefix`, ordered by key.
	async fn scan(&self, prefix: &str) -> Result<Vec<Vec<u8>>, StorageError>;
}

/// High-level storage service that provides typed operations.
///
/// Wraps a low-level backend and handles JSON serialization plus
/// `namespace:id` key assembly.
pub struct StorageService {
	backend: Box<dyn StorageInterface>,
}

impl StorageService {
	/// Creates a new StorageService with the specified backend.
	pub fn new(backend: Box<dyn StorageInterface>) -> Self {
		Self { backend }
	}

	fn key(namespace: &str, id: &str) -> String {
		format!("{}:{}", namespace, id)
	}

	/// Stores a serializable value under `namespace:id`.
	pub async fn store<T: Serialize>(
		&self,
		namespace: &str,
		id: &str,
		data: &T,
	) -> Result<(), StorageError> {
		let bytes =
			serde_json::to_vec(data).map_err(|e| StorageError::Serialization(e.to_string()))?;
		self.backend.set_bytes(&Self::key(namespace, id), bytes).await
	}

	/// Retrieves and deserializes a value from storage.
	pub async fn retrieve<T: DeserializeOwned>(
		&self,
		namespace: &str,
		id: &str,
	) -> Result<T, StorageError> {
		let bytes = self.backend.get_bytes(&Self::key(namespace, id)).await?;
		serde_json::from_slice(&bytes).map_err(|e| StorageError::Serialization(e.to_string()))
	}

	/// Removes a value from storage.
	pub async fn remove(&self, namespace: &str, id: &str) -> Result<(), StorageError> {
		self.backend.delete(&Self::key(namespace, id)).await
	}

	/// Checks whether `namespace:id` holds a value.
	pub async fn exists(&self, namespace: &str, id: &str) -> Result<bool, StorageError> {
		self.backend.exists(&Self::key(namespace, id)).await
	}

	/// Retrieves every value stored under the given namespace.
	pub async fn retrieve_all<T: DeserializeOwned>(
		&self,
		namespace: &str,
	) -> Result<Vec<T>, StorageError> {
		let prefix = format!("{}:", namespace);
		let values = self.backend.scan(&prefix).await?;
		values
			.iter()
			.map(|bytes| {
				serde_json::from_slice(bytes)
					.map_err(|e| StorageError::Serialization(e.to_string()))
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde::Deserialize;

	#[derive(Debug, PartialEq, Serialize, Deserialize)]
	struct Record {
		name: String,
		qty: u32,
	}

	#[tokio::test]
	async fn typed_round_trip_through_memory_backend() {
		let storage = StorageService::new(Box::new(MemoryStorage::new()));
		let record = Record {
			name: "pallet".into(),
			qty: 4,
		};

		storage.store("records", "r1", &record).await.unwrap();
		assert!(storage.exists("records", "r1").await.unwrap());

		let back: Record = storage.retrieve("records", "r1").await.unwrap();
		assert_eq!(back, record);

		storage.remove("records", "r1").await.unwrap();
		assert!(matches!(
			storage.retrieve::<Record>("records", "r1").await,
			Err(StorageError::NotFound)
		));
	}

	#[tokio::test]
	async fn retrieve_all_scans_only_the_namespace() {
		let storage = StorageService::new(Box::new(MemoryStorage::new()));
		for i in 0..3 {
			let record = Record {
				name: format!("r{}", i),
				qty: i,
			};
			storage
				.store("records", &format!("r{}", i), &record)
				.await
				.unwrap();
		}
		storage
			.store("other", "x", &Record { name: "x".into(), qty: 9 })
			.await
			.unwrap();

		let all: Vec<Record> = storage.retrieve_all("records").await.unwrap();
		assert_eq!(all.len(), 3);
		assert!(all.iter().all(|r| r.qty < 3));
	}
}
