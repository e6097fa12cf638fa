//! In-memory storage backend.

use crate::{StorageError, StorageInterface};
use async_trait::async_trait;
use dashmap::DashMap;

/// Non-persistent backend holding everything in a concurrent map.
///
/// The default for tests and single-process deployments that do not need
/// durability.
#[derive(Default)]
pub struct MemoryStorage {
	entries: DashMap<String, Vec<u8>>,
}

impl MemoryStorage {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl StorageInterface for MemoryStorage {
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError> {
		self.entries
			.get(key)
			.map(|entry| entry.value().clone())
			.ok_or(StorageError::NotFound)
	}

	async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
		self.entries.insert(key.to_string(), value);
		Ok(())
	}

	async fn delete(&self, key: &str) -> Result<(), StorageError> {
		self.entries.remove(key);
		Ok(())
	}

	async fn exists(&self, key: &str) -> Result<bool, StorageError> {
		Ok(self.entries.contains_key(key))
	}

	async fn scan(&self, prefix: &str) -> Result<Vec<Vec<u8>>, StorageError> {
		let mut matches: Vec<(String, Vec<u8>)> = self
			.entries
			.iter()
			.filter(|entry| entry.key().starts_with(prefix))
			.map(|entry| (entry.key().clone(), entry.value().clone()))
			.collect();
		// DashMap iteration order is arbitrary; callers expect key order.
		matches.sort_by(|a, b| a.0.cmp(&b.0));
		Ok(matches.into_iter().map(|(_, v)| v).collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn scan_is_prefix_scoped_and_ordered() {
		let storage = MemoryStorage::new();
		storage.set_bytes("b:2", vec![2]).await.unwrap();
		storage.set_bytes("b:1", vec![1]).await.unwrap();
		storage.set_bytes("a:1", vec![0]).await.unwrap();

		let values = storage.scan("b:").await.unwrap();
		assert_eq!(values, vec![vec![1], vec![2]]);
	}

	#[tokio::test]
	async fn delete_is_idempotent() {
		let storage = MemoryStorage::new();
		storage.set_bytes("k", vec![1]).await.unwrap();
		storage.delete("k").await.unwrap();
		storage.delete("k").await.unwrap();
		assert!(!storage.exists("k").await.unwrap());
	}
}
