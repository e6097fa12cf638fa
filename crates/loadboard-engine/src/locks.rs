//! Keyed async locks with bounded acquisition.
//!
//! One mutex per entity id serializes all writes touching that entity.
//! Acquisition is bounded: a caller that cannot take the lock within the
//! configured timeout gets [`EngineError::Contention`] instead of waiting
//! indefinitely.

use dashmap::DashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::error::EngineError;

pub(crate) struct KeyedLocks<K> {
	locks: DashMap<K, Arc<Mutex<()>>>,
	timeout: Duration,
}

impl<K: Eq + Hash + Clone> KeyedLocks<K> {
	pub fn new(timeout: Duration) -> Self {
		Self {
			locks: DashMap::new(),
			timeout,
		}
	}

	/// Acquires the lock for `key`, waiting at most the configured timeout.
	pub async fn acquire(&self, key: K) -> Result<OwnedMutexGuard<()>, EngineError> {
		// Clone the Arc out before awaiting so the map shard is not held
		// across the await point.
		let lock = self.locks.entry(key).or_default().clone();

		tokio::time::timeout(self.timeout, lock.lock_owned())
			.await
			.map_err(|_| EngineError::Contention)
	}
}
