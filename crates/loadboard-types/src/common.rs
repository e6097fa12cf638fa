//! Common identifier types used throughout the system.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

/// Unique identifier tagged with the entity type it refers to.
///
/// The phantom parameter keeps a `ShipmentId` from being passed where a
/// `TruckId` is expected while the wire representation stays a plain UUID.
/// All trait impls are written by hand so the tag type needs no bounds.
pub struct Id<T> {
	value: uuid::Uuid,
	_phantom: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
	/// Generates a fresh random id.
	pub fn new() -> Self {
		Self {
			value: uuid::Uuid::new_v4(),
			_phantom: PhantomData,
		}
	}

	pub fn from_uuid(value: uuid::Uuid) -> Self {
		Self {
			value,
			_phantom: PhantomData,
		}
	}

	pub fn as_uuid(&self) -> uuid::Uuid {
		self.value
	}
}

impl<T> Default for Id<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> Clone for Id<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
	fn eq(&self, other: &Self) -> bool {
		self.value == other.value
	}
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.value.hash(state);
	}
}

impl<T> fmt::Debug for Id<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Id({})", self.value)
	}
}

impl<T> fmt::Display for Id<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.value)
	}
}

impl<T> FromStr for Id<T> {
	type Err = uuid::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self::from_uuid(uuid::Uuid::parse_str(s)?))
	}
}

impl<T> Serialize for Id<T> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.value.serialize(serializer)
	}
}

impl<'de, T> Deserialize<'de> for Id<T> {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		Ok(Self::from_uuid(uuid::Uuid::deserialize(deserializer)?))
	}
}
