//! Authentication types supplied by the external identity provider.
//!
//! The engine never manages credentials; it receives an already
//! authenticated [`Session`] with every call and authorizes by comparing
//! the principal to resource owners.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::common::Id;

/// Marker for principal ids issued by the identity provider.
pub struct User;

pub type PrincipalId = Id<User>;

/// Role assigned to a principal at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	/// Posts shipment requests.
	Shipper,
	/// Owns trucks and bids on shipments.
	Driver,
	/// May moderate: cancel any shipment, accept bids on any shipment.
	Admin,
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			Role::Shipper => "shipper",
			Role::Driver => "driver",
			Role::Admin => "admin",
		};
		write!(f, "{}", s)
	}
}

impl FromStr for Role {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"shipper" => Ok(Role::Shipper),
			"driver" => Ok(Role::Driver),
			"admin" => Ok(Role::Admin),
			other => Err(format!("unknown role: {}", other)),
		}
	}
}

/// An authenticated identity: who is calling and in what capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
	pub id: PrincipalId,
	pub role: Role,
}

/// Explicit session value passed into every engine operation.
///
/// Replaces ambient auth state: callers construct it from whatever the
/// identity provider handed them and thread it through.
#[derive(Debug, Clone, Copy)]
pub struct Session {
	pub principal: Principal,
}

impl Session {
	pub fn new(id: PrincipalId, role: Role) -> Self {
		Self {
			principal: Principal { id, role },
		}
	}

	pub fn principal_id(&self) -> PrincipalId {
		self.principal.id
	}

	pub fn role(&self) -> Role {
		self.principal.role
	}

	pub fn is_admin(&self) -> bool {
		self.principal.role == Role::Admin
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn role_parses_from_wire_strings() {
		assert_eq!("shipper".parse::<Role>().unwrap(), Role::Shipper);
		assert_eq!("driver".parse::<Role>().unwrap(), Role::Driver);
		assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
		assert!("superuser".parse::<Role>().is_err());
	}

	#[test]
	fn role_serializes_lowercase() {
		assert_eq!(serde_json::to_string(&Role::Driver).unwrap(), "\"driver\"");
	}
}
