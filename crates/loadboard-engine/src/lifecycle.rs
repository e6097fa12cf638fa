//! Shipment lifecycle state machine.
//!
//! The single place transitions are validated. Call sites never compare
//! status strings; they ask this module whether a move is legal and fail
//! with [`EngineError::InvalidTransition`] otherwise.

use loadboard_types::ShipmentStatus;

use crate::error::EngineError;

/// Validates a requested lifecycle transition.
///
/// Legal moves:
/// `open -> assigned -> in_transit -> delivered`, plus
/// `open -> cancelled` and `assigned -> cancelled`.
pub fn validate_transition(
	from: ShipmentStatus,
	to: ShipmentStatus,
) -> Result<(), EngineError> {
	use ShipmentStatus::*;

	let legal = matches!(
		(from, to),
		(Open, Assigned)
			| (Assigned, InTransit)
			| (InTransit, Delivered)
			| (Open, Cancelled)
			| (Assigned, Cancelled)
	);

	if legal {
		Ok(())
	} else {
		Err(EngineError::InvalidTransition { from, to })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ShipmentStatus::*;

	const ALL: [ShipmentStatus; 5] = [Open, Assigned, InTransit, Delivered, Cancelled];

	#[test]
	fn exactly_five_transitions_are_legal() {
		let legal = [
			(Open, Assigned),
			(Assigned, InTransit),
			(InTransit, Delivered),
			(Open, Cancelled),
			(Assigned, Cancelled),
		];

		for from in ALL {
			for to in ALL {
				let expected = legal.contains(&(from, to));
				assert_eq!(
					validate_transition(from, to).is_ok(),
					expected,
					"{} -> {}",
					from,
					to
				);
			}
		}
	}

	#[test]
	fn terminal_states_accept_nothing() {
		for to in ALL {
			assert!(validate_transition(Delivered, to).is_err());
			assert!(validate_transition(Cancelled, to).is_err());
		}
	}

	#[test]
	fn invalid_transition_reports_both_ends() {
		match validate_transition(Delivered, Open) {
			Err(EngineError::InvalidTransition { from, to }) => {
				assert_eq!(from, Delivered);
				assert_eq!(to, Open);
			}
			other => panic!("expected InvalidTransition, got {:?}", other),
		}
	}
}
