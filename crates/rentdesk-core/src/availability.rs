//! # Vehicle Availability
//!
//! Keeps `Vehicle.status` in step with the rentals that reference it.
//!
//! ## State Machine (per vehicle)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │      ┌───────────┐  ongoing rental created / edited onto it  ┌───────┐ │
//! │      │ Available │ ─────────────────────────────────────────►│Rented │ │
//! │      │           │ ◄─────────────────────────────────────────│       │ │
//! │      └───────────┘  ongoing rental deleted, returned, or    └───────┘ │
//! │                     moved to another vehicle                           │
//! │                                                                         │
//! │  Returned rentals never touch the vehicle.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here talks to the store. Each `plan_*` function looks at plain
//! values and returns an [`AvailabilityPlan`] that the command layer applies.
//! When a check fails the error comes back before anything is written.

use crate::error::{CoreError, CoreResult};
use crate::types::{Rental, RentalStatus, VehicleStatus};

/// Vehicle status writes that follow from a rental save or delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AvailabilityPlan {
    /// Vehicle to set back to `Available`.
    pub release: Option<i64>,
    /// Vehicle to set to `Rented`.
    pub claim: Option<i64>,
}

impl AvailabilityPlan {
    /// A plan that writes nothing.
    pub const NONE: AvailabilityPlan = AvailabilityPlan {
        release: None,
        claim: None,
    };

    /// True when applying the plan writes nothing.
    pub fn is_empty(&self) -> bool {
        self.release.is_none() && self.claim.is_none()
    }

    /// Status writes in the order they must be applied.
    pub fn writes(&self) -> impl Iterator<Item = (i64, VehicleStatus)> {
        let release = self.release.map(|id| (id, VehicleStatus::Available));
        let claim = self.claim.map(|id| (id, VehicleStatus::Rented));
        release.into_iter().chain(claim)
    }
}

/// Which vehicle a rental points at and whether it is out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Holding {
    pub vehicle_id: i64,
    pub status: RentalStatus,
}

impl Holding {
    pub fn new(vehicle_id: i64, status: RentalStatus) -> Self {
        Holding { vehicle_id, status }
    }

    fn holds(&self) -> bool {
        self.status == RentalStatus::Ongoing
    }
}

impl From<&Rental> for Holding {
    fn from(rental: &Rental) -> Self {
        Holding::new(rental.vehicle_id, rental.status)
    }
}

fn check_claim(vehicle_id: i64, vehicle_status: Option<VehicleStatus>) -> CoreResult<()> {
    match vehicle_status {
        None => Err(CoreError::VehicleNotFound(vehicle_id)),
        Some(VehicleStatus::Available) => Ok(()),
        Some(status) => Err(CoreError::VehicleUnavailable { vehicle_id, status }),
    }
}

/// Plans a new rental.
///
/// `vehicle_status` is what the store reports for the vehicle, `None` when it
/// does not exist.
///
/// ## Errors
/// For an ongoing rental only:
/// - [`CoreError::VehicleNotFound`] when the vehicle is missing
/// - [`CoreError::VehicleUnavailable`] when it is not `Available`
pub fn plan_create(
    holding: Holding,
    vehicle_status: Option<VehicleStatus>,
) -> CoreResult<AvailabilityPlan> {
    if !holding.holds() {
        return Ok(AvailabilityPlan::NONE);
    }
    check_claim(holding.vehicle_id, vehicle_status)?;
    Ok(AvailabilityPlan {
        release: None,
        claim: Some(holding.vehicle_id),
    })
}

/// Plans an edit of an existing rental.
///
/// ## Transitions
/// ```text
/// before              after               writes
/// ─────────────────── ─────────────────── ───────────────────────────────
/// ongoing on V        ongoing on V        none
/// ongoing on V        returned            release V
/// ongoing on V        ongoing on W        check W, release V, claim W
/// returned            ongoing on W        check W, claim W
/// returned            returned            none
/// ```
///
/// `after_vehicle_status` is the store's status for `after.vehicle_id`; it is
/// only consulted when a claim is needed.
pub fn plan_update(
    before: Holding,
    after: Holding,
    after_vehicle_status: Option<VehicleStatus>,
) -> CoreResult<AvailabilityPlan> {
    let same_vehicle = before.vehicle_id == after.vehicle_id;

    let claim = if after.holds() && !(before.holds() && same_vehicle) {
        check_claim(after.vehicle_id, after_vehicle_status)?;
        Some(after.vehicle_id)
    } else {
        None
    };

    let release = if before.holds() && !(after.holds() && same_vehicle) {
        Some(before.vehicle_id)
    } else {
        None
    };

    Ok(AvailabilityPlan { release, claim })
}

/// Plans the removal of a rental: an ongoing one frees its vehicle.
pub fn plan_delete(rental: &Rental) -> AvailabilityPlan {
    AvailabilityPlan {
        release: rental.holds_vehicle().then_some(rental.vehicle_id),
        claim: None,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const ONGOING: RentalStatus = RentalStatus::Ongoing;
    const RETURNED: RentalStatus = RentalStatus::Returned;

    fn rental(vehicle_id: i64, status: RentalStatus) -> Rental {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Rental {
            id: 1,
            vehicle_id,
            customer_id: 1,
            start_date: day,
            expected_return_date: day,
            actual_return_date: None,
            status,
            amount_cents: None,
        }
    }

    #[test]
    fn test_create_ongoing_claims_available_vehicle() {
        let plan = plan_create(Holding::new(3, ONGOING), Some(VehicleStatus::Available)).unwrap();
        assert_eq!(plan.claim, Some(3));
        assert_eq!(plan.release, None);
        assert_eq!(plan.writes().collect::<Vec<_>>(), vec![(3, VehicleStatus::Rented)]);
    }

    #[test]
    fn test_create_ongoing_on_rented_vehicle_is_rejected() {
        let err = plan_create(Holding::new(3, ONGOING), Some(VehicleStatus::Rented)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::VehicleUnavailable {
                vehicle_id: 3,
                status: VehicleStatus::Rented
            }
        ));
    }

    #[test]
    fn test_create_ongoing_on_missing_vehicle_is_rejected() {
        let err = plan_create(Holding::new(9, ONGOING), None).unwrap_err();
        assert!(matches!(err, CoreError::VehicleNotFound(9)));
    }

    #[test]
    fn test_create_returned_skips_check() {
        let plan = plan_create(Holding::new(3, RETURNED), Some(VehicleStatus::Rented)).unwrap();
        assert!(plan.is_empty());
        let plan = plan_create(Holding::new(3, RETURNED), None).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_update_same_vehicle_still_ongoing_is_noop() {
        // The vehicle reads as rented because this rental holds it.
        let plan = plan_update(
            Holding::new(3, ONGOING),
            Holding::new(3, ONGOING),
            Some(VehicleStatus::Rented),
        )
        .unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_update_to_returned_releases() {
        let plan = plan_update(
            Holding::new(3, ONGOING),
            Holding::new(3, RETURNED),
            Some(VehicleStatus::Rented),
        )
        .unwrap();
        assert_eq!(plan.release, Some(3));
        assert_eq!(plan.claim, None);
    }

    #[test]
    fn test_update_move_releases_old_and_claims_new() {
        let plan = plan_update(
            Holding::new(3, ONGOING),
            Holding::new(4, ONGOING),
            Some(VehicleStatus::Available),
        )
        .unwrap();
        assert_eq!(
            plan.writes().collect::<Vec<_>>(),
            vec![(3, VehicleStatus::Available), (4, VehicleStatus::Rented)]
        );
    }

    #[test]
    fn test_update_move_onto_rented_vehicle_is_rejected() {
        let err = plan_update(
            Holding::new(3, ONGOING),
            Holding::new(4, ONGOING),
            Some(VehicleStatus::Rented),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::VehicleUnavailable { vehicle_id: 4, .. }));
    }

    #[test]
    fn test_update_reopen_returned_rental_claims() {
        let plan = plan_update(
            Holding::new(3, RETURNED),
            Holding::new(3, ONGOING),
            Some(VehicleStatus::Available),
        )
        .unwrap();
        assert_eq!(plan.claim, Some(3));
        assert_eq!(plan.release, None);

        let err = plan_update(Holding::new(3, RETURNED), Holding::new(3, ONGOING), None)
            .unwrap_err();
        assert!(matches!(err, CoreError::VehicleNotFound(3)));
    }

    #[test]
    fn test_update_returned_to_returned_is_noop() {
        let plan = plan_update(Holding::new(3, RETURNED), Holding::new(5, RETURNED), None).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_delete_ongoing_releases() {
        let plan = plan_delete(&rental(7, ONGOING));
        assert_eq!(plan.release, Some(7));
        assert_eq!(plan.claim, None);
    }

    #[test]
    fn test_delete_returned_leaves_vehicle() {
        assert!(plan_delete(&rental(7, RETURNED)).is_empty());
    }

    #[test]
    fn test_holding_from_rental() {
        let r = rental(7, RETURNED);
        assert_eq!(Holding::from(&r), Holding::new(7, RETURNED));
    }
}
