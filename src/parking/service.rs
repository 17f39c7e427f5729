// SPDX-License-Identifier: GPL-3.0-only
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{ConflictKind, ParkingSpotError, Result};
use crate::registry::{Page, PageRequest, ParkingSpot, ParkingSpotInput, ParkingSpotRegistry};

/// Create, read, update and delete parking spots on top of a registry.
///
/// Holds no state of its own between calls; uniqueness is checked here on a
/// best-effort basis and enforced for real by the registry.
#[derive(Clone)]
pub struct ParkingSpotService {
    registry: Arc<dyn ParkingSpotRegistry>,
}

impl ParkingSpotService {
    pub fn new(registry: Arc<dyn ParkingSpotRegistry>) -> Self {
        Self { registry }
    }

    /// Register a new parking spot.
    ///
    /// The checks run in a fixed order and the first failure wins: license
    /// plate, then spot number, then apartment/block.
    pub async fn create(&self, input: ParkingSpotInput) -> Result<ParkingSpot> {
        if let Some(kind) = self.find_conflict(&input).await? {
            warn!(
                license_plate_car = %input.license_plate_car,
                parking_spot_number = %input.parking_spot_number,
                conflict = %kind,
                "Rejected parking spot registration"
            );
            return Err(ParkingSpotError::Conflict(kind));
        }

        let spot = ParkingSpot::from_input(input, Utc::now());
        self.registry.insert(&spot).await?;

        info!(
            spot_id = %spot.id,
            parking_spot_number = %spot.parking_spot_number,
            license_plate_car = %spot.license_plate_car,
            "Parking spot registered"
        );
        Ok(spot)
    }

    async fn find_conflict(&self, input: &ParkingSpotInput) -> Result<Option<ConflictKind>> {
        if self
            .registry
            .exists_by_license_plate_car(&input.license_plate_car)
            .await?
        {
            return Ok(Some(ConflictKind::LicensePlateInUse));
        }
        if self
            .registry
            .exists_by_parking_spot_number(&input.parking_spot_number)
            .await?
        {
            return Ok(Some(ConflictKind::SpotNumberInUse));
        }
        if self
            .registry
            .exists_by_apartment_and_block(&input.apartment, &input.block)
            .await?
        {
            return Ok(Some(ConflictKind::ApartmentBlockInUse));
        }
        Ok(None)
    }

    pub async fn list(&self, request: &PageRequest) -> Result<Page<ParkingSpot>> {
        self.registry.find_all(request).await
    }

    pub async fn get(&self, id: Uuid) -> Result<ParkingSpot> {
        self.registry
            .find_by_id(id)
            .await?
            .ok_or(ParkingSpotError::NotFound)
    }

    /// Replace every caller-owned field of an existing spot. The original id
    /// and registration date are kept. No uniqueness pre-check is made here;
    /// a duplicate is still refused by the registry's constraints.
    pub async fn update(&self, id: Uuid, input: ParkingSpotInput) -> Result<ParkingSpot> {
        let existing = self.get(id).await?;
        let updated = existing.replaced_with(input);
        self.registry.replace(&updated).await?;

        info!(spot_id = %id, "Parking spot updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let existing = self.get(id).await?;
        if !self.registry.delete(existing.id).await? {
            // Removed by someone else between the lookup and the delete
            return Err(ParkingSpotError::NotFound);
        }

        info!(spot_id = %id, "Parking spot deleted");
        Ok(())
    }
}
