// SPDX-License-Identifier: GPL-3.0-only
use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::registry::models::{Page, PageRequest, ParkingSpot};

#[async_trait]
pub trait ParkingSpotRegistry: Send + Sync {
    /// Persist a new parking spot
    async fn insert(&self, spot: &ParkingSpot) -> Result<()>;

    /// Overwrite the stored record with the same id
    async fn replace(&self, spot: &ParkingSpot) -> Result<()>;

    /// Delete by id, returning whether a record was removed
    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ParkingSpot>>;

    /// Fetch one page of records in the requested order
    async fn find_all(&self, request: &PageRequest) -> Result<Page<ParkingSpot>>;

    async fn exists_by_license_plate_car(&self, license_plate_car: &str) -> Result<bool>;

    async fn exists_by_parking_spot_number(&self, parking_spot_number: &str) -> Result<bool>;

    async fn exists_by_apartment_and_block(&self, apartment: &str, block: &str) -> Result<bool>;
}
