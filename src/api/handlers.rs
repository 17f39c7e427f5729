// SPDX-License-Identifier: GPL-3.0-only
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::parking::ParkingSpotService;
use crate::registry::{Page, PageRequest, ParkingSpot, ParkingSpotInput};

pub const DELETED_MESSAGE: &str = "Parking Spot successfully deleted.";

/// Paging parameters of `GET /parking-spot`, e.g. `?page=0&size=20&sort=block,desc`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

pub struct ApiHandlers {
    service: ParkingSpotService,
    default_page_size: u32,
    max_page_size: u32,
}

impl ApiHandlers {
    pub fn new(service: ParkingSpotService, default_page_size: u32, max_page_size: u32) -> Self {
        Self {
            service,
            default_page_size,
            max_page_size,
        }
    }
}

impl ApiHandlers {
    pub async fn create_parking_spot(
        &self,
        input: ParkingSpotInput,
    ) -> Result<(StatusCode, Json<ParkingSpot>)> {
        input.validate()?;
        info!(license_plate_car = %input.license_plate_car, "Create parking spot request received");

        let spot = self.service.create(input).await?;
        Ok((StatusCode::CREATED, Json(spot)))
    }

    pub async fn list_parking_spots(&self, query: ListQuery) -> Result<Json<Page<ParkingSpot>>> {
        let request = PageRequest::resolve(
            query.page,
            query.size,
            query.sort.as_deref(),
            self.default_page_size,
            self.max_page_size,
        )?;

        Ok(Json(self.service.list(&request).await?))
    }

    pub async fn get_parking_spot(&self, id: Uuid) -> Result<Json<ParkingSpot>> {
        Ok(Json(self.service.get(id).await?))
    }

    pub async fn update_parking_spot(
        &self,
        id: Uuid,
        input: ParkingSpotInput,
    ) -> Result<Json<ParkingSpot>> {
        input.validate()?;
        Ok(Json(self.service.update(id, input).await?))
    }

    pub async fn delete_parking_spot(&self, id: Uuid) -> Result<(StatusCode, &'static str)> {
        self.service.delete(id).await?;
        Ok((StatusCode::OK, DELETED_MESSAGE))
    }
}
