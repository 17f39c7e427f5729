// SPDX-License-Identifier: GPL-3.0-only
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{ParkingSpotError, Result};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 2000;

/// A parking spot assigned to one resident vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSpot {
    /// Server-assigned identifier, immutable after creation
    pub id: Uuid,

    pub parking_spot_number: String,

    pub license_plate_car: String,

    pub brand_car: String,

    pub model_car: String,

    pub color_car: String,

    /// Server-assigned creation instant (UTC), never changed on update
    pub registration_date: DateTime<Utc>,

    /// Name of the resident the spot belongs to
    pub responsible_name: String,

    pub apartment: String,

    pub block: String,
}

/// Caller-supplied fields of a parking spot. Anything else in the request
/// body, including `id` and `registrationDate`, is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ParkingSpotInput {
    #[validate(length(max = 10), custom(function = "not_blank"))]
    pub parking_spot_number: String,

    #[validate(length(max = 7), custom(function = "not_blank"))]
    pub license_plate_car: String,

    #[validate(length(max = 70), custom(function = "not_blank"))]
    pub brand_car: String,

    #[validate(length(max = 70), custom(function = "not_blank"))]
    pub model_car: String,

    #[validate(length(max = 70), custom(function = "not_blank"))]
    pub color_car: String,

    #[validate(length(max = 130), custom(function = "not_blank"))]
    pub responsible_name: String,

    #[validate(length(max = 30), custom(function = "not_blank"))]
    pub apartment: String,

    #[validate(length(max = 30), custom(function = "not_blank"))]
    pub block: String,
}

fn not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

impl ParkingSpot {
    /// Build a new record from caller input, assigning a fresh id and the
    /// given registration instant.
    pub fn from_input(input: ParkingSpotInput, registration_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            parking_spot_number: input.parking_spot_number,
            license_plate_car: input.license_plate_car,
            brand_car: input.brand_car,
            model_car: input.model_car,
            color_car: input.color_car,
            registration_date,
            responsible_name: input.responsible_name,
            apartment: input.apartment,
            block: input.block,
        }
    }

    /// Replace every caller-owned field, keeping `id` and `registration_date`.
    pub fn replaced_with(&self, input: ParkingSpotInput) -> Self {
        Self {
            id: self.id,
            parking_spot_number: input.parking_spot_number,
            license_plate_car: input.license_plate_car,
            brand_car: input.brand_car,
            model_car: input.model_car,
            color_car: input.color_car,
            registration_date: self.registration_date,
            responsible_name: input.responsible_name,
            apartment: input.apartment,
            block: input.block,
        }
    }
}

/// Record attributes a listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    ParkingSpotNumber,
    LicensePlateCar,
    BrandCar,
    ModelCar,
    ColorCar,
    RegistrationDate,
    ResponsibleName,
    Apartment,
    Block,
}

impl SortField {
    /// Column backing this attribute. Only these names ever reach SQL.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::ParkingSpotNumber => "parking_spot_number",
            SortField::LicensePlateCar => "license_plate_car",
            SortField::BrandCar => "brand_car",
            SortField::ModelCar => "model_car",
            SortField::ColorCar => "color_car",
            SortField::RegistrationDate => "registration_date",
            SortField::ResponsibleName => "responsible_name",
            SortField::Apartment => "apartment",
            SortField::Block => "block",
        }
    }
}

impl FromStr for SortField {
    type Err = ParkingSpotError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "id" => Ok(SortField::Id),
            "parkingSpotNumber" => Ok(SortField::ParkingSpotNumber),
            "licensePlateCar" => Ok(SortField::LicensePlateCar),
            "brandCar" => Ok(SortField::BrandCar),
            "modelCar" => Ok(SortField::ModelCar),
            "colorCar" => Ok(SortField::ColorCar),
            "registrationDate" => Ok(SortField::RegistrationDate),
            "responsibleName" => Ok(SortField::ResponsibleName),
            "apartment" => Ok(SortField::Apartment),
            "block" => Ok(SortField::Block),
            other => Err(ParkingSpotError::Validation(format!("unknown sort field '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ParkingSpotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(ParkingSpotError::Validation(format!(
                "unknown sort direction '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for Sort {
    fn default() -> Self {
        Self {
            field: SortField::Id,
            direction: SortDirection::Asc,
        }
    }
}

impl FromStr for Sort {
    type Err = ParkingSpotError;

    /// Accepts `field` or `field,direction`, e.g. `registrationDate,desc`.
    fn from_str(s: &str) -> Result<Self> {
        let (field, direction) = match s.split_once(',') {
            Some((field, direction)) => (field.trim(), direction.trim().parse()?),
            None => (s.trim(), SortDirection::default()),
        };
        Ok(Self {
            field: field.parse()?,
            direction,
        })
    }
}

/// A 0-based page window over the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Sort,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Sort::default(),
        }
    }
}

impl PageRequest {
    /// Resolve caller paging parameters. A missing or zero size falls back to
    /// `default_size`; sizes above `max_size` are clamped.
    pub fn resolve(
        page: Option<u32>,
        size: Option<u32>,
        sort: Option<&str>,
        default_size: u32,
        max_size: u32,
    ) -> Result<Self> {
        let size = match size {
            Some(0) | None => default_size,
            Some(size) => size,
        };
        let sort = match sort {
            Some(sort) if !sort.trim().is_empty() => sort.parse()?,
            _ => Sort::default(),
        };
        Ok(Self {
            page: page.unwrap_or(0),
            size: size.clamp(1, max_size.max(1)),
            sort,
        })
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }
}

/// One page of results together with the totals needed to walk the rest.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let size = u64::from(request.size.max(1));
        let total_pages = total_elements.div_ceil(size);
        Self {
            number: request.page,
            size: request.size,
            total_elements,
            total_pages,
            number_of_elements: content.len(),
            first: request.page == 0,
            last: u64::from(request.page) + 1 >= total_pages,
            empty: content.is_empty(),
            content,
        }
    }
}
