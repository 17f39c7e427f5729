// SPDX-License-Identifier: GPL-3.0-only
pub mod models;
pub mod traits;
pub mod sqlite;

pub use models::{Page, PageRequest, ParkingSpot, ParkingSpotInput};
pub use traits::ParkingSpotRegistry;
pub use sqlite::SqliteRegistry;
