// SPDX-License-Identifier: GPL-3.0-only
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::config::Config;
use crate::registry::{ParkingSpotInput, SqliteRegistry};

/// Create an in-memory SQLite registry for testing
pub async fn setup_test_registry() -> SqliteRegistry {
    SqliteRegistry::new(&PathBuf::from(":memory:"), 1)
        .await
        .expect("Failed to open in-memory registry")
}

/// Create a test configuration bound to an auto-assigned local port
pub fn create_test_config() -> Config {
    Config {
        database_path: PathBuf::from(":memory:"),
        api_bind: SocketAddr::from(([127, 0, 0, 1], 0)),
        log_level: "error".to_string(), // Reduce log noise in tests
        ..Config::default()
    }
}

/// A valid registration request with the given uniqueness-relevant fields
pub fn sample_input(
    license_plate_car: &str,
    parking_spot_number: &str,
    apartment: &str,
    block: &str,
) -> ParkingSpotInput {
    ParkingSpotInput {
        parking_spot_number: parking_spot_number.to_string(),
        license_plate_car: license_plate_car.to_string(),
        brand_car: "Fiat".to_string(),
        model_car: "Uno".to_string(),
        color_car: "Red".to_string(),
        responsible_name: "Jane Doe".to_string(),
        apartment: apartment.to_string(),
        block: block.to_string(),
    }
}
