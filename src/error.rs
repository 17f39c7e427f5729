// SPDX-License-Identifier: GPL-3.0-only
use std::fmt;

use thiserror::Error;

/// Which uniqueness rule a write would violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    LicensePlateInUse,
    SpotNumberInUse,
    ApartmentBlockInUse,
}

impl ConflictKind {
    pub fn message(&self) -> &'static str {
        match self {
            ConflictKind::LicensePlateInUse => "License Plate Car is already in use!",
            ConflictKind::SpotNumberInUse => "Parking Spot Car is already in use!",
            ConflictKind::ApartmentBlockInUse => {
                "Parking Spot already registered for this apartment/block!"
            }
        }
    }

    /// Map the column list of a SQLite unique-violation message to the rule it
    /// belongs to. SQLite reports these as
    /// `UNIQUE constraint failed: <table>.<column>[, <table>.<column>...]`,
    /// e.g. `UNIQUE constraint failed: parking_spots.apartment, parking_spots.block`.
    fn from_constraint_message(message: &str) -> Option<Self> {
        let (_, columns) = message.split_once("constraint failed:")?;
        if columns.contains("license_plate_car") {
            Some(ConflictKind::LicensePlateInUse)
        } else if columns.contains("parking_spot_number") {
            Some(ConflictKind::SpotNumberInUse)
        } else if columns.contains("apartment") && columns.contains("block") {
            Some(ConflictKind::ApartmentBlockInUse)
        } else {
            None
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Error, Debug)]
pub enum ParkingSpotError {
    #[error("Conflict: {0}")]
    Conflict(ConflictKind),

    #[error("Parking Spot not found.")]
    NotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Corrupt parking spot record: {0}")]
    Corrupt(String),
}

impl From<sqlx::Error> for ParkingSpotError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                if let Some(kind) = ConflictKind::from_constraint_message(db_err.message()) {
                    return ParkingSpotError::Conflict(kind);
                }
            }
        }
        ParkingSpotError::Database(e)
    }
}

impl From<validator::ValidationErrors> for ParkingSpotError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let codes: Vec<String> = errs.iter().map(|e| e.code.to_string()).collect();
                format!("{} ({})", field, codes.join(", "))
            })
            .collect();
        fields.sort();
        ParkingSpotError::Validation(fields.join("; "))
    }
}

pub type Result<T> = std::result::Result<T, ParkingSpotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_messages() {
        assert_eq!(
            ParkingSpotError::Conflict(ConflictKind::LicensePlateInUse).to_string(),
            "Conflict: License Plate Car is already in use!"
        );
        assert_eq!(
            ParkingSpotError::Conflict(ConflictKind::SpotNumberInUse).to_string(),
            "Conflict: Parking Spot Car is already in use!"
        );
        assert_eq!(
            ParkingSpotError::Conflict(ConflictKind::ApartmentBlockInUse).to_string(),
            "Conflict: Parking Spot already registered for this apartment/block!"
        );
        assert_eq!(ParkingSpotError::NotFound.to_string(), "Parking Spot not found.");
    }

    #[test]
    fn test_conflict_from_sqlite_message() {
        assert_eq!(
            ConflictKind::from_constraint_message(
                "UNIQUE constraint failed: parking_spots.license_plate_car"
            ),
            Some(ConflictKind::LicensePlateInUse)
        );
        assert_eq!(
            ConflictKind::from_constraint_message(
                "UNIQUE constraint failed: parking_spots.parking_spot_number"
            ),
            Some(ConflictKind::SpotNumberInUse)
        );
        assert_eq!(
            ConflictKind::from_constraint_message(
                "UNIQUE constraint failed: parking_spots.apartment, parking_spots.block"
            ),
            Some(ConflictKind::ApartmentBlockInUse)
        );
        assert_eq!(
            ConflictKind::from_constraint_message("UNIQUE constraint failed: parking_spots.id"),
            None
        );
        assert_eq!(ConflictKind::from_constraint_message("disk I/O error"), None);
    }

    #[test]
    fn test_row_not_found_is_database_error() {
        let err = ParkingSpotError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, ParkingSpotError::Database(_)));
    }
}
