// SPDX-License-Identifier: GPL-3.0-only
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::error::ParkingSpotError;

impl IntoResponse for ParkingSpotError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ParkingSpotError::Conflict(_) => (StatusCode::CONFLICT, self.to_string()),
            ParkingSpotError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ParkingSpotError::Validation(msg) => {
                warn!(reason = %msg, "Rejected invalid request");
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ParkingSpotError::Database(e) => {
                error!(error = %e, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            ParkingSpotError::Corrupt(msg) => {
                error!(reason = %msg, "Corrupt parking spot record");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConflictKind;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ParkingSpotError::Conflict(ConflictKind::SpotNumberInUse), StatusCode::CONFLICT),
            (ParkingSpotError::NotFound, StatusCode::NOT_FOUND),
            (ParkingSpotError::Validation("block (blank)".to_string()), StatusCode::BAD_REQUEST),
            (ParkingSpotError::Database(sqlx::Error::PoolTimedOut), StatusCode::INTERNAL_SERVER_ERROR),
            (ParkingSpotError::Corrupt("bad id".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
