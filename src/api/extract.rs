// SPDX-License-Identifier: GPL-3.0-only
use axum::extract::{rejection::JsonRejection, FromRequest};

use crate::error::ParkingSpotError;

/// `axum::Json` whose rejections (bad syntax, null or mistyped fields, wrong
/// content type) surface as validation failures instead of axum's own
/// 415/422 responses.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ParkingSpotError))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for ParkingSpotError {
    fn from(rejection: JsonRejection) -> Self {
        ParkingSpotError::Validation(rejection.body_text())
    }
}
