//! Shared response envelope types for API handlers.
//!
//! Public reads use the `{ "data": ... }` envelope. Admin operations answer
//! with `{ "success": true, "data": ... }` so the admin client can branch on
//! `success` for both outcomes (failures come from [`AppError`](crate::error::AppError)).

use serde::Serialize;
use vowreel_core::types::DbId;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "success": true, "data": T }` envelope for admin operations.
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Payload of a successful delete.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: DbId,
    pub slug: String,
}
