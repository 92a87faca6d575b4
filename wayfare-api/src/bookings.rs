use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use wayfare_core::supplier::{BookingRecord, BookingRequest};

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoBookingResponse {
    pub ok: bool,
    pub booking_id: String,
    pub booking_reference: String,
    pub booking: BookingRecord,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub ok: bool,
    pub booking: BookingRecord,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings/demo", post(create_demo_booking))
        .route("/bookings/{id}", get(get_booking))
}

/// POST /bookings/demo
/// Confirm a booking for demo inventory without touching a real supplier.
async fn create_demo_booking(
    State(state): State<AppState>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<DemoBookingResponse>, AppError> {
    let Json(req) = payload?;
    let booking = state.demo_supplier.create_booking(&req).await?;
    state.bookings.insert(booking.clone()).await?;

    Ok(Json(DemoBookingResponse {
        ok: true,
        booking_id: booking.booking_id.clone(),
        booking_reference: booking.booking_reference.clone(),
        booking,
    }))
}

/// GET /bookings/{id}
async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state
        .bookings
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Booking {} not found", id)))?;

    Ok(Json(BookingResponse { ok: true, booking }))
}
