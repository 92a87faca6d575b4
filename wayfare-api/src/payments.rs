use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use wayfare_booking::Checkout;
use wayfare_core::{choose_payment_provider, PaymentDecision};
use wayfare_shared::CurrencyCode;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RouterQuery {
    pub method: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RouterResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub decision: PaymentDecision,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    pub amount: Decimal,
    pub currency: String,
    pub method: Option<String>,
    pub booking_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PaymentIntentResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub checkout: Checkout,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payment-router", get(route_payment))
        .route("/payments/intent", post(create_payment_intent))
}

/// GET /payment-router?method=&currency=
async fn route_payment(
    query: Result<Query<RouterQuery>, QueryRejection>,
) -> Result<Json<RouterResponse>, AppError> {
    let Query(query) = query?;
    let decision = choose_payment_provider(query.method.as_deref(), query.currency.as_deref());
    Ok(Json(RouterResponse { ok: true, decision }))
}

/// POST /payments/intent
/// Route the payment, then open an intent with the chosen provider.
async fn create_payment_intent(
    State(state): State<AppState>,
    payload: Result<Json<PaymentIntentRequest>, JsonRejection>,
) -> Result<Json<PaymentIntentResponse>, AppError> {
    let Json(req) = payload?;
    let currency = req.currency.parse::<CurrencyCode>().map_err(wayfare_core::CoreError::from)?;

    if let Some(booking_id) = req.booking_id.as_deref() {
        if state.bookings.get(booking_id).await?.is_none() {
            return Err(AppError::NotFoundError(format!("Booking {} not found", booking_id)));
        }
    }

    let checkout = state
        .payments
        .checkout(req.method.as_deref(), req.amount, &currency, req.booking_id.as_deref())
        .await?;

    Ok(Json(PaymentIntentResponse { ok: true, checkout }))
}
