use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};
use serde::Serialize;
use wayfare_quote::{Quote, QuoteRequest};

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub ok: bool,
    pub quote: Quote,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new().route("/quote", post(create_quote))
}

/// POST /quote
/// Price base fare + extras + fees. Safe to retry: same request, same quote.
async fn create_quote(
    State(state): State<AppState>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<QuoteResponse>, AppError> {
    let Json(req) = payload?;
    let quote = state.quotes.build(&req)?;

    tracing::info!(
        "Quoted {} {} (extras {}, fees {})",
        quote.total(),
        quote.currency(),
        quote.extras_total(),
        quote.fees_total()
    );
    Ok(Json(QuoteResponse { ok: true, quote }))
}
