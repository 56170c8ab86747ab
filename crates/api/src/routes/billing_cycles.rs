//! Billing cycle routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::info;

use crate::AppState;
use crate::dto::{BillingCycleResponse, CountResponse, TotalsResponse};
use crate::error::map_billing_error;
use crate::extract::Payload;
use crate::messages::Locale;
use crate::middleware::auth::AuthUser;
use mymoney_core::billing::{BillingCycleInput, BillingCycleService, BillingError};
use mymoney_shared::types::BillingCycleId;

/// Creates the billing cycle router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/billingCycles", get(list_cycles).post(create_cycle))
        .route("/billingCycles/count", get(count_cycles))
        .route("/billingCycles/summary", get(summary))
        .route(
            "/billingCycles/{id}",
            get(get_cycle).put(update_cycle).delete(delete_cycle),
        )
        .route("/billingCycles/{id}/duplicate", post(duplicate_cycle))
}

/// Parses a path id. Anything that is not a UUID names no cycle.
fn parse_id(raw: &str) -> Result<BillingCycleId, BillingError> {
    raw.parse().map_err(|_| BillingError::NotFound)
}

/// GET /billingCycles - List the caller's cycles, newest first.
async fn list_cycles(State(state): State<AppState>, auth: AuthUser, locale: Locale) -> Response {
    let service = BillingCycleService::new(state.billing_cycles.as_ref());
    match service.list(auth.user_id()).await {
        Ok(cycles) => {
            let body: Vec<BillingCycleResponse> =
                cycles.into_iter().map(BillingCycleResponse::from).collect();
            Json(body).into_response()
        }
        Err(e) => map_billing_error(&e, locale),
    }
}

/// POST /billingCycles - Validate and store a new cycle.
async fn create_cycle(
    State(state): State<AppState>,
    auth: AuthUser,
    locale: Locale,
    Payload(payload): Payload<BillingCycleInput>,
) -> Response {
    let service = BillingCycleService::new(state.billing_cycles.as_ref());
    match service.create(auth.user_id(), &payload).await {
        Ok(cycle) => {
            info!(user_id = %auth.user_id(), cycle_id = %cycle.id, "Billing cycle created");
            (StatusCode::CREATED, Json(BillingCycleResponse::from(cycle))).into_response()
        }
        Err(e) => map_billing_error(&e, locale),
    }
}

/// GET /billingCycles/count - Number of the caller's cycles.
async fn count_cycles(State(state): State<AppState>, auth: AuthUser, locale: Locale) -> Response {
    let service = BillingCycleService::new(state.billing_cycles.as_ref());
    match service.count(auth.user_id()).await {
        Ok(value) => Json(CountResponse { value }).into_response(),
        Err(e) => map_billing_error(&e, locale),
    }
}

/// GET /billingCycles/summary - Totals across the caller's cycles.
async fn summary(State(state): State<AppState>, auth: AuthUser, locale: Locale) -> Response {
    let service = BillingCycleService::new(state.billing_cycles.as_ref());
    match service.summary(auth.user_id()).await {
        Ok(totals) => Json(TotalsResponse::from(totals)).into_response(),
        Err(e) => map_billing_error(&e, locale),
    }
}

/// GET /billingCycles/{id} - One cycle with its totals.
async fn get_cycle(
    State(state): State<AppState>,
    auth: AuthUser,
    locale: Locale,
    Path(id): Path<String>,
) -> Response {
    let service = BillingCycleService::new(state.billing_cycles.as_ref());
    let result = match parse_id(&id) {
        Ok(id) => service.get(auth.user_id(), id).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(cycle) => Json(BillingCycleResponse::from(cycle)).into_response(),
        Err(e) => map_billing_error(&e, locale),
    }
}

/// PUT /billingCycles/{id} - Replace a cycle.
async fn update_cycle(
    State(state): State<AppState>,
    auth: AuthUser,
    locale: Locale,
    Path(id): Path<String>,
    Payload(payload): Payload<BillingCycleInput>,
) -> Response {
    let service = BillingCycleService::new(state.billing_cycles.as_ref());
    let result = match parse_id(&id) {
        Ok(id) => service.update(auth.user_id(), id, &payload).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(cycle) => {
            info!(user_id = %auth.user_id(), cycle_id = %cycle.id, "Billing cycle updated");
            Json(BillingCycleResponse::from(cycle)).into_response()
        }
        Err(e) => map_billing_error(&e, locale),
    }
}

/// DELETE /billingCycles/{id} - Remove a cycle.
async fn delete_cycle(
    State(state): State<AppState>,
    auth: AuthUser,
    locale: Locale,
    Path(id): Path<String>,
) -> Response {
    let service = BillingCycleService::new(state.billing_cycles.as_ref());
    let result = match parse_id(&id) {
        Ok(id) => service.delete(auth.user_id(), id).await.map(|()| id),
        Err(e) => Err(e),
    };
    match result {
        Ok(id) => {
            info!(user_id = %auth.user_id(), cycle_id = %id, "Billing cycle deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => map_billing_error(&e, locale),
    }
}

/// POST /billingCycles/{id}/duplicate - Store a next-period template.
async fn duplicate_cycle(
    State(state): State<AppState>,
    auth: AuthUser,
    locale: Locale,
    Path(id): Path<String>,
) -> Response {
    let service = BillingCycleService::new(state.billing_cycles.as_ref());
    let result = match parse_id(&id) {
        Ok(id) => service.duplicate(auth.user_id(), id, Utc::now()).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(cycle) => {
            info!(
                user_id = %auth.user_id(),
                source_id = %id,
                cycle_id = %cycle.id,
                "Billing cycle duplicated"
            );
            (StatusCode::CREATED, Json(BillingCycleResponse::from(cycle))).into_response()
        }
        Err(e) => map_billing_error(&e, locale),
    }
}
