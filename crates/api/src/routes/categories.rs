//! Category routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use tracing::info;

use crate::AppState;
use crate::dto::CategoryResponse;
use crate::error::map_category_error;
use crate::extract::Payload;
use crate::messages::Locale;
use crate::middleware::auth::AuthUser;
use mymoney_core::category::{CategoryError, CategoryInput, CategoryService};
use mymoney_shared::types::CategoryId;

/// Creates the category router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            put(update_category).delete(delete_category),
        )
}

fn service(state: &AppState) -> CategoryService<'_> {
    CategoryService::new(state.categories.as_ref(), state.billing_cycles.as_ref())
}

fn parse_id(raw: &str) -> Result<CategoryId, CategoryError> {
    raw.parse().map_err(|_| CategoryError::NotFound)
}

/// GET /categories - The caller's categories by description.
async fn list_categories(
    State(state): State<AppState>,
    auth: AuthUser,
    locale: Locale,
) -> Response {
    match service(&state).list(auth.user_id()).await {
        Ok(categories) => {
            let body: Vec<CategoryResponse> =
                categories.into_iter().map(CategoryResponse::from).collect();
            Json(body).into_response()
        }
        Err(e) => map_category_error(&e, locale),
    }
}

/// POST /categories - Add a category.
async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    locale: Locale,
    Payload(payload): Payload<CategoryInput>,
) -> Response {
    match service(&state).create(auth.user_id(), &payload).await {
        Ok(category) => {
            info!(user_id = %auth.user_id(), category_id = %category.id, "Category created");
            (StatusCode::CREATED, Json(CategoryResponse::from(category))).into_response()
        }
        Err(e) => map_category_error(&e, locale),
    }
}

/// PUT /categories/{id} - Rename a category.
async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    locale: Locale,
    Path(id): Path<String>,
    Payload(payload): Payload<CategoryInput>,
) -> Response {
    let result = match parse_id(&id) {
        Ok(id) => service(&state).update(auth.user_id(), id, &payload).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(category) => Json(CategoryResponse::from(category)).into_response(),
        Err(e) => map_category_error(&e, locale),
    }
}

/// DELETE /categories/{id} - Remove a category no debt refers to.
async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    locale: Locale,
    Path(id): Path<String>,
) -> Response {
    let result = match parse_id(&id) {
        Ok(id) => service(&state).delete(auth.user_id(), id).await.map(|()| id),
        Err(e) => Err(e),
    };
    match result {
        Ok(id) => {
            info!(user_id = %auth.user_id(), category_id = %id, "Category deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            if matches!(e, CategoryError::Blocked(_)) {
                info!(user_id = %auth.user_id(), "Category delete blocked");
            }
            map_category_error(&e, locale)
        }
    }
}
