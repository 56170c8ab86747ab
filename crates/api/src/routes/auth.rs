//! Registration, login and token check.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use crate::dto::{AuthResponse, TokenValidityResponse};
use crate::error::{error_response, map_auth_error};
use crate::extract::Payload;
use crate::messages::{Locale, Message, message};
use mymoney_core::auth::{AuthService, LoginInput, RegisterInput, User};
use mymoney_core::input::lenient;

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/validateToken", post(validate_token))
}

/// Issues a token for a freshly authenticated user.
fn token_response(state: &AppState, user: User, status: StatusCode, locale: Locale) -> Response {
    match state.jwt_service.generate_access_token(user.id, &user.email) {
        Ok(token) => {
            let expires_in = state.jwt_service.access_token_expires_in();
            (status, Json(AuthResponse::new(user, token, expires_in))).into_response()
        }
        Err(e) => {
            error!(error = %e, user_id = %user.id, "Failed to generate access token");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                Message::Internal,
                locale,
            )
        }
    }
}

/// POST /auth/register - Create an account and return a token.
async fn register(
    State(state): State<AppState>,
    locale: Locale,
    Payload(payload): Payload<RegisterInput>,
) -> Response {
    let service = AuthService::new(state.users.as_ref());
    match service.register(&payload).await {
        Ok(user) => {
            info!(user_id = %user.id, "User registered");
            token_response(&state, user, StatusCode::CREATED, locale)
        }
        Err(e) => map_auth_error(&e, locale),
    }
}

/// POST /auth/login - Check credentials and return a token.
async fn login(
    State(state): State<AppState>,
    locale: Locale,
    Payload(payload): Payload<LoginInput>,
) -> Response {
    let service = AuthService::new(state.users.as_ref());
    match service.authenticate(&payload).await {
        Ok(user) => {
            info!(user_id = %user.id, "User logged in");
            token_response(&state, user, StatusCode::OK, locale)
        }
        Err(e) => {
            info!(error_code = e.error_code(), "Login rejected");
            map_auth_error(&e, locale)
        }
    }
}

/// Token check request.
#[derive(Debug, Default, Deserialize)]
struct ValidateTokenRequest {
    #[serde(default, deserialize_with = "lenient")]
    token: Option<String>,
}

/// POST /auth/validateToken - Report whether a token is still usable.
async fn validate_token(
    State(state): State<AppState>,
    locale: Locale,
    Payload(payload): Payload<ValidateTokenRequest>,
) -> Response {
    let Some(token) = payload.token.as_deref().filter(|token| !token.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "valid": false,
                "message": message(Message::MissingToken, locale),
            })),
        )
            .into_response();
    };

    if state.jwt_service.validate_token(token).is_ok() {
        Json(TokenValidityResponse { valid: true }).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "valid": false,
                "message": message(Message::InvalidToken, locale),
            })),
        )
            .into_response()
    }
}
