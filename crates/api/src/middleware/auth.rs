//! Authentication middleware for protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::AppState;
use crate::error::error_response;
use crate::messages::{Locale, Message};
use mymoney_shared::types::UserId;
use mymoney_shared::{Claims, JwtError};

/// Extracts the token from an Authorization header value.
///
/// Accepts `Bearer <token>` as well as a bare token.
pub(crate) fn extract_token(header: &str) -> Option<&str> {
    let token = header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .unwrap_or(header)
        .trim();
    (!token.is_empty()).then_some(token)
}

/// Authentication middleware that validates JWT tokens.
///
/// On success the claims are stored in the request extensions, where
/// [`AuthUser`] picks them up.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let locale = Locale::from_headers(request.headers());
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_token) else {
        return error_response(
            StatusCode::UNAUTHORIZED,
            "missing_token",
            Message::MissingToken,
            locale,
        );
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(JwtError::Expired) => error_response(
            StatusCode::UNAUTHORIZED,
            "token_expired",
            Message::TokenExpired,
            locale,
        ),
        Err(_) => error_response(
            StatusCode::UNAUTHORIZED,
            "invalid_token",
            Message::InvalidToken,
            locale,
        ),
    }
}

/// Extractor for the authenticated user.
///
/// ```ignore
/// async fn handler(user: AuthUser) -> impl IntoResponse {
///     let owner = user.user_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the user ID from the claims.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.0.user_id()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                error_response(
                    StatusCode::UNAUTHORIZED,
                    "unauthorized",
                    Message::MissingToken,
                    Locale::from_headers(&parts.headers),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Bearer abc.def.ghi", Some("abc.def.ghi"))]
    #[case("bearer abc.def.ghi", Some("abc.def.ghi"))]
    #[case("abc.def.ghi", Some("abc.def.ghi"))]
    #[case("Bearer ", None)]
    #[case("", None)]
    fn test_extract_token(#[case] header: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_token(header), expected);
    }
}
