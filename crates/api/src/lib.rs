//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes under `/api`
//! - Authentication middleware
//! - Request extractors (authenticated user, response locale, lenient body)
//! - Response types with `pt-BR` formatted amounts

pub mod dto;
pub mod error;
pub mod extract;
pub mod messages;
pub mod middleware;
pub mod routes;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use mymoney_core::auth::UserStore;
use mymoney_core::billing::BillingCycleStore;
use mymoney_core::category::CategoryStore;
use mymoney_db::{BillingCycleRepository, CategoryRepository, UserRepository};
use mymoney_shared::JwtService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Billing cycle store.
    pub billing_cycles: Arc<dyn BillingCycleStore>,
    /// Category store.
    pub categories: Arc<dyn CategoryStore>,
    /// User store.
    pub users: Arc<dyn UserStore>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
}

impl AppState {
    /// Builds the state on top of the Postgres repositories.
    #[must_use]
    pub fn from_database(db: &DatabaseConnection, jwt_service: JwtService) -> Self {
        Self {
            billing_cycles: Arc::new(BillingCycleRepository::new(db.clone())),
            categories: Arc::new(CategoryRepository::new(db.clone())),
            users: Arc::new(UserRepository::new(db.clone())),
            jwt_service: Arc::new(jwt_service),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
