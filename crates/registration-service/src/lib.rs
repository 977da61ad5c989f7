//! Beacon Registration Service
//!
//! HTTP surface of the multi-page beacon registration journey: a cookie keyed
//! registration cache, the form pages and the final submission to the backend
//! registration API.

pub mod cache;
pub mod config;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod page;
pub mod pages;
pub mod session;
pub mod submission;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use cache::{InMemoryCache, RedisCache, RegistrationCache};
pub use config::Config;
pub use error::{ApiError, ServiceError};
pub use gateway::{BeaconsApi, HttpBeaconsApi};
pub use handlers::AppState;
pub use session::{NoSession, SessionProvider, UserSession};

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let shared_state = Arc::new(state);

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/", get(handlers::start_handler))
        .route(
            "/register-a-beacon/check-your-answers",
            get(handlers::check_your_answers_handler).post(handlers::submit_handler),
        )
        .route(
            "/register-a-beacon/application-complete",
            get(handlers::application_complete_handler),
        )
        .route(
            "/register-a-beacon/{page}",
            get(handlers::page_get_handler).post(handlers::page_post_handler),
        )
        .with_state(shared_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
