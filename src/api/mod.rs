mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::guard::GuardConfig;
use crate::provider::{ExamDataProvider, SessionStore};

pub use handlers::{NavigateQuery, RegistrationResponse, SignInInput, SignInResponse};

/// Shared state for the HTTP shell.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub exams: Arc<dyn ExamDataProvider>,
    pub guard: Arc<GuardConfig>,
}

impl AppState {
    pub fn new(sessions: SessionStore, exams: impl ExamDataProvider + 'static, guard: GuardConfig) -> Self {
        Self {
            sessions,
            exams: Arc::new(exams),
            guard: Arc::new(guard),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Sessions
        .route("/sessions", post(handlers::sign_in).delete(handlers::sign_out))
        // Navigation
        .route("/navigate", get(handlers::navigate))
        // Exams
        .route("/exams", get(handlers::list_exams))
        .route("/exams/{id}", get(handlers::get_exam))
        .route("/exams/{id}/register", post(handlers::register))
        .route_layer(from_fn_with_state(state.clone(), middleware::session_middleware))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
