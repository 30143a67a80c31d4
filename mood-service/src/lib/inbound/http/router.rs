use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::get_user::get_user;
use super::handlers::health::health;
use super::handlers::list_user_emotions::list_user_emotions;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::record_emotion::record_emotion;
use super::handlers::register::register;
use super::handlers::update_user::update_user;
use super::middleware::authenticate as auth_gate;
use crate::domain::emotion::service::EmotionService;
use crate::domain::user::service::UserService;

/// Shared read-only state: services, and the authenticator the gate uses.
///
/// Built once at startup; nothing in it is mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub emotion_service: Arc<EmotionService>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(state: AppState) -> Router {
    // Auth endpoints exist at both prefixes: the legacy frontend posts to
    // the bare paths, the current one under /auth.
    let public_routes = Router::new()
        .route("/register", post(register))
        .route("/auth/register", post(register))
        .route("/login", post(login))
        .route("/auth/login", post(login))
        .route("/users", get(list_users))
        .route("/users/:user_id", get(get_user))
        .route("/health", get(health))
        // Emotion routes predate the auth gate and stay open for the
        // legacy frontend despite the /api prefix.
        .route("/api/emotions", post(record_emotion))
        .route("/api/emotions/user/:user_id", get(list_user_emotions));

    let protected_routes = Router::new()
        .route("/api/users", get(list_users))
        .route("/api/users/:user_id", get(get_user))
        .route("/api/users/:user_id", put(update_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_gate));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
