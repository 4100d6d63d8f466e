// src/routes.rs

use std::sync::Arc;

use axum::{
    Router, http::Method, middleware,
    routing::{get, post},
};
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, lessons, progress},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, lessons, progress).
/// * Applies global middleware (Trace, CORS) and the login rate limiter.
/// * Injects global state (Database Pool + Config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:5173".parse().unwrap(),
        "http://127.0.0.1:5173".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    // Brute-force guard on the login route. Keyed by peer address, so the
    // server must be started with connect-info (see main.rs).
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(5)
            .finish()
            .expect("governor configuration must be valid"),
    );

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login).layer(GovernorLayer::new(governor_conf)))
        .merge(
            Router::new()
                .route("/me", get(auth::me))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    let lesson_routes = Router::new()
        .route("/", get(lessons::list_lessons))
        .merge(
            Router::new()
                .route("/{lesson_id}/quiz", get(lessons::get_quiz))
                .route("/{lesson_id}/submit", post(lessons::submit_quiz))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    let progress_routes = Router::new()
        .route(
            "/",
            post(progress::upsert_progress).get(progress::list_progress),
        )
        .route("/summary", get(progress::get_summary))
        .route("/{lesson_id}", get(progress::get_progress))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/lessons", lesson_routes)
        .nest("/api/progress", progress_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
