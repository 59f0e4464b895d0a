mod handlers;
mod middleware;
pub mod views;

use axum::{
    http::{HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub use middleware::session_middleware;

use crate::config::SessionConfig;
use crate::session::SessionStore;

pub fn create_router(sessions: SessionStore) -> Router {
    let cors = cors_layer(sessions.config());

    Router::new()
        .route("/", get(handlers::index))
        // Lists
        .route("/lists", get(handlers::list_lists).post(handlers::create_list))
        .route("/lists/new", get(handlers::new_list_form))
        .route("/lists/{id}", get(handlers::get_list).post(handlers::update_list))
        .route("/lists/{id}/edit", get(handlers::edit_list_form))
        .route("/lists/{id}/delete", post(handlers::delete_list))
        // Todos
        .route("/lists/{id}/todos", post(handlers::create_todo))
        .route("/lists/{id}/todos/complete", post(handlers::complete_all_todos))
        .route(
            "/lists/{id}/todos/{todo_id}/delete",
            post(handlers::delete_todo),
        )
        .route(
            "/lists/{id}/todos/{todo_id}/complete",
            post(handlers::update_todo),
        )
        .layer(from_fn_with_state(sessions, session_middleware))
        // Health (no session)
        .route("/health", get(handlers::health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

/// Permissive CORS unless specific origins are configured. A `*` entry
/// means any origin.
fn cors_layer(config: &SessionConfig) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }
    let Some(origins) = &config.cors_origins else {
        return CorsLayer::permissive();
    };

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_credentials(true)
}
