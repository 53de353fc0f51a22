//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the Note Store JSON API and the health probe under a single Axum
//! router, wrapped in CORS and request tracing layers.


pub mod notes;

use axum::Router;
use axum::http::HeaderValue;
use axum::response::Json;
use axum::routing::{get, patch};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::state::AppState;

/// Full application router. `cors_origin` of `None` allows any origin.
pub fn app(state: AppState, cors_origin: Option<&str>) -> Router {
    Router::new()
        .route("/api/notes", get(notes::list_notes).post(notes::create_note))
        .route("/api/notes/{id}/position", patch(notes::update_position))
        .route("/api/notes/{id}/z-index", patch(notes::update_z_index))
        .route("/healthz", get(healthz))
        .layer(cors_layer(cors_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let allow_origin = match origin.map(HeaderValue::from_str) {
        None => AllowOrigin::from(Any),
        Some(Ok(value)) => AllowOrigin::exact(value),
        Some(Err(e)) => {
            warn!(error = %e, "invalid CORS_ALLOW_ORIGIN; allowing any origin");
            AllowOrigin::from(Any)
        }
    };
    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
