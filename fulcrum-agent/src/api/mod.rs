//! Management API
//!
//! The HTTP surface the agent itself exposes: a liveness ping and runtime
//! credential rotation. This is separate from the control-plane API the
//! agent consumes.

pub mod error;
pub mod management;

use axum::{
    Router,
    routing::{get, post},
};
use fulcrum_client::FulcrumApi;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the management router
pub fn create_router(client: Arc<dyn FulcrumApi>) -> Router {
    Router::new()
        .route("/ping", get(management::ping))
        .route("/fulcrum-token", post(management::update_token))
        .with_state(client)
        .layer(TraceLayer::new_for_http())
}
