pub mod error;
pub mod extract;
pub mod handlers;
pub mod metrics;
pub mod processor;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use pathway_common::ServiceMode;

use crate::handlers::{health, process, query, root};
use crate::metrics::{metrics_handler, track_requests};
use crate::state::AppState;

pub use crate::error::ApiError;
pub use crate::processor::{processor_for, MockProcessor, Processor, RealProcessor};

/// Assemble the HTTP surface for the given state.
///
/// The `/` endpoint listing only exists in mock mode.
pub fn build_app(st: AppState) -> Router {
    let mut app: Router<AppState> = Router::new()
        .route("/process", post(process))
        .route("/query", post(query))
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler));

    if st.mode() == ServiceMode::Mock {
        app = app.route("/", get(root));
    }

    app.layer(DefaultBodyLimit::max(st.max_body_bytes))
        .layer(middleware::from_fn_with_state(st.clone(), track_requests))
        .with_state(st)
}
