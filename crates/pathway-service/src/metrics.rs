use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::Instrument;

use pathway_common::execution_context::{ExecutionContext, REQUEST_ID_HEADER};

use crate::state::AppState;

#[derive(Debug, Default)]
pub struct Metrics {
    pub requests_total: AtomicU64,
    pub requests_inflight: AtomicU64,
    pub status_2xx: AtomicU64,
    pub status_4xx: AtomicU64,
    pub status_5xx: AtomicU64,
}

impl Metrics {
    pub fn record_status(&self, status: StatusCode) {
        let status = status.as_u16();
        if status >= 500 {
            self.status_5xx.fetch_add(1, Ordering::Relaxed);
        } else if status >= 400 {
            self.status_4xx.fetch_add(1, Ordering::Relaxed);
        } else if status >= 200 {
            self.status_2xx.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn render(&self) -> String {
        format!(
            "pathway_requests_total {}\npathway_requests_inflight {}\npathway_responses_2xx {}\npathway_responses_4xx {}\npathway_responses_5xx {}\n",
            self.requests_total.load(Ordering::Relaxed),
            self.requests_inflight.load(Ordering::Relaxed),
            self.status_2xx.load(Ordering::Relaxed),
            self.status_4xx.load(Ordering::Relaxed),
            self.status_5xx.load(Ordering::Relaxed),
        )
    }
}

/// Holds one in-flight slot; released on drop, so a request future that is
/// dropped mid-flight still decrements the gauge.
pub struct InflightGuard {
    metrics: Arc<Metrics>,
}

impl InflightGuard {
    pub fn acquire(metrics: Arc<Metrics>) -> Self {
        metrics.requests_inflight.fetch_add(1, Ordering::Relaxed);
        Self { metrics }
    }
}

impl Drop for InflightGuard {
    fn drop(&mut self) {
        self.metrics.requests_inflight.fetch_sub(1, Ordering::Relaxed);
    }
}

pub async fn metrics_handler(State(st): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, st.metrics.render())
}

/// Counts every request by status class and tags it with a request id, which
/// is also returned in the `x-request-id` header.
pub async fn track_requests(
    State(st): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, std::convert::Infallible> {
    let ctx = ExecutionContext::from_headers(req.headers());
    let span = tracing::info_span!(
        "request",
        request_id = %ctx.request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    let inflight = InflightGuard::acquire(st.metrics.clone());
    let mut resp = next.run(req).instrument(span).await;
    drop(inflight);
    st.metrics.requests_total.fetch_add(1, Ordering::Relaxed);
    st.metrics.record_status(resp.status());

    if let Ok(value) = HeaderValue::from_str(&ctx.request_id) {
        resp.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    Ok(resp)
}
