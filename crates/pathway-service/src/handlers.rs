use std::io;

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::{json, Value};

use pathway_common::{
    Envelope, HealthStatus, ProcessRequest, ProcessResult, QueryRequest, QueryResult,
};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Counts UTF-8 characters written through it without keeping them.
#[derive(Default)]
struct CharCounter(usize);

impl io::Write for CharCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0 += buf.iter().filter(|b| (**b & 0xC0) != 0x80).count();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Length in characters of the compact JSON rendering of `value`.
fn json_char_len(value: &Value) -> usize {
    let mut counter = CharCounter::default();
    match serde_json::to_writer(&mut counter, value) {
        Ok(()) => counter.0,
        Err(_) => 0,
    }
}

pub async fn process(
    State(st): State<AppState>,
    ApiJson(req): ApiJson<ProcessRequest>,
) -> Result<Json<Envelope<ProcessResult>>, ApiError> {
    tracing::info!(
        chars = json_char_len(&req.input),
        pipeline = req.pipeline.as_deref(),
        "received process request"
    );

    let result = st.processor.process(&req).map_err(ApiError::Processing)?;
    Ok(Json(Envelope { result }))
}

pub async fn query(
    State(st): State<AppState>,
    ApiJson(req): ApiJson<QueryRequest>,
) -> Result<Json<Envelope<QueryResult>>, ApiError> {
    tracing::info!(query=%req.query, "received query");

    let result = st.processor.query(&req).map_err(ApiError::Query)?;
    Ok(Json(Envelope { result }))
}

pub async fn health(State(st): State<AppState>) -> Json<HealthStatus> {
    Json(st.processor.health())
}

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "Pathway Service (Mock Mode)",
        "endpoints": {
            "POST /process": "Process data",
            "POST /query": "Query data",
            "GET /health": "Health check",
            "GET /metrics": "Request counters"
        }
    }))
}
