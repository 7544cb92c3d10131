use http::HeaderMap;
use serde::{Deserialize, Serialize};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ExecutionContext {
    pub request_id: String,
}

impl ExecutionContext {
    /// Reuse the caller's `x-request-id` when it is present and printable,
    /// otherwise mint a fresh one.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let request_id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("req_{}", uuid::Uuid::new_v4()));

        Self { request_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_reuses_inbound_request_id() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("abc-123"));
        assert_eq!(ExecutionContext::from_headers(&headers).request_id, "abc-123");
    }

    #[test]
    fn test_generates_request_id() {
        let ctx = ExecutionContext::from_headers(&HeaderMap::new());
        assert!(ctx.request_id.starts_with("req_"));

        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("   "));
        assert!(ExecutionContext::from_headers(&headers)
            .request_id
            .starts_with("req_"));
    }
}
