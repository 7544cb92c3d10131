use std::sync::Arc;

use serde_json::Value;

use pathway_common::{
    json_type_name, HealthStatus, ProcessRequest, ProcessResult, QueryRequest, QueryResult,
    ServiceMode,
};

const MOCK_PROCESS_MESSAGE: &str = "Data processed successfully (mock)";
const MOCK_HEALTH_MESSAGE: &str = "Service is running (mock mode - Pathway not installed)";

/// Builds response payloads for one deployment mode. Implementations hold no
/// per-request state.
pub trait Processor: Send + Sync {
    fn mode(&self) -> ServiceMode;

    fn process(&self, req: &ProcessRequest) -> anyhow::Result<ProcessResult>;

    fn query(&self, req: &QueryRequest) -> anyhow::Result<QueryResult>;

    fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy".to_string(),
            service: self.mode().service_name().to_string(),
            mode: self.mode(),
            message: None,
        }
    }
}

pub fn processor_for(mode: ServiceMode) -> Arc<dyn Processor> {
    match mode {
        ServiceMode::Real => Arc::new(RealProcessor),
        ServiceMode::Mock => Arc::new(MockProcessor),
    }
}

/// Counts list inputs and echoes them back.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealProcessor;

impl Processor for RealProcessor {
    fn mode(&self) -> ServiceMode {
        ServiceMode::Real
    }

    fn process(&self, req: &ProcessRequest) -> anyhow::Result<ProcessResult> {
        let result = match &req.input {
            Value::Array(items) => ProcessResult {
                processed: items.len() as u64,
                data: Some(req.input.clone()),
                ..Default::default()
            },
            _ => ProcessResult {
                processed: 1,
                ..Default::default()
            },
        };
        Ok(result)
    }

    fn query(&self, req: &QueryRequest) -> anyhow::Result<QueryResult> {
        Ok(QueryResult {
            query: req.query.clone(),
            response: format!("Processed query: {}", req.query),
            context: req.context.clone().unwrap_or_default(),
            status: None,
        })
    }
}

/// Fabricates payloads without touching the input beyond its shape.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockProcessor;

impl Processor for MockProcessor {
    fn mode(&self) -> ServiceMode {
        ServiceMode::Mock
    }

    fn process(&self, req: &ProcessRequest) -> anyhow::Result<ProcessResult> {
        let result = match &req.input {
            Value::Array(items) => ProcessResult {
                processed: items.len() as u64,
                message: Some(MOCK_PROCESS_MESSAGE.to_string()),
                sample: Some(items.first().cloned().unwrap_or(Value::Null)),
                total_items: Some(items.len() as u64),
                ..Default::default()
            },
            other => ProcessResult {
                processed: 1,
                message: Some(MOCK_PROCESS_MESSAGE.to_string()),
                input_type: Some(json_type_name(other).to_string()),
                ..Default::default()
            },
        };
        Ok(result)
    }

    fn query(&self, req: &QueryRequest) -> anyhow::Result<QueryResult> {
        Ok(QueryResult {
            query: req.query.clone(),
            response: format!("Mock response for query: {}", req.query),
            context: req.context.clone().unwrap_or_default(),
            status: Some("success".to_string()),
        })
    }

    fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy".to_string(),
            service: ServiceMode::Mock.service_name().to_string(),
            mode: ServiceMode::Mock,
            message: Some(MOCK_HEALTH_MESSAGE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn process_req(input: Value) -> ProcessRequest {
        ProcessRequest {
            input,
            pipeline: None,
        }
    }

    fn query_req(query: &str, context: Option<Value>) -> QueryRequest {
        QueryRequest {
            query: query.to_string(),
            context: context.and_then(|c| c.as_object().cloned()),
            parameters: None,
        }
    }

    #[test]
    fn test_real_process_counts_and_echoes_list() {
        let result = RealProcessor
            .process(&process_req(json!([{"value": 1}, {"value": 2}, 3])))
            .unwrap();
        assert_eq!(result.processed, 3);
        assert_eq!(result.data, Some(json!([{"value": 1}, {"value": 2}, 3])));
        assert!(result.message.is_none());
    }

    #[test]
    fn test_real_process_scalar_counts_one() {
        for input in [json!(7), json!("text"), json!({"a": 1}), json!(null)] {
            let result = RealProcessor.process(&process_req(input)).unwrap();
            assert_eq!(result.processed, 1);
            assert!(result.data.is_none());
        }
    }

    #[test]
    fn test_mock_process_list_sample() {
        let result = MockProcessor
            .process(&process_req(json!(["a", "b"])))
            .unwrap();
        assert_eq!(result.processed, 2);
        assert_eq!(result.total_items, Some(2));
        assert_eq!(result.sample, Some(json!("a")));
        assert_eq!(result.message.as_deref(), Some(MOCK_PROCESS_MESSAGE));
    }

    #[test]
    fn test_mock_process_empty_list_has_null_sample() {
        let result = MockProcessor.process(&process_req(json!([]))).unwrap();
        assert_eq!(result.processed, 0);
        let body = serde_json::to_value(result).unwrap();
        assert_eq!(body["sample"], Value::Null);
        assert!(body.as_object().unwrap().contains_key("sample"));
    }

    #[test]
    fn test_mock_process_scalar_reports_type() {
        let result = MockProcessor.process(&process_req(json!(2.5))).unwrap();
        assert_eq!(result.processed, 1);
        assert_eq!(result.input_type.as_deref(), Some("float"));

        let result = MockProcessor.process(&process_req(json!({"k": "v"}))).unwrap();
        assert_eq!(result.input_type.as_deref(), Some("dict"));
    }

    #[test]
    fn test_query_templates_contain_query() {
        let real = RealProcessor.query(&query_req("hello", None)).unwrap();
        assert_eq!(real.response, "Processed query: hello");
        assert!(real.context.is_empty());
        assert!(real.status.is_none());

        let mock = MockProcessor
            .query(&query_req("hello", Some(json!({"user": "u1"}))))
            .unwrap();
        assert!(mock.response.contains("hello"));
        assert_eq!(mock.context.get("user"), Some(&json!("u1")));
        assert_eq!(mock.status.as_deref(), Some("success"));
    }

    #[test]
    fn test_health_per_mode() {
        let real = processor_for(ServiceMode::Real).health();
        assert_eq!(real.status, "healthy");
        assert_eq!(real.service, "pathway");
        assert!(real.message.is_none());

        let mock = processor_for(ServiceMode::Mock).health();
        assert_eq!(mock.service, "pathway-mock");
        assert_eq!(mock.mode, ServiceMode::Mock);
        assert_eq!(
            mock.message.as_deref(),
            Some("Service is running (mock mode - Pathway not installed)")
        );
    }
}
