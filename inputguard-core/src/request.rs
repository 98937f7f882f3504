//! Request-container sanitization.
//!
//! An HTTP layer hands the engine the three attacker-controlled containers of a
//! request: the parsed body, the query-string map and the path parameters. Each
//! present container is replaced by its sanitized form; absent ones stay absent.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use serde::{Deserialize, Serialize};

use crate::engine::SanitizationEngine;
use crate::value::Value;

/// The untrusted parts of one request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RequestInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// Sanitizes every present container of `request` with `engine`.
pub fn sanitize_request(engine: &dyn SanitizationEngine, request: RequestInput) -> RequestInput {
    debug!(
        "Sanitizing request containers (body: {}, query: {}, params: {}).",
        request.body.is_some(),
        request.query.is_some(),
        request.params.is_some()
    );
    RequestInput {
        body: request.body.map(|v| engine.sanitize(v)),
        query: request.query.map(|v| engine.sanitize(v)),
        params: request.params.map(|v| engine.sanitize(v)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::pipeline_engine::PipelineEngine;
    use crate::value::Mapping;

    #[test]
    fn test_present_containers_are_sanitized() {
        let engine = PipelineEngine::with_defaults().unwrap();
        let mut query = Mapping::new();
        query.insert("q", Value::from("';DROP TABLE users; --"));
        let mut params = Mapping::new();
        params.insert("id", Value::from("../../etc/passwd"));

        let request = RequestInput {
            body: None,
            query: Some(Value::Mapping(query)),
            params: Some(Value::Mapping(params)),
        };
        let sanitized = sanitize_request(&engine, request);

        assert!(sanitized.body.is_none());
        let q = sanitized.query.unwrap();
        assert_eq!(q.as_mapping().unwrap().get("q").unwrap().as_str(), Some("users __"));
        let p = sanitized.params.unwrap();
        assert_eq!(p.as_mapping().unwrap().get("id").unwrap().as_str(), Some(""));
    }

    #[test]
    fn test_request_input_deserializes_partial_objects() {
        let request: RequestInput = serde_json::from_str(r#"{"body": {"a": "b"}}"#).unwrap();
        assert!(request.body.is_some());
        assert!(request.query.is_none());
        assert!(request.params.is_none());
    }
}
