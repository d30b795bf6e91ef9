//! Request Resolver
//!
//! Turns an intercepted call's arguments into a normalized, size-bounded
//! request snapshot. Resolution never fails: any serialization problem
//! degrades to a best-effort `Debug` representation so the real call is
//! never blocked by bookkeeping.

use serde_json::Value;

use crate::domain::commands::{OutboundCall, RecordRequest};

/// Maximum stored length of a serialized snapshot.
pub const MAX_SNAPSHOT_LEN: usize = 3000;

/// Suffix appended when a snapshot was cut at [`MAX_SNAPSHOT_LEN`].
pub const TRUNCATION_MARKER: &str = " ...(truncated)";

/// Resolves call arguments into a [`RecordRequest`].
#[derive(Debug, Clone, Default)]
pub struct RequestResolver;

impl RequestResolver {
    pub fn new() -> Self {
        Self
    }

    /// Build the request snapshot for one intercepted call.
    pub fn resolve(&self, call: &OutboundCall) -> RecordRequest {
        RecordRequest {
            system: call.system.clone(),
            method: call.method.clone(),
            request_body: serialize_request_body(&call.args),
            request_params: extract_request_params(&call.args),
            path_variables: extract_path_variables(&call.args),
        }
    }
}

/// Serialize all arguments as the request body, capped at
/// [`MAX_SNAPSHOT_LEN`] characters.
fn serialize_request_body(args: &[Value]) -> Option<String> {
    if args.is_empty() {
        return None;
    }
    let json = match serde_json::to_string(args) {
        Ok(json) => json,
        Err(_) => format!("{args:?}"),
    };
    Some(truncate_snapshot(json))
}

/// Cap a snapshot and append the truncation marker when it was cut.
pub fn truncate_snapshot(text: String) -> String {
    if text.chars().count() <= MAX_SNAPSHOT_LEN {
        return text;
    }
    let mut capped: String = text.chars().take(MAX_SNAPSHOT_LEN).collect();
    capped.push_str(TRUNCATION_MARKER);
    capped
}

/// Merge object-typed arguments into one request-parameter map.
/// Useful for GET / query-style calls.
fn extract_request_params(args: &[Value]) -> Option<String> {
    let mut params = serde_json::Map::new();
    for arg in args {
        if let Value::Object(map) = arg {
            for (key, value) in map {
                params.insert(key.clone(), value.clone());
            }
        }
    }
    if params.is_empty() {
        return None;
    }
    match serde_json::to_string(&params) {
        Ok(json) => Some(json),
        Err(_) => Some(format!("{params:?}")),
    }
}

/// Record primitive arguments as path variables. This is a heuristic
/// fallback: the key does not map to a real path variable name.
fn extract_path_variables(args: &[Value]) -> Option<String> {
    let mut path_vars = serde_json::Map::new();
    for arg in args {
        if matches!(arg, Value::String(_) | Value::Number(_)) {
            path_vars.insert("arg".to_string(), arg.clone());
        }
    }
    if path_vars.is_empty() {
        return None;
    }
    match serde_json::to_string(&path_vars) {
        Ok(json) => Some(json),
        Err(_) => Some(format!("{path_vars:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call(args: Vec<Value>) -> OutboundCall {
        OutboundCall {
            system: "AuthService".to_string(),
            method: "login".to_string(),
            args,
        }
    }

    #[test]
    fn empty_args_produce_no_body() {
        let resolver = RequestResolver::new();
        let request = resolver.resolve(&call(vec![]));
        assert!(request.request_body.is_none());
        assert!(request.request_params.is_none());
        assert!(request.path_variables.is_none());
    }

    #[test]
    fn args_serialize_into_body() {
        let resolver = RequestResolver::new();
        let request = resolver.resolve(&call(vec![json!({"username": "u", "password": "p"})]));
        let body = request.request_body.unwrap();
        assert!(body.contains("username"));
        assert_eq!(request.system, "AuthService");
        assert_eq!(request.method, "login");
    }

    #[test]
    fn oversized_body_is_truncated_with_marker() {
        let resolver = RequestResolver::new();
        let big = "x".repeat(MAX_SNAPSHOT_LEN * 2);
        let request = resolver.resolve(&call(vec![json!({ "payload": big })]));
        let body = request.request_body.unwrap();
        assert!(body.ends_with(TRUNCATION_MARKER));
        assert_eq!(
            body.chars().count(),
            MAX_SNAPSHOT_LEN + TRUNCATION_MARKER.chars().count()
        );
    }

    #[test]
    fn body_at_cap_is_not_truncated() {
        let exact = "y".repeat(MAX_SNAPSHOT_LEN);
        assert_eq!(truncate_snapshot(exact.clone()), exact);
    }

    #[test]
    fn map_args_become_request_params() {
        let resolver = RequestResolver::new();
        let request = resolver.resolve(&call(vec![
            json!({"page": 1}),
            json!({"size": 20}),
            json!("ignored-for-params"),
        ]));
        let params: Value = serde_json::from_str(&request.request_params.unwrap()).unwrap();
        assert_eq!(params["page"], 1);
        assert_eq!(params["size"], 20);
    }

    #[test]
    fn primitive_args_become_path_variables() {
        let resolver = RequestResolver::new();
        let request = resolver.resolve(&call(vec![json!("alice"), json!(42)]));
        let vars: Value = serde_json::from_str(&request.path_variables.unwrap()).unwrap();
        // Last primitive wins under the fallback key.
        assert_eq!(vars["arg"], 42);
    }
}
