//! Auth Exception Mapper
//!
//! Per-system failure normalization for the auth service. Non-2xx
//! statuses keep the uniform HTTP_<status> code; 2xx failures (error
//! payloads, undecodable bodies) become the stable remote-failure code,
//! lifting the upstream message when the body carries one.

use outpost::{codes, CallContext, ExceptionMapper, OutboundError};

use crate::application::AUTH_SYSTEM;

pub struct AuthExceptionMapper;

impl ExceptionMapper for AuthExceptionMapper {
    fn supports(&self, system: &str) -> bool {
        system == AUTH_SYSTEM
    }

    fn map(&self, status: u16, body: &str, _context: &CallContext) -> OutboundError {
        if !(200..300).contains(&status) {
            return OutboundError::http_status(status, body);
        }

        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| value["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| "call to external system AuthService failed".to_string());

        OutboundError::remote(codes::REMOTE_FAILED, message)
    }
}
