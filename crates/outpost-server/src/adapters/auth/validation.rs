//! Login Validation Strategy
//!
//! The auth service reports some login failures as HTTP 200 with null
//! token fields. This strategy turns that shape into a business failure
//! so the record is closed FAILED and the caller sees an error.

use outpost::{codes, CallContext, OutboundError, ValidationStrategy};

use crate::application::{AUTH_SYSTEM, LOGIN_ENDPOINT};

pub struct LoginTokenValidation;

impl ValidationStrategy for LoginTokenValidation {
    fn system(&self) -> &str {
        AUTH_SYSTEM
    }

    fn endpoint(&self) -> &str {
        LOGIN_ENDPOINT
    }

    fn validate(
        &self,
        response: &serde_json::Value,
        _context: &CallContext,
    ) -> Result<(), OutboundError> {
        if response["token"].is_null() || response["refreshToken"].is_null() {
            return Err(OutboundError::remote(
                codes::REMOTE_FAILED,
                "AuthService login returned no usable token",
            ));
        }
        Ok(())
    }
}
