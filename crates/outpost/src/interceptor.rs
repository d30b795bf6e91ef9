//! Interceptor - the Interception-and-Dispatch Orchestrator
//!
//! Wraps every outbound call: resolves the per-system request handler,
//! persists a PENDING audit record, invokes the real call, runs the
//! per-endpoint validation strategy over the decoded response, and
//! publishes the outcome event for asynchronous bookkeeping. The
//! triggering error is always re-returned after recording; bookkeeping
//! never swallows the real failure.
//!
//! Per call: `NOT_STARTED → RECORD_CREATED → INVOKING →
//! {SUCCEEDED | FAILED} → CONTEXT_CLEARED`. The context slot is cleared
//! on every exit path by an RAII guard.

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::commands::{OutboundCall, RecordFailureCommand, RecordSuccessCommand};
use crate::domain::entities::OutboundRecord;
use crate::domain::errors::OutboundError;
use crate::domain::events::OutcomeEvent;
use crate::domain::value_objects::{CallContext, ContextGuard, ContextHandle, ContextSlot};
use crate::ports::events::EventPublisher;
use crate::ports::handlers::RequestHandler;
use crate::ports::repositories::RecordRepository;
use crate::registry::{HandlerRegistry, ValidatorRegistry};
use crate::resolver::truncate_snapshot;

/// Orchestrates one audited outbound call.
pub struct Interceptor {
    request_handlers: Arc<HandlerRegistry<dyn RequestHandler>>,
    validators: Arc<ValidatorRegistry>,
    records: Arc<dyn RecordRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl Interceptor {
    pub fn new(
        request_handlers: Arc<HandlerRegistry<dyn RequestHandler>>,
        validators: Arc<ValidatorRegistry>,
        records: Arc<dyn RecordRepository>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            request_handlers,
            validators,
            records,
            publisher,
        }
    }

    /// Wrap an outbound call declared for `system`.
    ///
    /// The transport closure receives the per-call [`ContextHandle`]
    /// and must fill it in (method, URL, endpoint) before sending, the
    /// same way a client interceptor would.
    pub async fn intercept<T, F, Fut>(
        &self,
        system: &str,
        method: &str,
        args: Vec<serde_json::Value>,
        call: F,
    ) -> Result<T, OutboundError>
    where
        T: Serialize,
        F: FnOnce(ContextHandle) -> Fut,
        Fut: Future<Output = Result<T, OutboundError>>,
    {
        // Resolve before anything is persisted: a missing registration
        // must fail fast without creating a record.
        let request_handler = self.request_handlers.get(system)?;

        let outbound_call = OutboundCall {
            system: system.to_string(),
            method: method.to_string(),
            args,
        };
        let request = request_handler.resolve(&outbound_call);
        let saved = self.records.create(&OutboundRecord::pending(request)).await?;

        tracing::info!(
            system,
            method,
            record_id = saved.id,
            "outbound call recorded as pending"
        );

        let slot = ContextSlot::new();
        let _guard = ContextGuard::new(slot.clone());

        match call(slot.clone()).await {
            Ok(response) => {
                let context = slot.get().unwrap_or_default();

                if let Err(err) = self.validate(system, &response, &context) {
                    self.publish_failure(system, saved.id, &context, &err);
                    return Err(err);
                }

                let command = RecordSuccessCommand {
                    record_id: saved.id,
                    endpoint: context.url.clone(),
                    http_method: context.http_method.clone(),
                    response_body: response_snapshot(&response),
                };
                self.publish(OutcomeEvent::succeeded(system, command));
                Ok(response)
            }
            Err(err) => {
                let context = slot.get().unwrap_or_default();
                self.publish_failure(system, saved.id, &context, &err);
                Err(err)
            }
        }
    }

    /// Run the validation strategy for (system, endpoint), if one is
    /// registered. Absence means pass-through.
    fn validate<T: Serialize>(
        &self,
        system: &str,
        response: &T,
        context: &CallContext,
    ) -> Result<(), OutboundError> {
        let Some(strategy) = self.validators.get(system, &context.endpoint) else {
            return Ok(());
        };

        let decoded = match serde_json::to_value(response) {
            Ok(value) => value,
            Err(err) => {
                // Snapshot failure must not fail the call.
                tracing::warn!(system, error = %err, "response not inspectable, skipping validation");
                return Ok(());
            }
        };

        tracing::info!(system, endpoint = %context.endpoint, "running validation strategy");
        strategy.validate(&decoded, context)
    }

    fn publish_failure(&self, system: &str, record_id: i64, context: &CallContext, err: &OutboundError) {
        let command = RecordFailureCommand {
            record_id,
            endpoint: context.url.clone(),
            http_method: context.http_method.clone(),
            error_message: err.to_string(),
            response_body: None,
        };
        self.publish(OutcomeEvent::failed(system, command));
    }

    /// Fire-and-forget: a full or closed queue loses bookkeeping but
    /// never changes the caller-visible outcome.
    fn publish(&self, event: OutcomeEvent) {
        let record_id = event.record_id();
        if let Err(err) = self.publisher.publish(event) {
            tracing::warn!(record_id, error = %err, "dropping outcome event");
        }
    }
}

fn response_snapshot<T: Serialize>(response: &T) -> Option<String> {
    match serde_json::to_string(response) {
        Ok(json) => Some(truncate_snapshot(json)),
        Err(err) => {
            tracing::warn!(error = %err, "response snapshot serialization failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use serde_json::json;

    use crate::domain::commands::RecordRequest;
    use crate::domain::entities::RecordStatus;
    use crate::domain::errors::codes;
    use crate::domain::events::Outcome;
    use crate::ports::validation::ValidationStrategy;
    use crate::resolver::RequestResolver;
    use crate::store::InMemoryRecordStore;

    struct StubRequestHandler;

    impl RequestHandler for StubRequestHandler {
        fn system(&self) -> &str {
            "AuthService"
        }

        fn resolve(&self, call: &OutboundCall) -> RecordRequest {
            RequestResolver::new().resolve(call)
        }
    }

    struct LoginValidation;

    impl ValidationStrategy for LoginValidation {
        fn system(&self) -> &str {
            "AuthService"
        }

        fn endpoint(&self) -> &str {
            "/api/v1/login"
        }

        fn validate(
            &self,
            response: &serde_json::Value,
            _context: &CallContext,
        ) -> Result<(), OutboundError> {
            if response["token"].is_null() || response["refreshToken"].is_null() {
                return Err(OutboundError::remote(
                    codes::REMOTE_FAILED,
                    "AuthService token missing",
                ));
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingPublisher {
        events: Mutex<Vec<OutcomeEvent>>,
    }

    impl EventPublisher for RecordingPublisher {
        fn publish(&self, event: OutcomeEvent) -> Result<(), OutboundError> {
            self.events.lock().unwrap().push(event);
            Ok(())
        }
    }

    struct Fixture {
        interceptor: Interceptor,
        store: Arc<InMemoryRecordStore>,
        publisher: Arc<RecordingPublisher>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryRecordStore::new());
        let publisher = Arc::new(RecordingPublisher::default());
        let request_handlers = Arc::new(
            HandlerRegistry::request_handlers(vec![Arc::new(StubRequestHandler)]).unwrap(),
        );
        let validators =
            Arc::new(ValidatorRegistry::build(vec![Arc::new(LoginValidation)]).unwrap());
        let interceptor = Interceptor::new(
            request_handlers,
            validators,
            store.clone(),
            publisher.clone(),
        );
        Fixture {
            interceptor,
            store,
            publisher,
        }
    }

    fn login_context() -> CallContext {
        CallContext {
            system: "AuthService".to_string(),
            http_method: "POST".to_string(),
            url: "https://auth/api/v1/login".to_string(),
            endpoint: "/api/v1/login".to_string(),
        }
    }

    #[tokio::test]
    async fn success_creates_pending_record_and_publishes_success() {
        let f = fixture();
        let response = f
            .interceptor
            .intercept(
                "AuthService",
                "login",
                vec![json!({"username": "u"})],
                |ctx| async move {
                    ctx.set(login_context());
                    Ok(json!({"token": "t1", "refreshToken": "r1"}))
                },
            )
            .await
            .unwrap();

        assert_eq!(response["token"], "t1");

        let record = f.store.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(record.status, RecordStatus::Pending);
        assert_eq!(record.method, "login");

        let events = f.publisher.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        match &events[0].outcome {
            Outcome::Succeeded(cmd) => {
                assert_eq!(cmd.record_id, 1);
                assert_eq!(cmd.http_method, "POST");
                assert!(cmd.response_body.as_deref().unwrap().contains("t1"));
            }
            other => panic!("expected success event, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_system_fails_fast_without_a_record() {
        let f = fixture();
        let err = f
            .interceptor
            .intercept("UnknownSystem", "ping", vec![], |_ctx| async move {
                Ok(json!(null))
            })
            .await
            .unwrap_err();

        assert!(matches!(err, OutboundError::Configuration(_)));
        assert!(f.store.is_empty().await);
        assert!(f.publisher.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn transport_error_is_rethrown_after_failure_event() {
        let f = fixture();
        let err = f
            .interceptor
            .intercept("AuthService", "login", vec![], |ctx| async move {
                ctx.set(login_context());
                Err::<serde_json::Value, _>(OutboundError::http_status(500, "boom"))
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), "HTTP_500");

        let events = f.publisher.events.lock().unwrap();
        match &events[0].outcome {
            Outcome::Failed(cmd) => {
                assert_eq!(cmd.record_id, 1);
                assert!(cmd.error_message.contains("HTTP_500"));
            }
            other => panic!("expected failure event, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn business_validation_rejects_despite_transport_success() {
        let f = fixture();
        let err = f
            .interceptor
            .intercept("AuthService", "login", vec![], |ctx| async move {
                ctx.set(login_context());
                Ok(json!({"token": null, "refreshToken": "r1"}))
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), codes::REMOTE_FAILED);

        let events = f.publisher.events.lock().unwrap();
        assert!(matches!(events[0].outcome, Outcome::Failed(_)));
    }

    #[tokio::test]
    async fn unvalidated_endpoint_passes_through() {
        let f = fixture();
        let result = f
            .interceptor
            .intercept("AuthService", "permissions", vec![json!("alice")], |ctx| async move {
                ctx.set(CallContext {
                    endpoint: "/api/v1/auth/permissions".to_string(),
                    http_method: "GET".to_string(),
                    ..login_context()
                });
                Ok(json!({"data": null}))
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn context_is_cleared_on_every_exit_path() {
        let f = fixture();
        let seen: Arc<Mutex<Option<ContextHandle>>> = Arc::new(Mutex::new(None));

        // Success path
        let seen_ok = seen.clone();
        f.interceptor
            .intercept("AuthService", "login", vec![], move |ctx| async move {
                *seen_ok.lock().unwrap() = Some(ctx.clone());
                ctx.set(login_context());
                Ok(json!({"token": "t", "refreshToken": "r"}))
            })
            .await
            .unwrap();
        let handle = seen.lock().unwrap().take().unwrap();
        assert!(handle.get().is_none());

        // Failure path
        let seen_err = seen.clone();
        let _ = f
            .interceptor
            .intercept("AuthService", "login", vec![], move |ctx| async move {
                *seen_err.lock().unwrap() = Some(ctx.clone());
                ctx.set(login_context());
                Err::<serde_json::Value, _>(OutboundError::http_status(502, "gw"))
            })
            .await;
        let handle = seen.lock().unwrap().take().unwrap();
        assert!(handle.get().is_none());

        // Validation-rejected path
        let seen_rej = seen.clone();
        let _ = f
            .interceptor
            .intercept("AuthService", "login", vec![], move |ctx| async move {
                *seen_rej.lock().unwrap() = Some(ctx.clone());
                ctx.set(login_context());
                Ok(json!({"token": null, "refreshToken": null}))
            })
            .await;
        let handle = seen.lock().unwrap().take().unwrap();
        assert!(handle.get().is_none());
    }
}
