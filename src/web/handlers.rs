//! API handlers for the form endpoints.
//!
//! Both endpoints share one validate-then-notify pipeline; the per-kind
//! differences (required fields, subject, labels) live in the form schemas.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::form::{validate, FormError, FormKind};
use crate::mail::{Email, MailError, Mailer};

use super::dto::{Ack, SubmissionBody};
use super::error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Mail transport; swapped for a recording stub in tests.
    pub mailer: Arc<dyn Mailer>,
    /// Destination address, `None` until `MAIL_TO` is configured.
    pub mail_to: Option<String>,
    /// Sender address.
    pub mail_from: String,
}

impl AppState {
    /// Create the application state.
    pub fn new(mailer: Arc<dyn Mailer>, mail_to: Option<String>, mail_from: impl Into<String>) -> Self {
        Self {
            mailer,
            mail_to,
            mail_from: mail_from.into(),
        }
    }
}

/// POST /api/project - project inquiry submission.
pub async fn submit_project(
    State(state): State<Arc<AppState>>,
    body: SubmissionBody,
) -> Result<Json<Ack>, ApiError> {
    handle_submission(&state, FormKind::Project, body.0).await
}

/// POST /api/application - job application submission.
pub async fn submit_application(
    State(state): State<Arc<AppState>>,
    body: SubmissionBody,
) -> Result<Json<Ack>, ApiError> {
    handle_submission(&state, FormKind::Application, body.0).await
}

/// GET /health - liveness probe, no dependency checks.
pub async fn health() -> Json<Ack> {
    Json(Ack::ok())
}

/// Shared pipeline: validate, resolve destination, format, dispatch once.
async fn handle_submission(
    state: &AppState,
    kind: FormKind,
    fields: HashMap<String, String>,
) -> Result<Json<Ack>, ApiError> {
    let submission = match validate(kind, &fields) {
        Ok(submission) => submission,
        Err(FormError::MissingFields(missing)) => {
            tracing::warn!(form = %kind, missing = ?missing, "submission rejected");
            return Err(ApiError::missing_fields());
        }
    };

    // Unconfigured destination is a delivery failure, never a validation one,
    // and is detected before any transport attempt.
    let Some(to) = state.mail_to.as_deref() else {
        tracing::error!(form = %kind, "{}", MailError::MissingDestination);
        return Err(ApiError::server_error());
    };

    let email = Email {
        from: state.mail_from.clone(),
        to: to.to_string(),
        subject: submission.subject().to_string(),
        html: submission.html_body(),
    };

    match state.mailer.send(&email).await {
        Ok(()) => {
            tracing::info!(form = %kind, "submission relayed");
            Ok(Json(Ack::ok()))
        }
        Err(MailError::Smtp {
            message,
            code,
            permanent,
        }) => {
            tracing::error!(
                form = %kind,
                code = ?code,
                permanent = ?permanent,
                error = %message,
                "mail dispatch failed"
            );
            Err(ApiError::server_error())
        }
        Err(e) => {
            tracing::error!(form = %kind, error = %e, "mail dispatch failed");
            Err(ApiError::server_error())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubMailer {
        sent: Mutex<usize>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl Mailer for StubMailer {
        async fn send(&self, _email: &Email) -> Result<(), MailError> {
            *self.sent.lock().unwrap() += 1;
            if self.fail {
                return Err(MailError::Smtp {
                    message: "permanent error (550): mailbox unavailable".to_string(),
                    code: Some("550".to_string()),
                    permanent: Some(true),
                });
            }
            Ok(())
        }
    }

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn valid_project_fields() -> HashMap<String, String> {
        fields(&[
            ("name", "Max"),
            ("email", "max@x.de"),
            ("projektart", "Neubau"),
            ("beschreibung", "Halle"),
        ])
    }

    fn state_with(mailer: Arc<StubMailer>, mail_to: Option<&str>) -> AppState {
        AppState::new(
            mailer,
            mail_to.map(String::from),
            "no-reply@wsn-vertrieb.de",
        )
    }

    #[tokio::test]
    async fn test_valid_submission_dispatches_once() {
        let mailer = Arc::new(StubMailer::default());
        let state = state_with(mailer.clone(), Some("kontakt@wsn-vertrieb.de"));

        let result = handle_submission(&state, FormKind::Project, valid_project_fields()).await;

        assert!(result.is_ok());
        assert_eq!(*mailer.sent.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_field_is_400_without_dispatch() {
        let mailer = Arc::new(StubMailer::default());
        let state = state_with(mailer.clone(), Some("kontakt@wsn-vertrieb.de"));
        let mut fields = valid_project_fields();
        fields.remove("beschreibung");

        let err = handle_submission(&state, FormKind::Project, fields)
            .await
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Pflichtfelder fehlen.");
        assert_eq!(*mailer.sent.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_destination_is_500_without_dispatch() {
        let mailer = Arc::new(StubMailer::default());
        let state = state_with(mailer.clone(), None);

        let err = handle_submission(&state, FormKind::Project, valid_project_fields())
            .await
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Serverfehler");
        assert_eq!(*mailer.sent.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_is_500_after_one_attempt() {
        let mailer = Arc::new(StubMailer {
            fail: true,
            ..StubMailer::default()
        });
        let state = state_with(mailer.clone(), Some("kontakt@wsn-vertrieb.de"));

        let err = handle_submission(&state, FormKind::Project, valid_project_fields())
            .await
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(*mailer.sent.lock().unwrap(), 1);
    }
}
