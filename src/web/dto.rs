//! Request and response bodies for the form API.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::extract::{Form, FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;

use super::error::ApiError;

/// Raw submission payload: the field map from a JSON or form-encoded body.
///
/// The site posts JSON; the form-encoded fallback covers plain HTML form
/// submits. Undecodable bodies reject with a 400.
#[derive(Debug)]
pub struct SubmissionBody(pub HashMap<String, String>);

#[async_trait]
impl<S> FromRequest<S> for SubmissionBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|_| ApiError::invalid_body())?;
            Ok(Self(fields))
        } else {
            let Json(fields) = Json::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|_| ApiError::invalid_body())?;
            Ok(Self(fields))
        }
    }
}

/// Acknowledgement body for successful requests.
#[derive(Debug, serde::Serialize)]
pub struct Ack {
    /// Always true.
    pub ok: bool,
}

impl Ack {
    /// The canonical success acknowledgement.
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
