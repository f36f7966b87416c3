//! Request-body extractor that validates against an assignment shape.
//!
//! A handler taking [`ValidatedJson<T>`] only runs once the body has passed
//! `T`'s validation under the configured [`StatusPolicy`]; a failing body is
//! rejected (400, or 415 without a JSON content type) and never reaches
//! persistence.

use std::sync::Arc;

use assignment_core::assignment::StatusPolicy;
use assignment_core::error::CoreError;
use assignment_db::models::assignment::{CreateAssignment, UpdateAssignment};
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRef, FromRequest, Request};
use axum::Json;

use crate::config::SchemaConfig;
use crate::error::AppError;

/// An inbound shape that can be validated from an untyped JSON body.
pub trait RequestShape: Sized {
    /// Shape name used in log fields.
    const NAME: &'static str;

    fn validate(raw: &serde_json::Value, policy: &StatusPolicy) -> Result<Self, CoreError>;
}

impl RequestShape for CreateAssignment {
    const NAME: &'static str = "CreateAssignment";

    fn validate(raw: &serde_json::Value, policy: &StatusPolicy) -> Result<Self, CoreError> {
        CreateAssignment::validate(raw, policy)
    }
}

impl RequestShape for UpdateAssignment {
    const NAME: &'static str = "UpdateAssignment";

    fn validate(raw: &serde_json::Value, policy: &StatusPolicy) -> Result<Self, CoreError> {
        UpdateAssignment::validate(raw, policy)
    }
}

/// JSON body extractor that runs [`RequestShape::validate`].
///
/// The router state must expose an `Arc<SchemaConfig>` via [`FromRef`].
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: RequestShape + Send,
    Arc<SchemaConfig>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<serde_json::Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(shape = T::NAME, error = %rejection, "Unparseable request body");
                match &rejection {
                    JsonRejection::MissingJsonContentType(_) => {
                        AppError::UnsupportedMediaType(rejection.body_text())
                    }
                    _ => AppError::BadRequest(rejection.body_text()),
                }
            })?;

        let config = Arc::<SchemaConfig>::from_ref(state);
        match T::validate(&raw, &config.status_policy) {
            Ok(value) => Ok(ValidatedJson(value)),
            Err(err) => {
                tracing::debug!(shape = T::NAME, error = %err, "Rejected request body");
                Err(AppError::Core(err))
            }
        }
    }
}
