use axum::extract::{rejection::JsonRejection, FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::{Validate, ValidationErrors};

use crate::util::error::HandlerError;

/// JSON body that has been deserialized and passed `validator` checks.
/// Malformed bodies, unknown or missing fields and failed rules all come back as 400.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = HandlerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection: JsonRejection| {
            debug!("Rejected request body: {}", rejection.body_text());
            HandlerError::validation(format!("Invalid request body: {}", rejection.body_text()))
        })?;
        value
            .validate()
            .map_err(|e| HandlerError::validation(format!("Validation error: {}", describe(&e))))?;
        Ok(ValidatedJson(value))
    }
}

/// `field: code` pairs only. The rejected values stay out of the response.
fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| errs.iter().map(move |err| format!("{}: {}", field, err.code)))
        .collect();
    parts.sort();
    parts.join(", ")
}
