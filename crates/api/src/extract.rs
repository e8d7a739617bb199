//! Request extractors shared across handlers.

use std::convert::Infallible;

use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use tandem_core::error::{CoreError, FieldIssue};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::ApiError;

/// JSON body extractor that rejects malformed JSON and failed field
/// validation with a 400 carrying a field-level `details` list.
///
/// ```ignore
/// async fn handler(ValidatedJson(input): ValidatedJson<LoginRequest>) -> ... {}
/// ```
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ApiError::Core(CoreError::validation(rejection.body_text(), Vec::new()))
            })?;

        value
            .validate()
            .map_err(|errors| ApiError::Core(validation_error(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

/// Build a [`CoreError::Validation`] from validator output: one issue per
/// failed rule, and a summary message of `path: message` pairs.
fn validation_error(errors: &ValidationErrors) -> CoreError {
    let mut issues = Vec::new();
    collect_issues(errors, "", &mut issues);

    let message = if issues.is_empty() {
        "Request validation failed".to_string()
    } else {
        issues
            .iter()
            .map(|issue| format!("{}: {}", issue.path, issue.message))
            .collect::<Vec<_>>()
            .join("; ")
    };

    CoreError::validation(message, issues)
}

fn collect_issues(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldIssue>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    out.push(FieldIssue {
                        path: path.clone(),
                        message,
                    });
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_issues(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_issues(nested, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

/// Client metadata recorded with audit entries.
///
/// The ip is taken from `X-Forwarded-For` (first hop) or `X-Real-IP`; both
/// absent means `None`. Extraction never fails.
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

impl<S> FromRequestParts<S> for RequestMeta
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let ip = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .or_else(|| {
                parts
                    .headers
                    .get("x-real-ip")
                    .and_then(|v| v.to_str().ok())
                    .map(String::from)
            });

        Ok(RequestMeta { ip, user_agent })
    }
}
