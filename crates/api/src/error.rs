use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tandem_core::error::{CoreError, FieldIssue};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the service's JSON error bodies:
/// `{message, name, reason?, status, details?}` with a stable `reason` code
/// wherever the domain defines one.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A domain-level error from `tandem_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A store error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type ApiResult<T> = Result<T, ApiError>;

/// Everything needed to render one error body.
struct ErrorParts {
    status: StatusCode,
    name: &'static str,
    reason: Option<&'static str>,
    message: String,
    details: Option<Vec<FieldIssue>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let parts = match self {
            ApiError::Core(core) => core_error_parts(core),

            ApiError::Database(err) => classify_sqlx_error(err),

            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_parts()
            }
        };

        let mut body = json!({
            "message": parts.message,
            "name": parts.name,
            "status": parts.status.as_u16(),
        });
        if let Some(reason) = parts.reason {
            body["reason"] = json!(reason);
        }
        if let Some(details) = parts.details {
            body["details"] = json!(details);
        }

        (parts.status, axum::Json(body)).into_response()
    }
}

fn core_error_parts(core: CoreError) -> ErrorParts {
    match core {
        CoreError::Validation { message, issues } => ErrorParts {
            status: StatusCode::BAD_REQUEST,
            name: "ValidationError",
            reason: None,
            message,
            details: Some(issues),
        },
        CoreError::Unauthorized { reason, message } => ErrorParts {
            status: StatusCode::UNAUTHORIZED,
            name: "UnauthorizedError",
            reason: Some(reason),
            message,
            details: None,
        },
        CoreError::Forbidden { reason, message } => ErrorParts {
            status: StatusCode::FORBIDDEN,
            name: "ForbiddenError",
            reason: Some(reason),
            message,
            details: None,
        },
        CoreError::Conflict { reason, message } => ErrorParts {
            status: StatusCode::CONFLICT,
            name: "ConflictError",
            reason: Some(reason),
            message,
            details: None,
        },
        CoreError::NotFound { reason, message } => ErrorParts {
            status: StatusCode::NOT_FOUND,
            name: "NotFoundError",
            reason: Some(reason),
            message,
            details: None,
        },
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal_parts()
        }
    }
}

/// Classify a sqlx error into response parts.
///
/// - `RowNotFound` maps to 404.
/// - A unique violation (Postgres 23505) on the credential email constraint
///   maps to 409 `EMAIL_EXISTS` -- this is the backstop for registrations
///   racing past the pre-check.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: sqlx::Error) -> ErrorParts {
    match &err {
        sqlx::Error::RowNotFound => ErrorParts {
            status: StatusCode::NOT_FOUND,
            name: "NotFoundError",
            reason: None,
            message: "Resource not found".to_string(),
            details: None,
        },
        sqlx::Error::Database(db_err) => {
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint == "uq_credentials_email" {
                    return core_error_parts(CoreError::email_exists());
                }
                if constraint.starts_with("uq_") {
                    return ErrorParts {
                        status: StatusCode::CONFLICT,
                        name: "ConflictError",
                        reason: None,
                        message: format!(
                            "Duplicate value violates unique constraint: {constraint}"
                        ),
                        details: None,
                    };
                }
            }
            tracing::error!(error = %db_err, "Database error");
            internal_parts()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal_parts()
        }
    }
}

fn internal_parts() -> ErrorParts {
    ErrorParts {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        name: "InternalError",
        reason: None,
        message: "An internal error occurred".to_string(),
        details: None,
    }
}
