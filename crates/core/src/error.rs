//! Domain error taxonomy.
//!
//! Every externally visible failure carries a stable machine-readable
//! `reason` code (see [`reasons`]) so clients can branch on failures without
//! parsing messages. The HTTP mapping lives in the api crate.

use serde::Serialize;

/// Stable reason codes surfaced in API error bodies.
pub mod reasons {
    pub const TOKEN_MISSING: &str = "TOKEN_MISSING";
    pub const TOKEN_INVALID: &str = "TOKEN_INVALID";
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const ADMIN_REQUIRED: &str = "ADMIN_REQUIRED";
    pub const ADMIN_REGISTRATION_DISABLED: &str = "ADMIN_REGISTRATION_DISABLED";
    pub const ADMIN_SECRET_INVALID: &str = "ADMIN_SECRET_INVALID";
    pub const EMAIL_EXISTS: &str = "EMAIL_EXISTS";
    pub const PROFILE_NOT_FOUND: &str = "PROFILE_NOT_FOUND";
    pub const ROUTE_NOT_FOUND: &str = "ROUTE_NOT_FOUND";
}

/// A single field-level validation issue, surfaced in the `details` list of
/// 400 responses.
#[derive(Debug, Clone, Serialize)]
pub struct FieldIssue {
    pub path: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{message}")]
    Validation {
        message: String,
        issues: Vec<FieldIssue>,
    },

    #[error("{message}")]
    Unauthorized {
        reason: &'static str,
        message: String,
    },

    #[error("{message}")]
    Forbidden {
        reason: &'static str,
        message: String,
    },

    #[error("{message}")]
    Conflict {
        reason: &'static str,
        message: String,
    },

    #[error("{message}")]
    NotFound {
        reason: &'static str,
        message: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>, issues: Vec<FieldIssue>) -> Self {
        Self::Validation {
            message: message.into(),
            issues,
        }
    }

    pub fn token_missing() -> Self {
        Self::Unauthorized {
            reason: reasons::TOKEN_MISSING,
            message: "Missing token".into(),
        }
    }

    pub fn token_invalid() -> Self {
        Self::Unauthorized {
            reason: reasons::TOKEN_INVALID,
            message: "Invalid or expired token".into(),
        }
    }

    pub fn invalid_credentials() -> Self {
        Self::Unauthorized {
            reason: reasons::INVALID_CREDENTIALS,
            message: "Invalid credentials".into(),
        }
    }

    pub fn admin_required() -> Self {
        Self::Forbidden {
            reason: reasons::ADMIN_REQUIRED,
            message: "Forbidden".into(),
        }
    }

    pub fn admin_registration_disabled() -> Self {
        Self::Forbidden {
            reason: reasons::ADMIN_REGISTRATION_DISABLED,
            message: "Administrator registration is disabled".into(),
        }
    }

    pub fn admin_secret_invalid() -> Self {
        Self::Forbidden {
            reason: reasons::ADMIN_SECRET_INVALID,
            message: "Invalid administrator registration secret".into(),
        }
    }

    pub fn email_exists() -> Self {
        Self::Conflict {
            reason: reasons::EMAIL_EXISTS,
            message: "Email already registered".into(),
        }
    }

    pub fn profile_not_found() -> Self {
        Self::NotFound {
            reason: reasons::PROFILE_NOT_FOUND,
            message: "Profile not found for user".into(),
        }
    }

    pub fn route_not_found() -> Self {
        Self::NotFound {
            reason: reasons::ROUTE_NOT_FOUND,
            message: "Not Found".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_carry_stable_reasons() {
        let err = CoreError::email_exists();
        match err {
            CoreError::Conflict { reason, .. } => assert_eq!(reason, "EMAIL_EXISTS"),
            other => panic!("expected Conflict, got {other:?}"),
        }

        let err = CoreError::token_missing();
        match err {
            CoreError::Unauthorized { reason, .. } => assert_eq!(reason, "TOKEN_MISSING"),
            other => panic!("expected Unauthorized, got {other:?}"),
        }
    }

    #[test]
    fn display_uses_the_message() {
        let err = CoreError::profile_not_found();
        assert_eq!(err.to_string(), "Profile not found for user");
    }
}
