//! Error taxonomy for the authentication flow. Every variant is recoverable:
//! the form stays open and editable after any of these.

use crate::models::Field;

/// A registration payload is missing role-required fields. Names exactly the
/// fields that were blank so the surface can highlight them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing required fields: {}", self.field_list())]
pub struct ValidationError {
    pub missing: Vec<Field>,
}

impl ValidationError {
    pub fn new(missing: Vec<Field>) -> Self {
        Self { missing }
    }

    fn field_list(&self) -> String {
        self.missing
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Errors from login/registration submission.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The (simulated) backend rejected the credentials. Surfaced
    /// generically — never says which part was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A submission is already in flight; resubmission is rejected rather
    /// than racing the first request.
    #[error("A submission is already in progress")]
    SubmissionInFlight,

    /// The form was toggled or closed while the request was in flight; the
    /// result is discarded and never reaches the session store.
    #[error("The form changed while the request was in flight")]
    Superseded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_missing_fields() {
        let err = ValidationError::new(vec![Field::Name, Field::Email]);
        assert_eq!(err.to_string(), "Missing required fields: name, email");
    }

    #[test]
    fn validation_error_converts_into_auth_error() {
        let err: AuthError = ValidationError::new(vec![Field::Password]).into();
        match err {
            AuthError::Validation(v) => assert_eq!(v.missing, vec![Field::Password]),
            other => panic!("Expected Validation, got: {other}"),
        }
    }

    #[test]
    fn invalid_credentials_message_is_generic() {
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid credentials");
    }
}
