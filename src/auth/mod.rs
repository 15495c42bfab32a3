pub mod controller;
pub mod error;
pub mod form;
pub mod verifier;

pub use controller::{missing_required_fields, AuthFlowController};
pub use error::{AuthError, ValidationError};
pub use form::{AuthFormState, AuthMode, FormFields};
pub use verifier::{Credentials, IdentityVerifier, StubIdentityVerifier};
