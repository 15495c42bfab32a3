//! Identity verification seam.
//!
//! Login in this client does not verify credentials against anything real:
//! the shipped verifier waits a simulated round-trip and fabricates a
//! plausible display identity for the chosen role. The trait exists so a
//! real identity provider can replace the stub without the state machine
//! noticing.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use super::error::AuthError;
use crate::models::{Role, User};

/// Login submission as handed to the verifier.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Backend seam for both submission paths. `verify` resolves a login to a
/// `User`; `confirm_registration` is the acceptance round-trip for a locally
/// constructed registration record.
pub trait IdentityVerifier: Send + Sync {
    fn verify(
        &self,
        credentials: Credentials,
    ) -> impl Future<Output = Result<User, AuthError>> + Send;

    fn confirm_registration(
        &self,
        user: &User,
    ) -> impl Future<Output = Result<(), AuthError>> + Send;
}

// ═══════════════════════════════════════════════════════════
// StubIdentityVerifier
// ═══════════════════════════════════════════════════════════

/// Default simulated round-trip before a submission resolves.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1000);

/// Stand-in identity provider: accepts anything, fabricates a
/// deterministic-by-role display identity after a configurable latency.
#[derive(Debug, Clone)]
pub struct StubIdentityVerifier {
    latency: Duration,
}

impl StubIdentityVerifier {
    pub fn new() -> Self {
        Self {
            latency: DEFAULT_LATENCY,
        }
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    /// The fabricated identity for a role. Only the fields the role's
    /// descriptor collects are populated; everything else stays absent.
    fn fabricate(role: Role, email: &str) -> User {
        let name = match role {
            Role::Patient => "Rahul Sharma",
            Role::Doctor => "Dr. Priya Patel",
            Role::Pharmacy => "MedPlus Pharmacy",
            Role::Lab => "LifeLab Diagnostics",
        };
        let (license_number, specialization, address) = match role {
            Role::Patient => (None, None, None),
            Role::Doctor => (Some("MH12345"), Some("General Medicine"), None),
            Role::Pharmacy => (
                Some("PHM98765"),
                None,
                Some("Shop 12, Medical Complex, Mumbai"),
            ),
            Role::Lab => (
                Some("LAB54321"),
                None,
                Some("Lab Center, Health Plaza, Delhi"),
            ),
        };
        User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            created_at: Utc::now(),
            phone: Some("+91 98765 43210".to_string()),
            license_number: license_number.map(str::to_string),
            specialization: specialization.map(str::to_string),
            address: address.map(str::to_string),
        }
    }
}

impl Default for StubIdentityVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityVerifier for StubIdentityVerifier {
    fn verify(
        &self,
        credentials: Credentials,
    ) -> impl Future<Output = Result<User, AuthError>> + Send {
        let latency = self.latency;
        async move {
            tokio::time::sleep(latency).await;
            Ok(Self::fabricate(credentials.role, &credentials.email))
        }
    }

    fn confirm_registration(
        &self,
        _user: &User,
    ) -> impl Future<Output = Result<(), AuthError>> + Send {
        let latency = self.latency;
        async move {
            tokio::time::sleep(latency).await;
            Ok(())
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
