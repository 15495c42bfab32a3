//! The authentication flow: mode toggle, role selection, role-conditional
//! validation, and the two submission paths that produce a `User`.
//!
//! The controller owns the transient form state behind a mutex that is never
//! held across an await. Stale results are fenced by an epoch counter:
//! toggling or closing the surface bumps it, and a submission whose epoch no
//! longer matches when its round-trip resolves is discarded before it can
//! reach the session store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use super::error::{AuthError, ValidationError};
use super::form::{AuthFormState, AuthMode, FormFields};
use super::verifier::{Credentials, IdentityVerifier};
use crate::models::{Field, Role, User};
use crate::session::SessionStore;

// ═══════════════════════════════════════════════════════════
// AuthFlowController
// ═══════════════════════════════════════════════════════════

pub struct AuthFlowController<V: IdentityVerifier> {
    store: Arc<SessionStore>,
    verifier: V,
    form: Mutex<AuthFormState>,
    epoch: AtomicU64,
}

impl<V: IdentityVerifier> AuthFlowController<V> {
    pub fn new(store: Arc<SessionStore>, verifier: V) -> Self {
        Self {
            store,
            verifier,
            form: Mutex::new(AuthFormState::new()),
            epoch: AtomicU64::new(0),
        }
    }

    // ── Form state ───────────────────────────────────────

    /// Snapshot of the transient form.
    pub fn form(&self) -> AuthFormState {
        self.form.lock().expect("form lock").clone()
    }

    pub fn mode(&self) -> AuthMode {
        self.form.lock().expect("form lock").mode
    }

    pub fn selected_role(&self) -> Role {
        self.form.lock().expect("form lock").selected_role
    }

    /// Flip between sign-in and registration. Clears typed values, keeps the
    /// selected role, and invalidates any in-flight submission.
    pub fn toggle_mode(&self) {
        self.form.lock().expect("form lock").toggle_mode();
        self.bump_epoch();
    }

    pub fn select_role(&self, role: Role) {
        self.form.lock().expect("form lock").select_role(role);
    }

    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        self.form.lock().expect("form lock").fields.set(field, value);
    }

    /// The surface closed (success or cancel): discard the transient state
    /// and invalidate any in-flight submission.
    pub fn close(&self) {
        *self.form.lock().expect("form lock") = AuthFormState::new();
        self.bump_epoch();
    }

    /// Explicit logout: empties the active session and its durable copy.
    pub fn logout(&self) {
        self.store.clear();
    }

    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    // ── Submission ───────────────────────────────────────

    /// Sign in with the typed email/password under the selected role.
    ///
    /// Blank-field prevention is the surface's job; this passes whatever was
    /// typed to the identity verifier and fails only if that round-trip
    /// fails. On success the resulting session is committed to the store.
    pub async fn submit_login(&self) -> Result<User, AuthError> {
        let (credentials, epoch) = {
            let form = self.form.lock().expect("form lock");
            (
                Credentials {
                    email: form.fields.email.clone(),
                    password: form.fields.password.clone(),
                    role: form.selected_role,
                },
                self.epoch.load(Ordering::Acquire),
            )
        };
        let _loading = self
            .store
            .try_begin_loading()
            .ok_or(AuthError::SubmissionInFlight)?;

        let user = self.verifier.verify(credentials).await?;
        self.commit(user, epoch)
    }

    /// Register a new account under the selected role.
    ///
    /// Role-required fields must be non-empty; the constructed record
    /// carries only the optional fields the role's descriptor collects,
    /// with a fresh id every time — identical input twice yields two
    /// independent sessions.
    pub async fn submit_register(&self) -> Result<User, AuthError> {
        let (role, fields, epoch) = {
            let form = self.form.lock().expect("form lock");
            (
                form.selected_role,
                form.fields.clone(),
                self.epoch.load(Ordering::Acquire),
            )
        };

        let missing = missing_required_fields(role, &fields);
        if !missing.is_empty() {
            return Err(ValidationError::new(missing).into());
        }

        let _loading = self
            .store
            .try_begin_loading()
            .ok_or(AuthError::SubmissionInFlight)?;

        let user = build_registration(role, &fields);
        self.verifier.confirm_registration(&user).await?;
        self.commit(user, epoch)
    }

    // ── Internals ────────────────────────────────────────

    fn bump_epoch(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
    }

    /// Commit a resolved submission, unless the form moved on while the
    /// round-trip was in flight.
    fn commit(&self, user: User, epoch: u64) -> Result<User, AuthError> {
        if self.epoch.load(Ordering::Acquire) != epoch {
            tracing::info!(user_id = %user.id, "Discarding stale authentication result");
            return Err(AuthError::Superseded);
        }
        self.store.set(user.clone());
        Ok(user)
    }
}

// ═══════════════════════════════════════════════════════════
// Validation and record construction
// ═══════════════════════════════════════════════════════════

/// Role-required fields that are blank, in descriptor order.
pub fn missing_required_fields(role: Role, fields: &FormFields) -> Vec<Field> {
    role.requirements()
        .required
        .iter()
        .copied()
        .filter(|&field| fields.is_blank(field))
        .collect()
}

/// Build the session record for a validated registration. Optional fields
/// the role does not collect are omitted even if the user typed into them
/// under a previously selected role.
fn build_registration(role: Role, fields: &FormFields) -> User {
    let req = role.requirements();
    let optional = |field: Field| -> Option<String> {
        (req.is_shown(field) && !fields.is_blank(field))
            .then(|| fields.get(field).trim().to_string())
    };
    User {
        id: Uuid::new_v4(),
        name: fields.name.trim().to_string(),
        email: fields.email.trim().to_string(),
        role,
        created_at: Utc::now(),
        phone: optional(Field::Phone),
        license_number: optional(Field::LicenseNumber),
        specialization: optional(Field::Specialization),
        address: optional(Field::Address),
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
