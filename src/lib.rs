//! Role-aware authentication core and session lifecycle for the Digital
//! Health Locker client.
//!
//! One authentication surface serves four user kinds — patient, doctor,
//! pharmacy, lab. [`auth::AuthFlowController`] drives the sign-in/register
//! form and produces a [`models::User`]; [`session::SessionStore`] persists
//! and exposes it; [`dispatch::resolve`] picks the workspace the shell
//! should mount. Rendering is the embedding shell's problem: this crate
//! hands it a `User` and a workspace tag, nothing more.

pub mod auth;
pub mod config;
pub mod dispatch;
pub mod models;
pub mod session;

pub use auth::{AuthError, AuthFlowController, StubIdentityVerifier, ValidationError};
pub use dispatch::{resolve, NavSignal, Workspace};
pub use models::{Field, Role, User};
pub use session::{SessionStore, StorageError};

use tracing_subscriber::EnvFilter;

/// Initialize tracing for an embedding shell. Honors `RUST_LOG`, falls back
/// to the crate default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("HealthLocker core starting v{}", config::APP_VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    /// End-to-end pass over the whole flow: open the surface, register a
    /// doctor, observe the navigation signal, restart, restore, log out.
    #[tokio::test]
    async fn full_session_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = Arc::new(SessionStore::new(Box::new(session::FileSlot::new(&path))));
        store.restore();
        assert_eq!(dispatch::resolve(store.current().as_ref()), Workspace::Landing);

        let ctl = AuthFlowController::new(
            Arc::clone(&store),
            StubIdentityVerifier::with_latency(Duration::ZERO),
        );
        let before = store.current();

        ctl.toggle_mode();
        ctl.select_role(Role::Doctor);
        ctl.set_field(Field::Name, "Dr. Priya Patel");
        ctl.set_field(Field::Email, "priya@x.com");
        ctl.set_field(Field::Password, "secret");
        ctl.set_field(Field::LicenseNumber, "MH12345");
        let user = ctl.submit_register().await.unwrap();
        ctl.close();

        let after = store.current();
        assert_eq!(
            dispatch::navigation(before.as_ref(), after.as_ref()),
            Some(NavSignal::ToWorkspace)
        );
        assert_eq!(
            dispatch::resolve(after.as_ref()),
            Workspace::Doctor {
                display_name: "Dr. Priya Patel".to_string()
            }
        );

        // Simulated restart: a fresh store over the same slot.
        let reopened = SessionStore::new(Box::new(session::FileSlot::new(&path)));
        reopened.restore();
        assert_eq!(reopened.current().unwrap().id, user.id);

        // Logout destroys both copies.
        let ctl2 = AuthFlowController::new(
            Arc::new(reopened),
            StubIdentityVerifier::with_latency(Duration::ZERO),
        );
        ctl2.logout();
        let verify = SessionStore::new(Box::new(session::FileSlot::new(&path)));
        verify.restore();
        assert!(verify.current().is_none());
    }
}
