//! Session lifecycle: the single source of truth for "who is currently
//! signed in", durable across process restarts within the same client.
//!
//! The store is single-writer (only the auth flow calls `set`/`clear`) and
//! many-reader: every view takes an explicit handle and observes changes
//! through a `watch` subscription rather than ambient globals.

pub mod slot;

pub use slot::{FileSlot, MemorySlot, SessionSlot, StorageError};

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use crate::models::User;

// ═══════════════════════════════════════════════════════════
// SessionStore
// ═══════════════════════════════════════════════════════════

/// Owns the active session and its durable copy.
///
/// The session is trusted at face value on restore: no expiry check, no
/// network round-trip. A storage failure degrades the store to
/// in-memory-only for the rest of the process — the authentication surface
/// must stay usable no matter what the disk does.
pub struct SessionStore {
    slot: Box<dyn SessionSlot>,
    current: watch::Sender<Option<User>>,
    loading: AtomicBool,
    degraded: AtomicBool,
}

impl SessionStore {
    pub fn new(slot: Box<dyn SessionSlot>) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            slot,
            current,
            loading: AtomicBool::new(false),
            degraded: AtomicBool::new(false),
        }
    }

    /// Store backed by the default on-disk slot.
    pub fn open_default() -> Self {
        Self::new(Box::new(FileSlot::default_location()))
    }

    /// Ephemeral store with no persistence (tests, opt-out embedders).
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemorySlot::new()))
    }

    // ── Startup ──────────────────────────────────────────

    /// Load a previously persisted session, if any. Never fails: malformed
    /// or invariant-violating records are treated as absent, and a broken
    /// slot degrades the store instead of erroring.
    pub fn restore(&self) {
        let _loading = self.begin_loading();
        let restored = match self.slot.load() {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(error = %e, "Session slot unreadable, continuing in-memory only");
                self.degraded.store(true, Ordering::Relaxed);
                None
            }
        };
        // A record whose role-conditional fields contradict its role tag was
        // not written by this flow; refuse to resurrect it.
        let restored = restored.filter(|user| {
            let ok = user.role_fields_consistent();
            if !ok {
                tracing::warn!(role = %user.role,
                    "Stored session violates role field invariant, treating as absent");
            }
            ok
        });
        if let Some(user) = &restored {
            tracing::info!(user_id = %user.id, role = %user.role, "Session restored");
        }
        self.current.send_replace(restored);
    }

    // ── Mutation (auth flow only) ────────────────────────

    /// Replace the active session and persist it. Subscribers observe the
    /// new value synchronously. The durable write happens before the
    /// in-memory publish so observers never see a session the slot has not
    /// accepted; a write failure degrades to in-memory-only.
    pub fn set(&self, user: User) {
        if !self.is_degraded() {
            if let Err(e) = self.slot.save(&user) {
                tracing::warn!(error = %e, "Failed to persist session, continuing in-memory only");
                self.degraded.store(true, Ordering::Relaxed);
            }
        }
        tracing::info!(user_id = %user.id, role = %user.role, "Session set");
        self.current.send_replace(Some(user));
    }

    /// Empty the active session and remove the durable copy (logout).
    pub fn clear(&self) {
        if !self.is_degraded() {
            if let Err(e) = self.slot.clear() {
                tracing::warn!(error = %e, "Failed to clear session slot");
                self.degraded.store(true, Ordering::Relaxed);
            }
        }
        tracing::info!("Session cleared");
        self.current.send_replace(None);
    }

    // ── Observation ──────────────────────────────────────

    /// Snapshot of the active session.
    pub fn current(&self) -> Option<User> {
        self.current.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.borrow().is_some()
    }

    /// Subscribe to session changes. The receiver starts at the current
    /// value and sees every subsequent `set`/`clear`/`restore`.
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.current.subscribe()
    }

    /// True only during restore and during the simulated latency of
    /// login/register; never true at rest.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Whether a storage failure has forced in-memory-only operation.
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Relaxed)
    }

    // ── Loading flag ─────────────────────────────────────

    /// Raise the loading flag until the guard drops.
    pub(crate) fn begin_loading(&self) -> LoadingGuard<'_> {
        self.loading.store(true, Ordering::Release);
        LoadingGuard { store: self }
    }

    /// Raise the loading flag only if no operation is already in flight.
    pub(crate) fn try_begin_loading(&self) -> Option<LoadingGuard<'_>> {
        self.loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LoadingGuard { store: self })
    }
}

/// Clears the loading flag on drop, so no failure path can leave the store
/// stuck in a loading state.
pub(crate) struct LoadingGuard<'a> {
    store: &'a SessionStore,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.store.loading.store(false, Ordering::Release);
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use uuid::Uuid;

    fn patient(name: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            role: Role::Patient,
            created_at: chrono::Utc::now(),
            phone: None,
            license_number: None,
            specialization: None,
            address: None,
        }
    }

    /// Slot whose writes always fail — exercises the degraded path.
    struct BrokenSlot;

    impl SessionSlot for BrokenSlot {
        fn load(&self) -> Result<Option<User>, StorageError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no").into())
        }
        fn save(&self, _user: &User) -> Result<(), StorageError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no").into())
        }
        fn clear(&self) -> Result<(), StorageError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no").into())
        }
    }

    #[test]
    fn new_store_is_empty_and_at_rest() {
        let store = SessionStore::in_memory();
        assert!(store.current().is_none());
        assert!(!store.is_authenticated());
        assert!(!store.is_loading());
        assert!(!store.is_degraded());
    }

    #[test]
    fn set_exposes_session_to_readers() {
        let store = SessionStore::in_memory();
        let user = patient("Rahul");
        store.set(user.clone());

        assert!(store.is_authenticated());
        assert_eq!(store.current().unwrap().id, user.id);
    }

    #[test]
    fn clear_then_restore_yields_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::new(Box::new(FileSlot::new(&path)));
        store.set(patient("Rahul"));
        store.clear();
        store.restore();

        assert!(store.current().is_none(), "No resurrection from a stale write");
    }

    #[test]
    fn session_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let user = patient("Rahul");

        let store = SessionStore::new(Box::new(FileSlot::new(&path)));
        store.set(user.clone());
        drop(store);

        let reopened = SessionStore::new(Box::new(FileSlot::new(&path)));
        reopened.restore();
        assert_eq!(reopened.current().unwrap().id, user.id);
        assert!(!reopened.is_loading(), "Loading flag resets after restore");
    }

    #[test]
    fn restore_with_empty_slot_is_empty() {
        let store = SessionStore::in_memory();
        store.restore();
        assert!(store.current().is_none());
    }

    #[test]
    fn restore_rejects_invariant_violating_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(
            &path,
            r#"{"id":"7f2c1a34-9d0b-4c1e-8a5f-2b6d3e4f5a61","name":"Sneaky",
               "email":"s@x.com","role":"patient","licenseNumber":"MH12345"}"#,
        )
        .unwrap();

        let store = SessionStore::new(Box::new(FileSlot::new(&path)));
        store.restore();
        assert!(store.current().is_none());
    }

    #[test]
    fn restore_never_panics_on_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "\0\0\0 definitely not json").unwrap();

        let store = SessionStore::new(Box::new(FileSlot::new(&path)));
        store.restore();
        assert!(store.current().is_none());
    }

    #[test]
    fn broken_slot_degrades_but_session_still_works() {
        let store = SessionStore::new(Box::new(BrokenSlot));
        let user = patient("Rahul");

        store.set(user.clone());
        assert!(store.is_degraded());
        assert_eq!(store.current().unwrap().id, user.id, "In-memory copy still set");

        store.clear();
        assert!(store.current().is_none());
    }

    #[test]
    fn degraded_restore_yields_empty_session() {
        let store = SessionStore::new(Box::new(BrokenSlot));
        store.restore();
        assert!(store.is_degraded());
        assert!(store.current().is_none());
        assert!(!store.is_loading());
    }

    #[test]
    fn subscribers_observe_set_and_clear() {
        let store = SessionStore::in_memory();
        let rx = store.subscribe();
        assert!(rx.borrow().is_none());

        store.set(patient("Rahul"));
        assert!(rx.borrow().is_some());

        store.clear();
        assert!(rx.borrow().is_none());
    }

    #[test]
    fn loading_guard_resets_on_drop() {
        let store = SessionStore::in_memory();
        {
            let _guard = store.begin_loading();
            assert!(store.is_loading());
        }
        assert!(!store.is_loading());
    }

    #[test]
    fn try_begin_loading_rejects_while_in_flight() {
        let store = SessionStore::in_memory();
        let guard = store.try_begin_loading().expect("first acquisition");
        assert!(store.try_begin_loading().is_none(), "Second acquisition rejected");
        drop(guard);
        assert!(store.try_begin_loading().is_some(), "Available again after drop");
    }
}
