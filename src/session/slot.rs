//! Durable session slot: a single keyed location holding one serialized
//! `User`, or nothing.
//!
//! The slot is read once at startup, written on every sign-in and cleared on
//! logout. A reader that finds an incompatible shape treats the slot as
//! absent rather than erroring — stale or torn records must never block the
//! authentication surface.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::models::User;

// ═══════════════════════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════════════════════

/// Errors from durable slot operations. Non-fatal by contract: the store
/// falls back to in-memory-only when one of these surfaces.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Session slot I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session record could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ═══════════════════════════════════════════════════════════
// SessionSlot trait
// ═══════════════════════════════════════════════════════════

/// Storage seam for the persisted session record.
///
/// `load` distinguishes "nothing stored" (`Ok(None)`) from "storage broken"
/// (`Err`). A record that is present but unparseable counts as nothing
/// stored: implementations log and return `Ok(None)`.
pub trait SessionSlot: Send + Sync {
    fn load(&self) -> Result<Option<User>, StorageError>;
    fn save(&self, user: &User) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

// ═══════════════════════════════════════════════════════════
// FileSlot — JSON file under the app data dir
// ═══════════════════════════════════════════════════════════

/// File-backed slot: one JSON document at a fixed path.
///
/// Writes go to a temp file in the same directory followed by a rename, so a
/// crash mid-write never leaves a torn record behind.
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Slot at the default location under the app data dir.
    pub fn default_location() -> Self {
        Self::new(crate::config::session_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionSlot for FileSlot {
    fn load(&self) -> Result<Option<User>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str::<User>(&content) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e,
                    "Stored session is unreadable, treating as absent");
                Ok(None)
            }
        }
    }

    fn save(&self, user: &User) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(user)?;
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = std::fs::File::create(&tmp)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// MemorySlot — ephemeral, no persistence across restarts
// ═══════════════════════════════════════════════════════════

/// In-memory slot for tests and embedders that opt out of persistence.
#[derive(Default)]
pub struct MemorySlot {
    record: Mutex<Option<User>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionSlot for MemorySlot {
    fn load(&self) -> Result<Option<User>, StorageError> {
        Ok(self.record.lock().expect("slot lock").clone())
    }

    fn save(&self, user: &User) -> Result<(), StorageError> {
        *self.record.lock().expect("slot lock") = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.record.lock().expect("slot lock") = None;
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
