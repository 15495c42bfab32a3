//! Workspace dispatch: pure mapping from the active session to the view the
//! shell should mount, plus the navigation signal the router acts on when
//! the session appears or disappears.

use crate::models::{Role, User};

// ═══════════════════════════════════════════════════════════
// Workspace
// ═══════════════════════════════════════════════════════════

/// The view to mount for a given session state. One variant per role plus
/// the unauthenticated landing surface — the `match` in [`resolve`] is
/// non-exhaustive the moment a role is added without a workspace.
///
/// Only the patient workspace is a full product surface and receives the
/// whole record; the professional workspaces are placeholders carrying just
/// the display name.
#[derive(Debug, Clone, PartialEq)]
pub enum Workspace {
    /// No session: the landing surface with its sign-in entry point.
    Landing,
    Patient {
        user: User,
    },
    Doctor {
        display_name: String,
    },
    Pharmacy {
        display_name: String,
    },
    Lab {
        display_name: String,
    },
}

impl Workspace {
    /// The role this workspace serves, if any.
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Landing => None,
            Self::Patient { .. } => Some(Role::Patient),
            Self::Doctor { .. } => Some(Role::Doctor),
            Self::Pharmacy { .. } => Some(Role::Pharmacy),
            Self::Lab { .. } => Some(Role::Lab),
        }
    }
}

/// Select the workspace for the current session.
pub fn resolve(session: Option<&User>) -> Workspace {
    let Some(user) = session else {
        return Workspace::Landing;
    };
    match user.role {
        Role::Patient => Workspace::Patient { user: user.clone() },
        Role::Doctor => Workspace::Doctor {
            display_name: user.name.clone(),
        },
        Role::Pharmacy => Workspace::Pharmacy {
            display_name: user.name.clone(),
        },
        Role::Lab => Workspace::Lab {
            display_name: user.name.clone(),
        },
    }
}

// ═══════════════════════════════════════════════════════════
// Navigation signal
// ═══════════════════════════════════════════════════════════

/// Emitted to the router collaborator when the session transitions between
/// empty and present. Same-kind transitions (one user replaced by another,
/// or still nobody) produce no signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavSignal {
    ToWorkspace,
    ToLanding,
}

/// Signal for one observed session transition.
pub fn navigation(previous: Option<&User>, next: Option<&User>) -> Option<NavSignal> {
    match (previous, next) {
        (None, Some(_)) => Some(NavSignal::ToWorkspace),
        (Some(_), None) => Some(NavSignal::ToLanding),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
