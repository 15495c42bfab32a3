//! Transient state of the authentication surface. Never persisted: created
//! when the surface opens, discarded when it closes.

use crate::models::{Field, Role};

// ═══════════════════════════════════════════════════════════
// AuthMode
// ═══════════════════════════════════════════════════════════

/// Which face of the surface is showing. No terminal state — the flow is
/// reusable indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }
}

// ═══════════════════════════════════════════════════════════
// FormFields
// ═══════════════════════════════════════════════════════════

/// Raw text of every collectable field. Which ones are rendered, required
/// or ignored is the role descriptor's business, not this struct's.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub license_number: String,
    pub specialization: String,
    pub address: String,
}

impl FormFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::Phone => &self.phone,
            Field::LicenseNumber => &self.license_number,
            Field::Specialization => &self.specialization,
            Field::Address => &self.address,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::Phone => &mut self.phone,
            Field::LicenseNumber => &mut self.license_number,
            Field::Specialization => &mut self.specialization,
            Field::Address => &mut self.address,
        };
        *slot = value.into();
    }

    /// Blank means empty or whitespace-only; a required field must carry
    /// visible content.
    pub fn is_blank(&self, field: Field) -> bool {
        self.get(field).trim().is_empty()
    }
}

// ═══════════════════════════════════════════════════════════
// AuthFormState
// ═══════════════════════════════════════════════════════════

/// The whole transient form: mode, selected role, typed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFormState {
    pub mode: AuthMode,
    pub selected_role: Role,
    pub fields: FormFields,
}

impl AuthFormState {
    /// Fresh surface: sign-in face, patient preselected, blank fields.
    pub fn new() -> Self {
        Self {
            mode: AuthMode::Login,
            selected_role: Role::Patient,
            fields: FormFields::default(),
        }
    }

    /// Flip between sign-in and registration. Clears every typed value but
    /// keeps the selected role.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.fields = FormFields::default();
    }

    /// Change the selected role. Typed values are left alone — switching
    /// from doctor to pharmacy must not eat the name the user already
    /// entered; non-applicable values are dropped at submission instead.
    pub fn select_role(&mut self, role: Role) {
        self.selected_role = role;
    }
}

impl Default for AuthFormState {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
