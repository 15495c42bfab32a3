//! Role taxonomy and per-role registration field requirements.
//!
//! The four user kinds share one authentication surface; which registration
//! fields are required or shown is looked up from a static descriptor per
//! role rather than checked ad hoc at the call sites.

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════
// Role
// ═══════════════════════════════════════════════════════════

/// The four user kinds served by the client. Closed set: immutable once a
/// session exists, selectable only during authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
    Pharmacy,
    Lab,
}

impl Role {
    /// All roles, in the order the role picker presents them.
    pub const ALL: [Role; 4] = [Role::Patient, Role::Doctor, Role::Pharmacy, Role::Lab];

    /// Parse from the stored string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "patient" => Some(Self::Patient),
            "doctor" => Some(Self::Doctor),
            "pharmacy" => Some(Self::Pharmacy),
            "lab" => Some(Self::Lab),
            _ => None,
        }
    }

    /// Stored string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Doctor => "doctor",
            Self::Pharmacy => "pharmacy",
            Self::Lab => "lab",
        }
    }

    /// Human-readable label for UI display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Patient => "Patient",
            Self::Doctor => "Doctor",
            Self::Pharmacy => "Pharmacy",
            Self::Lab => "Lab",
        }
    }

    /// One-line description shown on the role picker card.
    pub fn description(self) -> &'static str {
        match self {
            Self::Patient => "Store and manage your health records",
            Self::Doctor => "Access patient records and add clinical notes",
            Self::Pharmacy => "Receive and manage prescriptions",
            Self::Lab => "Upload and deliver test results",
        }
    }

    /// Registration field requirements for this role.
    pub const fn requirements(self) -> &'static FieldRequirements {
        match self {
            Self::Patient => &PATIENT_FIELDS,
            Self::Doctor => &DOCTOR_FIELDS,
            Self::Pharmacy => &PHARMACY_FIELDS,
            Self::Lab => &LAB_FIELDS,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════
// Field
// ═══════════════════════════════════════════════════════════

/// A registration/login form field, typed so validation failures can name
/// exactly which fields are missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
    Phone,
    LicenseNumber,
    Specialization,
    Address,
}

impl Field {
    /// Key used in the persisted record and in form payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::Phone => "phone",
            Self::LicenseNumber => "licenseNumber",
            Self::Specialization => "specialization",
            Self::Address => "address",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════
// Field requirements per role
// ═══════════════════════════════════════════════════════════

/// Registration field descriptor for one role.
///
/// `required` fields must be non-empty before a `User` of that role can be
/// constructed; `optional_shown` fields are rendered but may stay blank.
/// Fields in neither list are never collected for the role and must be
/// absent from the resulting record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRequirements {
    pub required: &'static [Field],
    pub optional_shown: &'static [Field],
}

impl FieldRequirements {
    /// Whether the field must be non-empty at registration.
    pub fn is_required(&self, field: Field) -> bool {
        self.required.contains(&field)
    }

    /// Whether the field is collected at all for this role.
    pub fn is_shown(&self, field: Field) -> bool {
        self.required.contains(&field) || self.optional_shown.contains(&field)
    }
}

const PATIENT_FIELDS: FieldRequirements = FieldRequirements {
    required: &[Field::Name, Field::Email, Field::Password],
    optional_shown: &[Field::Phone],
};

const DOCTOR_FIELDS: FieldRequirements = FieldRequirements {
    required: &[Field::Name, Field::Email, Field::Password],
    optional_shown: &[Field::Phone, Field::LicenseNumber, Field::Specialization],
};

const PHARMACY_FIELDS: FieldRequirements = FieldRequirements {
    required: &[Field::Name, Field::Email, Field::Password],
    optional_shown: &[Field::Phone, Field::LicenseNumber, Field::Address],
};

const LAB_FIELDS: FieldRequirements = FieldRequirements {
    required: &[Field::Name, Field::Email, Field::Password],
    optional_shown: &[Field::Phone, Field::LicenseNumber, Field::Address],
};

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
