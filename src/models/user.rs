//! The session record: who is signed in, under which role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::{Field, Role};

/// Client-local, self-asserted identity record.
///
/// Serialized with camelCase keys — the same shape the durable session slot
/// stores. Optional fields are omitted entirely when `None`: a patient record
/// never carries a `licenseNumber` key, not even an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Login key, together with `role`.
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl User {
    /// Whether the role-conditional fields respect the role's descriptor:
    /// `license_number`/`specialization`/`address` must be absent for roles
    /// that do not collect them. Restore rejects records that fail this.
    pub fn role_fields_consistent(&self) -> bool {
        let req = self.role.requirements();
        let carried = [
            (Field::LicenseNumber, self.license_number.is_some()),
            (Field::Specialization, self.specialization.is_some()),
            (Field::Address, self.address.is_some()),
        ];
        carried
            .into_iter()
            .all(|(field, present)| !present || req.is_shown(field))
    }
}
