//! # Domain models for sessions and reports
//!
//! Defines the data structures shared by the API client and the dashboards.
//! These types are `Serialize + Deserialize` so they can be read straight from
//! backend JSON payloads.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Role`] | The account kind: `patient` or `hospital`. |
//! | [`Session`] | The authenticated identity kept in browser storage: token, raw role string, display name and CID. |
//! | [`Report`] | One uploaded medical document with its hospital, patient CID and upload timestamp. |
//!
//! Every string field of [`Report`] deserializes to an empty string when it is
//! missing or `null`, so a partial record still renders.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Account role as understood by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Hospital,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Hospital => "hospital",
        }
    }

    /// Map a raw role string to a known role.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "patient" => Some(Role::Patient),
            "hospital" => Some(Role::Hospital),
            _ => None,
        }
    }

    /// The dashboard a freshly logged-in user lands on.
    ///
    /// Only `"patient"` goes to the patient dashboard; every other role
    /// string is routed to the hospital dashboard.
    pub fn landing_for(raw: &str) -> Self {
        match Role::parse(raw) {
            Some(Role::Patient) => Role::Patient,
            _ => Role::Hospital,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated identity carried across page loads.
///
/// `role` keeps the exact string the backend returned so that the role gate
/// compares against what was stored, not against a normalized value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: String,
    pub username: String,
    pub cid: String,
}

impl Session {
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }
}

/// A stored medical report as listed by the backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Storage key, used to build the download link.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub filename: String,
    /// Display name of the uploaded document.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub original_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hospital_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub patient_cid: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub uploaded_at: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_missing_fields_default_to_empty() {
        let report: Report =
            serde_json::from_str(r#"{"original_name": "scan.pdf", "patient_cid": null}"#).unwrap();
        assert_eq!(report.original_name, "scan.pdf");
        assert_eq!(report.patient_cid, "");
        assert_eq!(report.uploaded_at, "");
        assert_eq!(report.hospital_name, "");
    }

    #[test]
    fn test_role_landing() {
        assert_eq!(Role::landing_for("patient"), Role::Patient);
        assert_eq!(Role::landing_for("hospital"), Role::Hospital);
        assert_eq!(Role::landing_for("admin"), Role::Hospital);
        assert_eq!(Role::landing_for(""), Role::Hospital);
    }
}
