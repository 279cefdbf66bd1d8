//! Status and role enums for auditdesk.
//!
//! Audit statuses keep the wire values the dashboard has always used
//! (`aprovada`, `aprovada-com-aviso`, `reprovada`), so serialization uses
//! explicit renames rather than a blanket `rename_all`.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// AuditStatus
// ---------------------------------------------------------------------------

/// Outcome of a compliance audit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum AuditStatus {
    #[serde(rename = "aprovada")]
    Approved,
    #[serde(rename = "aprovada-com-aviso")]
    ApprovedWithWarning,
    #[serde(rename = "reprovada")]
    Rejected,
}

impl AuditStatus {
    /// Every status, in breakdown order.
    pub const ALL: [Self; 3] = [Self::Approved, Self::ApprovedWithWarning, Self::Rejected];

    /// Return the string representation used in SQL storage and on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "aprovada",
            Self::ApprovedWithWarning => "aprovada-com-aviso",
            Self::Rejected => "reprovada",
        }
    }
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the three audit statuses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown audit status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for AuditStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Role attached to a user account. Only administrators exist today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(status_approved, AuditStatus, AuditStatus::Approved, "aprovada");
    test_serde_roundtrip!(
        status_with_warning,
        AuditStatus,
        AuditStatus::ApprovedWithWarning,
        "aprovada-com-aviso"
    );
    test_serde_roundtrip!(status_rejected, AuditStatus, AuditStatus::Rejected, "reprovada");
    test_serde_roundtrip!(role_admin, Role, Role::Admin, "admin");

    #[test]
    fn from_str_accepts_wire_values() {
        for status in AuditStatus::ALL {
            assert_eq!(status.as_str().parse::<AuditStatus>(), Ok(status));
        }
    }

    #[test]
    fn from_str_rejects_unknown() {
        let err = "pending".parse::<AuditStatus>().unwrap_err();
        assert_eq!(err, UnknownStatus("pending".into()));
        assert!("Aprovada".parse::<AuditStatus>().is_err());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", AuditStatus::ApprovedWithWarning), "aprovada-com-aviso");
        assert_eq!(format!("{}", Role::Admin), "admin");
    }
}
