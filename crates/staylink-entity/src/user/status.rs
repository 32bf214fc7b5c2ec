//! User account lifecycle status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status for a user account.
///
/// New registrations start as `Pending`; transitions are admin- or
/// verification-driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Registered, awaiting platform verification.
    Pending,
    /// Verified and fully usable.
    Verified,
    /// Application rejected by an admin.
    Rejected,
    /// Suspended by an admin; cannot log in or use tokens.
    Suspended,
}

impl UserStatus {
    /// Check if the user can log in with this status.
    ///
    /// Pending and rejected users can still log in; they are gated
    /// per-endpoint by the access resolver. Only suspension blocks login.
    pub fn can_login(&self) -> bool {
        !matches!(self, Self::Suspended)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
            Self::Suspended => "suspended",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = staylink_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "verified" => Ok(Self::Verified),
            "rejected" => Ok(Self::Rejected),
            "suspended" => Ok(Self::Suspended),
            _ => Err(staylink_core::AppError::validation(format!(
                "Invalid user status: '{s}'. Expected one of: pending, verified, rejected, suspended"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_login() {
        assert!(UserStatus::Pending.can_login());
        assert!(UserStatus::Verified.can_login());
        assert!(!UserStatus::Suspended.can_login());
    }
}
