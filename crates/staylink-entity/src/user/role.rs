//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two marketplace roles plus the platform admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Content creator applying for stays.
    Creator,
    /// Hotel offering listings and collaborations.
    Hotel,
    /// Platform administrator.
    Admin,
}

impl UserRole {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Creator => "creator",
            Self::Hotel => "hotel",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = staylink_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "creator" => Ok(Self::Creator),
            "hotel" => Ok(Self::Hotel),
            "admin" => Ok(Self::Admin),
            _ => Err(staylink_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: creator, hotel, admin"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("creator".parse::<UserRole>().unwrap(), UserRole::Creator);
        assert_eq!("HOTEL".parse::<UserRole>().unwrap(), UserRole::Hotel);
        assert!("viewer".parse::<UserRole>().is_err());
    }
}
