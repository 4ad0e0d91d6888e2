use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::ROLE_ADMIN;

/// Role of an employee, decides which reports they can list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    General,
}

impl Role {
    /// Resolve the role from the role names carried in the token
    pub fn from_role_names(roles: &[String]) -> Self {
        if roles.iter().any(|r| r.eq_ignore_ascii_case(ROLE_ADMIN)) {
            Role::Admin
        } else {
            Role::General
        }
    }
}

/// Authenticated employee for the current request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Employee {
    /// Employee code (token subject)
    pub code: String,
    pub name: String,
    pub role: Role,
}

impl Employee {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomClaims {
    #[serde(default)]
    pub roles: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_role_names() {
        assert_eq!(Role::from_role_names(&[]), Role::General);
        assert_eq!(
            Role::from_role_names(&["staff".to_string(), "admin".to_string()]),
            Role::Admin
        );
        assert_eq!(Role::from_role_names(&["ADMIN".to_string()]), Role::Admin);
        assert_eq!(
            Role::from_role_names(&["administrator".to_string()]),
            Role::General
        );
    }

    #[test]
    fn test_role_serializes_screaming_case() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(
            serde_json::to_string(&Role::General).unwrap(),
            "\"GENERAL\""
        );
    }
}
