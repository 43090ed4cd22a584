use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// Who the session belongs to. Every dashboard decision matches on this.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Student,
    HostelOwner,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::HostelOwner => "hostelOwner",
            Role::Admin => "admin",
        }
    }

    /// Landing page for the role after sign-in.
    pub fn home_path(self) -> &'static str {
        match self {
            Role::Student => "/",
            Role::HostelOwner => "/owner",
            Role::Admin => "/admin/owners",
        }
    }

    /// Whether the role may manage the listings of the given owner profile.
    pub fn can_manage_owner(self, own_profile: Option<i32>, owner_id: i32) -> bool {
        match self {
            Role::Admin => true,
            Role::HostelOwner => own_profile == Some(owner_id),
            Role::Student => false,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "hostelOwner" => Ok(Role::HostelOwner),
            "admin" => Ok(Role::Admin),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown role `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_may_manage_only_own_listings() {
        assert!(Role::HostelOwner.can_manage_owner(Some(4), 4));
        assert!(!Role::HostelOwner.can_manage_owner(Some(4), 5));
        assert!(!Role::HostelOwner.can_manage_owner(None, 5));
        assert!(Role::Admin.can_manage_owner(None, 5));
        assert!(!Role::Student.can_manage_owner(Some(5), 5));
    }

    #[test]
    fn role_serializes_as_camel_case() {
        let json = serde_json::to_string(&Role::HostelOwner).unwrap();
        assert_eq!(json, "\"hostelOwner\"");
        assert_eq!("hostelOwner".parse::<Role>(), Ok(Role::HostelOwner));
    }
}
