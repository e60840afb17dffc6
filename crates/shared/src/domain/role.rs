use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use utoipa::ToSchema;

/// Portal role. Access checks are plain set membership, never inheritance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Supervisor,
    Student,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl Role {
    /// Dispatch order used by the root view.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Supervisor, Role::Student];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Supervisor => "supervisor",
            Role::Student => "student",
        }
    }

    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin/dashboard",
            Role::Supervisor => "/supervisor/dashboard",
            Role::Student => "/student/dashboard",
        }
    }

    fn bit(&self) -> u8 {
        match self {
            Role::Admin => 0b001,
            Role::Supervisor => 0b010,
            Role::Student => 0b100,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "supervisor" => Ok(Role::Supervisor),
            "student" => Ok(Role::Student),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

/// The set of roles a guard lets through.
///
/// A single `Role` converts into the one-element set, so callers can pass
/// either `Role::Admin` or `[Role::Admin, Role::Supervisor]` wherever an
/// `impl Into<AllowedRoles>` is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AllowedRoles(u8);

impl AllowedRoles {
    pub const fn none() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        Role::ALL.into_iter().collect()
    }

    pub fn with(mut self, role: Role) -> Self {
        self.0 |= role.bit();
        self
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|role| self.contains(*role))
    }
}

impl From<Role> for AllowedRoles {
    fn from(role: Role) -> Self {
        Self::none().with(role)
    }
}

impl<const N: usize> From<[Role; N]> for AllowedRoles {
    fn from(roles: [Role; N]) -> Self {
        roles.into_iter().collect()
    }
}

impl From<&[Role]> for AllowedRoles {
    fn from(roles: &[Role]) -> Self {
        roles.iter().copied().collect()
    }
}

impl FromIterator<Role> for AllowedRoles {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), AllowedRoles::with)
    }
}

impl fmt::Display for AllowedRoles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|r| r.as_str()).collect();
        write!(f, "{}", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_roles_case_insensitively() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" Supervisor ".parse::<Role>(), Ok(Role::Supervisor));
        assert_eq!("STUDENT".parse::<Role>(), Ok(Role::Student));
        assert!("mentor".parse::<Role>().is_err());
    }

    #[test]
    fn serializes_as_lowercase() {
        let json = serde_json::to_string(&Role::Supervisor).unwrap();
        assert_eq!(json, "\"supervisor\"");
        let back: Role = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(back, Role::Student);
        assert!(serde_json::from_str::<Role>("\"root\"").is_err());
    }

    #[test]
    fn single_role_is_a_one_element_set() {
        let single = AllowedRoles::from(Role::Admin);
        let array = AllowedRoles::from([Role::Admin]);
        assert_eq!(single, array);
        assert!(single.contains(Role::Admin));
        assert!(!single.contains(Role::Student));
        assert_eq!(single.iter().count(), 1);
    }

    #[test]
    fn membership_is_not_hierarchical() {
        let staff = AllowedRoles::from([Role::Admin, Role::Supervisor]);
        assert!(staff.contains(Role::Supervisor));
        assert!(!staff.contains(Role::Student));
        assert!(!AllowedRoles::from(Role::Student).contains(Role::Admin));
        assert!(AllowedRoles::none().is_empty());
        assert_eq!(AllowedRoles::all().iter().collect::<Vec<_>>(), Role::ALL.to_vec());
    }

    #[test]
    fn displays_members_in_dispatch_order() {
        let set = AllowedRoles::from([Role::Student, Role::Admin]);
        assert_eq!(set.to_string(), "admin, student");
    }
}
