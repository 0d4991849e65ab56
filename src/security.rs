//! Access permission reporting.
//!
//! Reports whether a permission is allowed or denied for an authority. Only the shape of
//! a permission entry lives here; evaluating permissions is left to the caller.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessStatus {
    Allowed,
    Denied,
    Undetermined,
}

/// Kind of authority a permission applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorityType {
    Admin,
    Everyone,
    Owner,
    User,
    Group,
    Role,
    Wildcard,
    Guest,
}

impl AuthorityType {
    /// Classify an authority name by the conventional prefixes and reserved names.
    pub fn from_authority(authority: &str) -> Self {
        match authority {
            "*" => AuthorityType::Wildcard,
            "ROLE_ADMINISTRATOR" => AuthorityType::Admin,
            "ROLE_OWNER" => AuthorityType::Owner,
            "GROUP_EVERYONE" => AuthorityType::Everyone,
            a if a.eq_ignore_ascii_case("guest") || a == "ROLE_GUEST" => AuthorityType::Guest,
            a if a.starts_with("GROUP_") => AuthorityType::Group,
            a if a.starts_with("ROLE_") => AuthorityType::Role,
            _ => AuthorityType::User,
        }
    }
}

/// A permission entry: which permission, for which authority, with what outcome.
pub trait AccessPermission {
    fn permission(&self) -> &str;

    fn access_status(&self) -> AccessStatus;

    /// The authority to which this permission applies.
    fn authority(&self) -> &str;

    fn authority_type(&self) -> AuthorityType;

    fn is_allowed(&self) -> bool {
        self.access_status() == AccessStatus::Allowed
    }
}

/// Plain value implementation of [`AccessPermission`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleAccessPermission {
    pub permission: String,
    pub access_status: AccessStatus,
    pub authority: String,
    pub authority_type: AuthorityType,
}

impl SimpleAccessPermission {
    /// Create an entry, deriving the authority type from the authority name.
    pub fn new(
        permission: impl Into<String>,
        access_status: AccessStatus,
        authority: impl Into<String>,
    ) -> Self {
        let authority = authority.into();
        Self {
            permission: permission.into(),
            access_status,
            authority_type: AuthorityType::from_authority(&authority),
            authority,
        }
    }
}

impl AccessPermission for SimpleAccessPermission {
    fn permission(&self) -> &str {
        &self.permission
    }

    fn access_status(&self) -> AccessStatus {
        self.access_status
    }

    fn authority(&self) -> &str {
        &self.authority
    }

    fn authority_type(&self) -> AuthorityType {
        self.authority_type
    }
}

impl fmt::Display for SimpleAccessPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} for {} ({:?})",
            self.permission, self.access_status, self.authority, self.authority_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authority_type_classification() {
        assert_eq!(AuthorityType::from_authority("*"), AuthorityType::Wildcard);
        assert_eq!(AuthorityType::from_authority("ROLE_ADMINISTRATOR"), AuthorityType::Admin);
        assert_eq!(AuthorityType::from_authority("ROLE_OWNER"), AuthorityType::Owner);
        assert_eq!(AuthorityType::from_authority("GROUP_EVERYONE"), AuthorityType::Everyone);
        assert_eq!(AuthorityType::from_authority("guest"), AuthorityType::Guest);
        assert_eq!(AuthorityType::from_authority("GROUP_editors"), AuthorityType::Group);
        assert_eq!(AuthorityType::from_authority("ROLE_REVIEWER"), AuthorityType::Role);
        assert_eq!(AuthorityType::from_authority("andy"), AuthorityType::User);
    }

    #[test]
    fn test_simple_permission_accessors() {
        let entry = SimpleAccessPermission::new("Read", AccessStatus::Allowed, "GROUP_editors");

        assert_eq!(entry.permission(), "Read");
        assert_eq!(entry.authority(), "GROUP_editors");
        assert_eq!(entry.authority_type(), AuthorityType::Group);
        assert!(entry.is_allowed());
    }

    #[test]
    fn test_denied_is_not_allowed() {
        let entry = SimpleAccessPermission::new("Write", AccessStatus::Denied, "andy");
        assert!(!entry.is_allowed());
    }

    #[test]
    fn test_serialization_shape() {
        let entry = SimpleAccessPermission::new("Read", AccessStatus::Undetermined, "*");
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["permission"], "Read");
        assert_eq!(json["accessStatus"], "UNDETERMINED");
        assert_eq!(json["authorityType"], "WILDCARD");

        let back: SimpleAccessPermission = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_display() {
        let entry = SimpleAccessPermission::new("Read", AccessStatus::Allowed, "andy");
        assert_eq!(entry.to_string(), "Read Allowed for andy (User)");
    }
}
