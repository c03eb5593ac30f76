//! Read/write access policy for the resource API.
//!
//! The caller identity is an explicit [`Principal`] value. The HTTP layer
//! decodes it from the bearer token and passes it in; nothing here reads
//! request context.

use std::fmt;

use crate::error::CoreError;
use crate::roles::{ROLE_ADMIN, ROLE_USER};
use crate::types::DbId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::User => ROLE_USER,
        }
    }

    /// Map a stored role name to a role. Unknown names get no privileges
    /// beyond an ordinary user.
    pub fn from_name(name: &str) -> Role {
        if name == ROLE_ADMIN {
            Role::Admin
        } else {
            Role::User
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: DbId,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Operations exposed on each resource collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Retrieve,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn is_write(self) -> bool {
        matches!(
            self,
            Operation::Create | Operation::Update | Operation::Delete
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("Authentication credentials were not provided or are invalid")]
    AuthenticationRequired,

    #[error("Admin role required")]
    Forbidden,
}

impl From<AccessError> for CoreError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::AuthenticationRequired => CoreError::Unauthorized(err.to_string()),
            AccessError::Forbidden => CoreError::Forbidden(err.to_string()),
        }
    }
}

/// Decide whether `principal` may perform `op`.
///
/// - no principal: rejected regardless of the operation;
/// - ordinary user: reads only;
/// - admin: everything.
pub fn authorize(principal: Option<&Principal>, op: Operation) -> Result<(), AccessError> {
    let principal = principal.ok_or(AccessError::AuthenticationRequired)?;
    if op.is_write() && !principal.is_admin() {
        return Err(AccessError::Forbidden);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const ALL_OPS: [Operation; 5] = [
        Operation::List,
        Operation::Retrieve,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
    ];

    fn user(role: Role) -> Principal {
        Principal { user_id: 7, role }
    }

    #[test]
    fn anonymous_is_rejected_for_every_operation() {
        for op in ALL_OPS {
            assert_eq!(authorize(None, op), Err(AccessError::AuthenticationRequired));
        }
    }

    #[test]
    fn regular_user_reads_only() {
        let principal = user(Role::User);
        assert!(authorize(Some(&principal), Operation::List).is_ok());
        assert!(authorize(Some(&principal), Operation::Retrieve).is_ok());
        for op in [Operation::Create, Operation::Update, Operation::Delete] {
            assert_eq!(authorize(Some(&principal), op), Err(AccessError::Forbidden));
        }
    }

    #[test]
    fn admin_may_do_everything() {
        let principal = user(Role::Admin);
        for op in ALL_OPS {
            assert!(authorize(Some(&principal), op).is_ok());
        }
    }

    #[test]
    fn unknown_role_names_are_not_admin() {
        assert_eq!(Role::from_name("admin"), Role::Admin);
        assert_eq!(Role::from_name("user"), Role::User);
        assert_eq!(Role::from_name("Admin"), Role::User);
    }

    #[test]
    fn access_errors_map_to_core_errors() {
        assert_matches!(
            CoreError::from(AccessError::AuthenticationRequired),
            CoreError::Unauthorized(_)
        );
        assert_matches!(CoreError::from(AccessError::Forbidden), CoreError::Forbidden(_));
    }
}
