//! Access Control Module
//!
//! Per-key authorization consumed by the dispatcher. Evaluation is
//! deny-by-default: an identity with no matching grant is denied, which is
//! a distinct outcome from "key not found" and must never be conflated
//! with it.
//!
//! The dispatcher is responsible for checking the key actually being read
//! or written - for neighbor navigation that is the resolved neighbor key,
//! not the caller-supplied hint key.

use std::collections::HashMap;

use crate::error::{KeelError, Result};

/// Operations an identity can be granted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    Read,
    Write,
    Delete,
    GetLog,
    Security,
    Setup,
}

/// One grant: a permission set, optionally scoped to a key prefix
#[derive(Debug, Clone)]
pub struct Grant {
    /// Permissions this grant confers
    pub permissions: Vec<Permission>,

    /// If set, the grant applies only to keys starting with this prefix
    pub key_prefix: Option<Vec<u8>>,
}

impl Grant {
    /// Whether this grant covers `permission` on `key`
    fn covers(&self, permission: Permission, key: &[u8]) -> bool {
        if !self.permissions.contains(&permission) {
            return false;
        }
        match &self.key_prefix {
            Some(prefix) => key.starts_with(prefix),
            None => true,
        }
    }
}

/// Decides whether an identity may perform a permission on a key
///
/// Denial is reported as [`KeelError::NotAuthorized`].
pub trait Authorizer: Send + Sync {
    fn check(&self, identity: i64, permission: Permission, key: &[u8]) -> Result<()>;
}

/// Grant-table authorizer
///
/// Maps identity to its grants; how the table is persisted and loaded is a
/// concern of the identity/ACL source, not of this module.
pub struct AclAuthorizer {
    grants: HashMap<i64, Vec<Grant>>,
}

impl AclAuthorizer {
    /// Create an authorizer with no grants (denies everything)
    pub fn new() -> Self {
        Self {
            grants: HashMap::new(),
        }
    }

    /// Add a grant for an identity
    pub fn grant(
        mut self,
        identity: i64,
        permissions: Vec<Permission>,
        key_prefix: Option<Vec<u8>>,
    ) -> Self {
        self.grants.entry(identity).or_default().push(Grant {
            permissions,
            key_prefix,
        });
        self
    }

    /// Grant an identity every permission on every key
    pub fn allow_all(self, identity: i64) -> Self {
        self.grant(
            identity,
            vec![
                Permission::Read,
                Permission::Write,
                Permission::Delete,
                Permission::GetLog,
                Permission::Security,
                Permission::Setup,
            ],
            None,
        )
    }
}

impl Default for AclAuthorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Authorizer for AclAuthorizer {
    fn check(&self, identity: i64, permission: Permission, key: &[u8]) -> Result<()> {
        let authorized = self
            .grants
            .get(&identity)
            .map(|grants| grants.iter().any(|g| g.covers(permission, key)))
            .unwrap_or(false);

        if authorized {
            Ok(())
        } else {
            tracing::debug!(identity, ?permission, "permission denied");
            Err(KeelError::NotAuthorized(format!(
                "identity {identity} lacks {permission:?} permission for the requested key"
            )))
        }
    }
}
