//! The guard invoked before DAL calls

use crate::error::{AccessError, AccessResult};
use crate::policy::{allowed_roles, Operation};
use records_dal::{Resource, Role};
use tracing::{debug, warn};

/// Table-driven allow-list check.
///
/// Stateless; construct once and share freely. The caller supplies the role
/// from the authenticated identity's profile record, never from the raw
/// bearer token.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGuard;

impl AccessGuard {
    pub fn new() -> Self {
        Self
    }

    /// True when the role may perform the operation on the resource
    pub fn check(&self, role: Role, resource: Resource, operation: Operation) -> bool {
        let allowed = allowed_roles(resource, operation).contains(&role);
        debug!(%role, %resource, %operation, allowed, "Access check");
        allowed
    }

    /// Errors with [`AccessError::Denied`] when the role is not allow-listed
    pub fn ensure(&self, role: Role, resource: Resource, operation: Operation) -> AccessResult<()> {
        if self.check(role, resource, operation) {
            Ok(())
        } else {
            warn!(%role, %resource, %operation, "Access denied");
            Err(AccessError::Denied {
                role,
                resource,
                operation,
            })
        }
    }
}
