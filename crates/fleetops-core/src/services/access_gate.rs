//! Access gate: authorizes operations against the principal's permission set

use crate::domain::Principal;
use crate::error::DomainError;

/// Exact-string membership checks over the union of permissions across the
/// principal's roles. Flat namespace, no wildcards.
pub struct AccessGate;

impl AccessGate {
    pub fn authorize(principal: &Principal, permission: &str) -> bool {
        principal.permissions.contains(permission)
    }

    pub fn authorize_any(principal: &Principal, permissions: &[&str]) -> bool {
        permissions.iter().any(|p| Self::authorize(principal, p))
    }

    /// Gate helper used by every service operation.
    pub fn require(principal: &Principal, permission: &str) -> Result<(), DomainError> {
        if Self::authorize(principal, permission) {
            Ok(())
        } else {
            tracing::warn!(
                user = %principal.id,
                permission,
                "permission denied"
            );
            Err(DomainError::PermissionDenied(permission.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::permission::names;
    use crate::services::test_support::actor_with;

    #[test]
    fn authorize_is_exact_membership() {
        let actor = actor_with(&[names::EMPLOYEE_VIEW]);
        assert!(AccessGate::authorize(&actor, names::EMPLOYEE_VIEW));
        assert!(!AccessGate::authorize(&actor, names::EMPLOYEE_CREATE));
        // no prefix/wildcard matching
        assert!(!AccessGate::authorize(&actor, "employee"));
    }

    #[test]
    fn authorize_any_is_false_on_empty_list() {
        let actor = actor_with(&[names::EMPLOYEE_VIEW]);
        assert!(!AccessGate::authorize_any(&actor, &[]));
        assert!(AccessGate::authorize_any(
            &actor,
            &[names::EMPLOYEE_CREATE, names::EMPLOYEE_VIEW]
        ));
    }

    #[test]
    fn require_maps_denial_to_error() {
        let actor = actor_with(&[]);
        let err = AccessGate::require(&actor, names::BANK_DELETE).unwrap_err();
        assert!(matches!(err, DomainError::PermissionDenied(p) if p == names::BANK_DELETE));
    }
}
