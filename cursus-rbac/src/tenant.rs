//! Tenant context resolution
//!
//! Called at the start of every data-access handler: turns an
//! authenticated user id into the organization scope and role every
//! repository call and capability check runs under. Resolution failure is
//! terminal for the request - there is no retry.

use cursus_api_types::UserRole;
use cursus_interfaces::UserRepository;

use crate::error::RbacError;
use crate::roles::{allows, Capability};

/// The resolved scope of an authenticated request
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub organization_id: i32,
    pub user_id: i32,
    pub role: UserRole,
    /// Display name used to attribute audit records
    pub actor_name: Option<String>,
}

impl TenantContext {
    /// Gate a mutation on a capability; denial carries the action label
    pub fn require(&self, capability: Capability) -> Result<(), RbacError> {
        if allows(self.role, capability) {
            Ok(())
        } else {
            Err(RbacError::permission_denied(capability.label()))
        }
    }
}

/// Resolve the caller's organization membership and role.
///
/// Fails `Unauthenticated` when the user has no membership or the account
/// is deactivated; the caller surfaces this as "Non authentifié".
pub async fn resolve_tenant(
    users: &dyn UserRepository,
    user_id: i32,
) -> Result<TenantContext, RbacError> {
    let membership = users
        .find_membership(user_id)
        .await
        .map_err(|e| RbacError::Lookup {
            message: e.to_string(),
        })?;

    match membership {
        Some(user) if user.is_active => {
            let organization_id = user
                .organization_id
                .as_i32()
                .ok_or(RbacError::Unauthenticated)?;
            Ok(TenantContext {
                organization_id,
                user_id,
                role: user.role,
                actor_name: user.display_name.or(Some(user.email)),
            })
        }
        _ => Err(RbacError::Unauthenticated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_denied_names_the_action() {
        let ctx = TenantContext {
            organization_id: 1,
            user_id: 7,
            role: UserRole::User,
            actor_name: None,
        };
        let err = ctx.require(Capability::Delete).unwrap_err();
        assert_eq!(err.to_string(), "Permission refusée pour supprimer");
    }

    #[test]
    fn test_require_granted() {
        let ctx = TenantContext {
            organization_id: 1,
            user_id: 7,
            role: UserRole::Admin,
            actor_name: None,
        };
        assert!(ctx.require(Capability::ManageSettings).is_ok());
    }
}
