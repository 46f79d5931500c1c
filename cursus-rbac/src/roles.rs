//! Back-office role capability table
//!
//! The table is static and total: the match below has no wildcard over
//! roles, so adding a role forces every capability to be decided at
//! compile time.

use cursus_api_types::UserRole;

/// Actions a back-office role can be granted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    View,
    Create,
    Edit,
    Delete,
    ManageSettings,
    ManageExtranet,
    Export,
}

impl Capability {
    pub const ALL: [Capability; 7] = [
        Capability::View,
        Capability::Create,
        Capability::Edit,
        Capability::Delete,
        Capability::ManageSettings,
        Capability::ManageExtranet,
        Capability::Export,
    ];

    /// French action label used in permission-denied messages
    pub fn label(&self) -> &'static str {
        match self {
            Capability::View => "consulter",
            Capability::Create => "créer",
            Capability::Edit => "modifier",
            Capability::Delete => "supprimer",
            Capability::ManageSettings => "gérer les paramètres",
            Capability::ManageExtranet => "gérer l'extranet",
            Capability::Export => "exporter",
        }
    }
}

/// Whether `role` is granted `capability`
pub fn allows(role: UserRole, capability: Capability) -> bool {
    match role {
        UserRole::Admin => true,
        UserRole::Manager => !matches!(capability, Capability::ManageSettings),
        UserRole::User => matches!(
            capability,
            Capability::View | Capability::Create | Capability::Edit
        ),
    }
}

/// Check if this role can read resources
pub fn can_view(role: UserRole) -> bool {
    allows(role, Capability::View)
}

/// Check if this role can create resources
pub fn can_create(role: UserRole) -> bool {
    allows(role, Capability::Create)
}

/// Check if this role can modify resources
pub fn can_edit(role: UserRole) -> bool {
    allows(role, Capability::Edit)
}

/// Check if this role can delete (or deactivate) resources
pub fn can_delete(role: UserRole) -> bool {
    allows(role, Capability::Delete)
}

/// Check if this role can change organization settings
pub fn can_manage_settings(role: UserRole) -> bool {
    allows(role, Capability::ManageSettings)
}

/// Check if this role can invite and manage extranet accesses
pub fn can_manage_extranet(role: UserRole) -> bool {
    allows(role, Capability::ManageExtranet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_total() {
        // Every role/capability pair must have an answer; the call itself
        // must never panic.
        for role in UserRole::ALL {
            for capability in Capability::ALL {
                let _ = allows(role, capability);
            }
        }
    }

    #[test]
    fn test_admin_has_everything() {
        for capability in Capability::ALL {
            assert!(allows(UserRole::Admin, capability));
        }
    }

    #[test]
    fn test_manager_cannot_manage_settings() {
        assert!(!allows(UserRole::Manager, Capability::ManageSettings));
        assert!(allows(UserRole::Manager, Capability::Delete));
        assert!(allows(UserRole::Manager, Capability::ManageExtranet));
    }

    #[test]
    fn test_user_is_read_write_only() {
        assert!(allows(UserRole::User, Capability::View));
        assert!(allows(UserRole::User, Capability::Create));
        assert!(allows(UserRole::User, Capability::Edit));
        assert!(!allows(UserRole::User, Capability::Delete));
        assert!(!allows(UserRole::User, Capability::ManageExtranet));
        assert!(!allows(UserRole::User, Capability::Export));
    }
}
