//! Closed enumerations used across the API and the storage layer
//!
//! Role and status values are written exclusively by this application, so
//! they parse strictly. Activity module/action/origin columns accumulate
//! values from every feature module; those parse lossily with an explicit
//! fallback arm so an unknown stored value renders instead of failing the
//! whole page.

use serde::{Deserialize, Serialize};

/// Back-office user roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    User,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Admin, UserRole::Manager, UserRole::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Manager => "manager",
            UserRole::User => "user",
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "manager" => Ok(UserRole::Manager),
            "user" => Ok(UserRole::User),
            other => Err(format!("unknown user role: {}", other)),
        }
    }
}

/// Extranet roles, each with its own landing route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtranetRole {
    Formateur,
    Apprenant,
    ContactClient,
}

impl ExtranetRole {
    pub const ALL: [ExtranetRole; 3] = [
        ExtranetRole::Formateur,
        ExtranetRole::Apprenant,
        ExtranetRole::ContactClient,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExtranetRole::Formateur => "formateur",
            ExtranetRole::Apprenant => "apprenant",
            ExtranetRole::ContactClient => "contact_client",
        }
    }
}

impl std::str::FromStr for ExtranetRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "formateur" => Ok(ExtranetRole::Formateur),
            "apprenant" => Ok(ExtranetRole::Apprenant),
            "contact_client" => Ok(ExtranetRole::ContactClient),
            other => Err(format!("unknown extranet role: {}", other)),
        }
    }
}

/// Lifecycle status of an extranet access record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessStatus {
    Actif,
    Invite,
    EnAttente,
}

impl AccessStatus {
    pub const ALL: [AccessStatus; 3] = [
        AccessStatus::Actif,
        AccessStatus::Invite,
        AccessStatus::EnAttente,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessStatus::Actif => "actif",
            AccessStatus::Invite => "invite",
            AccessStatus::EnAttente => "en_attente",
        }
    }

    /// Statuses from which a first password set activates the access
    pub fn awaiting_activation(&self) -> bool {
        matches!(self, AccessStatus::Invite | AccessStatus::EnAttente)
    }
}

impl std::str::FromStr for AccessStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "actif" => Ok(AccessStatus::Actif),
            "invite" => Ok(AccessStatus::Invite),
            "en_attente" => Ok(AccessStatus::EnAttente),
            other => Err(format!("unknown access status: {}", other)),
        }
    }
}

/// Feature module an activity record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityModule {
    Apprenants,
    Entreprises,
    Sessions,
    Devis,
    Factures,
    Tickets,
    Messagerie,
    Parametres,
    Extranet,
    /// Fallback for values written by a newer or removed module
    Inconnu,
}

impl ActivityModule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityModule::Apprenants => "apprenants",
            ActivityModule::Entreprises => "entreprises",
            ActivityModule::Sessions => "sessions",
            ActivityModule::Devis => "devis",
            ActivityModule::Factures => "factures",
            ActivityModule::Tickets => "tickets",
            ActivityModule::Messagerie => "messagerie",
            ActivityModule::Parametres => "parametres",
            ActivityModule::Extranet => "extranet",
            ActivityModule::Inconnu => "inconnu",
        }
    }

    /// Narrow a stored value, falling back instead of failing
    pub fn parse_lossy(s: &str) -> Self {
        match s {
            "apprenants" => ActivityModule::Apprenants,
            "entreprises" => ActivityModule::Entreprises,
            "sessions" => ActivityModule::Sessions,
            "devis" => ActivityModule::Devis,
            "factures" => ActivityModule::Factures,
            "tickets" => ActivityModule::Tickets,
            "messagerie" => ActivityModule::Messagerie,
            "parametres" => ActivityModule::Parametres,
            "extranet" => ActivityModule::Extranet,
            _ => ActivityModule::Inconnu,
        }
    }
}

/// Kind of state change an activity record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    Creation,
    Modification,
    Suppression,
    Connexion,
    Envoi,
    Inconnu,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::Creation => "creation",
            ActivityAction::Modification => "modification",
            ActivityAction::Suppression => "suppression",
            ActivityAction::Connexion => "connexion",
            ActivityAction::Envoi => "envoi",
            ActivityAction::Inconnu => "inconnu",
        }
    }

    pub fn parse_lossy(s: &str) -> Self {
        match s {
            "creation" => ActivityAction::Creation,
            "modification" => ActivityAction::Modification,
            "suppression" => ActivityAction::Suppression,
            "connexion" => ActivityAction::Connexion,
            "envoi" => ActivityAction::Envoi,
            _ => ActivityAction::Inconnu,
        }
    }
}

/// Where the action was performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityOrigin {
    BackOffice,
    Extranet,
    Systeme,
    Inconnu,
}

impl ActivityOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityOrigin::BackOffice => "back_office",
            ActivityOrigin::Extranet => "extranet",
            ActivityOrigin::Systeme => "systeme",
            ActivityOrigin::Inconnu => "inconnu",
        }
    }

    pub fn parse_lossy(s: &str) -> Self {
        match s {
            "back_office" => ActivityOrigin::BackOffice,
            "extranet" => ActivityOrigin::Extranet,
            "systeme" => ActivityOrigin::Systeme,
            _ => ActivityOrigin::Inconnu,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_roundtrip() {
        for role in UserRole::ALL {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
        for role in ExtranetRole::ALL {
            assert_eq!(role.as_str().parse::<ExtranetRole>().unwrap(), role);
        }
        for statut in AccessStatus::ALL {
            assert_eq!(statut.as_str().parse::<AccessStatus>().unwrap(), statut);
        }
    }

    #[test]
    fn test_lossy_parse_falls_back() {
        assert_eq!(ActivityModule::parse_lossy("sessions"), ActivityModule::Sessions);
        assert_eq!(ActivityModule::parse_lossy("catalogue"), ActivityModule::Inconnu);
        assert_eq!(ActivityAction::parse_lossy("archivage"), ActivityAction::Inconnu);
        assert_eq!(ActivityOrigin::parse_lossy(""), ActivityOrigin::Inconnu);
    }

    #[test]
    fn test_activation_statuses() {
        assert!(AccessStatus::Invite.awaiting_activation());
        assert!(AccessStatus::EnAttente.awaiting_activation());
        assert!(!AccessStatus::Actif.awaiting_activation());
    }
}
