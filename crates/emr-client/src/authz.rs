//! Authorization
//!
//! Pure predicates over a user's roles, mirroring the backend's
//! role → permission model. Used by the session store and by views to gate
//! actions; the backend remains the enforcing party.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::models::User;

/// Permission codes
pub mod permissions {
    pub const VIEW_PATIENTS: &str = "view_patients";
    pub const CREATE_PATIENTS: &str = "create_patients";
    pub const UPDATE_PATIENTS: &str = "update_patients";
    pub const DELETE_PATIENTS: &str = "delete_patients";

    pub const VIEW_ENCOUNTERS: &str = "view_encounters";
    pub const CREATE_ENCOUNTERS: &str = "create_encounters";
    pub const UPDATE_ENCOUNTERS: &str = "update_encounters";

    pub const VIEW_ORDERS: &str = "view_orders";
    pub const CREATE_ORDERS: &str = "create_orders";
    pub const UPDATE_ORDERS: &str = "update_orders";

    pub const VIEW_RESULTS: &str = "view_results";
    pub const UPDATE_RESULTS: &str = "update_results";

    pub const MANAGE_USERS: &str = "manage_users";
    pub const MANAGE_ROLES: &str = "manage_roles";
    pub const VIEW_AUDIT_LOG: &str = "view_audit_log";
}

/// Role codes
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const DOCTOR: &str = "doctor";
    pub const NURSE: &str = "nurse";
    pub const RECEPTIONIST: &str = "receptionist";
    pub const PHARMACIST: &str = "pharmacist";
    pub const LAB_TECH: &str = "lab_technician";
    pub const RADIOLOGIST: &str = "radiologist";
    pub const PATIENT: &str = "patient";
}

/// Resource kinds that views gate actions on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Patient,
    Encounter,
    Appointment,
    Order,
    Result,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Patient => "patient",
            ResourceKind::Encounter => "encounter",
            ResourceKind::Appointment => "appointment",
            ResourceKind::Order => "order",
            ResourceKind::Result => "result",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patient" => Ok(ResourceKind::Patient),
            "encounter" => Ok(ResourceKind::Encounter),
            "appointment" => Ok(ResourceKind::Appointment),
            "order" => Ok(ResourceKind::Order),
            "result" => Ok(ResourceKind::Result),
            other => Err(format!("unknown resource kind: {}", other)),
        }
    }
}

/// Encounters have no delete permission; closing one is an update.
fn delete_permission(kind: ResourceKind) -> Option<&'static str> {
    match kind {
        ResourceKind::Patient => Some(permissions::DELETE_PATIENTS),
        ResourceKind::Encounter => Some(permissions::UPDATE_ENCOUNTERS),
        _ => None,
    }
}

fn create_permission(kind: ResourceKind) -> Option<&'static str> {
    match kind {
        ResourceKind::Patient => Some(permissions::CREATE_PATIENTS),
        ResourceKind::Encounter => Some(permissions::CREATE_ENCOUNTERS),
        ResourceKind::Order => Some(permissions::CREATE_ORDERS),
        _ => None,
    }
}

fn update_permission(kind: ResourceKind) -> Option<&'static str> {
    match kind {
        ResourceKind::Patient => Some(permissions::UPDATE_PATIENTS),
        ResourceKind::Encounter => Some(permissions::UPDATE_ENCOUNTERS),
        ResourceKind::Order => Some(permissions::UPDATE_ORDERS),
        ResourceKind::Result => Some(permissions::UPDATE_RESULTS),
        ResourceKind::Appointment => None,
    }
}

/// Every permission code granted through any of the user's roles
pub fn permission_set(user: &User) -> HashSet<&str> {
    user.roles
        .iter()
        .flat_map(|role| role.permissions.iter())
        .map(|p| p.code.as_str())
        .collect()
}

/// True when the user holds at least one of `codes`
pub fn has_role(user: Option<&User>, codes: &[&str]) -> bool {
    user.map(|u| u.roles.iter().any(|role| codes.contains(&role.code.as_str())))
        .unwrap_or(false)
}

/// True when at least one of `codes` is granted by any role
pub fn has_permission(user: Option<&User>, codes: &[&str]) -> bool {
    let Some(user) = user else { return false };
    let granted = permission_set(user);
    codes.iter().any(|code| granted.contains(code))
}

pub fn can_delete(user: Option<&User>, kind: ResourceKind) -> bool {
    delete_permission(kind).map_or(false, |p| has_permission(user, &[p]))
}

pub fn can_create(user: Option<&User>, kind: ResourceKind) -> bool {
    create_permission(kind).map_or(false, |p| has_permission(user, &[p]))
}

pub fn can_update(user: Option<&User>, kind: ResourceKind) -> bool {
    update_permission(kind).map_or(false, |p| has_permission(user, &[p]))
}

/// String form used by views; unknown kinds are never deletable
pub fn can_delete_named(user: Option<&User>, kind: &str) -> bool {
    kind.parse().map_or(false, |k| can_delete(user, k))
}

pub fn is_admin(user: Option<&User>) -> bool {
    has_role(user, &[roles::ADMIN])
}

pub fn is_doctor(user: Option<&User>) -> bool {
    has_role(user, &[roles::DOCTOR])
}

/// Display names of every role, in server order
pub fn role_names(user: Option<&User>) -> Vec<String> {
    user.map(|u| u.roles.iter().map(|r| r.name.clone()).collect())
        .unwrap_or_default()
}

/// Display name of the first role
pub fn primary_role(user: Option<&User>) -> Option<String> {
    user.and_then(|u| u.roles.first()).map(|r| r.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Permission, Role};

    fn role(code: &str, perms: &[&str]) -> Role {
        Role {
            code: code.to_string(),
            name: code.to_uppercase(),
            permissions: perms.iter().map(|p| Permission { code: p.to_string(), name: None }).collect(),
        }
    }

    fn user_with(roles: Vec<Role>) -> User {
        User { id: "u".into(), roles, ..Default::default() }
    }

    #[test]
    fn test_permission_flattened_across_roles() {
        let user = user_with(vec![
            role("nurse", &[permissions::VIEW_PATIENTS]),
            role("doctor", &[permissions::CREATE_ENCOUNTERS, permissions::UPDATE_ENCOUNTERS]),
        ]);
        assert!(has_permission(Some(&user), &[permissions::VIEW_PATIENTS]));
        assert!(has_permission(Some(&user), &[permissions::UPDATE_ENCOUNTERS]));
        assert!(!has_permission(Some(&user), &[permissions::DELETE_PATIENTS]));
        assert!(has_permission(Some(&user), &[permissions::DELETE_PATIENTS, permissions::VIEW_PATIENTS]));
    }

    #[test]
    fn test_has_permission_matches_set_membership() {
        let all = [
            permissions::VIEW_PATIENTS, permissions::CREATE_PATIENTS, permissions::UPDATE_PATIENTS,
            permissions::DELETE_PATIENTS, permissions::VIEW_ENCOUNTERS, permissions::CREATE_ENCOUNTERS,
            permissions::UPDATE_ENCOUNTERS, permissions::VIEW_ORDERS, permissions::CREATE_ORDERS,
            permissions::UPDATE_ORDERS, permissions::VIEW_RESULTS, permissions::UPDATE_RESULTS,
            permissions::MANAGE_USERS, permissions::MANAGE_ROLES, permissions::VIEW_AUDIT_LOG,
        ];
        // Every split of the codes across two roles
        for mask in 0u32..(1 << 6) {
            let first: Vec<&str> = all.iter().enumerate().filter(|(i, _)| mask & (1 << (i % 6)) != 0 && i % 2 == 0).map(|(_, p)| *p).collect();
            let second: Vec<&str> = all.iter().enumerate().filter(|(i, _)| mask & (1 << (i % 6)) != 0 && i % 2 == 1).map(|(_, p)| *p).collect();
            let user = user_with(vec![role("a", &first), role("b", &second)]);
            for code in all {
                let expected = first.contains(&code) || second.contains(&code);
                assert_eq!(has_permission(Some(&user), &[code]), expected, "mask {} code {}", mask, code);
            }
        }
    }

    #[test]
    fn test_no_user_or_no_roles() {
        assert!(!has_permission(None, &[permissions::VIEW_PATIENTS]));
        assert!(!has_role(None, &[roles::ADMIN]));
        let user = user_with(vec![]);
        assert!(!has_permission(Some(&user), &[permissions::VIEW_PATIENTS]));
        assert!(primary_role(Some(&user)).is_none());
        assert!(role_names(None).is_empty());
    }

    #[test]
    fn test_can_delete_mapping() {
        let user = user_with(vec![role("admin", &[
            permissions::DELETE_PATIENTS, permissions::UPDATE_ENCOUNTERS, permissions::UPDATE_ORDERS,
            permissions::UPDATE_RESULTS, permissions::CREATE_ORDERS,
        ])]);
        assert!(can_delete(Some(&user), ResourceKind::Patient));
        assert!(can_delete(Some(&user), ResourceKind::Encounter));
        // Not in the delete map even though the user holds every update permission
        assert!(!can_delete(Some(&user), ResourceKind::Appointment));
        assert!(!can_delete(Some(&user), ResourceKind::Order));
        assert!(!can_delete(Some(&user), ResourceKind::Result));
        assert!(!can_delete_named(Some(&user), "invoice"));
        assert!(can_delete_named(Some(&user), "patient"));
    }

    #[test]
    fn test_can_create_and_update() {
        let user = user_with(vec![role("doctor", &[permissions::CREATE_ENCOUNTERS, permissions::UPDATE_RESULTS])]);
        assert!(can_create(Some(&user), ResourceKind::Encounter));
        assert!(!can_create(Some(&user), ResourceKind::Patient));
        assert!(!can_create(Some(&user), ResourceKind::Result));
        assert!(can_update(Some(&user), ResourceKind::Result));
        assert!(!can_update(Some(&user), ResourceKind::Appointment));
    }

    #[test]
    fn test_role_helpers() {
        let user = user_with(vec![role("doctor", &[]), role("admin", &[])]);
        assert!(is_doctor(Some(&user)));
        assert!(is_admin(Some(&user)));
        assert!(has_role(Some(&user), &[roles::NURSE, roles::DOCTOR]));
        assert!(!has_role(Some(&user), &[roles::NURSE]));
        assert_eq!(primary_role(Some(&user)).as_deref(), Some("DOCTOR"));
        assert_eq!(role_names(Some(&user)), vec!["DOCTOR", "ADMIN"]);
    }

    #[test]
    fn test_resource_kind_parse() {
        assert_eq!("encounter".parse::<ResourceKind>(), Ok(ResourceKind::Encounter));
        assert!("Patient".parse::<ResourceKind>().is_err());
        assert_eq!(ResourceKind::Order.to_string(), "order");
    }
}
