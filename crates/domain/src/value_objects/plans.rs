use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::plans::PlanEntity;
use crate::value_objects::access::FetchState;
use crate::value_objects::enums::feature_keys::FeatureKey;

/// Feature flags attached to a plan. Stored as JSONB in the database.
/// Missing keys deserialize to `false`, unknown keys are dropped on parse,
/// so the map fails closed.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PlanPermissions {
    #[serde(default)]
    pub dashboard: bool,

    #[serde(default)]
    pub appointments: bool,

    #[serde(default)]
    pub services: bool,

    #[serde(default)]
    pub professionals: bool,

    #[serde(default)]
    pub clients: bool,

    #[serde(default)]
    pub reviews: bool,

    #[serde(default)]
    pub tasks: bool,

    #[serde(default)]
    pub points_program: bool,

    #[serde(default)]
    pub loyalty: bool,

    #[serde(default)]
    pub inventory: bool,

    #[serde(default)]
    pub messages: bool,

    #[serde(default)]
    pub coupons: bool,

    #[serde(default)]
    pub financial: bool,

    #[serde(default)]
    pub reports: bool,

    #[serde(default)]
    pub settings: bool,

    #[serde(default)]
    pub support: bool,
}

impl PlanPermissions {
    /// Raw map lookup. Total over `FeatureKey`; keys without a stored flag
    /// (subscription management) read as denied here and are granted by the
    /// always-visible rule in `resolve_permission`.
    pub fn allows(&self, key: FeatureKey) -> bool {
        match key {
            FeatureKey::Dashboard => self.dashboard,
            FeatureKey::Appointments => self.appointments,
            FeatureKey::Services => self.services,
            FeatureKey::Professionals => self.professionals,
            FeatureKey::Clients => self.clients,
            FeatureKey::Reviews => self.reviews,
            FeatureKey::Tasks => self.tasks,
            FeatureKey::PointsProgram => self.points_program,
            FeatureKey::Loyalty => self.loyalty,
            FeatureKey::Inventory => self.inventory,
            FeatureKey::Messages => self.messages,
            FeatureKey::Coupons => self.coupons,
            FeatureKey::Financial => self.financial,
            FeatureKey::Reports => self.reports,
            FeatureKey::Settings => self.settings,
            FeatureKey::Support => self.support,
            FeatureKey::SubscriptionManagement => false,
        }
    }
}

/// Single permission predicate for a tenant: always-visible features are
/// granted unconditionally, everything else requires an assigned plan whose
/// map enables the key. No plan means no permissions.
pub fn resolve_permission(permissions: Option<&PlanPermissions>, key: FeatureKey) -> bool {
    if key.is_always_visible() {
        return true;
    }

    permissions.map(|p| p.allows(key)).unwrap_or(false)
}

/// Outcome of a permission lookup over a fetch that may still be in flight.
/// `Loading` is distinct from `Denied` so callers can render a neutral
/// placeholder instead of flashing hidden navigation entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionResolution {
    Loading,
    Granted,
    Denied,
}

/// Permission predicate over the raw fetch state of the tenant's plan
/// permissions. A rejected fetch reads as denied, never as granted.
pub fn resolve_permission_state(
    fetch: &FetchState<Option<PlanPermissions>>,
    key: FeatureKey,
) -> PermissionResolution {
    match fetch {
        FetchState::Pending => PermissionResolution::Loading,
        FetchState::Rejected => PermissionResolution::Denied,
        FetchState::Resolved(permissions) => {
            if resolve_permission(permissions.as_ref(), key) {
                PermissionResolution::Granted
            } else {
                PermissionResolution::Denied
            }
        }
    }
}

/// Full resolved map for the permissions endpoint, one entry per feature key.
pub fn resolved_permission_map(
    permissions: Option<&PlanPermissions>,
) -> BTreeMap<&'static str, bool> {
    FeatureKey::ALL
        .iter()
        .map(|key| (key.as_str(), resolve_permission(permissions, *key)))
        .collect()
}

/// Headcount limit state for the professionals feature.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfessionalsLimitInfo {
    pub limit: i32,
    pub current: i64,
}

impl ProfessionalsLimitInfo {
    pub fn can_add(&self) -> bool {
        self.limit > 0 && self.current < i64::from(self.limit)
    }
}

#[derive(Debug, Serialize)]
pub struct PlanDto {
    pub id: Uuid,
    pub name: String,
    pub price_minor: i32,
    pub annual_price_minor: Option<i32>,
    pub trial_days: i32,
    pub max_professionals: i32,
    pub permissions: PlanPermissions,
    pub is_active: bool,
}

impl From<PlanEntity> for PlanDto {
    fn from(value: PlanEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            price_minor: value.price_minor,
            annual_price_minor: value.annual_price_minor,
            trial_days: value.trial_days,
            max_professionals: value.max_professionals,
            permissions: value.permissions,
            is_active: value.is_active,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertPlanModel {
    pub name: String,
    pub price_minor: i32,
    pub annual_price_minor: Option<i32>,
    pub trial_days: i32,
    pub max_professionals: i32,
    #[serde(default)]
    pub permissions: PlanPermissions,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePlanModel {
    pub name: String,
    pub price_minor: i32,
    pub annual_price_minor: Option<i32>,
    pub trial_days: i32,
    pub max_professionals: i32,
    pub permissions: PlanPermissions,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clients_only() -> PlanPermissions {
        PlanPermissions {
            clients: true,
            ..Default::default()
        }
    }

    #[test]
    fn missing_keys_default_to_denied() {
        let permissions: PlanPermissions =
            serde_json::from_value(serde_json::json!({ "clients": true })).unwrap();

        assert!(permissions.allows(FeatureKey::Clients));
        assert!(!permissions.allows(FeatureKey::Financial));
        assert!(!permissions.allows(FeatureKey::Dashboard));
    }

    #[test]
    fn unknown_keys_are_ignored_on_parse() {
        let permissions: PlanPermissions = serde_json::from_value(serde_json::json!({
            "clients": true,
            "time_travel": true,
        }))
        .unwrap();

        assert!(permissions.allows(FeatureKey::Clients));
    }

    #[test]
    fn no_plan_denies_everything_but_always_visible() {
        for key in FeatureKey::ALL {
            let granted = resolve_permission(None, key);
            assert_eq!(granted, key.is_always_visible(), "key {}", key);
        }
    }

    #[test]
    fn plan_grants_only_enabled_keys() {
        let permissions = clients_only();

        assert!(resolve_permission(Some(&permissions), FeatureKey::Clients));
        assert!(!resolve_permission(
            Some(&permissions),
            FeatureKey::Financial
        ));
        assert!(resolve_permission(Some(&permissions), FeatureKey::Support));
        assert!(resolve_permission(
            Some(&permissions),
            FeatureKey::SubscriptionManagement
        ));
    }

    #[test]
    fn pending_fetch_reports_loading_not_denied() {
        let resolution = resolve_permission_state(&FetchState::Pending, FeatureKey::Clients);
        assert_eq!(resolution, PermissionResolution::Loading);
    }

    #[test]
    fn rejected_fetch_reads_as_denied() {
        let resolution = resolve_permission_state(&FetchState::Rejected, FeatureKey::Clients);
        assert_eq!(resolution, PermissionResolution::Denied);
    }

    #[test]
    fn resolved_fetch_follows_the_permission_map() {
        let fetch = FetchState::Resolved(Some(clients_only()));

        assert_eq!(
            resolve_permission_state(&fetch, FeatureKey::Clients),
            PermissionResolution::Granted
        );
        assert_eq!(
            resolve_permission_state(&fetch, FeatureKey::Financial),
            PermissionResolution::Denied
        );
    }

    #[test]
    fn resolved_map_covers_every_key() {
        let map = resolved_permission_map(Some(&clients_only()));

        assert_eq!(map.len(), FeatureKey::ALL.len());
        assert_eq!(map.get("clients"), Some(&true));
        assert_eq!(map.get("financial"), Some(&false));
        assert_eq!(map.get("subscription_management"), Some(&true));
    }

    #[test]
    fn limit_info_blocks_at_capacity() {
        assert!(
            ProfessionalsLimitInfo {
                limit: 3,
                current: 2
            }
            .can_add()
        );
        assert!(
            !ProfessionalsLimitInfo {
                limit: 3,
                current: 3
            }
            .can_add()
        );
        assert!(
            !ProfessionalsLimitInfo {
                limit: 0,
                current: 0
            }
            .can_add()
        );
    }
}
