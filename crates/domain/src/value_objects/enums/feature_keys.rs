use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Closed set of gateable feature areas. Adding a feature means adding a
/// variant here and a flag on `PlanPermissions`; the compiler then points at
/// every match that must learn about it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKey {
    Dashboard,
    Appointments,
    Services,
    Professionals,
    Clients,
    Reviews,
    Tasks,
    PointsProgram,
    Loyalty,
    Inventory,
    Messages,
    Coupons,
    Financial,
    Reports,
    Settings,
    Support,
    SubscriptionManagement,
}

impl FeatureKey {
    pub const ALL: [FeatureKey; 17] = [
        FeatureKey::Dashboard,
        FeatureKey::Appointments,
        FeatureKey::Services,
        FeatureKey::Professionals,
        FeatureKey::Clients,
        FeatureKey::Reviews,
        FeatureKey::Tasks,
        FeatureKey::PointsProgram,
        FeatureKey::Loyalty,
        FeatureKey::Inventory,
        FeatureKey::Messages,
        FeatureKey::Coupons,
        FeatureKey::Financial,
        FeatureKey::Reports,
        FeatureKey::Settings,
        FeatureKey::Support,
        FeatureKey::SubscriptionManagement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKey::Dashboard => "dashboard",
            FeatureKey::Appointments => "appointments",
            FeatureKey::Services => "services",
            FeatureKey::Professionals => "professionals",
            FeatureKey::Clients => "clients",
            FeatureKey::Reviews => "reviews",
            FeatureKey::Tasks => "tasks",
            FeatureKey::PointsProgram => "points_program",
            FeatureKey::Loyalty => "loyalty",
            FeatureKey::Inventory => "inventory",
            FeatureKey::Messages => "messages",
            FeatureKey::Coupons => "coupons",
            FeatureKey::Financial => "financial",
            FeatureKey::Reports => "reports",
            FeatureKey::Settings => "settings",
            FeatureKey::Support => "support",
            FeatureKey::SubscriptionManagement => "subscription_management",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "dashboard" => Some(FeatureKey::Dashboard),
            "appointments" => Some(FeatureKey::Appointments),
            "services" => Some(FeatureKey::Services),
            "professionals" => Some(FeatureKey::Professionals),
            "clients" => Some(FeatureKey::Clients),
            "reviews" => Some(FeatureKey::Reviews),
            "tasks" => Some(FeatureKey::Tasks),
            "points_program" => Some(FeatureKey::PointsProgram),
            "loyalty" => Some(FeatureKey::Loyalty),
            "inventory" => Some(FeatureKey::Inventory),
            "messages" => Some(FeatureKey::Messages),
            "coupons" => Some(FeatureKey::Coupons),
            "financial" => Some(FeatureKey::Financial),
            "reports" => Some(FeatureKey::Reports),
            "settings" => Some(FeatureKey::Settings),
            "support" => Some(FeatureKey::Support),
            "subscription_management" => Some(FeatureKey::SubscriptionManagement),
            _ => None,
        }
    }

    /// Features every tenant can reach even with no plan assigned.
    pub fn is_always_visible(&self) -> bool {
        matches!(
            self,
            FeatureKey::Support | FeatureKey::SubscriptionManagement
        )
    }
}

impl Display for FeatureKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
