use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Billing state of a tenant as reported by the payment provider. Anything
/// the provider sends that we do not recognize collapses to `Canceled` so the
/// access gate stays fail-closed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    Pending,
    PastDue,
    PaymentFailed,
    Canceled,
}

impl Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Trialing => "trialing",
            SubscriptionStatus::Pending => "pending",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::PaymentFailed => "payment_failed",
            SubscriptionStatus::Canceled => "cancelled",
        };
        write!(f, "{}", status)
    }
}

impl SubscriptionStatus {
    pub fn from_str(value: &str) -> Self {
        match value {
            "active" => SubscriptionStatus::Active,
            "trialing" => SubscriptionStatus::Trialing,
            "pending" => SubscriptionStatus::Pending,
            "past_due" => SubscriptionStatus::PastDue,
            "payment_failed" => SubscriptionStatus::PaymentFailed,
            "cancelled" | "canceled" => SubscriptionStatus::Canceled,
            _ => SubscriptionStatus::Canceled,
        }
    }

    /// Statuses that let a tenant through the gate.
    pub fn grants_access(&self) -> bool {
        matches!(
            self,
            SubscriptionStatus::Active | SubscriptionStatus::Trialing
        )
    }
}
