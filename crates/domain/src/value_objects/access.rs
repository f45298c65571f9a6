use crate::entities::companies::CompanyEntity;
use crate::value_objects::enums::subscription_statuses::SubscriptionStatus;

/// Observable states of an upstream fetch. Each gate evaluation consumes its
/// own snapshot, so a stale response can never overwrite a fresher decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState<T> {
    Pending,
    Resolved(T),
    Rejected,
}

/// The slice of a company row the gate looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessSnapshot {
    pub is_active: bool,
    pub is_blocked: bool,
    pub subscription_status: SubscriptionStatus,
}

impl From<&CompanyEntity> for AccessSnapshot {
    fn from(company: &CompanyEntity) -> Self {
        Self {
            is_active: company.is_active,
            is_blocked: company.is_blocked,
            subscription_status: SubscriptionStatus::from_str(&company.subscription_status),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    /// Platform admin pulled the kill switch (block flag set or company
    /// deactivated). Wins over everything billing says.
    Administrative,
    /// Billing reported a non-access-granting status.
    Billing(SubscriptionStatus),
    /// The status fetch itself failed; access stays denied until a
    /// successful fetch.
    StatusUnavailable,
}

impl BlockReason {
    pub fn code(&self) -> &'static str {
        match self {
            BlockReason::Administrative => "administrative_block",
            BlockReason::Billing(_) => "billing_status",
            BlockReason::StatusUnavailable => "status_unavailable",
        }
    }

    /// Reason text for the full-screen takeover view.
    pub fn message(&self) -> String {
        match self {
            BlockReason::Administrative => {
                "Access to this account was suspended by the platform. Contact support."
                    .to_string()
            }
            BlockReason::Billing(status) => format!(
                "Subscription is {}. Update your billing details to regain access.",
                status
            ),
            BlockReason::StatusUnavailable => {
                "Could not verify the subscription status. Reload to try again.".to_string()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Loading,
    Allowed,
    Blocked(BlockReason),
}

impl GateState {
    /// Folds a fetch outcome into a gate decision. Never allows on a
    /// rejected fetch, and the administrative block is checked before the
    /// billing status.
    pub fn evaluate(fetch: &FetchState<AccessSnapshot>) -> GateState {
        match fetch {
            FetchState::Pending => GateState::Loading,
            FetchState::Rejected => GateState::Blocked(BlockReason::StatusUnavailable),
            FetchState::Resolved(snapshot) => {
                if snapshot.is_blocked || !snapshot.is_active {
                    return GateState::Blocked(BlockReason::Administrative);
                }
                if snapshot.subscription_status.grants_access() {
                    GateState::Allowed
                } else {
                    GateState::Blocked(BlockReason::Billing(snapshot.subscription_status))
                }
            }
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, GateState::Allowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(status: SubscriptionStatus) -> AccessSnapshot {
        AccessSnapshot {
            is_active: true,
            is_blocked: false,
            subscription_status: status,
        }
    }

    #[test]
    fn pending_fetch_is_loading() {
        assert_eq!(
            GateState::evaluate(&FetchState::Pending),
            GateState::Loading
        );
    }

    #[test]
    fn rejected_fetch_never_allows() {
        assert_eq!(
            GateState::evaluate(&FetchState::Rejected),
            GateState::Blocked(BlockReason::StatusUnavailable)
        );
    }

    #[test]
    fn active_and_trialing_pass() {
        for status in [SubscriptionStatus::Active, SubscriptionStatus::Trialing] {
            assert_eq!(
                GateState::evaluate(&FetchState::Resolved(snapshot(status))),
                GateState::Allowed
            );
        }
    }

    #[test]
    fn delinquent_statuses_block() {
        for status in [
            SubscriptionStatus::PastDue,
            SubscriptionStatus::PaymentFailed,
            SubscriptionStatus::Canceled,
            SubscriptionStatus::Pending,
        ] {
            assert_eq!(
                GateState::evaluate(&FetchState::Resolved(snapshot(status))),
                GateState::Blocked(BlockReason::Billing(status))
            );
        }
    }

    #[test]
    fn administrative_block_wins_over_healthy_billing() {
        let mut blocked = snapshot(SubscriptionStatus::Active);
        blocked.is_blocked = true;

        assert_eq!(
            GateState::evaluate(&FetchState::Resolved(blocked)),
            GateState::Blocked(BlockReason::Administrative)
        );
    }

    #[test]
    fn administrative_block_wins_over_billing_block() {
        let snapshot = AccessSnapshot {
            is_active: false,
            is_blocked: true,
            subscription_status: SubscriptionStatus::PastDue,
        };

        assert_eq!(
            GateState::evaluate(&FetchState::Resolved(snapshot)),
            GateState::Blocked(BlockReason::Administrative)
        );
    }

    #[test]
    fn deactivated_company_is_administratively_blocked() {
        let mut deactivated = snapshot(SubscriptionStatus::Active);
        deactivated.is_active = false;

        assert_eq!(
            GateState::evaluate(&FetchState::Resolved(deactivated)),
            GateState::Blocked(BlockReason::Administrative)
        );
    }
}
