use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::companies::CompanyEntity;
use crate::value_objects::access::GateState;
use crate::value_objects::enums::subscription_statuses::SubscriptionStatus;
use crate::value_objects::plans::ProfessionalsLimitInfo;

#[derive(Debug, Serialize)]
pub struct CompanyDto {
    pub id: Uuid,
    pub legal_name: String,
    pub fantasy_name: Option<String>,
    pub tax_document: String,
    pub email: String,
    pub phone: Option<String>,
    pub plan_id: Option<Uuid>,
    pub is_active: bool,
    pub is_blocked: bool,
    pub subscription_status: String,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<CompanyEntity> for CompanyDto {
    fn from(value: CompanyEntity) -> Self {
        Self {
            id: value.id,
            legal_name: value.legal_name,
            fantasy_name: value.fantasy_name,
            tax_document: value.tax_document,
            email: value.email,
            phone: value.phone,
            plan_id: value.plan_id,
            is_active: value.is_active,
            is_blocked: value.is_blocked,
            subscription_status: value.subscription_status,
            trial_ends_at: value.trial_ends_at,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterCompanyModel {
    pub legal_name: String,
    pub fantasy_name: Option<String>,
    pub tax_document: String,
    pub email: String,
    pub phone: Option<String>,
    pub plan_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCompanyStatusModel {
    pub is_active: bool,
    pub is_blocked: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignPlanModel {
    pub plan_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeRequest {
    pub plan_id: Uuid,
}

/// Billing-derived fields written back onto the company row by webhook
/// processing.
#[derive(Debug, Clone, PartialEq)]
pub struct BillingStatusUpdate {
    pub status: SubscriptionStatus,
    pub next_due_date: Option<DateTime<Utc>>,
}

/// Wire shape of `GET /api/v1/company/subscription-status`, preserved
/// verbatim from the interface the frontend consumes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionStatusDto {
    pub is_active: bool,
    pub status: String,
    pub plan_id: Option<Uuid>,
    pub plan_name: Option<String>,
    pub plan_price: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asaas_data: Option<AsaasSummaryDto>,
    pub is_on_trial: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_ends_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AsaasSummaryDto {
    pub status: String,
    pub value: Option<i64>,
    pub cycle: Option<String>,
    pub next_due_date: Option<DateTime<Utc>>,
}

/// Wire shape of `GET /api/v1/company/access`.
#[derive(Debug, Serialize)]
pub struct AccessDto {
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<GateState> for AccessDto {
    fn from(state: GateState) -> Self {
        match state {
            GateState::Loading => Self {
                state: "loading",
                reason: None,
                message: None,
            },
            GateState::Allowed => Self {
                state: "allowed",
                reason: None,
                message: None,
            },
            GateState::Blocked(reason) => Self {
                state: "blocked",
                reason: Some(reason.code()),
                message: Some(reason.message()),
            },
        }
    }
}

/// Wire shape of `GET /api/v1/company/permissions`: the fully resolved map
/// plus the professional-headcount limit for the add-professional action.
#[derive(Debug, Serialize)]
pub struct CompanyPermissionsDto {
    pub permissions: BTreeMap<&'static str, bool>,
    pub professionals_limit: Option<ProfessionalsLimitInfo>,
    pub can_add_professional: bool,
}
