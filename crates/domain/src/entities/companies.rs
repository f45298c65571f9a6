use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::companies;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = companies)]
pub struct CompanyEntity {
    pub id: Uuid,
    pub legal_name: String,
    pub fantasy_name: Option<String>,
    pub tax_document: String,
    pub email: String,
    pub phone: Option<String>,
    pub plan_id: Option<Uuid>,
    pub is_active: bool,
    pub is_blocked: bool,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub subscription_status: String,
    pub asaas_subscription_id: Option<String>,
    pub next_due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = companies)]
pub struct InsertCompanyEntity {
    pub legal_name: String,
    pub fantasy_name: Option<String>,
    pub tax_document: String,
    pub email: String,
    pub phone: Option<String>,
    pub plan_id: Option<Uuid>,
    pub is_active: bool,
    pub is_blocked: bool,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub subscription_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
