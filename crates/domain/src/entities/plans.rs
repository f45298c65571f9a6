use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::plans;
use crate::value_objects::plans::PlanPermissions;

#[derive(Debug, Clone, PartialEq)]
pub struct PlanEntity {
    pub id: Uuid,
    pub name: String,
    pub price_minor: i32,
    pub annual_price_minor: Option<i32>,
    pub trial_days: i32,
    pub max_professionals: i32,
    pub permissions: PlanPermissions,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw row used for Diesel queries. Permissions stay as JSON and are parsed
/// into `PlanPermissions`.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = plans)]
pub struct PlanRow {
    pub id: Uuid,
    pub name: String,
    pub price_minor: i32,
    pub annual_price_minor: Option<i32>,
    pub trial_days: i32,
    pub max_professionals: i32,
    pub permissions: serde_json::Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PlanRow> for PlanEntity {
    fn from(value: PlanRow) -> Self {
        let permissions = serde_json::from_value(value.permissions).unwrap_or_default();

        Self {
            id: value.id,
            name: value.name,
            price_minor: value.price_minor,
            annual_price_minor: value.annual_price_minor,
            trial_days: value.trial_days,
            max_professionals: value.max_professionals,
            permissions,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = plans)]
pub struct InsertPlanEntity {
    pub name: String,
    pub price_minor: i32,
    pub annual_price_minor: Option<i32>,
    pub trial_days: i32,
    pub max_professionals: i32,
    pub permissions: serde_json::Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = plans)]
pub struct UpdatePlanEntity {
    pub name: String,
    pub price_minor: i32,
    pub annual_price_minor: Option<i32>,
    pub trial_days: i32,
    pub max_professionals: i32,
    pub permissions: serde_json::Value,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}
