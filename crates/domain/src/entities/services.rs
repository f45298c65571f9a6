use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::services;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = services)]
pub struct ServiceEntity {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price_minor: i32,
    pub duration_minutes: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = services)]
pub struct InsertServiceEntity {
    pub company_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price_minor: i32,
    pub duration_minutes: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = services)]
pub struct UpdateServiceEntity {
    pub name: String,
    pub description: Option<String>,
    pub price_minor: i32,
    pub duration_minutes: i32,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}
