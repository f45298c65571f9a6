use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::coupons;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, PartialEq)]
#[diesel(table_name = coupons)]
pub struct CouponEntity {
    pub id: Uuid,
    pub company_id: Uuid,
    pub code: String,
    pub discount_type: String,
    pub discount_value: i64,
    pub min_order_minor: Option<i64>,
    pub max_discount_minor: Option<i64>,
    pub usage_limit: Option<i32>,
    pub used_count: i32,
    pub valid_until: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = coupons)]
pub struct InsertCouponEntity {
    pub company_id: Uuid,
    pub code: String,
    pub discount_type: String,
    pub discount_value: i64,
    pub min_order_minor: Option<i64>,
    pub max_discount_minor: Option<i64>,
    pub usage_limit: Option<i32>,
    pub used_count: i32,
    pub valid_until: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = coupons)]
pub struct UpdateCouponEntity {
    pub discount_type: String,
    pub discount_value: i64,
    pub min_order_minor: Option<i64>,
    pub max_discount_minor: Option<i64>,
    pub usage_limit: Option<i32>,
    pub valid_until: DateTime<Utc>,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}
