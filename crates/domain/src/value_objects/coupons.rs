use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::coupons::CouponEntity;
use crate::value_objects::enums::discount_types::DiscountType;

/// Derived status of a coupon. Never stored; precedence is
/// inactive > expired > exhausted > active.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CouponValidity {
    Valid,
    Inactive,
    Expired,
    Exhausted,
    BelowMinimum,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CouponEvaluation {
    pub status: CouponValidity,
    pub discount_minor: Option<i64>,
}

impl CouponEvaluation {
    fn status_only(status: CouponValidity) -> Self {
        Self {
            status,
            discount_minor: None,
        }
    }
}

fn derived_status(coupon: &CouponEntity, now: DateTime<Utc>) -> Option<CouponValidity> {
    if !coupon.is_active {
        return Some(CouponValidity::Inactive);
    }
    if now > coupon.valid_until {
        return Some(CouponValidity::Expired);
    }
    if let Some(limit) = coupon.usage_limit {
        if i64::from(coupon.used_count) >= i64::from(limit) {
            return Some(CouponValidity::Exhausted);
        }
    }
    None
}

/// Evaluates a coupon against the clock and an optional order subtotal.
/// Status precedence runs before the minimum-order check; the discount is
/// only computed for a valid coupon with a known subtotal. Fixed discounts
/// are capped at the subtotal so an order total can never go negative.
pub fn evaluate_coupon(
    coupon: &CouponEntity,
    now: DateTime<Utc>,
    subtotal_minor: Option<i64>,
) -> CouponEvaluation {
    if let Some(status) = derived_status(coupon, now) {
        return CouponEvaluation::status_only(status);
    }

    let Some(subtotal) = subtotal_minor else {
        return CouponEvaluation::status_only(CouponValidity::Valid);
    };

    if let Some(min_order) = coupon.min_order_minor {
        if subtotal < min_order {
            return CouponEvaluation::status_only(CouponValidity::BelowMinimum);
        }
    }

    let discount = match DiscountType::from_str(&coupon.discount_type) {
        Some(DiscountType::Percentage) => {
            let raw = subtotal.saturating_mul(coupon.discount_value) / 100;
            match coupon.max_discount_minor {
                Some(cap) => raw.min(cap),
                None => raw,
            }
        }
        Some(DiscountType::Fixed) => coupon.discount_value.min(subtotal),
        // Unknown type on a stored row: grant nothing rather than guess.
        None => 0,
    };

    CouponEvaluation {
        status: CouponValidity::Valid,
        discount_minor: Some(discount.max(0)),
    }
}

#[derive(Debug, Serialize)]
pub struct CouponDto {
    pub id: Uuid,
    pub code: String,
    pub discount_type: String,
    pub discount_value: i64,
    pub min_order_minor: Option<i64>,
    pub max_discount_minor: Option<i64>,
    pub usage_limit: Option<i32>,
    pub used_count: i32,
    pub valid_until: DateTime<Utc>,
    pub is_active: bool,
    /// Derived at read time, never stored.
    pub status: CouponValidity,
}

impl CouponDto {
    pub fn from_entity(coupon: CouponEntity, now: DateTime<Utc>) -> Self {
        let status = derived_status(&coupon, now).unwrap_or(CouponValidity::Valid);

        Self {
            id: coupon.id,
            code: coupon.code,
            discount_type: coupon.discount_type,
            discount_value: coupon.discount_value,
            min_order_minor: coupon.min_order_minor,
            max_discount_minor: coupon.max_discount_minor,
            usage_limit: coupon.usage_limit,
            used_count: coupon.used_count,
            valid_until: coupon.valid_until,
            is_active: coupon.is_active,
            status,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertCouponModel {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub min_order_minor: Option<i64>,
    pub max_discount_minor: Option<i64>,
    pub usage_limit: Option<i32>,
    pub valid_until: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCouponModel {
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub min_order_minor: Option<i64>,
    pub max_discount_minor: Option<i64>,
    pub usage_limit: Option<i32>,
    pub valid_until: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateCouponRequest {
    pub code: String,
    pub subtotal_minor: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_coupon() -> CouponEntity {
        let now = Utc::now();
        CouponEntity {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            code: "WELCOME10".to_string(),
            discount_type: DiscountType::Percentage.to_string(),
            discount_value: 10,
            min_order_minor: None,
            max_discount_minor: None,
            usage_limit: None,
            used_count: 0,
            valid_until: now + Duration::days(30),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn inactive_wins_over_expired() {
        let mut coupon = sample_coupon();
        coupon.is_active = false;
        coupon.valid_until = Utc::now() - Duration::days(1);

        let evaluation = evaluate_coupon(&coupon, Utc::now(), Some(100));
        assert_eq!(evaluation.status, CouponValidity::Inactive);
        assert_eq!(evaluation.discount_minor, None);
    }

    #[test]
    fn expired_wins_over_exhausted() {
        let mut coupon = sample_coupon();
        coupon.valid_until = Utc::now() - Duration::days(1);
        coupon.usage_limit = Some(1);
        coupon.used_count = 1;

        let evaluation = evaluate_coupon(&coupon, Utc::now(), Some(100));
        assert_eq!(evaluation.status, CouponValidity::Expired);
    }

    #[test]
    fn usage_limit_reached_is_exhausted() {
        let mut coupon = sample_coupon();
        coupon.usage_limit = Some(1);
        coupon.used_count = 1;

        let evaluation = evaluate_coupon(&coupon, Utc::now(), Some(100));
        assert_eq!(evaluation.status, CouponValidity::Exhausted);
    }

    #[test]
    fn status_check_runs_before_minimum_order() {
        let mut coupon = sample_coupon();
        coupon.is_active = false;
        coupon.min_order_minor = Some(1_000);

        let evaluation = evaluate_coupon(&coupon, Utc::now(), Some(100));
        assert_eq!(evaluation.status, CouponValidity::Inactive);
    }

    #[test]
    fn subtotal_below_minimum_yields_no_discount() {
        let mut coupon = sample_coupon();
        coupon.min_order_minor = Some(5_000);

        let evaluation = evaluate_coupon(&coupon, Utc::now(), Some(4_999));
        assert_eq!(evaluation.status, CouponValidity::BelowMinimum);
        assert_eq!(evaluation.discount_minor, None);
    }

    #[test]
    fn percentage_discount_is_capped() {
        let mut coupon = sample_coupon();
        coupon.discount_value = 50;
        coupon.max_discount_minor = Some(20);

        let evaluation = evaluate_coupon(&coupon, Utc::now(), Some(100));
        assert_eq!(evaluation.status, CouponValidity::Valid);
        assert_eq!(evaluation.discount_minor, Some(20));
    }

    #[test]
    fn fixed_discount_is_capped_at_subtotal() {
        let mut coupon = sample_coupon();
        coupon.discount_type = DiscountType::Fixed.to_string();
        coupon.discount_value = 5_000;

        let evaluation = evaluate_coupon(&coupon, Utc::now(), Some(3_000));
        assert_eq!(evaluation.discount_minor, Some(3_000));
    }

    #[test]
    fn without_subtotal_only_status_is_reported() {
        let coupon = sample_coupon();

        let evaluation = evaluate_coupon(&coupon, Utc::now(), None);
        assert_eq!(evaluation.status, CouponValidity::Valid);
        assert_eq!(evaluation.discount_minor, None);
    }
}
