pub mod discount_types;
pub mod feature_keys;
pub mod subscription_statuses;
pub mod task_statuses;
pub mod ticket_statuses;
pub mod user_roles;
