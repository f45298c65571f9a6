pub mod clients;
pub mod companies;
pub mod coupons;
pub mod permissions;
pub mod plans;
pub mod professionals;
pub mod services;
pub mod subscriptions;
pub mod support_tickets;
pub mod tasks;
