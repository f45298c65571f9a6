use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::services::ServiceEntity;

#[derive(Debug, Serialize)]
pub struct ServiceDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price_minor: i32,
    pub duration_minutes: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ServiceEntity> for ServiceDto {
    fn from(value: ServiceEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            price_minor: value.price_minor,
            duration_minutes: value.duration_minutes,
            is_active: value.is_active,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertServiceModel {
    pub name: String,
    pub description: Option<String>,
    pub price_minor: i32,
    pub duration_minutes: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateServiceModel {
    pub name: String,
    pub description: Option<String>,
    pub price_minor: i32,
    pub duration_minutes: i32,
    pub is_active: bool,
}
