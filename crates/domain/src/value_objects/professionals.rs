use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::professionals::ProfessionalEntity;

#[derive(Debug, Serialize)]
pub struct ProfessionalDto {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ProfessionalEntity> for ProfessionalDto {
    fn from(value: ProfessionalEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            phone: value.phone,
            specialty: value.specialty,
            is_active: value.is_active,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertProfessionalModel {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialty: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfessionalModel {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    pub is_active: bool,
}
