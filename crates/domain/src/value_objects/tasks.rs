use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::tasks::TaskEntity;
use crate::value_objects::enums::task_statuses::TaskStatus;

#[derive(Debug, Serialize)]
pub struct TaskDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_at: Option<DateTime<Utc>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<TaskEntity> for TaskDto {
    fn from(value: TaskEntity) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            due_at: value.due_at,
            status: value.status,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertTaskModel {
    pub title: String,
    pub description: Option<String>,
    pub due_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskModel {
    pub title: String,
    pub description: Option<String>,
    pub due_at: Option<DateTime<Utc>>,
    pub status: TaskStatus,
}
