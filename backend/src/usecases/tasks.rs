use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::usecases::access_gate::{GuardError, TenantGuard};
use domain::{
    entities::tasks::{InsertTaskEntity, UpdateTaskEntity},
    repositories::{companies::CompanyRepository, plans::PlanRepository, tasks::TaskRepository},
    value_objects::{
        enums::{feature_keys::FeatureKey, task_statuses::TaskStatus},
        tasks::{InsertTaskModel, TaskDto, UpdateTaskModel},
    },
};

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("task not found")]
    NotFound,
    #[error("invalid task data: {0}")]
    Validation(String),
    #[error(transparent)]
    Guard(#[from] GuardError),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl TaskError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TaskError::NotFound => StatusCode::NOT_FOUND,
            TaskError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            TaskError::Guard(guard_error) => guard_error.status_code(),
            TaskError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type TaskResult<T> = std::result::Result<T, TaskError>;

/// Tenant to-do list.
pub struct TaskUseCase<T, C, P>
where
    T: TaskRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    task_repo: Arc<T>,
    guard: TenantGuard<C, P>,
}

impl<T, C, P> TaskUseCase<T, C, P>
where
    T: TaskRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    pub fn new(task_repo: Arc<T>, guard: TenantGuard<C, P>) -> Self {
        Self { task_repo, guard }
    }

    pub async fn list(&self, company_id: Uuid) -> TaskResult<Vec<TaskDto>> {
        self.guard.authorize(company_id, FeatureKey::Tasks).await?;

        let tasks = self
            .task_repo
            .list_by_company(company_id)
            .await
            .map_err(|err| {
                error!(%company_id, db_error = ?err, "tasks: failed to list tasks");
                TaskError::Internal(err)
            })?;

        Ok(tasks.into_iter().map(TaskDto::from).collect())
    }

    pub async fn create(&self, company_id: Uuid, insert_task: InsertTaskModel) -> TaskResult<Uuid> {
        self.guard.authorize(company_id, FeatureKey::Tasks).await?;

        if insert_task.title.trim().is_empty() {
            return Err(TaskError::Validation("title is required".into()));
        }

        let now = Utc::now();
        let task_id = self
            .task_repo
            .create(InsertTaskEntity {
                company_id,
                title: insert_task.title,
                description: insert_task.description,
                due_at: insert_task.due_at,
                status: TaskStatus::Pending.to_string(),
                created_at: now,
                updated_at: now,
            })
            .await
            .map_err(|err| {
                error!(%company_id, db_error = ?err, "tasks: failed to create task");
                TaskError::Internal(err)
            })?;

        info!(%company_id, %task_id, "tasks: task created");
        Ok(task_id)
    }

    pub async fn update(
        &self,
        company_id: Uuid,
        task_id: Uuid,
        update_task: UpdateTaskModel,
    ) -> TaskResult<()> {
        self.guard.authorize(company_id, FeatureKey::Tasks).await?;

        if update_task.title.trim().is_empty() {
            return Err(TaskError::Validation("title is required".into()));
        }

        self.task_repo
            .find_by_id(company_id, task_id)
            .await
            .map_err(TaskError::Internal)?
            .ok_or(TaskError::NotFound)?;

        self.task_repo
            .update(
                company_id,
                task_id,
                UpdateTaskEntity {
                    title: update_task.title,
                    description: update_task.description,
                    due_at: update_task.due_at,
                    status: update_task.status.to_string(),
                    updated_at: Utc::now(),
                },
            )
            .await
            .map_err(|err| {
                error!(
                    %company_id,
                    %task_id,
                    db_error = ?err,
                    "tasks: failed to update task"
                );
                TaskError::Internal(err)
            })?;

        Ok(())
    }

    pub async fn delete(&self, company_id: Uuid, task_id: Uuid) -> TaskResult<()> {
        self.guard.authorize(company_id, FeatureKey::Tasks).await?;

        self.task_repo
            .find_by_id(company_id, task_id)
            .await
            .map_err(TaskError::Internal)?
            .ok_or(TaskError::NotFound)?;

        self.task_repo
            .soft_delete(company_id, task_id)
            .await
            .map_err(|err| {
                error!(
                    %company_id,
                    %task_id,
                    db_error = ?err,
                    "tasks: failed to delete task"
                );
                TaskError::Internal(err)
            })?;

        info!(%company_id, %task_id, "tasks: task removed");
        Ok(())
    }
}
