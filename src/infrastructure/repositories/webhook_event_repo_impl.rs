// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::webhook::{WebhookEvent, WebhookStatus};
use crate::domain::repositories::webhook_event_repository::WebhookEventRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::webhook_event::{self, SeaWebhookStatus};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 告警事件仓库实现
#[derive(Clone)]
pub struct WebhookEventRepoImpl {
    db: Arc<DatabaseConnection>,
}

impl WebhookEventRepoImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<WebhookStatus> for SeaWebhookStatus {
    fn from(status: WebhookStatus) -> Self {
        match status {
            WebhookStatus::Pending => SeaWebhookStatus::Pending,
            WebhookStatus::Delivered => SeaWebhookStatus::Delivered,
            WebhookStatus::Failed => SeaWebhookStatus::Failed,
            WebhookStatus::Dead => SeaWebhookStatus::Dead,
        }
    }
}

impl From<SeaWebhookStatus> for WebhookStatus {
    fn from(status: SeaWebhookStatus) -> Self {
        match status {
            SeaWebhookStatus::Pending => WebhookStatus::Pending,
            SeaWebhookStatus::Delivered => WebhookStatus::Delivered,
            SeaWebhookStatus::Failed => WebhookStatus::Failed,
            SeaWebhookStatus::Dead => WebhookStatus::Dead,
        }
    }
}

impl From<webhook_event::Model> for WebhookEvent {
    fn from(model: webhook_event::Model) -> Self {
        Self {
            id: model.id,
            event_type: model.event_type.into(),
            payload: model.payload,
            webhook_url: model.webhook_url,
            status: model.status.into(),
            attempt_count: model.attempt_count,
            max_retries: model.max_retries,
            response_status: model.response_status.map(i32::from),
            // 错误信息只写日志，不落库
            error_message: None,
            next_retry_at: model.next_retry_at.map(Into::into),
            created_at: model.created_at.into(),
            delivered_at: model.delivered_at.map(Into::into),
        }
    }
}

fn to_fixed(value: DateTime<Utc>) -> DateTime<FixedOffset> {
    value.into()
}

#[async_trait]
impl WebhookEventRepository for WebhookEventRepoImpl {
    async fn create(&self, event: &WebhookEvent) -> Result<WebhookEvent, RepositoryError> {
        let active_model = webhook_event::ActiveModel {
            id: Set(event.id),
            event_type: Set(event.event_type.to_string()),
            status: Set(event.status.into()),
            payload: Set(event.payload.clone()),
            webhook_url: Set(event.webhook_url.clone()),
            response_status: Set(event.response_status.map(|s| s as i16)),
            attempt_count: Set(event.attempt_count),
            max_retries: Set(event.max_retries),
            next_retry_at: Set(event.next_retry_at.map(to_fixed)),
            created_at: Set(to_fixed(event.created_at)),
            delivered_at: Set(event.delivered_at.map(to_fixed)),
        };

        let model = active_model.insert(self.db.as_ref()).await?;
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<WebhookEvent>, RepositoryError> {
        let model = webhook_event::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_pending(&self, limit: u64) -> Result<Vec<WebhookEvent>, RepositoryError> {
        let now = to_fixed(Utc::now());

        let models = webhook_event::Entity::find()
            .filter(
                Condition::any()
                    .add(webhook_event::Column::Status.eq(SeaWebhookStatus::Pending))
                    .add(
                        Condition::all()
                            .add(webhook_event::Column::Status.eq(SeaWebhookStatus::Failed))
                            .add(webhook_event::Column::NextRetryAt.lte(now)),
                    ),
            )
            .order_by_asc(webhook_event::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, event: &WebhookEvent) -> Result<WebhookEvent, RepositoryError> {
        let mut active: webhook_event::ActiveModel = webhook_event::Entity::find_by_id(event.id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?
            .into();

        active.status = Set(event.status.into());
        active.attempt_count = Set(event.attempt_count);
        active.next_retry_at = Set(event.next_retry_at.map(to_fixed));
        active.delivered_at = Set(event.delivered_at.map(to_fixed));
        active.response_status = Set(event.response_status.map(|s| s as i16));

        let updated = active.update(self.db.as_ref()).await?;
        Ok(updated.into())
    }
}
