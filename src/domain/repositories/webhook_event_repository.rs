// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::webhook::WebhookEvent;
use async_trait::async_trait;
use uuid::Uuid;

/// 告警事件仓库特质
#[async_trait]
pub trait WebhookEventRepository: Send + Sync {
    async fn create(&self, event: &WebhookEvent) -> Result<WebhookEvent, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<WebhookEvent>, RepositoryError>;
    /// 查找待投递或已到重试时间的事件
    async fn find_pending(&self, limit: u64) -> Result<Vec<WebhookEvent>, RepositoryError>;
    async fn update(&self, event: &WebhookEvent) -> Result<WebhookEvent, RepositoryError>;
}
