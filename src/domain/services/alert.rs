// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::webhook::WebhookEvent;
use async_trait::async_trait;
use thiserror::Error;

/// 告警投递错误
#[derive(Error, Debug)]
pub enum AlertError {
    #[error("Alert delivery failed with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Alert transport error: {0}")]
    Transport(String),
}

impl AlertError {
    pub fn status(&self) -> Option<u16> {
        match self {
            AlertError::Rejected { status, .. } => Some(*status),
            AlertError::Transport(_) => None,
        }
    }
}

/// 告警投递服务特质
#[async_trait]
pub trait AlertService: Send + Sync {
    /// 投递事件，成功时返回响应状态码
    async fn send(&self, event: &WebhookEvent) -> Result<u16, AlertError>;
}
