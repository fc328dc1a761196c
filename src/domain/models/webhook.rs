// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 告警事件
///
/// 表示一个待投递到告警地址的通知，包含事件类型、负载、
/// 投递状态和重试信息。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub id: Uuid,
    pub event_type: WebhookEventType,
    pub payload: serde_json::Value,
    /// 投递目标地址
    pub webhook_url: String,
    pub status: WebhookStatus,
    /// 已尝试投递次数
    pub attempt_count: i32,
    pub max_retries: i32,
    /// 最后一次投递的HTTP状态码
    pub response_status: Option<i32>,
    pub error_message: Option<String>,
    pub next_retry_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
}

impl WebhookEvent {
    pub fn new(
        event_type: WebhookEventType,
        payload: serde_json::Value,
        webhook_url: String,
        max_retries: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            payload,
            webhook_url,
            status: WebhookStatus::Pending,
            attempt_count: 0,
            max_retries,
            response_status: None,
            error_message: None,
            next_retry_at: None,
            created_at: Utc::now(),
            delivered_at: None,
        }
    }
}

/// 告警事件类型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEventType {
    /// NFT 铸造终止失败
    MintFailed,
    /// 生成阶段超时或上游失败
    GenerationFailed,
    Custom(String),
}

impl fmt::Display for WebhookEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebhookEventType::MintFailed => write!(f, "mint.failed"),
            WebhookEventType::GenerationFailed => write!(f, "generation.failed"),
            WebhookEventType::Custom(s) => write!(f, "{}", s),
        }
    }
}

impl From<String> for WebhookEventType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "mint.failed" => WebhookEventType::MintFailed,
            "generation.failed" => WebhookEventType::GenerationFailed,
            _ => WebhookEventType::Custom(value),
        }
    }
}

/// 告警投递状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WebhookStatus {
    /// 待投递
    #[default]
    Pending,
    /// 已投递
    Delivered,
    /// 投递失败，等待重试
    Failed,
    /// 超过最大重试次数
    Dead,
}
