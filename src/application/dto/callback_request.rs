// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 上游服务推送的完成通知
///
/// `task_id` 可以是流水线关联ID，也可以是上游分配的任务ID
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CallbackRequestDto {
    #[serde(default)]
    pub task_id: String,
    pub callback_data: Option<Value>,
    pub status: Option<String>,
    pub success: Option<bool>,
    pub error: Option<String>,
}

impl CallbackRequestDto {
    /// 上游是否报告失败
    pub fn is_failure(&self) -> bool {
        let status_failed = self
            .status
            .as_deref()
            .map(|s| s.eq_ignore_ascii_case("failed") || s.eq_ignore_ascii_case("error"))
            .unwrap_or(false);
        status_failed || self.success == Some(false)
    }

    /// 从回调负载中取出字段
    ///
    /// 兼容平铺结构 `{"audio_url": ...}` 与包装结构 `{"data": [{"audio_url": ...}]}`
    pub fn field(&self, key: &str) -> Option<String> {
        let data = self.callback_data.as_ref()?;
        let candidate = if data.get(key).is_some() {
            data
        } else {
            match data.get("data") {
                Some(Value::Array(items)) => items.first()?,
                Some(inner) => inner,
                None => return None,
            }
        };
        candidate.get(key)?.as_str().map(str::to_string)
    }
}

/// 轮询查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct TaskQuery {
    pub task_id: String,
}

/// 回调确认
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackAck {
    pub success: bool,
    pub task_id: String,
    pub status: String,
}
