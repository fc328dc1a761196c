// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::MintingSettings;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// 重试策略配置
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// 最大重试次数（不含首次尝试）
    pub max_retries: u32,
    /// 初始退避时间
    pub initial_backoff: Duration,
    /// 最大退避时间
    pub max_backoff: Duration,
    /// 退避乘数
    pub backoff_multiplier: f64,
    /// 抖动因子 (0.0-1.0)
    pub jitter_factor: f64,
    /// 是否启用指数退避
    pub exponential_backoff: bool,
    /// 是否启用抖动
    pub enable_jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(60),
            backoff_multiplier: 2.0,
            jitter_factor: 0.1,
            exponential_backoff: true,
            enable_jitter: true,
        }
    }
}

impl RetryPolicy {
    /// 铸造重试策略：3 次重试，1s/2s/4s，无抖动
    pub fn mint() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            jitter_factor: 0.0,
            exponential_backoff: true,
            enable_jitter: false,
        }
    }

    /// 告警投递策略（较慢，带抖动）
    pub fn alert() -> Self {
        Self {
            max_retries: 5,
            initial_backoff: Duration::from_secs(2),
            max_backoff: Duration::from_secs(300),
            backoff_multiplier: 2.0,
            jitter_factor: 0.2,
            exponential_backoff: true,
            enable_jitter: true,
        }
    }

    /// 根据配置构建铸造策略
    pub fn from_minting_settings(settings: &MintingSettings) -> Self {
        Self {
            max_retries: settings.max_retries,
            initial_backoff: Duration::from_millis(settings.initial_backoff_ms),
            backoff_multiplier: settings.backoff_multiplier,
            ..Self::mint()
        }
    }

    /// 计算第 `attempt` 次重试前的退避时间（从 1 开始）
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        if !self.exponential_backoff {
            return self.initial_backoff;
        }

        let exponent = attempt.saturating_sub(1) as i32;
        let backoff_secs = self.initial_backoff.as_secs_f64() * self.backoff_multiplier.powi(exponent);

        // 限制最大退避时间
        let capped_backoff = backoff_secs.min(self.max_backoff.as_secs_f64());

        let final_backoff = if self.enable_jitter && self.jitter_factor > 0.0 {
            let jitter_range = capped_backoff * self.jitter_factor;
            let jitter = rand::random_range(-jitter_range..jitter_range);
            (capped_backoff + jitter).max(0.0)
        } else {
            capped_backoff
        };

        Duration::from_secs_f64(final_backoff)
    }

    /// 计算下次重试时间
    pub fn next_retry_time(&self, attempt: u32, base_time: DateTime<Utc>) -> DateTime<Utc> {
        let backoff = self.calculate_backoff(attempt);
        base_time + chrono::Duration::milliseconds(backoff.as_millis() as i64)
    }

    /// 已完成 `retries_done` 次重试后是否还能再试
    pub fn should_retry(&self, retries_done: u32) -> bool {
        retries_done < self.max_retries
    }

    /// 总尝试次数上限
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

/// 瞬时故障关键字
const RETRYABLE_PATTERNS: &[&str] = &[
    "timeout",
    "timed out",
    "network",
    "connection reset",
    "connection refused",
    "rate limit",
    "too many requests",
    "429",
    "502",
    "503",
    "504",
    "simulation failed",
    "invalid account data",
];

/// 按关键字判断错误消息是否为瞬时故障
pub fn is_retryable_message(message: &str) -> bool {
    let message = message.to_lowercase();
    RETRYABLE_PATTERNS.iter().any(|&p| message.contains(p))
}
