// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::webhook::{WebhookEvent, WebhookStatus};
use crate::domain::repositories::webhook_event_repository::WebhookEventRepository;
use crate::domain::services::alert::AlertService;
use crate::utils::retry_policy::RetryPolicy;
use chrono::Utc;
use futures::StreamExt;
use metrics::{counter, histogram};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{error, info, warn};

const BATCH_SIZE: u64 = 50;
const CONCURRENCY: usize = 10;

/// 告警投递工作器
pub struct WebhookWorker {
    repo: Arc<dyn WebhookEventRepository>,
    sender: Arc<dyn AlertService>,
    policy: RetryPolicy,
    poll_interval: Duration,
}

impl WebhookWorker {
    pub fn new(repo: Arc<dyn WebhookEventRepository>, sender: Arc<dyn AlertService>) -> Self {
        Self {
            repo,
            sender,
            policy: RetryPolicy::alert(),
            poll_interval: Duration::from_secs(5),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 运行告警投递循环
    pub async fn run(&self) {
        info!("Webhook worker started");
        loop {
            if let Err(e) = self.process_pending_webhooks().await {
                error!("Error processing webhooks: {}", e);
            }
            sleep(self.poll_interval).await;
        }
    }

    /// 启动后台运行
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    /// 投递一批待处理事件，返回本批数量
    pub async fn process_pending_webhooks(&self) -> anyhow::Result<usize> {
        let events = self.repo.find_pending(BATCH_SIZE).await?;
        let count = events.len();

        if count == 0 {
            return Ok(0);
        }

        info!("Processing {} pending webhooks", count);

        futures::stream::iter(events)
            .for_each_concurrent(CONCURRENCY, |event| async move {
                if let Err(e) = self.deliver_webhook(event).await {
                    error!("Failed to deliver webhook: {}", e);
                }
            })
            .await;

        Ok(count)
    }

    async fn deliver_webhook(&self, mut event: WebhookEvent) -> anyhow::Result<()> {
        info!("Delivering webhook {} to {}", event.id, event.webhook_url);
        let start = std::time::Instant::now();

        let result = self.sender.send(&event).await;
        histogram!("alert_delivery_duration_seconds").record(start.elapsed().as_secs_f64());

        match result {
            Ok(status) => {
                event.response_status = Some(i32::from(status));
                event.attempt_count += 1;
                event.status = WebhookStatus::Delivered;
                event.delivered_at = Some(Utc::now());
                event.next_retry_at = None;

                self.repo.update(&event).await?;
                counter!("alert_delivery_success_total").increment(1);
                info!("Webhook {} delivered successfully", event.id);
            }
            Err(e) => {
                warn!("Webhook {} delivery failed: {}", event.id, e);
                event.response_status = e.status().map(i32::from);
                event.error_message = Some(e.to_string());
                self.handle_failure(event).await?;
                counter!("alert_delivery_failure_total").increment(1);
            }
        }

        Ok(())
    }

    async fn handle_failure(&self, mut event: WebhookEvent) -> anyhow::Result<()> {
        event.attempt_count += 1;

        if event.attempt_count >= event.max_retries {
            event.status = WebhookStatus::Dead;
            event.next_retry_at = None;
            warn!(
                "Webhook {} moved to dead state after {} attempts",
                event.id, event.attempt_count
            );
        } else {
            event.status = WebhookStatus::Failed;
            let attempt = u32::try_from(event.attempt_count).unwrap_or(1);
            event.next_retry_at = Some(self.policy.next_retry_time(attempt, Utc::now()));
        }

        self.repo.update(&event).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "webhook_worker_test.rs"]
mod tests;
