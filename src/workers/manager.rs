// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::workers::expiration_worker::GenerationExpirationWorker;
use crate::workers::mint_worker::MintWorker;
use crate::workers::webhook_worker::WebhookWorker;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// 工作管理器
///
/// 持有所有后台循环的句柄，收到关闭信号后统一中止。
#[derive(Default)]
pub struct WorkerManager {
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl WorkerManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_mint_worker(&mut self, worker: MintWorker) {
        self.handles.push(("mint", worker.start()));
    }

    pub fn spawn_expiration_worker(&mut self, worker: GenerationExpirationWorker) {
        self.handles.push(("generation_expiration", worker.start()));
    }

    pub fn spawn_webhook_worker(&mut self, worker: WebhookWorker) {
        self.handles.push(("webhook", worker.start()));
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// 中止所有工作器
    ///
    /// 铸造作业中断后保持 running，超过锁超时会被下次启动的工作器重新入队。
    pub fn shutdown(&mut self) {
        info!("Shutting down workers...");
        for (name, handle) in self.handles.drain(..) {
            handle.abort();
            info!(worker = name, "Worker stopped");
        }
        info!("Workers shut down successfully");
    }

    /// 等待关闭信号并关闭工作进程
    pub async fn wait_for_shutdown(&mut self) {
        match signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(err) => error!("Unable to listen for shutdown signal: {}", err),
        }
        self.shutdown();
    }
}

impl Drop for WorkerManager {
    fn drop(&mut self) {
        for (_, handle) in &self.handles {
            handle.abort();
        }
    }
}
