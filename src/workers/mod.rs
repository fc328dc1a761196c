// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 与 HTTP 服务运行在同一进程内的后台循环：
/// 铸造发件箱消费、生成任务超时、告警投递。
pub mod expiration_worker;
pub mod manager;
pub mod mint_worker;
pub mod webhook_worker;

pub use manager::WorkerManager;
