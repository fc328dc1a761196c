// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 外部协作方的抽象契约：生成服务、链上索引、链上程序与告警投递，
/// 以及流水线关联ID的分配。
pub mod alert;
pub mod chain;
pub mod generation;
pub mod indexer;
pub mod task_id;
