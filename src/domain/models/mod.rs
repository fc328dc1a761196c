// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 生成任务（generation）：音乐与视频生成阶段的流水线状态
/// - 代币（token）：链上代币元数据镜像
/// - 视频（video）：已发布的视频、点赞与评论
/// - 铸造作业（mint_job）：持久化的 NFT 铸造请求
/// - 告警事件（webhook）：终止失败的外部通知
pub mod generation;
pub mod mint_job;
pub mod token;
pub mod video;
pub mod webhook;
