// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施服务模块
///
/// 外部服务的 HTTP 客户端：生成服务、合并服务、链上索引、
/// 链上签名网关与告警投递
pub mod chain_gateway_client;
pub mod indexer_client;
pub mod merge_service_impl;
pub mod music_service_impl;
pub mod upstream;
pub mod video_service_impl;
pub mod webhook_service_impl;
