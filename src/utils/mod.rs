// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工具模块
///
/// 提供重试策略、HMAC 签名、请求校验和日志初始化
pub mod retry_policy;
pub mod signature;
pub mod telemetry;
pub mod validation;
