// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 中间件模块
///
/// 推送回调的签名校验
pub mod callback_signature;
