// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP请求处理器模块
///
/// 每个处理器只做参数提取与响应包装，业务逻辑在对应用例中
pub mod callback_handler;
pub mod generation_handler;
pub mod release_handler;
pub mod social_handler;
