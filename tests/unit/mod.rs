// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 单元测试
///
/// 覆盖配置加载、存储后端与工作器管理
pub mod config;
pub mod infrastructure;
pub mod workers;
