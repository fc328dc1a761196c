// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：流水线状态、代币、视频与铸造作业
/// - 仓库接口（repositories）：数据持久化抽象接口
/// - 服务（services）：外部生成服务与链上程序的契约
///
/// 领域层不依赖任何具体实现。
pub mod models;
pub mod repositories;
pub mod services;
