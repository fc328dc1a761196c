// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 用例模块
pub mod callback_use_case;
pub mod errors;
pub mod generation_use_case;
pub mod release_use_case;
pub mod social_use_case;
