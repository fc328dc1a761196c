// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod callback_test;
pub mod generation_test;
pub mod health_check;
pub mod helpers;
pub mod pipeline_scenario_test;
pub mod release_test;
pub mod social_test;
