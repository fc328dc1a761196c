// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "raw_video")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub task_id: String,
    pub video_task_id: Option<String>,
    pub user_address: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub prompt: String,
    pub style: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub video_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub merged_video_url: Option<String>,
    pub status: String,
    pub is_completed: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub error_message: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
