// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::video::Comment;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct LikeRequestDto {
    #[serde(default, alias = "userId")]
    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct CommentRequestDto {
    #[serde(default, alias = "userAddress")]
    #[validate(length(min = 1, message = "user_address is required"))]
    pub user_address: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 2000, message = "content must be 1-2000 characters"))]
    pub content: String,
    #[serde(alias = "parentId")]
    pub parent_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub success: bool,
    pub liked: bool,
    pub like_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayResponse {
    pub success: bool,
    pub play_count: i64,
}

/// 顶层评论及其回复
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentThread {
    #[serde(flatten)]
    pub comment: Comment,
    pub replies: Vec<Comment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<u64>,
}
