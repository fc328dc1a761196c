// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 存储错误
    #[error("Storage error: {0}")]
    Other(String),
}

/// 存储仓库特质
///
/// S3 兼容的对象存储接口
#[async_trait]
pub trait StorageRepository: Send + Sync {
    /// 写入对象并返回可公开访问的地址
    async fn put(&self, key: &str, data: &[u8], content_type: &str)
        -> Result<String, StorageError>;

    /// 根据键读取对象
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// 检查对象是否存在
    async fn exists(&self, key: &str) -> Result<bool, StorageError>;

    /// 对象的公开地址
    fn public_url(&self, key: &str) -> String;
}
