// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use crate::config::settings::StorageSettings;
use crate::domain::repositories::storage_repository::{StorageError, StorageRepository};

fn join_url(base: &str, key: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        key.trim_start_matches('/')
    )
}

/// S3 对象存储实现
pub struct S3Storage {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3Storage {
    /// 使用静态凭证创建
    pub fn new(
        region: String,
        bucket: String,
        access_key: String,
        secret_key: String,
        endpoint: Option<String>,
        public_base_url: String,
    ) -> Self {
        let credentials =
            aws_sdk_s3::config::Credentials::new(access_key, secret_key, None, None, "static");

        let mut config_builder = aws_sdk_s3::config::Builder::new()
            .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new(region))
            .credentials_provider(credentials);

        if let Some(ep) = endpoint {
            config_builder = config_builder.endpoint_url(ep).force_path_style(true);
        }

        let client = aws_sdk_s3::Client::from_conf(config_builder.build());

        Self {
            client,
            bucket,
            public_base_url,
        }
    }

    /// 使用 AWS 默认凭证链创建
    pub async fn from_env(
        region: String,
        bucket: String,
        endpoint: Option<String>,
        public_base_url: String,
    ) -> Self {
        let shared = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new(region))
            .load()
            .await;

        let mut config_builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(ep) = endpoint {
            config_builder = config_builder.endpoint_url(ep).force_path_style(true);
        }

        Self {
            client: aws_sdk_s3::Client::from_conf(config_builder.build()),
            bucket,
            public_base_url,
        }
    }
}

#[async_trait]
impl StorageRepository for S3Storage {
    async fn put(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data.to_vec()))
            .send()
            .await
            .map_err(|e| StorageError::Other(e.to_string()))?;
        Ok(self.public_url(key))
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => {
                let data = output
                    .body
                    .collect()
                    .await
                    .map_err(|e| StorageError::Other(e.to_string()))?
                    .into_bytes();
                Ok(Some(data.to_vec()))
            }
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_no_such_key() {
                    Ok(None)
                } else {
                    Err(StorageError::Other(service_error.to_string()))
                }
            }
        }
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_not_found() {
                    Ok(false)
                } else {
                    Err(StorageError::Other(service_error.to_string()))
                }
            }
        }
    }

    fn public_url(&self, key: &str) -> String {
        join_url(&self.public_base_url, key)
    }
}

/// 本地文件系统存储实现
pub struct LocalStorage {
    base_path: PathBuf,
    public_base_url: String,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>, public_base_url: String) -> Self {
        Self {
            base_path: base_path.into(),
            public_base_url,
        }
    }

    fn full_path(&self, key: &str) -> PathBuf {
        self.base_path.join(key.trim_start_matches('/'))
    }
}

#[async_trait]
impl StorageRepository for LocalStorage {
    async fn put(
        &self,
        key: &str,
        data: &[u8],
        _content_type: &str,
    ) -> Result<String, StorageError> {
        let full_path = self.full_path(key);

        // 确保目录存在
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(&full_path).await?;
        file.write_all(data).await?;
        file.flush().await?;

        Ok(self.public_url(key))
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(self.full_path(key)).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(Path::new(&self.full_path(key)).exists())
    }

    fn public_url(&self, key: &str) -> String {
        join_url(&self.public_base_url, key)
    }
}

/// 内存存储实现（用于测试）
pub struct InMemoryStorage {
    data: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    public_base_url: String,
}

impl InMemoryStorage {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
            public_base_url: public_base_url.into(),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new("memory://")
    }
}

#[async_trait]
impl StorageRepository for InMemoryStorage {
    async fn put(
        &self,
        key: &str,
        data: &[u8],
        _content_type: &str,
    ) -> Result<String, StorageError> {
        self.data
            .write()
            .await
            .insert(key.to_string(), data.to_vec());
        Ok(self.public_url(key))
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.data.read().await.get(key).cloned())
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.data.read().await.contains_key(key))
    }

    fn public_url(&self, key: &str) -> String {
        join_url(&self.public_base_url, key)
    }
}

/// 存储工厂函数
pub async fn create_storage_repository(
    settings: &StorageSettings,
) -> Result<Arc<dyn StorageRepository>, StorageError> {
    match settings.storage_type.as_str() {
        "local" => {
            let base_path = settings
                .local_path
                .clone()
                .unwrap_or_else(|| "./storage".to_string());
            Ok(Arc::new(LocalStorage::new(
                base_path,
                settings.public_base_url.clone(),
            )))
        }
        "s3" => {
            let region = settings
                .s3_region
                .clone()
                .ok_or_else(|| StorageError::Other("s3_region is required".to_string()))?;
            let bucket = settings
                .s3_bucket
                .clone()
                .ok_or_else(|| StorageError::Other("s3_bucket is required".to_string()))?;

            let storage = match (&settings.s3_access_key, &settings.s3_secret_key) {
                (Some(access_key), Some(secret_key)) => S3Storage::new(
                    region,
                    bucket,
                    access_key.clone(),
                    secret_key.clone(),
                    settings.s3_endpoint.clone(),
                    settings.public_base_url.clone(),
                ),
                _ => {
                    S3Storage::from_env(
                        region,
                        bucket,
                        settings.s3_endpoint.clone(),
                        settings.public_base_url.clone(),
                    )
                    .await
                }
            };
            Ok(Arc::new(storage))
        }
        "memory" => Ok(Arc::new(InMemoryStorage::new(
            settings.public_base_url.clone(),
        ))),
        other => Err(StorageError::Other(format!(
            "Unsupported storage type: {}",
            other
        ))),
    }
}
