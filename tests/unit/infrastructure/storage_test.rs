// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 存储后端测试
#[cfg(test)]
mod tests {
    use tunemint::domain::repositories::storage_repository::StorageRepository;
    use tunemint::infrastructure::storage::{InMemoryStorage, LocalStorage};

    #[tokio::test]
    async fn test_local_storage_writes_nested_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost:3000/storage/".to_string());

        let url = storage
            .put("nft-metadata/abc.json", br#"{"name":"Sunset"}"#, "application/json")
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:3000/storage/nft-metadata/abc.json");
        assert!(storage.exists("nft-metadata/abc.json").await.unwrap());
        assert!(dir.path().join("nft-metadata").join("abc.json").exists());
        assert_eq!(
            storage.get("nft-metadata/abc.json").await.unwrap().unwrap(),
            br#"{"name":"Sunset"}"#.to_vec()
        );
    }

    #[tokio::test]
    async fn test_missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let local = LocalStorage::new(dir.path(), "http://localhost".to_string());
        let memory = InMemoryStorage::new("http://localhost");

        assert!(local.get("missing.json").await.unwrap().is_none());
        assert!(!local.exists("missing.json").await.unwrap());
        assert!(memory.get("missing.json").await.unwrap().is_none());
        assert!(!memory.exists("missing.json").await.unwrap());
    }
}
