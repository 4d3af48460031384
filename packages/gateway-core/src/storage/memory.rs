//! プロセス内で完結する [`ObjectStore`] 実装
//!
//! 画像処理は行わず、受け取った process 指示を記録するだけ。テストやローカル動作確認用

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::StorageError;
use crate::storage::traits::{ObjectStore, StoredObject};

#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<HashMap<String, StoredObject>>,
    last_process: RwLock<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 直近の get_object に渡された process 指示
    pub fn last_process(&self) -> Option<String> {
        self.last_process.read().ok().and_then(|p| p.clone())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects
            .read()
            .map(|objects| objects.contains_key(key))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.objects.read().map(|objects| objects.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Internal(format!("lock poisoned: {e}"))
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put_object(
        &self,
        key: &str,
        body: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        let mut objects = self.objects.write().map_err(poisoned)?;
        objects.insert(
            key.to_string(),
            StoredObject {
                body,
                content_type: content_type.map(str::to_string),
            },
        );
        Ok(())
    }

    async fn get_object(
        &self,
        key: &str,
        process: Option<&str>,
    ) -> Result<StoredObject, StorageError> {
        *self.last_process.write().map_err(poisoned)? = process.map(str::to_string);

        let objects = self.objects.read().map_err(poisoned)?;
        objects.get(key).cloned().ok_or_else(|| StorageError::NotFound {
            key: key.to_string(),
        })
    }

    async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        // TOS と同様、存在しないキーの削除は成功扱い
        self.objects.write().map_err(poisoned)?.remove(key);
        Ok(())
    }
}
