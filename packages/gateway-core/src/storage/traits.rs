use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::StorageError;

/// ストレージから取得したオブジェクト
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Bytes,
    pub content_type: Option<String>,
}

/// バケットに対する作成・取得・削除
///
/// バケット名は実装側が保持する
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// オブジェクトを作成または上書きする
    async fn put_object(
        &self,
        key: &str,
        body: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), StorageError>;

    /// オブジェクトを取得する
    ///
    /// `process` が指定された場合、ストレージ側で変換してから返す
    async fn get_object(
        &self,
        key: &str,
        process: Option<&str>,
    ) -> Result<StoredObject, StorageError>;

    async fn delete_object(&self, key: &str) -> Result<(), StorageError>;
}
