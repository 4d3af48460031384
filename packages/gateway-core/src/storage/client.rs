use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Method, StatusCode};
use serde::Deserialize;

use crate::constants::PROCESS_PARAM;
use crate::errors::StorageError;
use crate::storage::signer::{
    HEADER_CONTENT_SHA256, HEADER_DATE, SigningRequest, TosSigner, canonical_query_string,
    encode_key_path,
};
use crate::storage::traits::{ObjectStore, StoredObject};

/// TOS 接続設定
#[derive(Clone)]
pub struct TosSettings {
    pub access_key: String,
    pub secret_key: String,
    /// エンドポイントのホスト名（`https://` 等のスキームは省略可）
    pub endpoint: String,
    pub region: String,
    pub bucket: String,
}

impl std::fmt::Debug for TosSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TosSettings")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .finish()
    }
}

/// TOS のエラーレスポンス本文
#[derive(Debug, Deserialize)]
struct TosErrorBody {
    #[serde(rename = "Code")]
    code: Option<String>,
    #[serde(rename = "Message")]
    message: Option<String>,
    #[serde(rename = "RequestId")]
    request_id: Option<String>,
}

/// TOS クライアント
///
/// バーチャルホスト形式（`<bucket>.<endpoint>`）で TOS に直接リクエストを送信し、
/// TOS V4 署名を付与する
#[derive(Clone, Debug)]
pub struct TosClient {
    client: reqwest::Client,
    scheme: String,
    host: String,
    bucket: String,
    signer: TosSigner,
}

impl TosClient {
    /// 新しい TosClient を作成する
    pub fn new(settings: TosSettings) -> Self {
        let (scheme, endpoint) = split_endpoint(&settings.endpoint);
        let host = format!("{}.{}", settings.bucket, endpoint);

        Self {
            client: reqwest::Client::new(),
            scheme: scheme.to_string(),
            host,
            bucket: settings.bucket,
            signer: TosSigner::new(settings.access_key, settings.secret_key, settings.region),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// キーとクエリからリクエスト URL を組み立てる
    pub fn object_url(&self, key: &str, query: &[(&str, &str)]) -> String {
        let path = encode_key_path(key);
        let query = canonical_query_string(query);
        if query.is_empty() {
            format!("{}://{}{}", self.scheme, self.host, path)
        } else {
            format!("{}://{}{}?{}", self.scheme, self.host, path, query)
        }
    }

    /// 署名付きリクエストを送信し、成功以外のステータスを StorageError に変換する
    async fn send(
        &self,
        method: Method,
        key: &str,
        query: &[(&str, &str)],
        body: Bytes,
        content_type: Option<&str>,
    ) -> Result<reqwest::Response, StorageError> {
        let canonical_uri = encode_key_path(key);
        let signed = self.signer.sign(&SigningRequest {
            method: method.as_str(),
            host: &self.host,
            canonical_uri: &canonical_uri,
            query,
            payload: &body,
        });

        let mut request = self
            .client
            .request(method, self.object_url(key, query))
            .header(HEADER_DATE, &signed.date)
            .header(HEADER_CONTENT_SHA256, &signed.content_sha256)
            .header(reqwest::header::AUTHORIZATION, &signed.authorization);
        if let Some(content_type) = content_type {
            request = request.header(CONTENT_TYPE, content_type);
        }
        if !body.is_empty() {
            request = request.body(body);
        }

        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let request_id = header_string(response.headers(), "x-tos-request-id");
        let text = response.text().await.unwrap_or_default();
        Err(error_from_response(key, status, request_id, &text))
    }
}

#[async_trait]
impl ObjectStore for TosClient {
    async fn put_object(
        &self,
        key: &str,
        body: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        tracing::debug!(bucket = %self.bucket, key = %key, size = body.len(), "put object");
        self.send(Method::PUT, key, &[], body, content_type).await?;
        Ok(())
    }

    async fn get_object(
        &self,
        key: &str,
        process: Option<&str>,
    ) -> Result<StoredObject, StorageError> {
        let query: Vec<(&str, &str)> = process.map(|p| (PROCESS_PARAM, p)).into_iter().collect();

        tracing::debug!(bucket = %self.bucket, key = %key, process = ?process, "get object");
        let response = self.send(Method::GET, key, &query, Bytes::new(), None).await?;

        let content_type = header_string(response.headers(), CONTENT_TYPE.as_str());
        let body = response.bytes().await.map_err(map_transport_error)?;

        Ok(StoredObject { body, content_type })
    }

    async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        tracing::debug!(bucket = %self.bucket, key = %key, "delete object");
        self.send(Method::DELETE, key, &[], Bytes::new(), None).await?;
        Ok(())
    }
}

/// `https://host` / `http://host` / `host` を (スキーム, ホスト) に分ける
fn split_endpoint(endpoint: &str) -> (&str, &str) {
    let endpoint = endpoint.trim().trim_end_matches('/');
    if let Some(host) = endpoint.strip_prefix("https://") {
        ("https", host)
    } else if let Some(host) = endpoint.strip_prefix("http://") {
        ("http", host)
    } else {
        ("https", endpoint)
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// 送信前に失敗したものはクライアントエラー、それ以外は不明なエラー
fn map_transport_error(err: reqwest::Error) -> StorageError {
    if err.is_builder() {
        StorageError::Client(err.to_string())
    } else {
        StorageError::Internal(err.to_string())
    }
}

fn error_from_response(
    key: &str,
    status: StatusCode,
    request_id: Option<String>,
    body: &str,
) -> StorageError {
    let parsed: Option<TosErrorBody> = serde_json::from_str(body).ok();
    let code = parsed
        .as_ref()
        .and_then(|b| b.code.clone())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());

    if status == StatusCode::NOT_FOUND && code != "NoSuchBucket" {
        return StorageError::NotFound {
            key: key.to_string(),
        };
    }

    let message = parsed
        .as_ref()
        .and_then(|b| b.message.clone())
        .unwrap_or_else(|| format!("unexpected status: {status}"));
    let request_id = parsed.and_then(|b| b.request_id).or(request_id);

    tracing::warn!(
        key = %key,
        status = %status,
        code = %code,
        request_id = ?request_id,
        "error response from TOS"
    );

    StorageError::Server {
        status: status.as_u16(),
        code,
        message,
        request_id,
    }
}
