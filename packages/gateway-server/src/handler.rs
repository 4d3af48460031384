use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use crate::AppState;
use gateway_core::{
    AuthError, CACHE_CONTROL_LONG_TERM, GatewayError, PROCESS_PARAM, StorageError, normalize_key,
    resolve, validate_key, verify_bearer,
};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
const FORWARDED_PROTO: &str = "x-forwarded-proto";

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// オブジェクトを作成・上書きする（キーはリゾルバを通さずそのまま使う）
pub async fn upload(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    authorize(&state, &headers)?;

    let Path(path) = path.map_err(invalid_path)?;
    let key = normalize_key(&path);
    validate_key(key)?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    tracing::info!(key = %key, size = body.len(), "storing object");
    state.store.put_object(key, body, content_type).await?;

    let url = format!("{}://{}/{}", request_scheme(&state, &headers), request_host(&headers), key);

    Ok((
        StatusCode::OK,
        [(header::CACHE_CONTROL, CACHE_CONTROL_LONG_TERM)],
        Json(serde_json::json!({ "url": url })),
    )
        .into_response())
}

/// オブジェクトを取得する
///
/// サイズサフィックス付きのキーは元のキーに読み替え、リサイズ指示をストレージに渡す
pub async fn get_object(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, AppError> {
    // 取得失敗は常に 404
    let Path(path) = path.map_err(|e| AppError::NotFound(e.body_text()))?;
    let key = normalize_key(&path);
    validate_key(key).map_err(|e| AppError::NotFound(e.to_string()))?;

    let parsed = resolve(key);
    let process = parsed.directive().map(|d| d.to_process_string());

    tracing::info!(
        key = %key,
        canonical_key = %parsed.canonical_key,
        process = ?process,
        "fetching object from storage"
    );

    let object = state
        .store
        .get_object(&parsed.canonical_key, process.as_deref())
        .await
        .map_err(|e| {
            tracing::warn!(key = %parsed.canonical_key, error = %e, "read failed");
            AppError::NotFound(e.to_string())
        })?;

    let content_type = object
        .content_type
        .or_else(|| {
            parsed
                .variant
                .as_ref()
                .map(|v| v.extension.content_type().to_string())
        })
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

    let mut response = (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, CACHE_CONTROL_LONG_TERM.to_string()),
        ],
        object.body,
    )
        .into_response();

    if process.is_some() {
        response.headers_mut().insert(
            HeaderName::from_static(PROCESS_PARAM),
            HeaderValue::from_static("true"),
        );
    }

    Ok(response)
}

/// オブジェクトを削除する（キーはそのまま使う）
pub async fn delete_object(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    authorize(&state, &headers)?;

    let Path(path) = path.map_err(invalid_path)?;
    let key = normalize_key(&path);
    validate_key(key)?;

    tracing::info!(key = %key, "deleting object");
    state.store.delete_object(key).await?;

    Ok((StatusCode::OK, Json(serde_json::json!({ "deleted": key }))).into_response())
}

/// デコードできないパスは検証エラーとして扱う
fn invalid_path(err: PathRejection) -> AppError {
    GatewayError::Validation(err.body_text()).into()
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    verify_bearer(value, &*state.bearer_token)
}

fn request_scheme<'a>(state: &'a AppState, headers: &'a HeaderMap) -> &'a str {
    headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(&*state.public_scheme)
}

fn request_host(headers: &HeaderMap) -> &str {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost")
}

#[derive(Debug)]
pub enum AppError {
    Unauthorized(String),
    BadRequest { kind: &'static str, message: String },
    NotFound(String),
    Internal { kind: &'static str, message: String },
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        tracing::warn!(error = %err, "authentication failed");
        AppError::Unauthorized(err.to_string())
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Validation(msg) => {
                tracing::warn!(error = %msg, "validation error");
                AppError::BadRequest {
                    kind: "validation",
                    message: msg,
                }
            }
            GatewayError::Auth(auth_err) => auth_err.into(),
            GatewayError::Storage(storage_err) => storage_err.into(),
        }
    }
}

/// 作成・削除時のストレージエラー変換（取得時は常に 404）
impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        let kind = err.kind();
        match err {
            StorageError::NotFound { key } => {
                tracing::warn!(key = %key, "object not found");
                AppError::NotFound(format!("object not found: {key}"))
            }
            StorageError::Client(msg) => {
                tracing::warn!(error = %msg, "storage client error");
                AppError::BadRequest {
                    kind,
                    message: format!("TOS client error: {msg}"),
                }
            }
            err @ StorageError::Server { .. } => {
                tracing::error!(error = %err, "storage server error");
                AppError::Internal {
                    kind,
                    message: format!("TOS {err}"),
                }
            }
            StorageError::Internal(msg) => {
                tracing::error!(error = %msg, "unknown storage error");
                AppError::Internal {
                    kind,
                    message: format!("Unknown error: {msg}"),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            AppError::BadRequest { kind, message } => (StatusCode::BAD_REQUEST, kind, message),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            AppError::Internal { kind, message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, kind, message)
            }
        };

        let body = serde_json::json!({ "error": kind, "message": message });
        (status, Json(body)).into_response()
    }
}
