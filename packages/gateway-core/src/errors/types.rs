use thiserror::Error;

/// ゲートウェイの統合エラー型
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Bearer 認証エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing or invalid Authorization header")]
    MissingHeader,

    #[error("Invalid token")]
    InvalidToken,
}

/// ストレージアクセスエラー
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    /// リクエストを組み立てられない、または送信前に拒否された
    #[error("client error: {0}")]
    Client(String),

    /// TOS がエラーステータスを返した
    #[error("server error ({status} {code}): {message}")]
    Server {
        status: u16,
        code: String,
        message: String,
        request_id: Option<String>,
    },

    #[error("storage error: {0}")]
    Internal(String),
}

impl StorageError {
    /// エラー種別を表す短いラベル
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Client(_) => "client",
            Self::Server { .. } => "server",
            Self::Internal(_) => "unknown",
        }
    }
}
