use std::net::SocketAddr;

use gateway_core::TosSettings;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_MAX_UPLOAD_SIZE: usize = 100 * 1024 * 1024;
const DEFAULT_PUBLIC_SCHEME: &str = "http";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("failed to load .env: {0}")]
    Dotenv(String),
}

/// `.env` を読み込む。ファイルがない場合のみ無視する
pub fn load_dotenv() -> Result<(), ConfigError> {
    skip_missing_dotenv(dotenvy::dotenv().map(|_| ()))
}

fn skip_missing_dotenv(result: Result<(), dotenvy::Error>) -> Result<(), ConfigError> {
    match result {
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        other => other.map_err(|e| ConfigError::Dotenv(e.to_string())),
    }
}

/// 起動時に一度だけ構築し、AppState 経由でハンドラに渡す設定
#[derive(Clone)]
pub struct Config {
    pub tos: TosSettings,
    pub bearer_token: String,
    pub bind_addr: SocketAddr,
    pub max_upload_size: usize,
    /// X-Forwarded-Proto がない場合に返却 URL で使うスキーム
    pub public_scheme: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("tos", &self.tos)
            .field("bearer_token", &"<redacted>")
            .field("bind_addr", &self.bind_addr)
            .field("max_upload_size", &self.max_upload_size)
            .field("public_scheme", &self.public_scheme)
            .finish()
    }
}

impl Config {
    /// 環境変数から Config を作成する
    ///
    /// 必須の環境変数:
    /// - BYTEPLUS_ACCESS_KEY
    /// - BYTEPLUS_SECRET_KEY
    /// - BYTEPLUS_ENDPOINT
    /// - BYTEPLUS_REGION
    /// - BYTEPLUS_BUCKET
    /// - BEARER_TOKEN
    ///
    /// 任意: BIND_ADDR, MAX_UPLOAD_SIZE, PUBLIC_SCHEME
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の取得関数から Config を作成する
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let tos = TosSettings {
            access_key: required("BYTEPLUS_ACCESS_KEY")?,
            secret_key: required("BYTEPLUS_SECRET_KEY")?,
            endpoint: required("BYTEPLUS_ENDPOINT")?,
            region: required("BYTEPLUS_REGION")?,
            bucket: required("BYTEPLUS_BUCKET")?,
        };
        let bearer_token = required("BEARER_TOKEN")?;

        let bind_addr: SocketAddr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let max_upload_size: usize = match lookup("MAX_UPLOAD_SIZE") {
            Some(value) => value.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    name: "MAX_UPLOAD_SIZE",
                    reason: e.to_string(),
                }
            })?,
            None => DEFAULT_MAX_UPLOAD_SIZE,
        };

        let public_scheme = match lookup("PUBLIC_SCHEME").as_deref().map(str::trim) {
            None | Some("") => DEFAULT_PUBLIC_SCHEME.to_string(),
            Some(scheme @ ("http" | "https")) => scheme.to_string(),
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "PUBLIC_SCHEME",
                    reason: format!("expected http or https, got {other}"),
                });
            }
        };

        Ok(Self {
            tos,
            bearer_token,
            bind_addr,
            max_upload_size,
            public_scheme,
        })
    }
}
