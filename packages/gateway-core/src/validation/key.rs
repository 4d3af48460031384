use crate::constants::MAX_KEY_LENGTH;
use crate::errors::GatewayError;

/// リクエストパスから前後の `/` を取り除いてキーにする
pub fn normalize_key(path: &str) -> &str {
    path.trim_matches('/')
}

/// オブジェクトキーを検証する
/// パストラバーサルと制御文字を拒否する。それ以外の文字はそのまま通す
pub fn validate_key(key: &str) -> Result<(), GatewayError> {
    // 空文字チェック
    if key.is_empty() {
        return Err(GatewayError::Validation("key is empty".to_string()));
    }

    // 長さチェック（1024バイトまで）
    if key.len() > MAX_KEY_LENGTH {
        return Err(GatewayError::Validation(format!(
            "key is too long (max {MAX_KEY_LENGTH})"
        )));
    }

    // パストラバーサル防止（`.` も URL 正規化で消えるため拒否）
    if key.split('/').any(|segment| segment == "." || segment == "..")
        || key.contains("//")
        || key.contains('\\')
    {
        return Err(GatewayError::Validation("path traversal detected".to_string()));
    }

    if key.chars().any(|c| c.is_ascii_control()) {
        return Err(GatewayError::Validation("invalid characters in key".to_string()));
    }

    Ok(())
}
