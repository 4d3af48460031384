use crate::errors::AuthError;

const BEARER_PREFIX: &str = "Bearer ";

/// Authorization ヘッダー値からトークンを取り出す
///
/// `Bearer ` で始まらない場合は MissingHeader。トークン前後の空白は除去する
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    header
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .ok_or(AuthError::MissingHeader)
}

/// Authorization ヘッダーを期待するトークンと照合する
pub fn verify_bearer(header: Option<&str>, expected: &str) -> Result<(), AuthError> {
    let token = bearer_token(header)?;
    if constant_time_eq(token.as_bytes(), expected.as_bytes()) {
        Ok(())
    } else {
        Err(AuthError::InvalidToken)
    }
}

/// 長さ以外の情報をタイミングで漏らさない比較
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0, |acc, (x, y)| acc | (x ^ y)) == 0
}
