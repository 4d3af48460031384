//! TOS V4 リクエスト署名
//!
//! AWS Signature V4 と同じ構造で、アルゴリズム名・ヘッダー接頭辞・スコープ終端が TOS 固有

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "TOS4-HMAC-SHA256";
const SERVICE: &str = "tos";
const SCOPE_TERMINATOR: &str = "request";

pub const HEADER_DATE: &str = "x-tos-date";
pub const HEADER_CONTENT_SHA256: &str = "x-tos-content-sha256";

/// 署名済みリクエストに付与するヘッダー値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub date: String,
    pub content_sha256: String,
    pub authorization: String,
}

/// 署名対象のリクエスト
#[derive(Debug)]
pub struct SigningRequest<'a> {
    pub method: &'a str,
    pub host: &'a str,
    /// パーセントエンコード済みのパス（先頭 `/` を含む）
    pub canonical_uri: &'a str,
    /// エンコード前のクエリパラメータ
    pub query: &'a [(&'a str, &'a str)],
    pub payload: &'a [u8],
}

#[derive(Clone)]
pub struct TosSigner {
    access_key: String,
    secret_key: String,
    region: String,
}

impl std::fmt::Debug for TosSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TosSigner")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("region", &self.region)
            .finish()
    }
}

impl TosSigner {
    pub fn new(access_key: String, secret_key: String, region: String) -> Self {
        Self {
            access_key,
            secret_key,
            region,
        }
    }

    /// 現在時刻で署名する
    pub fn sign(&self, request: &SigningRequest<'_>) -> SignedHeaders {
        self.sign_at(request, Utc::now())
    }

    /// 指定時刻で署名する
    pub fn sign_at(&self, request: &SigningRequest<'_>, now: DateTime<Utc>) -> SignedHeaders {
        let timestamp = now.format("%Y%m%dT%H%M%SZ").to_string();
        let date = now.format("%Y%m%d").to_string();
        let content_sha256 = hex::encode(Sha256::digest(request.payload));

        let signed_header_names = format!("host;{HEADER_CONTENT_SHA256};{HEADER_DATE}");
        let canonical_headers = format!(
            "host:{}\n{HEADER_CONTENT_SHA256}:{content_sha256}\n{HEADER_DATE}:{timestamp}\n",
            request.host
        );

        let canonical_request = format!(
            "{}\n{}\n{}\n{}\n{}\n{}",
            request.method,
            request.canonical_uri,
            canonical_query_string(request.query),
            canonical_headers,
            signed_header_names,
            content_sha256
        );

        let scope = self.credential_scope(&date);
        let string_to_sign = format!(
            "{ALGORITHM}\n{timestamp}\n{scope}\n{}",
            hex::encode(Sha256::digest(canonical_request.as_bytes()))
        );

        let signing_key = self.signing_key(&date);
        let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes()));

        let authorization = format!(
            "{ALGORITHM} Credential={}/{scope}, SignedHeaders={signed_header_names}, Signature={signature}",
            self.access_key
        );

        SignedHeaders {
            date: timestamp,
            content_sha256,
            authorization,
        }
    }

    fn credential_scope(&self, date: &str) -> String {
        format!("{date}/{}/{SERVICE}/{SCOPE_TERMINATOR}", self.region)
    }

    fn signing_key(&self, date: &str) -> Vec<u8> {
        let k_date = hmac_sha256(self.secret_key.as_bytes(), date.as_bytes());
        let k_region = hmac_sha256(&k_date, self.region.as_bytes());
        let k_service = hmac_sha256(&k_region, SERVICE.as_bytes());
        hmac_sha256(&k_service, SCOPE_TERMINATOR.as_bytes())
    }
}

/// キーをセグメントごとにパーセントエンコードし、`/` は残す
pub fn encode_key_path(key: &str) -> String {
    let encoded: Vec<String> = key
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!("/{}", encoded.join("/"))
}

/// ソート済み・エンコード済みのクエリ文字列
pub fn canonical_query_string(query: &[(&str, &str)]) -> String {
    let mut pairs: Vec<(String, String)> = query
        .iter()
        .map(|(k, v)| {
            (
                urlencoding::encode(k).into_owned(),
                urlencoding::encode(v).into_owned(),
            )
        })
        .collect();
    pairs.sort();
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn signer() -> TosSigner {
        TosSigner::new(
            "AKTEST".to_string(),
            "s3cr3t-value".to_string(),
            "ap-southeast-1".to_string(),
        )
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    }

    fn request<'a>(query: &'a [(&'a str, &'a str)]) -> SigningRequest<'a> {
        SigningRequest {
            method: "GET",
            host: "bucket.tos-ap-southeast-1.bytepluses.com",
            canonical_uri: "/products/shoe.jpg",
            query,
            payload: b"",
        }
    }

    #[test]
    fn test_signed_header_values() {
        let signed = signer().sign_at(&request(&[]), fixed_time());
        assert_eq!(signed.date, "20240501T123000Z");
        // 空ペイロードの SHA-256
        assert_eq!(
            signed.content_sha256,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert!(signed.authorization.starts_with(
            "TOS4-HMAC-SHA256 Credential=AKTEST/20240501/ap-southeast-1/tos/request, "
        ));
        assert!(signed
            .authorization
            .contains("SignedHeaders=host;x-tos-content-sha256;x-tos-date, "));
    }

    #[test]
    fn test_signature_is_deterministic() {
        let a = signer().sign_at(&request(&[]), fixed_time());
        let b = signer().sign_at(&request(&[]), fixed_time());
        assert_eq!(a, b);

        let signature = a.authorization.rsplit("Signature=").next().unwrap();
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_signature_covers_query() {
        let plain = signer().sign_at(&request(&[]), fixed_time());
        let processed = signer().sign_at(
            &request(&[("x-tos-process", "image/resize,m_lfit,w_50,h_50")]),
            fixed_time(),
        );
        assert_ne!(plain.authorization, processed.authorization);
    }

    #[test]
    fn test_encode_key_path() {
        assert_eq!(encode_key_path("products/shoe.jpg"), "/products/shoe.jpg");
        assert_eq!(encode_key_path("my dir/a+b.jpg"), "/my%20dir/a%2Bb.jpg");
        assert_eq!(encode_key_path("写真.png"), "/%E5%86%99%E7%9C%9F.png");
    }

    #[test]
    fn test_canonical_query_string() {
        assert_eq!(canonical_query_string(&[]), "");
        assert_eq!(
            canonical_query_string(&[("x-tos-process", "image/resize,m_lfit,w_50,h_50")]),
            "x-tos-process=image%2Fresize%2Cm_lfit%2Cw_50%2Ch_50"
        );
        assert_eq!(canonical_query_string(&[("b", "2"), ("a", "1")]), "a=1&b=2");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", signer());
        assert!(!debug.contains("s3cr3t-value"));
        assert!(debug.contains("<redacted>"));
    }
}
