/// 拡大なしで収める（lfit）デフォルトの最大辺
///
/// 寸法を持たないサイズトークン（sqcrop / sqbox）はこの値にフォールバックする
pub const FALLBACK_DIMENSION: u32 = 2048;

/// オブジェクトキーの最大長（バイト）
pub const MAX_KEY_LENGTH: usize = 1024;

/// 読み取り・アップロード応答に付与する Cache-Control（1年）
pub const CACHE_CONTROL_LONG_TERM: &str = "public, max-age=31536000";

/// TOS に画像処理を指示するクエリパラメータ名
pub const PROCESS_PARAM: &str = "x-tos-process";
