use crate::resolve::directive::ResizeDirective;
use crate::resolve::size::{ImageExtension, SizeToken};

/// サイズ付きキーの分解結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizedVariant {
    /// 先頭のディレクトリ部分（そのまま保持、末尾の `/` や `_` を含む）
    pub base_path: String,
    /// サイズサフィックスを除いた名前
    pub base_name: String,
    pub extension: ImageExtension,
    pub size_token: SizeToken,
    pub directive: ResizeDirective,
}

/// リクエストパスの解決結果
///
/// canonical_key は常にサイズサフィックスを含まない。ストレージに保存されるのはこのキーのみ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    pub canonical_key: String,
    pub variant: Option<SizedVariant>,
}

impl ParsedKey {
    pub fn size_token(&self) -> Option<SizeToken> {
        self.variant.as_ref().map(|v| v.size_token)
    }

    pub fn directive(&self) -> Option<ResizeDirective> {
        self.variant.as_ref().map(|v| v.directive)
    }

    fn literal(path: &str) -> Self {
        Self {
            canonical_key: path.to_string(),
            variant: None,
        }
    }
}

/// パスプレフィックスに許可される文字
fn is_prefix_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '/' | '_' | '-')
}

/// リクエストパスを解決する
///
/// `<prefix><name>_<token>.<ext>` に完全一致する場合のみサイズ付きとして扱う。
/// - ext は最後の `.` 以降、token はその直前の最後の `_` 以降
/// - name は `/` と `_` を含まない空でない部分
/// - prefix は name より前の全体で、英数字と `. / _ -` のみ
///
/// 一致しなければパスをそのままキーとして返す。失敗はしない
pub fn resolve(path: &str) -> ParsedKey {
    match scan(path) {
        Some(variant) => ParsedKey {
            canonical_key: format!(
                "{}{}.{}",
                variant.base_path,
                variant.base_name,
                variant.extension.as_str()
            ),
            variant: Some(variant),
        },
        None => ParsedKey::literal(path),
    }
}

fn scan(path: &str) -> Option<SizedVariant> {
    // 区切り文字はすべて ASCII なので、バイト位置での分割は常に文字境界になる
    let (stem, ext) = path.rsplit_once('.')?;
    let extension = ImageExtension::from_str(ext)?;

    let (head, token) = stem.rsplit_once('_')?;
    let size_token = SizeToken::from_str(token)?;

    let name_start = head.rfind(['/', '_']).map_or(0, |i| i + 1);
    let (base_path, base_name) = head.split_at(name_start);
    if base_name.is_empty() || !base_path.chars().all(is_prefix_char) {
        return None;
    }

    Some(SizedVariant {
        base_path: base_path.to_string(),
        base_name: base_name.to_string(),
        extension,
        size_token,
        directive: ResizeDirective::for_token(size_token),
    })
}
