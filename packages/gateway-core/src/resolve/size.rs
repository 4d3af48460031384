/// ファイル名サフィックスで指定されるサイズトークン
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeToken {
    Pico,
    Icon,
    Thumb,
    Small,
    Compact,
    Medium,
    Large,
    Grande,
    Square1024,
    Square2048,
    Master,
    FbsBanner,
    SqCrop,
    SqBox,
}

impl SizeToken {
    /// 定義済みの全トークン
    pub const ALL: [SizeToken; 14] = [
        Self::Pico,
        Self::Icon,
        Self::Thumb,
        Self::Small,
        Self::Compact,
        Self::Medium,
        Self::Large,
        Self::Grande,
        Self::Square1024,
        Self::Square2048,
        Self::Master,
        Self::FbsBanner,
        Self::SqCrop,
        Self::SqBox,
    ];

    /// 文字列から SizeToken を作成（大文字小文字を区別する）
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pico" => Some(Self::Pico),
            "icon" => Some(Self::Icon),
            "thumb" => Some(Self::Thumb),
            "small" => Some(Self::Small),
            "compact" => Some(Self::Compact),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            "grande" => Some(Self::Grande),
            "1024x1024" => Some(Self::Square1024),
            "2048x2048" => Some(Self::Square2048),
            "master" => Some(Self::Master),
            "fbsbanner" => Some(Self::FbsBanner),
            "sqcrop" => Some(Self::SqCrop),
            "sqbox" => Some(Self::SqBox),
            _ => None,
        }
    }

    /// キー上の表記
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pico => "pico",
            Self::Icon => "icon",
            Self::Thumb => "thumb",
            Self::Small => "small",
            Self::Compact => "compact",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Grande => "grande",
            Self::Square1024 => "1024x1024",
            Self::Square2048 => "2048x2048",
            Self::Master => "master",
            Self::FbsBanner => "fbsbanner",
            Self::SqCrop => "sqcrop",
            Self::SqBox => "sqbox",
        }
    }

    /// (幅, 高さ) を取得
    ///
    /// sqcrop / sqbox は寸法を持たない。呼び出し側はデフォルト変換にフォールバックする
    pub fn dimension(&self) -> Option<(u32, u32)> {
        match self {
            Self::Pico => Some((16, 16)),
            Self::Icon => Some((32, 32)),
            Self::Thumb => Some((50, 50)),
            Self::Small => Some((100, 100)),
            Self::Compact => Some((160, 160)),
            Self::Medium => Some((240, 240)),
            Self::Large => Some((480, 480)),
            Self::Grande => Some((600, 600)),
            Self::Square1024 => Some((1024, 1024)),
            Self::Square2048 => Some((2048, 2048)),
            Self::Master => Some((2048, 2048)),
            Self::FbsBanner => Some((808, 200)),
            Self::SqCrop | Self::SqBox => None,
        }
    }
}

impl std::fmt::Display for SizeToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 許可された画像拡張子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageExtension {
    Jpg,
    Jpeg,
    Png,
    Gif,
}

impl ImageExtension {
    /// 文字列から ImageExtension を作成（大文字小文字を区別する）
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "jpg" => Some(Self::Jpg),
            "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
        }
    }

    /// Content-Type を取得
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Jpg | Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_token_from_str() {
        assert_eq!(SizeToken::from_str("thumb"), Some(SizeToken::Thumb));
        assert_eq!(SizeToken::from_str("1024x1024"), Some(SizeToken::Square1024));
        assert_eq!(SizeToken::from_str("sqbox"), Some(SizeToken::SqBox));
        // 大文字は一致しない
        assert_eq!(SizeToken::from_str("THUMB"), None);
        assert_eq!(SizeToken::from_str("huge"), None);
    }

    #[test]
    fn test_as_str_is_inverse_of_from_str() {
        for token in SizeToken::ALL {
            assert_eq!(SizeToken::from_str(token.as_str()), Some(token));
        }
    }

    #[test]
    fn test_dimension_table() {
        assert_eq!(SizeToken::Pico.dimension(), Some((16, 16)));
        assert_eq!(SizeToken::Thumb.dimension(), Some((50, 50)));
        assert_eq!(SizeToken::Master.dimension(), Some((2048, 2048)));
        assert_eq!(SizeToken::FbsBanner.dimension(), Some((808, 200)));
    }

    #[test]
    fn test_sentinel_tokens_have_no_dimension() {
        assert_eq!(SizeToken::SqCrop.dimension(), None);
        assert_eq!(SizeToken::SqBox.dimension(), None);
    }

    #[test]
    fn test_image_extension() {
        assert_eq!(ImageExtension::from_str("jpeg"), Some(ImageExtension::Jpeg));
        assert_eq!(ImageExtension::from_str("gif"), Some(ImageExtension::Gif));
        assert_eq!(ImageExtension::from_str("JPG"), None);
        assert_eq!(ImageExtension::from_str("webp"), None);
        assert_eq!(ImageExtension::Jpg.content_type(), "image/jpeg");
        assert_eq!(ImageExtension::Png.content_type(), "image/png");
    }
}
