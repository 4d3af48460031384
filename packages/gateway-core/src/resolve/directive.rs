use crate::constants::FALLBACK_DIMENSION;
use crate::resolve::size::SizeToken;

/// リサイズモード
///
/// 現状は lfit（アスペクト比を維持して指定領域に収める、拡大なし）のみ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeMode {
    Lfit,
}

impl ResizeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lfit => "m_lfit",
        }
    }
}

/// ストレージ側の画像処理パイプラインへ渡す変換指示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeDirective {
    pub mode: ResizeMode,
    pub width: u32,
    pub height: u32,
}

impl ResizeDirective {
    /// 指定領域に収める lfit 指示を作成
    pub fn fit(width: u32, height: u32) -> Self {
        Self {
            mode: ResizeMode::Lfit,
            width,
            height,
        }
    }

    /// 寸法を持たないトークン用のデフォルト指示
    pub fn fallback() -> Self {
        Self::fit(FALLBACK_DIMENSION, FALLBACK_DIMENSION)
    }

    /// サイズトークンから指示を作成
    ///
    /// sqcrop / sqbox は正方形切り抜きとしては扱わず、fallback と同じになる
    pub fn for_token(token: SizeToken) -> Self {
        match token.dimension() {
            Some((w, h)) => Self::fit(w, h),
            None => Self::fallback(),
        }
    }

    /// TOS の x-tos-process に渡す文字列を生成
    pub fn to_process_string(&self) -> String {
        format!(
            "image/resize,{},w_{},h_{}",
            self.mode.as_str(),
            self.width,
            self.height
        )
    }
}

impl std::fmt::Display for ResizeDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_process_string())
    }
}
