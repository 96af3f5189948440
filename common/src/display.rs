//! 表示用の計算
//!
//! - バウンディングボックス → 画像上のオーバーレイ位置（%）
//! - 判定候補の上位表示（最大4件）

use crate::types::{BoundingBox, DetectionResult, BOX_SCALE};

/// 候補表示の最大件数（主判定を含む）
pub const MAX_CANDIDATES: usize = 4;

/// この値を超えると高信頼として表示する
pub const HIGH_CONFIDENCE: f64 = 0.8;

/// 画像に重ねる矩形（画像サイズに対する%）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayRect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl OverlayRect {
    /// 実ピクセル座標 (x, y, w, h) に換算
    pub fn to_pixels(&self, image_width: u32, image_height: u32) -> (u32, u32, u32, u32) {
        let px = |pct: f64, total: u32| ((pct / 100.0) * total as f64).round().max(0.0) as u32;
        (
            px(self.left, image_width),
            px(self.top, image_height),
            px(self.width, image_width),
            px(self.height, image_height),
        )
    }
}

impl BoundingBox {
    /// 正規化座標（0〜1000）をオーバーレイの%に変換
    ///
    /// 値の検証はしない。min > max の場合は幅・高さが負になる。
    pub fn to_overlay(&self) -> OverlayRect {
        let scale = BOX_SCALE as f64;
        let pct = |v: i32| (v as f64 / scale) * 100.0;
        OverlayRect {
            top: pct(self.ymin()),
            left: pct(self.xmin()),
            height: pct(self.ymax() - self.ymin()),
            width: pct(self.xmax() - self.xmin()),
        }
    }
}

/// 判定候補（言語名と%）
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub percent: f64,
}

/// 主判定 + 代替候補を先頭から最大4件
pub fn confidence_candidates(result: &DetectionResult) -> Vec<Candidate> {
    std::iter::once(Candidate {
        name: result.detected_language.clone(),
        percent: result.confidence * 100.0,
    })
    .chain(result.alternatives.iter().map(|alt| Candidate {
        name: alt.language.clone(),
        percent: alt.confidence * 100.0,
    }))
    .take(MAX_CANDIDATES)
    .collect()
}

/// 信頼度の区分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    High,
    Moderate,
}

pub fn confidence_tier(confidence: f64) -> ConfidenceTier {
    if confidence > HIGH_CONFIDENCE {
        ConfidenceTier::High
    } else {
        ConfidenceTier::Moderate
    }
}
