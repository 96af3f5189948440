//! 判定結果の型定義
//!
//! すべてリモートモデルのJSON応答から復元される値:
//! - DetectionResult: テキストの言語判定
//! - TranslationResult: 翻訳
//! - VisionDetectionResult: 画像内テキストのOCR・判定・翻訳

use serde::{Deserialize, Deserializer, Serialize};

/// 言語判定結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub detected_language: String,
    pub iso_code: String,
    /// 0.0〜1.0
    pub confidence: f64,
    #[serde(default)]
    pub dialect: Option<String>,
    pub is_reliable: bool,
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
    pub summary: String,
}

/// 判定候補
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub confidence: f64,
}

/// 翻訳結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub translated_text: String,
    pub target_language: String,
}

/// 画像解析結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionDetectionResult {
    pub detected_language: String,
    #[serde(default)]
    pub overall_confidence: Option<f64>,
    pub summary: String,
    pub blocks: Vec<VisionBlock>,
}

/// 画像内の1テキスト領域
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionBlock {
    #[serde(rename = "box_2d")]
    pub box_2d: BoundingBox,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub translated_text: String,
    #[serde(default)]
    pub language: String,
}

/// バウンディングボックス
///
/// 並びは [ymin, xmin, ymax, xmax]、各値は0〜1000に正規化された座標。
/// モデルの出力形式そのままなので順序を入れ替えないこと。
/// 小数で返ってきた座標は四捨五入して受け付ける。要素数は4固定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct BoundingBox(pub [i32; 4]);

impl<'de> Deserialize<'de> for BoundingBox {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = <[f64; 4]>::deserialize(deserializer)?;
        Ok(Self(raw.map(|v| v.round() as i32)))
    }
}

/// 正規化座標の上限
pub const BOX_SCALE: i32 = 1000;

impl BoundingBox {
    pub fn new(ymin: i32, xmin: i32, ymax: i32, xmax: i32) -> Self {
        Self([ymin, xmin, ymax, xmax])
    }

    pub fn ymin(&self) -> i32 {
        self.0[0]
    }

    pub fn xmin(&self) -> i32 {
        self.0[1]
    }

    pub fn ymax(&self) -> i32 {
        self.0[2]
    }

    pub fn xmax(&self) -> i32 {
        self.0[3]
    }

    /// min <= max かつ 0〜1000 の範囲内か
    pub fn is_well_formed(&self) -> bool {
        let in_range = self.0.iter().all(|v| (0..=BOX_SCALE).contains(v));
        in_range && self.ymin() <= self.ymax() && self.xmin() <= self.xmax()
    }
}
