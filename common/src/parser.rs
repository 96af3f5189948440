//! APIレスポンスパーサー
//!
//! モデルの応答テキストをJSONとして読み、スキーマの必須項目を確認してから
//! 型付きの結果に変換する。
//!
//! - parse_json_reply: JSON構文のみ確認（必須項目は見ない）
//! - check_required: スキーマのrequiredを確認
//! - decode_*: 上記2つ + 型変換

use crate::error::{Error, Result};
use crate::schema::{detection_schema, translation_schema, vision_schema, ResponseSchema};
use crate::types::{DetectionResult, TranslationResult, VisionDetectionResult};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// 値域チェックの警告
///
/// デコード自体は成功させ、呼び出し側でログに出す
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// confidence が 0〜1 の範囲外
    ConfidenceOutOfRange { field: String, value: f64 },
    /// バウンディングボックスの min > max、または 0〜1000 の範囲外
    MalformedBox { block: usize, values: [i32; 4] },
    /// 空文字の必須テキスト
    EmptyField(String),
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::ConfidenceOutOfRange { field, value } => {
                write!(f, "{} out of range [0,1]: {}", field, value)
            }
            Warning::MalformedBox { block, values } => {
                write!(f, "block {} has malformed box_2d {:?}", block, values)
            }
            Warning::EmptyField(field) => write!(f, "{} is empty", field),
        }
    }
}

/// 応答テキストをJSONとして読む
///
/// 前後の空白のみ除去する。```json フェンス付きや途中で切れた応答は
/// エラーになる。必須項目の有無はここでは確認しない。
///
/// # Examples
/// ```
/// use lingua_lens_common::parse_json_reply;
///
/// let value = parse_json_reply("  {\"translatedText\": \"Hi\"}\n").unwrap();
/// assert_eq!(value["translatedText"], "Hi");
/// assert!(parse_json_reply("```json\n{}\n```").is_err());
/// ```
pub fn parse_json_reply(text: &str) -> Result<Value> {
    let value = serde_json::from_str(text.trim())?;
    Ok(value)
}

/// スキーマのrequired項目がすべて存在するか確認
///
/// null は「存在しない」とみなす。確認するのはトップレベルのみ。
pub fn check_required(value: &Value, schema: &ResponseSchema) -> Result<()> {
    let map = value.as_object().ok_or(Error::NotAnObject)?;

    for name in &schema.required {
        match map.get(name) {
            Some(v) if !v.is_null() => {}
            _ => return Err(Error::MissingField(name.clone())),
        }
    }

    Ok(())
}

fn decode_with<T: DeserializeOwned>(text: &str, schema: &ResponseSchema) -> Result<T> {
    let value = parse_json_reply(text)?;
    check_required(&value, schema)?;
    let typed = serde_json::from_value(value)?;
    Ok(typed)
}

/// 言語判定応答をデコード
pub fn decode_detection(text: &str) -> Result<DetectionResult> {
    decode_with(text, &detection_schema())
}

/// 翻訳応答をデコード
pub fn decode_translation(text: &str) -> Result<TranslationResult> {
    decode_with(text, &translation_schema())
}

/// 画像解析応答をデコード
pub fn decode_vision(text: &str) -> Result<VisionDetectionResult> {
    decode_with(text, &vision_schema())
}

fn check_confidence(field: &str, value: f64, warnings: &mut Vec<Warning>) {
    if !(0.0..=1.0).contains(&value) {
        warnings.push(Warning::ConfidenceOutOfRange {
            field: field.to_string(),
            value,
        });
    }
}

/// 言語判定結果の値域チェック
pub fn validate_detection(result: &DetectionResult) -> Vec<Warning> {
    let mut warnings = Vec::new();

    check_confidence("confidence", result.confidence, &mut warnings);
    for (i, alt) in result.alternatives.iter().enumerate() {
        check_confidence(&format!("alternatives[{}].confidence", i), alt.confidence, &mut warnings);
    }

    if result.detected_language.trim().is_empty() {
        warnings.push(Warning::EmptyField("detectedLanguage".into()));
    }

    warnings
}

/// 翻訳結果の値域チェック
pub fn validate_translation(result: &TranslationResult) -> Vec<Warning> {
    if result.target_language.trim().is_empty() {
        vec![Warning::EmptyField("targetLanguage".into())]
    } else {
        Vec::new()
    }
}

/// 画像解析結果の値域チェック
pub fn validate_vision(result: &VisionDetectionResult) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if let Some(conf) = result.overall_confidence {
        check_confidence("overallConfidence", conf, &mut warnings);
    }

    for (i, block) in result.blocks.iter().enumerate() {
        if !block.box_2d.is_well_formed() {
            warnings.push(Warning::MalformedBox {
                block: i,
                values: block.box_2d.0,
            });
        }
    }

    warnings
}
