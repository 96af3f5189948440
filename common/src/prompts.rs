//! プロンプト生成モジュール
//!
//! CLIと対話セッションで共有されるプロンプト生成ロジック:
//! - TARGET_LANGUAGES: 翻訳先の候補
//! - build_detection_prompt: 言語判定用
//! - build_translation_prompt: 翻訳用
//! - build_vision_prompt: 画像OCR・判定・翻訳用
//!
//! ユーザー入力はそのまま埋め込む（長さ制限・エスケープなし）。

use crate::data_url::InlineImage;
use crate::schema::{detection_schema, translation_schema, vision_schema, ResponseSchema};

/// 翻訳先言語（先頭が既定値）
pub const TARGET_LANGUAGES: &[&str] = &[
    "English",
    "Spanish",
    "French",
    "German",
    "Chinese (Simplified)",
    "Japanese",
    "Korean",
    "Russian",
    "Arabic",
    "Portuguese",
    "Italian",
    "Hindi",
    "Dutch",
    "Turkish",
    "Vietnamese",
];

pub const DEFAULT_TARGET_LANGUAGE: &str = "English";

/// 依頼する処理の種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Detect,
    Translate { target_language: String },
    VisionDetect,
}

/// 使用するモデルの種類
///
/// テキスト判定・翻訳と画像解析では別のモデルを使う
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelRole {
    Text,
    Vision,
}

impl Task {
    pub fn model_role(&self) -> ModelRole {
        match self {
            Task::Detect | Task::Translate { .. } => ModelRole::Text,
            Task::VisionDetect => ModelRole::Vision,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Task::Detect => "detect",
            Task::Translate { .. } => "translate",
            Task::VisionDetect => "vision",
        }
    }
}

/// クライアントに渡す1回分のリクエスト内容
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    pub task: Task,
    pub prompt: String,
    pub schema: ResponseSchema,
    pub image: Option<InlineImage>,
}

impl PromptRequest {
    pub fn model_role(&self) -> ModelRole {
        self.task.model_role()
    }
}

/// 言語判定プロンプト
pub fn build_detection_prompt(text: &str) -> String {
    format!(
        "Analyze the following text and detect its language, dialect, and confidence level. \
         Provide a brief linguistic summary: \"{text}\""
    )
}

/// 翻訳プロンプト
pub fn build_translation_prompt(text: &str, target_language: &str) -> String {
    format!("Translate the following text to {target_language}: \"{text}\"")
}

/// 画像解析プロンプト
///
/// 座標は [ymin, xmin, ymax, xmax]（0〜1000正規化）で返させる
pub fn build_vision_prompt() -> String {
    r#"Analyze the text in this image.
1. OCR the text.
2. Detect the language.
3. Translate each distinct text block to English.
4. Return bounding boxes for each block in [ymin, xmin, ymax, xmax] format (normalized 0-1000).

Return a JSON object with this schema:
{
    "detectedLanguage": "Main language detected",
    "overallConfidence": 0.0 to 1.0,
    "summary": "Brief description of what is in the image (e.g. 'A street sign in Tokyo')",
    "blocks": [
        {
            "box_2d": [ymin, xmin, ymax, xmax],
            "text": "Original text in this block",
            "translatedText": "English translation",
            "language": "Language of this block"
        }
    ]
}"#
    .to_string()
}

/// 言語判定リクエスト
pub fn detection_request(text: &str) -> PromptRequest {
    PromptRequest {
        task: Task::Detect,
        prompt: build_detection_prompt(text),
        schema: detection_schema(),
        image: None,
    }
}

/// 翻訳リクエスト
pub fn translation_request(text: &str, target_language: &str) -> PromptRequest {
    PromptRequest {
        task: Task::Translate {
            target_language: target_language.to_string(),
        },
        prompt: build_translation_prompt(text, target_language),
        schema: translation_schema(),
        image: None,
    }
}

/// 画像解析リクエスト
pub fn vision_request(image: InlineImage) -> PromptRequest {
    PromptRequest {
        task: Task::VisionDetect,
        prompt: build_vision_prompt(),
        schema: vision_schema(),
        image: Some(image),
    }
}
