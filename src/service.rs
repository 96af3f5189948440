//! 言語判定・翻訳・画像解析の呼び出し
//!
//! プロンプト生成 → モデル呼び出し（1回）→ 応答デコード の薄い合成。
//! 値域の逸脱はエラーにせず警告ログに出す。

use crate::error::Result;
use crate::gemini::{ContentGenerator, ModelSet};
use lingua_lens_common::{
    decode_detection, decode_translation, decode_vision, detection_request, translation_request,
    validate_detection, validate_translation, validate_vision, vision_request, DataUrl,
    DetectionResult, PromptRequest, TranslationResult, VisionDetectionResult, Warning,
};

pub struct LanguageService<G> {
    generator: G,
    models: ModelSet,
}

impl<G: ContentGenerator> LanguageService<G> {
    pub fn new(generator: G, models: ModelSet) -> Self {
        Self { generator, models }
    }

    pub fn models(&self) -> &ModelSet {
        &self.models
    }

    async fn call(&self, request: &PromptRequest) -> Result<String> {
        let model = self.models.for_role(request.model_role());
        self.generator.generate(model, request).await
    }

    /// テキストの言語を判定
    pub async fn detect_language(&self, text: &str) -> Result<DetectionResult> {
        let request = detection_request(text);
        let reply = self.call(&request).await?;
        let result = decode_detection(&reply)?;
        log_warnings("detect", &validate_detection(&result));
        Ok(result)
    }

    /// テキストを指定言語に翻訳
    pub async fn translate_text(&self, text: &str, target_language: &str) -> Result<TranslationResult> {
        let request = translation_request(text, target_language);
        let reply = self.call(&request).await?;
        let result = decode_translation(&reply)?;
        log_warnings("translate", &validate_translation(&result));
        Ok(result)
    }

    /// 画像内のテキストを読み取り、言語判定と英訳を行う
    pub async fn detect_from_image(&self, image: &DataUrl) -> Result<VisionDetectionResult> {
        let request = vision_request(image.to_inline_image());
        let reply = self.call(&request).await?;
        let result = decode_vision(&reply)?;
        log_warnings("vision", &validate_vision(&result));
        Ok(result)
    }
}

fn log_warnings(task: &str, warnings: &[Warning]) {
    for w in warnings {
        log::warn!("[{}] {}", task, w);
    }
}
