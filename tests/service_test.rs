//! 言語判定サービスのテスト
//!
//! 応答を台本どおりに返すバックエンドで、プロンプト生成→呼び出し→デコードを検証

use async_trait::async_trait;
use lingua_lens::error::{LinguaError, Result};
use lingua_lens::gemini::{ContentGenerator, ModelSet};
use lingua_lens::service::LanguageService;
use lingua_lens_common::{DataUrl, PromptRequest, Task};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// 台本どおりの応答を返すバックエンド
#[derive(Clone, Default)]
struct ScriptedGenerator {
    replies: Arc<Mutex<VecDeque<Result<String>>>>,
    calls: Arc<Mutex<Vec<(String, PromptRequest)>>>,
}

impl ScriptedGenerator {
    fn with_reply(reply: &str) -> Self {
        let g = Self::default();
        g.push(Ok(reply.to_string()));
        g
    }

    fn push(&self, reply: Result<String>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    fn calls(&self) -> Vec<(String, PromptRequest)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn generate(&self, model: &str, request: &PromptRequest) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), request.clone()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LinguaError::EmptyResponse))
    }
}

fn models() -> ModelSet {
    ModelSet {
        text: "text-model".into(),
        vision: "vision-model".into(),
    }
}

fn service(generator: &ScriptedGenerator) -> LanguageService<ScriptedGenerator> {
    LanguageService::new(generator.clone(), models())
}

const FRENCH_REPLY: &str = r#"
{
  "detectedLanguage": "French",
  "isoCode": "fr",
  "confidence": 0.99,
  "dialect": null,
  "isReliable": true,
  "alternatives": [{"language": "Italian", "confidence": 0.01}],
  "summary": "A polite greeting in standard French."
}
"#;

/// フランス語の挨拶 → French / fr / 高信頼
#[tokio::test]
async fn test_detect_french_greeting() {
    let generator = ScriptedGenerator::with_reply(FRENCH_REPLY);
    let result = service(&generator)
        .detect_language("Bonjour, comment allez-vous?")
        .await
        .expect("判定失敗");

    assert_eq!(result.detected_language, "French");
    assert_eq!(result.iso_code, "fr");
    assert!(result.confidence > 0.5);
    assert!((0.0..=1.0).contains(&result.confidence));

    let calls = generator.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "text-model");
    assert_eq!(calls[0].1.task, Task::Detect);
    assert!(calls[0].1.prompt.contains("\"Bonjour, comment allez-vous?\""));
    assert!(calls[0].1.image.is_none());
}

/// 翻訳はテキストモデル・翻訳スキーマ
#[tokio::test]
async fn test_translate_uses_text_model() {
    let generator = ScriptedGenerator::with_reply(
        r#"{"translatedText": "Hello, how are you?", "targetLanguage": "English"}"#,
    );
    let result = service(&generator)
        .translate_text("Bonjour, comment allez-vous?", "English")
        .await
        .expect("翻訳失敗");

    assert_eq!(result.translated_text, "Hello, how are you?");
    assert_eq!(result.target_language, "English");

    let calls = generator.calls();
    assert_eq!(calls[0].0, "text-model");
    assert_eq!(calls[0].1.prompt, "Translate the following text to English: \"Bonjour, comment allez-vous?\"");
    assert_eq!(calls[0].1.schema.required, vec!["translatedText", "targetLanguage"]);
}

/// 画像解析は画像モデル・インライン画像付き
#[tokio::test]
async fn test_vision_uses_vision_model_and_strips_header() {
    let generator = ScriptedGenerator::with_reply(
        r#"{"detectedLanguage":"Japanese","overallConfidence":0.9,"summary":"駅の看板",
            "blocks":[{"box_2d":[0,0,1000,1000],"text":"出口","translatedText":"Exit","language":"Japanese"}]}"#,
    );
    let image = DataUrl::parse("data:image/png;base64,iVBORw0KGgo=").unwrap();
    let result = service(&generator)
        .detect_from_image(&image)
        .await
        .expect("画像解析失敗");

    assert_eq!(result.blocks.len(), 1);
    let rect = result.blocks[0].box_2d.to_overlay();
    assert_eq!((rect.top, rect.left, rect.width, rect.height), (0.0, 0.0, 100.0, 100.0));

    let calls = generator.calls();
    assert_eq!(calls[0].0, "vision-model");
    let inline = calls[0].1.image.as_ref().expect("画像なし");
    assert_eq!(inline.mime_type, "image/png");
    assert_eq!(inline.data, "iVBORw0KGgo=");
}

/// JSONでない応答はデコードエラー
#[tokio::test]
async fn test_non_json_reply_is_decode_error() {
    let generator = ScriptedGenerator::with_reply("```json\n{\"detectedLanguage\": \"French\"}\n```");
    let err = service(&generator).detect_language("Bonjour").await.unwrap_err();

    match err {
        LinguaError::Common(inner) => {
            assert!(matches!(inner, lingua_lens_common::Error::Decode(_)));
        }
        other => panic!("Expected decode error, got {:?}", other),
    }
}

/// 必須項目が欠けた応答は MissingField
#[tokio::test]
async fn test_missing_required_field_rejected() {
    let generator = ScriptedGenerator::with_reply(r#"{"translatedText": "Hello"}"#);
    let err = service(&generator).translate_text("Hola", "English").await.unwrap_err();

    assert!(matches!(
        err,
        LinguaError::Common(lingua_lens_common::Error::MissingField(ref f)) if f == "targetLanguage"
    ));
}

/// 値域外の confidence は警告のみで成功する
#[tokio::test]
async fn test_out_of_range_confidence_still_decodes() {
    let reply = FRENCH_REPLY.replace("0.99", "99");
    let generator = ScriptedGenerator::with_reply(&reply);
    let result = service(&generator).detect_language("Bonjour").await.unwrap();
    assert_eq!(result.confidence, 99.0);
}

/// 通信エラーはそのまま伝播（リトライしない）
#[tokio::test]
async fn test_api_error_propagates_without_retry() {
    let generator = ScriptedGenerator::default();
    generator.push(Err(LinguaError::ApiStatus {
        status: 403,
        body: "API key not valid".into(),
    }));
    generator.push(Ok(FRENCH_REPLY.to_string()));

    let err = service(&generator).detect_language("Bonjour").await.unwrap_err();
    assert!(matches!(err, LinguaError::ApiStatus { status: 403, .. }));
    assert!(err.user_message().contains("API key not valid"));
    assert_eq!(generator.calls().len(), 1);
}
