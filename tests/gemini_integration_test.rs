use lingua_lens::config::{DEFAULT_BASE_URL, DEFAULT_TEXT_MODEL};
use lingua_lens::gemini::{GeminiClient, ModelSet};
use lingua_lens::service::LanguageService;

fn api_key() -> Option<String> {
    match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => Some(key),
        _ => {
            eprintln!("GEMINI_API_KEY not set; skipping integration test");
            None
        }
    }
}

fn service(key: String) -> LanguageService<GeminiClient> {
    let client = GeminiClient::new(key, DEFAULT_BASE_URL, None).expect("client build failed");
    let model = std::env::var("GEMINI_TEXT_MODEL").unwrap_or_else(|_| DEFAULT_TEXT_MODEL.to_string());
    LanguageService::new(
        client,
        ModelSet {
            text: model.clone(),
            vision: model,
        },
    )
}

#[tokio::test]
async fn gemini_detect_integration() {
    let Some(key) = api_key() else {
        return;
    };

    let result = service(key)
        .detect_language("Bonjour, comment allez-vous?")
        .await
        .expect("detect failed");

    assert_eq!(result.iso_code.to_lowercase(), "fr");
    assert!(result.detected_language.contains("French"));
    assert!(result.confidence > 0.5);
}

#[tokio::test]
async fn gemini_translate_integration() {
    let Some(key) = api_key() else {
        return;
    };

    let result = service(key)
        .translate_text("Bonjour", "English")
        .await
        .expect("translate failed");

    assert!(!result.translated_text.is_empty());
    assert!(!result.target_language.is_empty());
}
