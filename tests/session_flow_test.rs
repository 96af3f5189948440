//! 画面状態とサービスの結合テスト
//!
//! 判定→履歴、クリア後の古い応答の破棄を検証

mod support {
    use async_trait::async_trait;
    use lingua_lens::error::{LinguaError, Result};
    use lingua_lens::gemini::ContentGenerator;
    use lingua_lens_common::PromptRequest;

    /// 入力テキストをそのまま言語名として返すバックエンド
    pub struct EchoGenerator;

    #[async_trait]
    impl ContentGenerator for EchoGenerator {
        async fn generate(&self, _model: &str, request: &PromptRequest) -> Result<String> {
            let text = request
                .prompt
                .rsplit_once(": \"")
                .map(|(_, t)| t.trim_end_matches('"').to_string())
                .ok_or(LinguaError::EmptyResponse)?;
            Ok(serde_json::json!({
                "detectedLanguage": text,
                "isoCode": "xx",
                "confidence": 0.5,
                "isReliable": false,
                "alternatives": [],
                "summary": ""
            })
            .to_string())
        }
    }
}

use lingua_lens::gemini::ModelSet;
use lingua_lens::interactive::history_stamp;
use lingua_lens::service::LanguageService;
use lingua_lens_common::{Applied, RequestKind, Session, HISTORY_LIMIT};
use support::EchoGenerator;

fn service() -> LanguageService<EchoGenerator> {
    LanguageService::new(
        EchoGenerator,
        ModelSet {
            text: "t".into(),
            vision: "v".into(),
        },
    )
}

#[tokio::test]
async fn test_history_most_recent_first_over_many_detections() {
    let service = service();
    let mut session = Session::new();

    for n in 0..14u64 {
        session.input_text = format!("sample {}", n);
        let ticket = session.begin(RequestKind::DetectText).expect("開始できない");
        let outcome = service
            .detect_language(ticket.text())
            .await
            .map_err(|e| e.user_message());
        let stamp = history_stamp(ticket.text(), n as i64, n);
        assert_eq!(session.finish_detection(&ticket, outcome, stamp), Applied::Applied);

        let expected = ((n + 1) as usize).min(HISTORY_LIMIT);
        assert_eq!(session.history().len(), expected);
    }

    let texts: Vec<&str> = session.history().items().iter().map(|i| i.text.as_str()).collect();
    assert_eq!(texts[0], "sample 13");
    assert_eq!(texts[9], "sample 4");
}

#[tokio::test]
async fn test_reply_resolving_after_clear_is_dropped() {
    let service = service();
    let mut session = Session::new();

    session.input_text = "stale".into();
    let ticket = session.begin(RequestKind::DetectText).unwrap();
    let pending = service.detect_language(ticket.text());

    // 応答前にクリア
    session.clear();

    let outcome = pending.await.map_err(|e| e.user_message());
    let applied = session.finish_detection(&ticket, outcome, history_stamp("stale", 0, 0));

    assert_eq!(applied, Applied::Stale);
    assert!(session.detection.is_none());
    assert!(session.history().is_empty());
    assert!(session.input_text.is_empty());
}
