//! Gemini API連携
//!
//! 1回の呼び出しにつき1リクエスト。リトライ・バックオフはしない。
//! タイムアウトは設定された場合のみ付ける。

mod wire;

use crate::config::Config;
use crate::error::{LinguaError, Result};
use async_trait::async_trait;
use lingua_lens_common::{ModelRole, PromptRequest};
use std::time::Duration;
use wire::{GeminiRequest, GeminiResponse};

/// JSON応答テキストを生成するバックエンド
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// 指定モデルに1回問い合わせ、応答テキストをそのまま返す
    async fn generate(&self, model: &str, request: &PromptRequest) -> Result<String>;
}

/// モデル名の対応
#[derive(Debug, Clone)]
pub struct ModelSet {
    pub text: String,
    pub vision: String,
}

impl ModelSet {
    pub fn from_config(config: &Config) -> Self {
        Self {
            text: config.text_model.clone(),
            vision: config.vision_model.clone(),
        }
    }

    pub fn for_role(&self, role: ModelRole) -> &str {
        match role {
            ModelRole::Text => &self.text,
            ModelRole::Vision => &self.vision,
        }
    }
}

/// Gemini REST クライアント
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.get_api_key()?, &config.base_url, config.timeout())
    }

    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn generate(&self, model: &str, request: &PromptRequest) -> Result<String> {
        let body = GeminiRequest::from_prompt(request);

        log::debug!(
            "generateContent: model={} task={} prompt={} chars image={}",
            model,
            request.task.label(),
            request.prompt.chars().count(),
            request.image.as_ref().map(|i| i.mime_type.as_str()).unwrap_or("none"),
        );

        let response = self
            .http
            .post(self.endpoint(model))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("generateContent failed: HTTP {}", status.as_u16());
            return Err(LinguaError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GeminiResponse = response.json().await?;
        let finish_reason = payload.finish_reason().map(str::to_string);
        let text = payload.text().ok_or(LinguaError::EmptyResponse)?;

        log::debug!(
            "generateContent: {} chars (finishReason={})",
            text.len(),
            finish_reason.as_deref().unwrap_or("-"),
        );

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let client = GeminiClient::new("k".into(), "https://example.test/v1beta/", None).unwrap();
        assert_eq!(
            client.endpoint("gemini-2.0-flash-001"),
            "https://example.test/v1beta/models/gemini-2.0-flash-001:generateContent"
        );
    }

    #[test]
    fn test_model_set_for_role() {
        let models = ModelSet::from_config(&Config::default());
        assert_eq!(models.for_role(ModelRole::Text), "gemini-3-flash-preview");
        assert_eq!(models.for_role(ModelRole::Vision), "gemini-2.0-flash-001");
    }
}
