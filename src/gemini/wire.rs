//! generateContent のリクエスト/レスポンス形式

use lingua_lens_common::{PromptRequest, ResponseSchema};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub(crate) struct GeminiRequest<'a> {
    pub contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
pub(crate) struct Content<'a> {
    pub role: &'static str,
    pub parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
pub(crate) enum Part<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Serialize)]
pub(crate) struct InlineData<'a> {
    #[serde(rename = "mimeType")]
    pub mime_type: &'a str,
    pub data: &'a str,
}

#[derive(Serialize)]
pub(crate) struct GenerationConfig<'a> {
    #[serde(rename = "responseMimeType")]
    pub response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    pub response_schema: &'a ResponseSchema,
}

impl<'a> GeminiRequest<'a> {
    /// プロンプト（＋画像）1件のユーザーメッセージを組み立てる
    pub fn from_prompt(request: &'a PromptRequest) -> Self {
        let mut parts = vec![Part::Text {
            text: &request.prompt,
        }];

        if let Some(image) = &request.image {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: &image.mime_type,
                    data: &image.data,
                },
            });
        }

        Self {
            contents: vec![Content { role: "user", parts }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &request.schema,
            },
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<ResponseContent>,
    #[serde(rename = "finishReason", default)]
    pub finish_reason: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
pub(crate) struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GeminiResponse {
    /// 先頭候補のテキストパートを連結
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates.first()?.finish_reason.as_deref()
    }
}
