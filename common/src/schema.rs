//! 応答スキーマ定義
//!
//! Gemini の `generationConfig.responseSchema` にそのまま載せる形で
//! 3種類の出力スキーマ（判定・翻訳・画像）を組み立てる。

use serde::Serialize;
use std::collections::BTreeMap;

/// スキーマの型名（Gemini API の Type 列挙）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
}

/// 出力スキーマ
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseSchema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, ResponseSchema>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ResponseSchema>>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl ResponseSchema {
    fn of(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            description: None,
            nullable: false,
            properties: BTreeMap::new(),
            items: None,
            required: Vec::new(),
        }
    }

    pub fn object() -> Self {
        Self::of(SchemaType::Object)
    }

    pub fn string() -> Self {
        Self::of(SchemaType::String)
    }

    pub fn number() -> Self {
        Self::of(SchemaType::Number)
    }

    pub fn integer() -> Self {
        Self::of(SchemaType::Integer)
    }

    pub fn boolean() -> Self {
        Self::of(SchemaType::Boolean)
    }

    pub fn array(items: ResponseSchema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of(SchemaType::Array)
        }
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn property(mut self, name: &str, schema: ResponseSchema) -> Self {
        self.properties.insert(name.to_string(), schema);
        self
    }

    pub fn require(mut self, names: &[&str]) -> Self {
        self.required = names.iter().map(|n| n.to_string()).collect();
        self
    }
}

/// 言語判定スキーマ（dialect以外必須）
pub fn detection_schema() -> ResponseSchema {
    let alternative = ResponseSchema::object()
        .property("language", ResponseSchema::string())
        .property("confidence", ResponseSchema::number());

    ResponseSchema::object()
        .property(
            "detectedLanguage",
            ResponseSchema::string().describe("Full name of the language"),
        )
        .property("isoCode", ResponseSchema::string().describe("ISO 639-1 code"))
        .property(
            "confidence",
            ResponseSchema::number().describe("Value between 0 and 1"),
        )
        .property(
            "dialect",
            ResponseSchema::string()
                .describe("Specific dialect if detectable, otherwise null")
                .nullable(),
        )
        .property(
            "isReliable",
            ResponseSchema::boolean().describe("True if confidence is high"),
        )
        .property("alternatives", ResponseSchema::array(alternative))
        .property(
            "summary",
            ResponseSchema::string()
                .describe("Short context or interesting fact about the detected language/dialect"),
        )
        .require(&[
            "detectedLanguage",
            "isoCode",
            "confidence",
            "isReliable",
            "alternatives",
            "summary",
        ])
}

/// 翻訳スキーマ
pub fn translation_schema() -> ResponseSchema {
    ResponseSchema::object()
        .property("translatedText", ResponseSchema::string())
        .property("targetLanguage", ResponseSchema::string())
        .require(&["translatedText", "targetLanguage"])
}

/// 画像解析スキーマ
pub fn vision_schema() -> ResponseSchema {
    let block = ResponseSchema::object()
        .property("box_2d", ResponseSchema::array(ResponseSchema::integer()))
        .property("text", ResponseSchema::string())
        .property("translatedText", ResponseSchema::string())
        .property("language", ResponseSchema::string());

    ResponseSchema::object()
        .property("detectedLanguage", ResponseSchema::string())
        .property("overallConfidence", ResponseSchema::number())
        .property("summary", ResponseSchema::string())
        .property("blocks", ResponseSchema::array(block))
        .require(&["detectedLanguage", "blocks", "summary"])
}
