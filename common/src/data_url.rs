//! Data URL の分解
//!
//! "data:image/jpeg;base64,/9j/4AAQ..." からMIMEタイプとBase64部分を取り出す。
//! カンマが無い入力は全体をBase64データとみなす。

use crate::error::{Error, Result};

/// MIMEタイプが読み取れない場合の既定値
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// リクエストにインラインで載せる画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    /// Base64エンコード済みデータ（ヘッダなし）
    pub data: String,
}

/// 分解済みData URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    mime_type: String,
    payload: String,
}

impl DataUrl {
    /// Data URL（またはヘッダなしBase64）を分解
    ///
    /// # Examples
    /// ```
    /// use lingua_lens_common::DataUrl;
    ///
    /// let url = DataUrl::parse("data:image/png;base64,iVBORw0KGgo=").unwrap();
    /// assert_eq!(url.mime_type(), "image/png");
    /// assert_eq!(url.payload(), "iVBORw0KGgo=");
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        let (header, payload) = match input.split_once(',') {
            Some((header, payload)) => (Some(header), payload),
            None => (None, input),
        };

        if payload.is_empty() {
            return Err(Error::InvalidDataUrl("画像データが空です".into()));
        }

        let mime_type = header
            .and_then(|h| h.strip_prefix("data:"))
            .and_then(|h| h.split(';').next())
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_IMAGE_MIME);

        Ok(Self {
            mime_type: mime_type.to_string(),
            payload: payload.to_string(),
        })
    }

    /// Base64エンコード済みデータからData URLを組み立てる
    pub fn from_base64(mime_type: &str, payload: String) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            payload,
        }
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn to_inline_image(&self) -> InlineImage {
        InlineImage {
            mime_type: self.mime_type.clone(),
            data: self.payload.clone(),
        }
    }
}

impl std::fmt::Display for DataUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.payload)
    }
}
