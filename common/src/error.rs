//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 応答テキストがJSONとして読めない、または型が合わない
    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// スキーマで必須とした項目が応答に無い
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Response is not a JSON object")]
    NotAnObject,

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),
}

impl Error {
    /// 応答のデコード段階で発生したエラーか
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode(_) | Error::MissingField(_) | Error::NotAnObject)
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
