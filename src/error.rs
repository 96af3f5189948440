use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinguaError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。GEMINI_API_KEY を設定するか `lingua-lens config --set-api-key YOUR_KEY` を実行してください")]
    MissingApiKey,

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("APIエラー (HTTP {status}): {body}")]
    ApiStatus { status: u16, body: String },

    #[error("APIレスポンスが空です")]
    EmptyResponse,

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("画像以外のファイルは扱えません: {0}")]
    UnsupportedImage(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("対話入力エラー: {0}")]
    Interactive(String),

    #[error(transparent)]
    Common(#[from] lingua_lens_common::Error),
}

impl LinguaError {
    /// 画面に出す1行メッセージ
    ///
    /// 通信・認証・応答形式の失敗を区別せず、エラー自身の説明文を使う
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            "不明なエラーが発生しました".to_string()
        } else {
            message
        }
    }
}

impl From<reqwest::Error> for LinguaError {
    fn from(e: reqwest::Error) -> Self {
        LinguaError::ApiCall(e.to_string())
    }
}

impl From<dialoguer::Error> for LinguaError {
    fn from(e: dialoguer::Error) -> Self {
        LinguaError::Interactive(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinguaError>;
